//! Per-action spy configuration
//!
//! Actions opt into the spy by attaching a [`SpyConfig`] block. Every field
//! is optional and independently defaulted: a missing or malformed field
//! falls back to its default instead of failing the dispatch.
//!
//! Because configuration may arrive from untyped sources (deserialized
//! actions, scripting layers), raw field values are modeled as the
//! [`SpyValue`] tagged union rather than as concrete types. The interceptor
//! validates each field against its expected [`FieldKind`](crate::validate::FieldKind)
//! before use.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::action::Action;
use crate::interceptor::{Dispatch, Next};

/// Custom reaction invoked instead of the default log line.
///
/// Receives the flagged copy of the action plus the `next` and `dispatch`
/// collaborators. Forwarding is the reaction's responsibility: a reaction
/// that calls neither halts the chain for this action.
pub type Reaction = Arc<dyn for<'a> Fn(Action, Next<'a>, Dispatch<'a>)>;

/// Handler invoked when a configuration field fails validation.
///
/// Receives the offending field's name, the untouched action, and the
/// `next`/`dispatch` collaborators. Once invoked, the handler fully owns
/// the dispatch: the interceptor stops processing the action.
pub type InvalidInputHandler = Arc<dyn for<'a> Fn(&str, &Action, Next<'a>, Dispatch<'a>)>;

/// A raw configuration value before validation.
///
/// This is the tagged-union rendition of the duck-typed values a spy block
/// may carry. `Absent` stands for a missing field and always validates
/// (the field takes its default).
#[derive(Clone, Default)]
pub enum SpyValue {
    /// Field not provided; the default applies.
    #[default]
    Absent,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Map(Map<String, Value>),
    /// A custom log reaction.
    Reaction(Reaction),
    /// An invalid-input handler.
    Handler(InvalidInputHandler),
}

impl SpyValue {
    /// Wrap a closure as a log reaction value.
    pub fn reaction<F>(f: F) -> Self
    where
        F: for<'a> Fn(Action, Next<'a>, Dispatch<'a>) + 'static,
    {
        SpyValue::Reaction(Arc::new(f))
    }

    /// Wrap a closure as an invalid-input handler value.
    pub fn handler<F>(f: F) -> Self
    where
        F: for<'a> Fn(&str, &Action, Next<'a>, Dispatch<'a>) + 'static,
    {
        SpyValue::Handler(Arc::new(f))
    }

    /// Name of the value's kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            SpyValue::Absent => "absent",
            SpyValue::Bool(_) => "boolean",
            SpyValue::Number(_) => "number",
            SpyValue::Text(_) => "string",
            SpyValue::List(_) => "array",
            SpyValue::Map(_) => "object",
            SpyValue::Reaction(_) | SpyValue::Handler(_) => "function",
        }
    }

    /// Whether the field was left unset.
    pub fn is_absent(&self) -> bool {
        matches!(self, SpyValue::Absent)
    }
}

impl fmt::Debug for SpyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpyValue::Absent => write!(f, "Absent"),
            SpyValue::Bool(b) => write!(f, "Bool({b})"),
            SpyValue::Number(n) => write!(f, "Number({n})"),
            SpyValue::Text(s) => write!(f, "Text({s:?})"),
            SpyValue::List(v) => f.debug_tuple("List").field(v).finish(),
            SpyValue::Map(m) => f.debug_tuple("Map").field(m).finish(),
            SpyValue::Reaction(_) => write!(f, "Reaction(<fn>)"),
            SpyValue::Handler(_) => write!(f, "Handler(<fn>)"),
        }
    }
}

impl From<bool> for SpyValue {
    fn from(value: bool) -> Self {
        SpyValue::Bool(value)
    }
}

impl From<f64> for SpyValue {
    fn from(value: f64) -> Self {
        SpyValue::Number(value)
    }
}

impl From<i64> for SpyValue {
    fn from(value: i64) -> Self {
        SpyValue::Number(value as f64)
    }
}

impl From<&str> for SpyValue {
    fn from(value: &str) -> Self {
        SpyValue::Text(value.to_string())
    }
}

impl From<String> for SpyValue {
    fn from(value: String) -> Self {
        SpyValue::Text(value)
    }
}

impl From<Value> for SpyValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SpyValue::Absent,
            Value::Bool(b) => SpyValue::Bool(b),
            Value::Number(n) => n.as_f64().map(SpyValue::Number).unwrap_or(SpyValue::Absent),
            Value::String(s) => SpyValue::Text(s),
            Value::Array(v) => SpyValue::List(v),
            Value::Object(m) => SpyValue::Map(m),
        }
    }
}

/// Spy configuration attached to an action.
///
/// All fields default to unset, which resolves to: no logging, no custom
/// reaction, no invalid-input handler, diagnostics enabled, first pass.
///
/// The builder methods cover well-formed configuration; the fields are
/// public so callers holding raw values (or deliberately malformed ones)
/// can set them directly.
///
/// # Example
/// ```ignore
/// let config = SpyConfig::new()
///     .log(true)
///     .on_log(|action, next, _dispatch| {
///         println!("a new action was logged: {}", action.kind);
///         next(action);
///     });
/// ```
#[derive(Clone, Debug, Default)]
pub struct SpyConfig {
    /// Whether to perform the log/reaction side effect. Boolean expected.
    pub log: SpyValue,
    /// Custom reaction replacing the default log line. Function expected.
    pub on_log: SpyValue,
    /// Handler for validation failures. Function expected.
    pub on_invalid_input: SpyValue,
    /// Suppress diagnostic output on validation failure. Boolean expected.
    pub silent_crash: SpyValue,
    /// Re-entrancy guard. Never set this on a fresh action: the interceptor
    /// writes it onto the copy it forwards, so a second pass through the
    /// same chain skips the side effect. Boolean expected.
    pub skip: SpyValue,
}

impl SpyConfig {
    /// Create an empty configuration; every field takes its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the `log` field.
    pub fn log(mut self, value: impl Into<SpyValue>) -> Self {
        self.log = value.into();
        self
    }

    /// Set a custom log reaction.
    pub fn on_log<F>(mut self, reaction: F) -> Self
    where
        F: for<'a> Fn(Action, Next<'a>, Dispatch<'a>) + 'static,
    {
        self.on_log = SpyValue::reaction(reaction);
        self
    }

    /// Set an invalid-input handler.
    pub fn on_invalid_input<F>(mut self, handler: F) -> Self
    where
        F: for<'a> Fn(&str, &Action, Next<'a>, Dispatch<'a>) + 'static,
    {
        self.on_invalid_input = SpyValue::handler(handler);
        self
    }

    /// Set the `silent_crash` field.
    pub fn silent_crash(mut self, value: impl Into<SpyValue>) -> Self {
        self.silent_crash = value.into();
        self
    }

    /// Set the `skip` field.
    pub fn skip(mut self, value: impl Into<SpyValue>) -> Self {
        self.skip = value.into();
        self
    }
}
