//! The spy interceptor
//!
//! [`Spy`] sits in a linear chain of interceptors. For each action it either
//! forwards unchanged (no config, or re-entry), performs the configured
//! log/reaction side effect, or delegates to the action's invalid-input
//! handler. It never mutates the action it was given: the re-entrancy flag
//! is written onto a copy.
//!
//! # Example
//! ```ignore
//! let pipeline = Pipeline::new(|action| reduce(action)).with(Spy::new());
//!
//! pipeline.dispatch(
//!     Action::new("SOME_ACTION_TYPE")
//!         .with_payload(json!("test"))
//!         .with_spy(SpyConfig::new().log(true).on_log(|action, next, _dispatch| {
//!             println!("a new action was logged: {}", action.kind);
//!             next(action);
//!         })),
//! );
//! ```

use crate::action::Action;
use crate::config::{InvalidInputHandler, Reaction, SpyValue};
use crate::journal::{Journal, JournalConfig};
use crate::validate::{conforms, FieldKind};

/// Forwards an action to the next handler in the chain.
pub type Next<'a> = &'a mut dyn FnMut(Action);

/// Re-enters the pipeline from the top.
pub type Dispatch<'a> = &'a mut dyn FnMut(Action);

/// A handler in the dispatch chain.
///
/// Each interceptor receives the action together with the `next` and
/// `dispatch` collaborators and decides whether and how the action
/// continues. Interception runs by shared reference; implementations
/// needing state use interior mutability (the model is single-threaded).
pub trait Interceptor {
    fn intercept<'a>(&self, action: Action, next: Next<'a>, dispatch: Dispatch<'a>);
}

/// Closures with the interceptor shape are interceptors.
impl<F> Interceptor for F
where
    F: for<'a> Fn(Action, Next<'a>, Dispatch<'a>),
{
    fn intercept<'a>(&self, action: Action, next: Next<'a>, dispatch: Dispatch<'a>) {
        self(action, next, dispatch)
    }
}

/// Outcome of validating one configuration field.
enum Verdict {
    /// Value conforms; resolve and continue.
    Pass,
    /// Value is invalid and no handler is set; use the default and continue.
    Fallback,
    /// Value is invalid and the handler was invoked; stop processing.
    Abort,
}

/// Logging interceptor driven by per-action [`SpyConfig`](crate::SpyConfig).
///
/// Diagnostics and default log lines go through `tracing`. With a journal
/// attached, the same lines are also captured in memory for inspection:
///
/// ```ignore
/// let spy = Spy::with_default_journal();
/// // ... dispatch ...
/// if let Some(journal) = spy.journal() {
///     for entry in journal.recent(10) {
///         println!("{}", entry.line);
///     }
/// }
/// ```
pub struct Spy {
    /// Tag used in diagnostic lines.
    name: &'static str,
    journal: Option<Journal>,
}

impl Default for Spy {
    fn default() -> Self {
        Self::new()
    }
}

impl Spy {
    /// Create a spy that emits through `tracing` only.
    pub fn new() -> Self {
        Self {
            name: "Spy",
            journal: None,
        }
    }

    /// Create a spy that also captures output in an in-memory journal.
    pub fn with_journal(config: JournalConfig) -> Self {
        Self {
            name: "Spy",
            journal: Some(Journal::new(config)),
        }
    }

    /// Create a spy with a default-capacity journal.
    pub fn with_default_journal() -> Self {
        Self::with_journal(JournalConfig::default())
    }

    /// Override the tag used in diagnostic lines.
    pub fn named(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// The journal, if one is attached.
    pub fn journal(&self) -> Option<&Journal> {
        self.journal.as_ref()
    }

    /// Emit an output line through tracing and the journal.
    fn emit(&self, line: String) {
        tracing::debug!("{line}");
        if let Some(journal) = &self.journal {
            journal.record(line);
        }
    }

    /// Report an invalid field, unless diagnostics are suppressed.
    fn report(&self, suppressed: bool, field: &str, kind: FieldKind, got: &SpyValue, action: &Action) {
        if suppressed {
            return;
        }
        let line = format!("[{}] {} is invalid - {} expected.", self.name, field, kind.expected());
        tracing::warn!(action = ?action, got = got.kind_name(), "{line}");
        if let Some(journal) = &self.journal {
            journal.record(line);
        }
    }

    /// Validate one field. Invalid values are reported, then either handed
    /// to the handler (which takes over the dispatch) or defaulted.
    #[allow(clippy::too_many_arguments)]
    fn validate_field<'a>(
        &self,
        value: &SpyValue,
        field: &'static str,
        kind: FieldKind,
        silent_crash: bool,
        handler: Option<&InvalidInputHandler>,
        action: &Action,
        next: Next<'a>,
        dispatch: Dispatch<'a>,
    ) -> Verdict {
        if conforms(value, kind) {
            return Verdict::Pass;
        }
        self.report(silent_crash, field, kind, value, action);
        match handler {
            Some(handler) => {
                handler(field, action, next, dispatch);
                Verdict::Abort
            }
            None => Verdict::Fallback,
        }
    }
}

impl Interceptor for Spy {
    fn intercept<'a>(&self, action: Action, next: Next<'a>, dispatch: Dispatch<'a>) {
        // No config block: this interceptor does not apply.
        let Some(config) = action.spy.clone() else {
            next(action);
            return;
        };

        // silent_crash gates the remaining diagnostics, so it goes first.
        // Its own failure is never suppressed.
        let silent_crash = match &config.silent_crash {
            SpyValue::Absent => false,
            SpyValue::Bool(b) => *b,
            other => {
                self.report(false, "silent_crash", FieldKind::Bool, other, &action);
                if let SpyValue::Handler(handler) = &config.on_invalid_input {
                    handler("silent_crash", &action, next, dispatch);
                    return;
                }
                false
            }
        };

        // The handler cannot police itself: an invalid handler resets to none.
        let handler: Option<&InvalidInputHandler> = match &config.on_invalid_input {
            SpyValue::Absent => None,
            SpyValue::Handler(handler) => Some(handler),
            other => {
                self.report(silent_crash, "on_invalid_input", FieldKind::Handler, other, &action);
                None
            }
        };

        // Each validation gets fresh short-lived views of the collaborators,
        // so the originals stay usable for the following steps.
        let verdict = {
            let mut forward = |a: Action| next(a);
            let mut redispatch = |a: Action| dispatch(a);
            self.validate_field(
                &config.log,
                "log",
                FieldKind::Bool,
                silent_crash,
                handler,
                &action,
                &mut forward,
                &mut redispatch,
            )
        };
        let log = match verdict {
            Verdict::Abort => return,
            Verdict::Fallback => false,
            Verdict::Pass => matches!(config.log, SpyValue::Bool(true)),
        };

        let verdict = {
            let mut forward = |a: Action| next(a);
            let mut redispatch = |a: Action| dispatch(a);
            self.validate_field(
                &config.on_log,
                "on_log",
                FieldKind::Reaction,
                silent_crash,
                handler,
                &action,
                &mut forward,
                &mut redispatch,
            )
        };
        let on_log: Option<Reaction> = match verdict {
            Verdict::Abort => return,
            Verdict::Fallback => None,
            Verdict::Pass => match &config.on_log {
                SpyValue::Reaction(reaction) => Some(reaction.clone()),
                _ => None,
            },
        };

        let verdict = {
            let mut forward = |a: Action| next(a);
            let mut redispatch = |a: Action| dispatch(a);
            self.validate_field(
                &config.skip,
                "skip",
                FieldKind::Bool,
                silent_crash,
                handler,
                &action,
                &mut forward,
                &mut redispatch,
            )
        };
        let skip = match verdict {
            Verdict::Abort => return,
            Verdict::Fallback => false,
            Verdict::Pass => matches!(config.skip, SpyValue::Bool(true)),
        };

        // Re-entry: the side effect already ran on the first pass.
        if skip {
            next(action);
            return;
        }

        // Flag the copy, never the original, so a loop back through this
        // chain takes the re-entry path above.
        let flagged = flag_replay(&action);

        if log {
            match on_log {
                Some(reaction) => reaction(flagged, next, dispatch),
                // Terminal by contract: forwarding on this branch is the
                // reaction's job, and there is no reaction.
                None => self.emit(format!("[ACTION : {}] {:?}", flagged.kind, flagged)),
            }
        }
    }
}

/// Copy an action with the re-entrancy guard set.
fn flag_replay(action: &Action) -> Action {
    let mut copy = action.clone();
    if let Some(spy) = copy.spy.as_mut() {
        spy.skip = SpyValue::Bool(true);
    }
    copy
}
