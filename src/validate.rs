//! Enum-driven validation of spy configuration fields
//!
//! Each configuration field has one expected [`FieldKind`]; a raw
//! [`SpyValue`] either conforms to it or falls back to the field's default
//! (or is handed to the action's invalid-input handler). `Absent` conforms
//! to every kind, since an absent field resolves to a default that is valid
//! by construction.

use crate::config::SpyValue;

/// Expected kind of a configuration field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Number,
    Text,
    List,
    Map,
    /// A log reaction callback.
    Reaction,
    /// An invalid-input handler callback.
    Handler,
}

impl FieldKind {
    /// Human-readable name used in diagnostic lines ("boolean expected").
    pub fn expected(&self) -> &'static str {
        match self {
            FieldKind::Bool => "boolean",
            FieldKind::Number => "number",
            FieldKind::Text => "string",
            FieldKind::List => "array",
            FieldKind::Map => "object",
            FieldKind::Reaction | FieldKind::Handler => "function",
        }
    }
}

/// Whether a raw value conforms to the expected kind.
pub fn conforms(value: &SpyValue, kind: FieldKind) -> bool {
    match kind {
        FieldKind::Bool => matches!(value, SpyValue::Absent | SpyValue::Bool(_)),
        FieldKind::Number => matches!(value, SpyValue::Absent | SpyValue::Number(_)),
        FieldKind::Text => matches!(value, SpyValue::Absent | SpyValue::Text(_)),
        FieldKind::List => matches!(value, SpyValue::Absent | SpyValue::List(_)),
        FieldKind::Map => matches!(value, SpyValue::Absent | SpyValue::Map(_)),
        FieldKind::Reaction => matches!(value, SpyValue::Absent | SpyValue::Reaction(_)),
        FieldKind::Handler => matches!(value, SpyValue::Absent | SpyValue::Handler(_)),
    }
}
