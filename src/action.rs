//! Action type for messages flowing through the dispatch pipeline

use serde::Serialize;
use serde_json::Value;

use crate::config::SpyConfig;

/// A message passed through the dispatch pipeline.
///
/// Every action carries a `kind` (its type tag), an arbitrary JSON
/// `payload`, and an optional [`SpyConfig`] block that the spy
/// interceptor reads when the action passes through it.
///
/// Actions are plain records: construct them with the builder methods
/// and read the fields directly.
///
/// # Example
/// ```
/// use dispatch_spy::Action;
/// use serde_json::json;
///
/// let action = Action::new("SOME_ACTION_TYPE").with_payload(json!("test"));
/// assert_eq!(action.kind, "SOME_ACTION_TYPE");
/// assert!(action.spy.is_none());
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct Action {
    /// Type tag identifying the action.
    pub kind: String,
    /// Arbitrary payload; `Null` when the action carries no data.
    pub payload: Value,
    /// Per-action spy configuration. Absent means the spy is a pure
    /// passthrough for this action. Skipped during serialization
    /// because it may hold callbacks.
    #[serde(skip)]
    pub spy: Option<SpyConfig>,
}

impl Action {
    /// Create an action with the given type tag and no payload.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            payload: Value::Null,
            spy: None,
        }
    }

    /// Attach a payload.
    pub fn with_payload(mut self, payload: impl Into<Value>) -> Self {
        self.payload = payload.into();
        self
    }

    /// Attach a spy configuration block.
    pub fn with_spy(mut self, spy: SpyConfig) -> Self {
        self.spy = Some(spy);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults() {
        let action = Action::new("Connect");
        assert_eq!(action.kind, "Connect");
        assert_eq!(action.payload, Value::Null);
        assert!(action.spy.is_none());
    }

    #[test]
    fn test_serialization_skips_spy() {
        let action = Action::new("Connect")
            .with_payload(json!({ "host": "localhost" }))
            .with_spy(SpyConfig::new().log(true));

        let serialized = serde_json::to_value(&action).unwrap();
        assert_eq!(serialized["kind"], "Connect");
        assert_eq!(serialized["payload"]["host"], "localhost");
        assert!(serialized.get("spy").is_none());
    }

    #[test]
    fn test_clone_preserves_fields() {
        let action = Action::new("Connect").with_payload(json!([1, 2, 3]));
        let copy = action.clone();
        assert_eq!(copy.kind, action.kind);
        assert_eq!(copy.payload, action.payload);
    }
}
