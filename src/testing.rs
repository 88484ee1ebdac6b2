//! Test utilities for dispatch pipelines
//!
//! [`Recorder`] captures the actions that reach the end of a chain, so tests
//! can assert what was (or was not) forwarded:
//!
//! ```
//! use dispatch_spy::testing::Recorder;
//! use dispatch_spy::{Action, Pipeline, Spy};
//!
//! let recorder = Recorder::new();
//! let pipeline = Pipeline::new(recorder.terminal()).with(Spy::new());
//!
//! pipeline.dispatch(Action::new("Connect"));
//! assert_eq!(recorder.kinds(), vec!["Connect".to_string()]);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::Action;

/// Records every action that reaches it. Clones share the same storage.
#[derive(Clone, Default)]
pub struct Recorder {
    seen: Rc<RefCell<Vec<Action>>>,
}

impl Recorder {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// A terminal handler feeding this recorder.
    pub fn terminal(&self) -> impl FnMut(Action) + 'static {
        let seen = self.seen.clone();
        move |action| seen.borrow_mut().push(action)
    }

    /// All recorded actions, in arrival order.
    pub fn actions(&self) -> Vec<Action> {
        self.seen.borrow().clone()
    }

    /// Kinds of the recorded actions, in arrival order.
    pub fn kinds(&self) -> Vec<String> {
        self.seen.borrow().iter().map(|a| a.kind.clone()).collect()
    }

    /// Number of recorded actions.
    pub fn len(&self) -> usize {
        self.seen.borrow().len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.seen.borrow().is_empty()
    }

    /// Forget everything recorded so far.
    pub fn clear(&self) {
        self.seen.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Pipeline;

    #[test]
    fn test_recorder_captures_terminal_actions() {
        let recorder = Recorder::new();
        let pipeline = Pipeline::new(recorder.terminal());

        pipeline.dispatch(Action::new("A"));
        pipeline.dispatch(Action::new("B"));

        assert_eq!(recorder.len(), 2);
        assert_eq!(recorder.kinds(), vec!["A".to_string(), "B".to_string()]);

        recorder.clear();
        assert!(recorder.is_empty());
    }
}
