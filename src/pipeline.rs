//! Linear dispatch pipeline
//!
//! A [`Pipeline`] threads each dispatched action through its interceptors in
//! order, ending at a terminal handler (typically the reducer seat). Each
//! interceptor receives a `next` continuing at the following slot and a
//! `dispatch` re-entering the pipeline from the top, so an interceptor or
//! one of its callbacks may re-dispatch mid-flight.
//!
//! The whole pipeline is synchronous and single-threaded. The terminal
//! handler must not call `dispatch` itself; re-entry belongs to
//! interceptors and their callbacks.

use std::cell::RefCell;

use crate::action::Action;
use crate::interceptor::Interceptor;

/// Ordered chain of interceptors in front of a terminal handler.
///
/// # Example
/// ```
/// use dispatch_spy::{Action, Pipeline, Spy};
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let sink = seen.clone();
///
/// let pipeline = Pipeline::new(move |action: Action| sink.borrow_mut().push(action.kind))
///     .with(Spy::new());
///
/// pipeline.dispatch(Action::new("Connect"));
/// assert_eq!(*seen.borrow(), vec!["Connect".to_string()]);
/// ```
pub struct Pipeline {
    interceptors: Vec<Box<dyn Interceptor>>,
    terminal: RefCell<Box<dyn FnMut(Action)>>,
}

impl Pipeline {
    /// Create a pipeline with no interceptors and the given terminal handler.
    pub fn new(terminal: impl FnMut(Action) + 'static) -> Self {
        Self {
            interceptors: Vec::new(),
            terminal: RefCell::new(Box::new(terminal)),
        }
    }

    /// Append an interceptor to the end of the chain.
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Box::new(interceptor));
        self
    }

    /// Append an interceptor in place.
    pub fn add(&mut self, interceptor: impl Interceptor + 'static) {
        self.interceptors.push(Box::new(interceptor));
    }

    /// Number of interceptors in the chain.
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no interceptors.
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Send an action through the chain from the top.
    pub fn dispatch(&self, action: Action) {
        self.run_from(0, action);
    }

    fn run_from(&self, index: usize, action: Action) {
        match self.interceptors.get(index) {
            None => (self.terminal.borrow_mut())(action),
            Some(interceptor) => {
                let mut next = |a: Action| self.run_from(index + 1, a);
                let mut dispatch = |a: Action| self.run_from(0, a);
                interceptor.intercept(action, &mut next, &mut dispatch);
            }
        }
    }
}
