//! dispatch-spy: configurable logging interceptor for dispatch pipelines
//!
//! Actions flow through a linear chain of interceptors toward a terminal
//! handler. The [`Spy`] interceptor reads an optional per-action
//! configuration block, validates it field by field, and either forwards
//! the action, logs it (or hands it to a custom reaction), or delegates to
//! an invalid-input handler. A re-entrancy guard written onto a defensive
//! copy keeps the side effect from repeating when the action loops back
//! through the chain.
//!
//! # Core Concepts
//!
//! - **Action**: a message with a type tag, a JSON payload, and an optional
//!   spy configuration block
//! - **Pipeline**: the ordered chain of interceptors plus a terminal handler
//! - **Spy**: the logging interceptor
//! - **Reaction**: a user callback replacing the default log line
//! - **Journal**: in-memory capture of spy output for tests and overlays
//!
//! # Example
//!
//! ```
//! use dispatch_spy::{Action, Pipeline, Spy, SpyConfig};
//! use serde_json::json;
//!
//! let pipeline = Pipeline::new(|action: Action| {
//!     // reducer seat
//!     let _ = action;
//! })
//! .with(Spy::new());
//!
//! // Plain actions pass straight through.
//! pipeline.dispatch(Action::new("Connect"));
//!
//! // Configured actions get logged; the custom reaction decides whether
//! // the chain continues.
//! pipeline.dispatch(
//!     Action::new("SOME_ACTION_TYPE")
//!         .with_payload(json!("test"))
//!         .with_spy(SpyConfig::new().log(true).on_log(|action, next, _dispatch| {
//!             next(action);
//!         })),
//! );
//! ```
//!
//! Malformed configuration never fails a dispatch: each invalid field falls
//! back to its default, and an action-supplied `on_invalid_input` handler
//! may take over the dispatch entirely.

pub mod action;
pub mod config;
pub mod interceptor;
pub mod journal;
pub mod pipeline;
pub mod testing;
pub mod validate;

pub use action::Action;
pub use config::{InvalidInputHandler, Reaction, SpyConfig, SpyValue};
pub use interceptor::{Dispatch, Interceptor, Next, Spy};
pub use journal::{Journal, JournalConfig, JournalEntry};
pub use pipeline::Pipeline;
pub use validate::{conforms, FieldKind};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::action::Action;
    pub use crate::config::{InvalidInputHandler, Reaction, SpyConfig, SpyValue};
    pub use crate::interceptor::{Dispatch, Interceptor, Next, Spy};
    pub use crate::journal::{Journal, JournalConfig, JournalEntry};
    pub use crate::pipeline::Pipeline;
    pub use crate::validate::{conforms, FieldKind};
}
