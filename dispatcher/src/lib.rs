//! # dispatcher
//!
//! Routing for MAX bot updates: [`Filter`] predicates, the first-match [`Dispatcher`] with
//! lifecycle hooks, and the long-polling [`PollingLoop`] that feeds it.

pub mod dispatcher;
pub mod filter;
pub mod handler;
pub mod polling;

pub use dispatcher::{DispatchOutcome, Dispatcher};
pub use filter::Filter;
pub use handler::{handler_fn, hook_fn, FnHandler, FnHook, LifecycleHook, UpdateHandler};
pub use polling::{Backoff, PollState, PollingConfig, PollingLoop};

// Integration tests live in tests/dispatcher_test.rs and tests/polling_test.rs
