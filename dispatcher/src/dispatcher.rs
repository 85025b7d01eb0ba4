//! # Dispatcher
//!
//! Ordered registry of (filter, handler) pairs. For each update the filters are evaluated in
//! registration order and only the first matching handler runs. Registration happens through a
//! consuming builder; once built the dispatcher is shared read-only (`Arc<Dispatcher>`).

use std::sync::Arc;

use maxbot_core::{Update, UpdateType};
use tracing::{debug, error, info, instrument};

use crate::filter::Filter;
use crate::handler::{LifecycleHook, UpdateHandler};

/// Result of dispatching one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler at this registration index ran successfully.
    Handled(usize),
    /// Handler at this registration index returned an error (logged).
    Failed(usize),
    /// No filter matched; the update was dropped.
    Unhandled,
}

struct Registration {
    filter: Filter,
    handler: Arc<dyn UpdateHandler>,
}

/// First-match-wins update dispatcher with startup/shutdown hooks.
#[derive(Default)]
pub struct Dispatcher {
    registrations: Vec<Registration>,
    startup_hooks: Vec<Arc<dyn LifecycleHook>>,
    shutdown_hooks: Vec<Arc<dyn LifecycleHook>>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a handler guarded by `filter`.
    pub fn register(mut self, filter: Filter, handler: Arc<dyn UpdateHandler>) -> Self {
        self.registrations.push(Registration { filter, handler });
        self
    }

    /// Registers a handler for new and edited messages matching `filter`.
    pub fn message(self, filter: Filter, handler: Arc<dyn UpdateHandler>) -> Self {
        let filter = Filter::update_type([UpdateType::MessageCreated, UpdateType::MessageEdited]) & filter;
        self.register(filter, handler)
    }

    /// Registers a handler for button presses matching `filter`.
    pub fn callback_query(self, filter: Filter, handler: Arc<dyn UpdateHandler>) -> Self {
        let filter = Filter::update_type([UpdateType::MessageCallback]) & filter;
        self.register(filter, handler)
    }

    /// Registers a handler for any update of the given types.
    pub fn update(
        self,
        types: impl IntoIterator<Item = UpdateType>,
        handler: Arc<dyn UpdateHandler>,
    ) -> Self {
        self.register(Filter::update_type(types), handler)
    }

    pub fn on_startup(mut self, hook: Arc<dyn LifecycleHook>) -> Self {
        self.startup_hooks.push(hook);
        self
    }

    pub fn on_shutdown(mut self, hook: Arc<dyn LifecycleHook>) -> Self {
        self.shutdown_hooks.push(hook);
        self
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    /// Runs the first handler whose filter matches. Handler errors are logged, not propagated.
    #[instrument(skip(self, update), fields(update_type = %update.update_type))]
    pub async fn dispatch(&self, update: &Update) -> DispatchOutcome {
        let Some((index, registration)) = self
            .registrations
            .iter()
            .enumerate()
            .find(|(_, r)| r.filter.matches(update))
        else {
            debug!(
                chat_id = ?update.chat_id(),
                "step: no handler matched, update dropped"
            );
            return DispatchOutcome::Unhandled;
        };

        let handler_name = registration.handler.name();
        info!(
            handler = %handler_name,
            index = index,
            chat_id = ?update.chat_id(),
            user_id = ?update.actor().map(|u| u.user_id),
            "step: handler processing"
        );

        match registration.handler.handle(update).await {
            Ok(()) => {
                debug!(handler = %handler_name, "step: handler done");
                DispatchOutcome::Handled(index)
            }
            Err(e) => {
                error!(handler = %handler_name, error = %e, "Handler failed");
                DispatchOutcome::Failed(index)
            }
        }
    }

    /// Runs startup hooks in order. A failing hook is logged and the rest still run.
    pub async fn run_startup(&self) {
        run_hooks("startup", &self.startup_hooks).await;
    }

    /// Runs shutdown hooks in order. A failing hook is logged and the rest still run.
    pub async fn run_shutdown(&self) {
        run_hooks("shutdown", &self.shutdown_hooks).await;
    }
}

async fn run_hooks(phase: &str, hooks: &[Arc<dyn LifecycleHook>]) {
    for hook in hooks {
        let name = hook.name();
        info!(phase = phase, hook = %name, "step: running lifecycle hook");
        if let Err(e) = hook.run().await {
            error!(phase = phase, hook = %name, error = %e, "Lifecycle hook failed");
        }
    }
}
