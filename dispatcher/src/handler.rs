//! Handler and lifecycle hook traits, plus closure adapters.

use std::future::Future;
use std::marker::PhantomData;

use async_trait::async_trait;
use maxbot_core::{Result, Update};

/// Processes an update that matched its registration filter.
///
/// An error is logged by the dispatcher; the update still counts as processed.
#[async_trait]
pub trait UpdateHandler: Send + Sync {
    async fn handle(&self, update: &Update) -> Result<()>;

    /// Name used in logs. Defaults to the implementing type's name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Runs once at startup or shutdown.
#[async_trait]
pub trait LifecycleHook: Send + Sync {
    async fn run(&self) -> Result<()>;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// [`UpdateHandler`] backed by an async closure that receives an owned copy of the update.
pub struct FnHandler<F, Fut> {
    name: String,
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

/// Wraps an async closure as a named handler.
pub fn handler_fn<F, Fut>(name: impl Into<String>, f: F) -> FnHandler<F, Fut>
where
    F: Fn(Update) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    FnHandler {
        name: name.into(),
        f,
        _fut: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> UpdateHandler for FnHandler<F, Fut>
where
    F: Fn(Update) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn handle(&self, update: &Update) -> Result<()> {
        (self.f)(update.clone()).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// [`LifecycleHook`] backed by an async closure.
pub struct FnHook<F, Fut> {
    name: String,
    f: F,
    _fut: PhantomData<fn() -> Fut>,
}

/// Wraps an async closure as a named lifecycle hook.
pub fn hook_fn<F, Fut>(name: impl Into<String>, f: F) -> FnHook<F, Fut>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    FnHook {
        name: name.into(),
        f,
        _fut: PhantomData,
    }
}

#[async_trait]
impl<F, Fut> LifecycleHook for FnHook<F, Fut>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn run(&self) -> Result<()> {
        (self.f)().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
