//! Assembly: builds the shared components and the dispatcher with every handler in order.

use std::sync::Arc;

use anyhow::Result;
use dispatcher::{hook_fn, Dispatcher, Filter};
use llm_client::{LlmClient, LlmGateway};
use maxbot_core::{Bot, BotError};
use session::{InMemorySessionStore, SessionStore};
use tracing::info;

use crate::config::BotConfig;
use crate::graph::GraphMemory;
use crate::handlers::{
    AskHandler, CallbackHandler, ChatHandler, ClearHandler, InfoHandler, LifecycleHandler,
    StartHandler,
};
use crate::rate_limit::LlmRateLimiter;
use crate::retry::RetryPolicy;

/// Knowledge graph behind `/ask` and the graph it queries.
#[derive(Clone)]
pub struct KnowledgeGraph {
    pub memory: Arc<dyn GraphMemory>,
    pub graph_id: String,
}

/// Everything the handlers share.
#[derive(Clone)]
pub struct BotComponents {
    pub bot: Arc<dyn Bot>,
    pub store: Arc<dyn SessionStore>,
    pub gateway: Arc<LlmGateway>,
    pub limiter: Arc<LlmRateLimiter>,
    pub retry: RetryPolicy,
    pub knowledge: Option<KnowledgeGraph>,
}

impl BotComponents {
    /// Enables `/ask` against `graph_id`.
    pub fn with_knowledge(mut self, memory: Arc<dyn GraphMemory>, graph_id: impl Into<String>) -> Self {
        self.knowledge = Some(KnowledgeGraph {
            memory,
            graph_id: graph_id.into(),
        });
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

/// Builds the session store, gateway, rate limiter and retry policy from config.
pub fn build_components(
    config: &BotConfig,
    bot: Arc<dyn Bot>,
    llm_client: Arc<dyn LlmClient>,
) -> Result<BotComponents> {
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new(config.max_history()));
    let gateway = Arc::new(
        LlmGateway::new(llm_client.clone(), store.clone()).with_system_prompt(config.system_prompt()),
    );
    let limiter = Arc::new(LlmRateLimiter::per_minute(config.rate_limit_per_minute())?);
    let retry = RetryPolicy::new(config.llm_max_retries());

    info!(
        model = %llm_client.model(),
        max_history = config.max_history(),
        rate_limit_per_minute = config.rate_limit_per_minute(),
        llm_max_retries = config.llm_max_retries(),
        "step: components built"
    );

    Ok(BotComponents {
        bot,
        store,
        gateway,
        limiter,
        retry,
        knowledge: None,
    })
}

/// Registers handlers in priority order: /start and /help, /clear, /info, /ask (when a knowledge
/// graph is configured), any other text → LLM, callbacks, lifecycle updates.
pub fn build_dispatcher(components: &BotComponents) -> Dispatcher {
    let bot = components.bot.clone();
    let knowledge_enabled = components.knowledge.is_some();

    let mut dispatcher = Dispatcher::new()
        .on_startup(Arc::new(hook_fn("startup", || async {
            info!("🚀 Bot is starting up");
            Ok::<(), BotError>(())
        })))
        .on_shutdown(Arc::new(hook_fn("shutdown", || async {
            info!("🛑 Bot is shutting down");
            Ok::<(), BotError>(())
        })))
        .message(
            Filter::command(["start", "help"]),
            Arc::new(StartHandler::new(bot.clone()).with_knowledge(knowledge_enabled)),
        )
        .message(
            Filter::command(["clear"]),
            Arc::new(ClearHandler::new(bot.clone(), components.store.clone())),
        )
        .message(
            Filter::command(["info"]),
            Arc::new(InfoHandler::new(bot.clone(), components.store.clone())),
        );

    if let Some(knowledge) = &components.knowledge {
        dispatcher = dispatcher.message(
            Filter::command(["ask"]),
            Arc::new(AskHandler::new(
                bot.clone(),
                knowledge.memory.clone(),
                knowledge.graph_id.clone(),
            )),
        );
    }

    dispatcher
        .message(
            Filter::text(),
            Arc::new(ChatHandler::new(
                bot.clone(),
                components.gateway.clone(),
                components.limiter.clone(),
                components.retry,
            )),
        )
        .callback_query(Filter::any(), Arc::new(CallbackHandler::new(bot.clone())))
        .update(LifecycleHandler::update_types(), Arc::new(LifecycleHandler::new(bot)))
}
