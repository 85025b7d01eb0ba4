//! # max_llm_bot
//!
//! MAX messenger bot backed by GigaChat. **Public API:** [`run_bot`] for the binary;
//! [`build_components`] and [`build_dispatcher`] for wiring the handlers against any
//! [`maxbot_core::Bot`] and [`llm_client::LlmClient`] (used by the integration tests).

pub mod assembly;
pub mod cli;
pub mod config;
pub mod graph;
pub mod handlers;
pub mod rate_limit;
pub mod retry;
mod runner;

pub use assembly::{build_components, build_dispatcher, BotComponents, KnowledgeGraph};
pub use cli::{Cli, Commands};
pub use config::{AppSettings, BaseConfig, BotConfig};
pub use graph::{GraphMemory, QueryMode};
pub use rate_limit::LlmRateLimiter;
pub use retry::RetryPolicy;
pub use runner::{run_bot, run_polling};
