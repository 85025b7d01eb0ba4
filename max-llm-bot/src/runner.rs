//! Runner: logging, clients, identity check, then the polling loop until Ctrl-C.

use std::sync::Arc;

use anyhow::{Context, Result};
use dispatcher::{Dispatcher, PollingConfig, PollingLoop};
use llm_client::{GigaChatClient, LlmClient};
use maxbot_api::MaxApiClient;
use maxbot_core::{init_tracing, Bot, UpdateSource};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::assembly::{build_components, build_dispatcher};
use crate::config::BotConfig;

/// Main entry: validate config, init logging, confirm the token with `get_me`, build the
/// dispatcher, then poll until Ctrl-C.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    init_tracing(config.log_file())?;

    let api = Arc::new(MaxApiClient::from_config(&config.api_config())?);
    info!(api_url = %api.base_url(), "step: MAX API client created");

    let me = api
        .get_me()
        .await
        .context("Failed to fetch bot identity; check BOT_TOKEN")?;
    info!(
        bot_id = me.user_id,
        bot_name = %me.first_name,
        username = ?me.username,
        "step: bot identity confirmed"
    );

    let llm: Arc<dyn LlmClient> = Arc::new(GigaChatClient::new(config.llm())?);
    let components = build_components(&config, api.clone(), llm)?;
    let dispatcher = Arc::new(build_dispatcher(&components));
    info!(handlers = dispatcher.len(), "step: dispatcher ready");

    let cancel = CancellationToken::new();
    spawn_ctrl_c(cancel.clone());

    let marker = run_polling(dispatcher, api, config.polling_config(), cancel).await;
    info!(marker = ?marker, "Bot stopped");
    Ok(())
}

/// Polls `source` and dispatches until `cancel` fires. Returns the last marker.
pub async fn run_polling(
    dispatcher: Arc<Dispatcher>,
    source: Arc<dyn UpdateSource>,
    polling: PollingConfig,
    cancel: CancellationToken,
) -> Option<i64> {
    let mut polling_loop = PollingLoop::new(source, dispatcher, polling);
    polling_loop.run(cancel).await;
    polling_loop.marker()
}

fn spawn_ctrl_c(cancel: CancellationToken) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("step: Ctrl-C received, stopping");
                cancel.cancel();
            }
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C"),
        }
    });
}
