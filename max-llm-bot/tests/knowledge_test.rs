//! `/ask` routing with a knowledge graph collaborator.

mod common;

use std::sync::Arc;

use common::*;
use dispatcher::DispatchOutcome;
use max_llm_bot::{build_components, build_dispatcher, QueryMode};
use maxbot_core::SendTarget;

const ASK: usize = 3;

/// **Test: /ask with an explicit mode queries the configured graph and relays the answer.**
///
/// **Setup:** components with a graph "kb" that always answers "Room 214".
/// **Action:** "/ask local where is the lab?" in dialog chat 1.
/// **Expected:** ask handler runs; one query ("kb", "where is the lab?", Local); answer sent to chat 1; LLM untouched.
#[tokio::test]
async fn test_ask_queries_graph_with_mode() {
    let (bot, llm) = doubles();
    let graph = Arc::new(FakeGraph::answering("Room 214"));
    let components = build_components(&test_config(20), bot.clone(), llm.clone())
        .unwrap()
        .with_knowledge(graph.clone(), "kb");
    let dispatcher = build_dispatcher(&components);

    let outcome = dispatcher
        .dispatch(&dialog_message("/ask local where is the lab?"))
        .await;

    assert_eq!(outcome, DispatchOutcome::Handled(ASK));
    assert_eq!(
        graph.queries.lock().unwrap().clone(),
        vec![("kb".to_string(), "where is the lab?".to_string(), QueryMode::Local)]
    );
    assert_eq!(bot.sent(), vec![(SendTarget::Chat(1), "Room 214".to_string())]);
    assert_eq!(llm.calls(), 0);
}

/// **Test: Without a mode the default (hybrid) is used; without a question usage is shown.**
#[tokio::test]
async fn test_ask_default_mode_and_usage() {
    let (bot, llm) = doubles();
    let graph = Arc::new(FakeGraph::answering("42"));
    let components = build_components(&test_config(20), bot.clone(), llm)
        .unwrap()
        .with_knowledge(graph.clone(), "kb");
    let dispatcher = build_dispatcher(&components);

    dispatcher.dispatch(&dialog_message("/ask what is the answer?")).await;
    dispatcher.dispatch(&dialog_message("/ask")).await;

    let queries = graph.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].2, QueryMode::Hybrid);
    assert!(bot.last_text().starts_with("Usage: /ask"));
}

/// **Test: /start advertises /ask when a graph is configured.**
#[tokio::test]
async fn test_greeting_mentions_ask() {
    let (bot, llm) = doubles();
    let components = build_components(&test_config(20), bot.clone(), llm)
        .unwrap()
        .with_knowledge(Arc::new(FakeGraph::default()), "kb");
    let dispatcher = build_dispatcher(&components);

    dispatcher.dispatch(&dialog_message("/start")).await;

    assert!(bot.last_text().contains("/ask [mode] <question>"));
}

/// **Test: Without a graph, /ask is ordinary text for the LLM.**
#[tokio::test]
async fn test_ask_without_graph_goes_to_llm() {
    let (bot, llm) = doubles();
    let components = build_components(&test_config(20), bot.clone(), llm.clone()).unwrap();
    let dispatcher = build_dispatcher(&components);

    dispatcher.dispatch(&dialog_message("/ask anything")).await;

    assert_eq!(llm.calls(), 1);
    assert_eq!(bot.last_text(), "echo: /ask anything");
}
