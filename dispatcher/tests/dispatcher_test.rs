//! Integration tests for [`dispatcher::Dispatcher`].
//!
//! Covers: first-match-wins ordering, message/callback shorthands, unmatched updates,
//! handler errors being contained, and lifecycle hook ordering with a failing hook.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use dispatcher::{handler_fn, hook_fn, DispatchOutcome, Dispatcher, Filter, UpdateHandler};
use maxbot_core::{BotError, ChatType, HandlerError, Update, UpdateType};

fn message_update(text: &str) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_type": "message_created",
        "timestamp": 1,
        "message": {
            "sender": {"user_id": 7, "first_name": "Anna"},
            "recipient": {"chat_id": 1, "chat_type": "dialog"},
            "body": {"mid": "m1", "seq": 1, "text": text}
        }
    }))
    .unwrap()
}

fn callback_update(payload: &str) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_type": "message_callback",
        "callback": {"callback_id": "cb-1", "user": {"user_id": 7, "first_name": "Anna"}, "payload": payload}
    }))
    .unwrap()
}

/// Counts invocations.
struct CountingHandler {
    count: Arc<AtomicUsize>,
}

impl CountingHandler {
    fn new(count: Arc<AtomicUsize>) -> Arc<Self> {
        Arc::new(Self { count })
    }
}

#[async_trait]
impl UpdateHandler for CountingHandler {
    async fn handle(&self, _update: &Update) -> maxbot_core::Result<()> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// **Test: Only the first matching handler runs, exactly once.**
///
/// **Setup:** `/start` command handler, then any-text handler; both match "/start".
/// **Action:** dispatch "/start", then "hello".
/// **Expected:** "/start" → Handled(0), command count 1, text count 0; "hello" → Handled(1).
#[tokio::test]
async fn test_first_match_wins() {
    let command_count = Arc::new(AtomicUsize::new(0));
    let text_count = Arc::new(AtomicUsize::new(0));

    let dp = Dispatcher::new()
        .message(Filter::command(["start"]), CountingHandler::new(command_count.clone()))
        .message(Filter::text(), CountingHandler::new(text_count.clone()));

    assert_eq!(dp.dispatch(&message_update("/start")).await, DispatchOutcome::Handled(0));
    assert_eq!(command_count.load(Ordering::SeqCst), 1);
    assert_eq!(text_count.load(Ordering::SeqCst), 0);

    assert_eq!(dp.dispatch(&message_update("hello")).await, DispatchOutcome::Handled(1));
    assert_eq!(command_count.load(Ordering::SeqCst), 1);
    assert_eq!(text_count.load(Ordering::SeqCst), 1);
}

/// **Test: Message handlers ignore callbacks and vice versa; unmatched updates are dropped.**
///
/// **Setup:** message(any) handler, callback_query(prefix "vote:") handler.
/// **Action:** dispatch a "vote:yes" callback, an "other" callback and a bot_started update.
/// **Expected:** Handled(1), Unhandled, Unhandled; message handler never runs.
#[tokio::test]
async fn test_shorthands_restrict_update_types() {
    let message_count = Arc::new(AtomicUsize::new(0));
    let callback_count = Arc::new(AtomicUsize::new(0));

    let dp = Dispatcher::new()
        .message(Filter::any(), CountingHandler::new(message_count.clone()))
        .callback_query(Filter::callback_prefix("vote:"), CountingHandler::new(callback_count.clone()));

    assert_eq!(dp.dispatch(&callback_update("vote:yes")).await, DispatchOutcome::Handled(1));
    assert_eq!(dp.dispatch(&callback_update("other")).await, DispatchOutcome::Unhandled);

    let started = Update {
        update_type: UpdateType::BotStarted,
        ..Default::default()
    };
    assert_eq!(dp.dispatch(&started).await, DispatchOutcome::Unhandled);

    assert_eq!(message_count.load(Ordering::SeqCst), 0);
    assert_eq!(callback_count.load(Ordering::SeqCst), 1);
}

/// **Test: A failing handler is contained; later handlers are not tried.**
///
/// **Setup:** failing text handler, then a catch-all counting handler.
/// **Action:** dispatch "hello".
/// **Expected:** Failed(0); catch-all count 0; a following dispatch still works.
#[tokio::test]
async fn test_handler_error_is_contained() {
    let fallback_count = Arc::new(AtomicUsize::new(0));

    let dp = Dispatcher::new()
        .message(
            Filter::text_eq(["hello"]),
            Arc::new(handler_fn("failing", |_update| async {
                Err::<(), _>(BotError::Handler(HandlerError::State("boom".to_string())))
            })),
        )
        .register(Filter::any(), CountingHandler::new(fallback_count.clone()));

    assert_eq!(dp.dispatch(&message_update("hello")).await, DispatchOutcome::Failed(0));
    assert_eq!(fallback_count.load(Ordering::SeqCst), 0);

    assert_eq!(dp.dispatch(&message_update("bye")).await, DispatchOutcome::Handled(1));
    assert_eq!(fallback_count.load(Ordering::SeqCst), 1);
}

/// **Test: update() registers by type; handler_fn receives the update.**
#[tokio::test]
async fn test_update_registration_and_closure_handler() {
    let seen: Arc<Mutex<Vec<UpdateType>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = seen.clone();

    let dp = Dispatcher::new().update(
        [UpdateType::BotAdded, UpdateType::BotRemoved],
        Arc::new(handler_fn("lifecycle", move |update: Update| {
            let seen = seen_clone.clone();
            async move {
                seen.lock().unwrap().push(update.update_type);
                Ok::<(), BotError>(())
            }
        })),
    );
    assert_eq!(dp.len(), 1);

    for update_type in [UpdateType::BotAdded, UpdateType::BotStarted, UpdateType::BotRemoved] {
        dp.dispatch(&Update {
            update_type,
            ..Default::default()
        })
        .await;
    }

    assert_eq!(
        *seen.lock().unwrap(),
        vec![UpdateType::BotAdded, UpdateType::BotRemoved]
    );
}

/// **Test: Combined filters route by chat type.**
#[tokio::test]
async fn test_combined_filter_routing() {
    let group_count = Arc::new(AtomicUsize::new(0));
    let dialog_count = Arc::new(AtomicUsize::new(0));

    let dp = Dispatcher::new()
        .message(
            Filter::text() & Filter::chat_type([ChatType::Chat]),
            CountingHandler::new(group_count.clone()),
        )
        .message(
            Filter::text() & !Filter::chat_type([ChatType::Chat]),
            CountingHandler::new(dialog_count.clone()),
        );

    assert_eq!(dp.dispatch(&message_update("hi")).await, DispatchOutcome::Handled(1));
    assert_eq!(group_count.load(Ordering::SeqCst), 0);
    assert_eq!(dialog_count.load(Ordering::SeqCst), 1);
}

/// **Test: Hooks run in registration order; a failing hook does not stop the rest.**
///
/// **Setup:** startup hooks "a" (ok), "b" (fails), "c" (ok); one shutdown hook.
/// **Action:** run_startup, run_shutdown.
/// **Expected:** order a, b, c, shutdown.
#[tokio::test]
async fn test_lifecycle_hooks_order_and_failure() {
    let log: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));

    let hook = |name: &'static str, fail: bool| {
        let log = log.clone();
        Arc::new(hook_fn(name, move || {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(name);
                if fail {
                    Err(BotError::Handler(HandlerError::State(format!("{} failed", name))))
                } else {
                    Ok(())
                }
            }
        }))
    };

    let dp = Dispatcher::new()
        .on_startup(hook("a", false))
        .on_startup(hook("b", true))
        .on_startup(hook("c", false))
        .on_shutdown(hook("shutdown", false));

    dp.run_startup().await;
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);

    dp.run_shutdown().await;
    assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c", "shutdown"]);
}
