//! Test doubles shared by the integration tests: a recording [`Bot`], a scripted [`LlmClient`],
//! an in-memory [`GraphMemory`], update builders and a config with test defaults.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use llm_client::{EnvLlmConfig, LlmClient, LlmError};
use max_llm_bot::{AppSettings, BaseConfig, BotConfig, GraphMemory, QueryMode};
use maxbot_core::{
    Bot, BotError, BotInfo, CallbackAnswer, ChatAction, Message, NewMessage, Result, SendTarget,
    Update,
};
use prompt::ChatMessage;

pub const SYSTEM_PROMPT: &str = "You are a test assistant.";

/// Records every outbound call. Typing actions fail when `fail_actions` is set.
#[derive(Default)]
pub struct MockBot {
    pub sent: Mutex<Vec<(SendTarget, String)>>,
    pub actions: Mutex<Vec<(i64, ChatAction)>>,
    pub answers: Mutex<Vec<(String, CallbackAnswer)>>,
    pub fail_actions: bool,
}

impl MockBot {
    pub fn failing_actions() -> Self {
        Self {
            fail_actions: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<(SendTarget, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_texts(&self) -> Vec<String> {
        self.sent().into_iter().map(|(_, text)| text).collect()
    }

    pub fn last_text(&self) -> String {
        self.sent_texts().last().cloned().unwrap_or_default()
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn get_me(&self) -> Result<BotInfo> {
        Ok(BotInfo {
            user_id: 1000,
            first_name: "TestBot".to_string(),
            ..Default::default()
        })
    }

    async fn send_message(&self, target: SendTarget, message: &NewMessage) -> Result<Option<Message>> {
        self.sent.lock().unwrap().push((target, message.text.clone()));
        Ok(None)
    }

    async fn edit_message(&self, _message_id: &str, _message: &NewMessage) -> Result<()> {
        Ok(())
    }

    async fn delete_message(&self, _message_id: &str) -> Result<()> {
        Ok(())
    }

    async fn send_chat_action(&self, chat_id: i64, action: ChatAction) -> Result<()> {
        if self.fail_actions {
            return Err(BotError::Transport("action endpoint down".to_string()));
        }
        self.actions.lock().unwrap().push((chat_id, action));
        Ok(())
    }

    async fn answer_callback(&self, callback_id: &str, answer: &CallbackAnswer) -> Result<()> {
        self.answers
            .lock()
            .unwrap()
            .push((callback_id.to_string(), answer.clone()));
        Ok(())
    }
}

/// Replies "echo: <last message>" unless an error is queued; records every prompt.
#[derive(Default)]
pub struct FakeLlm {
    pub errors: Mutex<VecDeque<LlmError>>,
    pub prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl FakeLlm {
    pub fn fail_next(&self, err: LlmError) {
        self.errors.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn chat(&self, messages: Vec<ChatMessage>) -> std::result::Result<String, LlmError> {
        self.prompts.lock().unwrap().push(messages.clone());
        if let Some(err) = self.errors.lock().unwrap().pop_front() {
            return Err(err);
        }
        let last = messages.last().map(|m| m.content.clone()).unwrap_or_default();
        Ok(format!("echo: {}", last))
    }

    fn model(&self) -> &str {
        "fake-model"
    }
}

/// Answers every query with a fixed text and records the calls.
#[derive(Default)]
pub struct FakeGraph {
    pub answer: String,
    pub queries: Mutex<Vec<(String, String, QueryMode)>>,
}

impl FakeGraph {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: answer.to_string(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl GraphMemory for FakeGraph {
    async fn save(&self, _graph_id: &str, _text: &str) -> AnyResult<bool> {
        Ok(true)
    }

    async fn query(&self, graph_id: &str, question: &str, mode: QueryMode) -> AnyResult<String> {
        self.queries
            .lock()
            .unwrap()
            .push((graph_id.to_string(), question.to_string(), mode));
        Ok(self.answer.clone())
    }

    async fn list_graphs(&self) -> AnyResult<Vec<String>> {
        Ok(vec!["kb".to_string()])
    }

    async fn delete_graph(&self, _graph_id: &str) -> AnyResult<bool> {
        Ok(false)
    }
}

/// Config with test values: history 10, the given rate limit, 2 retries.
pub fn test_config(rate_limit_per_minute: u32) -> BotConfig {
    let base = BaseConfig {
        bot_token: "test_token".to_string(),
        max_api_url: None,
        log_file: None,
        poll_limit: 100,
        poll_timeout_secs: 30,
    };
    let app = AppSettings {
        rate_limit_per_minute,
        system_prompt: SYSTEM_PROMPT.to_string(),
        ..AppSettings::default()
    };
    let llm = EnvLlmConfig {
        gigachat_credentials: "test_credentials".to_string(),
        gigachat_scope: "GIGACHAT_API_PERS".to_string(),
        gigachat_model: "GigaChat".to_string(),
        gigachat_auth_url: "http://127.0.0.1:9/oauth".to_string(),
        gigachat_base_url: "http://127.0.0.1:9".to_string(),
        gigachat_verify_ssl: true,
        llm_timeout_secs: 5,
    };
    BotConfig::new(base, app, llm)
}

/// Text message from user `user_id` ("Anna Petrova") in chat `chat_id` of `chat_type`.
pub fn message_update(chat_id: i64, chat_type: &str, user_id: i64, text: &str) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_type": "message_created",
        "timestamp": 1700000000000i64,
        "message": {
            "sender": {"user_id": user_id, "first_name": "Anna", "last_name": "Petrova"},
            "recipient": {"chat_id": chat_id, "chat_type": chat_type},
            "body": {"mid": format!("mid.{}", text.len()), "seq": 1, "text": text}
        }
    }))
    .unwrap()
}

/// Text message in the one-to-one chat 1 from user 1.
pub fn dialog_message(text: &str) -> Update {
    message_update(1, "dialog", 1, text)
}

pub fn callback_update(callback_id: &str, payload: Option<&str>) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_type": "message_callback",
        "callback": {
            "timestamp": 1700000000000i64,
            "callback_id": callback_id,
            "user": {"user_id": 1, "first_name": "Anna"},
            "payload": payload
        }
    }))
    .unwrap()
}

pub fn lifecycle_update(update_type: &str, chat_id: Option<i64>) -> Update {
    serde_json::from_value(serde_json::json!({
        "update_type": update_type,
        "chat_id": chat_id,
        "user": {"user_id": 5, "first_name": "Max"}
    }))
    .unwrap()
}

/// Shorthand for wiring doubles into the bot's components.
pub fn doubles() -> (Arc<MockBot>, Arc<FakeLlm>) {
    (Arc::new(MockBot::default()), Arc::new(FakeLlm::default()))
}
