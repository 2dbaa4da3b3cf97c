//! Shared helpers for driving handlers against a mocked Bot API.
#![allow(dead_code)]

use serde_json::{json, Value};
use teloxide::{dispatching::dialogue::InMemStorage, prelude::*};
use wiremock::matchers::{method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use openmensa_telegram_rs::data_types::{DialogueState, DialogueType};

pub fn chat_json(chat_id: i64) -> Value {
    json!({"id": chat_id, "first_name": "Test", "type": "private"})
}

/// A private chat text message, the way telegram delivers it.
pub fn incoming(chat_id: i64, text: &str) -> Message {
    serde_json::from_value(json!({
        "message_id": 1,
        "date": 1_700_000_000,
        "chat": chat_json(chat_id),
        "from": {"id": chat_id, "is_bot": false, "first_name": "Test"},
        "text": text
    }))
    .unwrap()
}

pub fn dialogue_for(chat_id: i64) -> DialogueType {
    Dialogue::new(InMemStorage::<DialogueState>::new(), ChatId(chat_id))
}

/// Starts a Bot API mock that accepts every message and document.
pub async fn telegram_server(chat_id: i64) -> (MockServer, Bot) {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"(?i)/(sendmessage|senddocument)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": {
                "message_id": 2,
                "date": 1_700_000_000,
                "chat": chat_json(chat_id),
                "text": "ok"
            }
        })))
        .mount(&server)
        .await;

    let bot = Bot::new("123:test").set_api_url(server.uri().parse().unwrap());
    (server, bot)
}

async fn requests_to(server: &MockServer, api_method: &str) -> Vec<wiremock::Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|req| {
            req.url
                .path()
                .to_lowercase()
                .ends_with(&format!("/{}", api_method))
        })
        .collect()
}

/// JSON bodies of all `sendMessage` calls, in order.
pub async fn sent_messages(server: &MockServer) -> Vec<Value> {
    requests_to(server, "sendmessage")
        .await
        .iter()
        .map(|req| req.body_json::<Value>().unwrap())
        .collect()
}

pub async fn sent_texts(server: &MockServer) -> Vec<String> {
    sent_messages(server)
        .await
        .iter()
        .map(|body| body["text"].as_str().unwrap_or_default().to_string())
        .collect()
}

pub async fn sent_documents(server: &MockServer) -> usize {
    requests_to(server, "senddocument").await.len()
}
