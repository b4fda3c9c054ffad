//! Shared test harness for E2E integration tests.
//!
//! Drives the full Axum router in memory: real classifier, parser, store
//! and chat service, with a mock or wiremock-backed translator.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mlg_api::config::ApiConfig;
use mlg_api::routes::build_router;
use mlg_api::state::AppState;
use mlg_translate::{MockTranslator, Translator};

/// End-to-end test harness around an in-memory `AppState`.
pub struct TestHarness {
    pub state: AppState,
    pub router: Router,
    /// The mock behind the router, when one is used.
    pub mock: Option<Arc<MockTranslator>>,
}

impl TestHarness {
    /// Empty store, mock translator with sample phrases.
    pub fn new() -> Self {
        let mock = Arc::new(MockTranslator::with_sample_phrases());
        let mut harness = Self::with_translator(mock.clone());
        harness.mock = Some(mock);
        harness
    }

    /// Empty store around any translator.
    pub fn with_translator(translator: Arc<dyn Translator>) -> Self {
        let state = AppState::in_memory(translator, &ApiConfig::default());
        let router = build_router(state.clone());
        Self {
            state,
            router,
            mock: None,
        }
    }

    /// Upstream calls served by the mock translator so far.
    pub fn translator_calls(&self) -> usize {
        self.mock.as_ref().map(|m| m.calls()).unwrap_or(0)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body).unwrap()))
                .unwrap(),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> StatusCode {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
            .0
    }

    /// Store a string via POST /api/v1/strings.
    pub async fn create_string(&self, value: &str) -> (StatusCode, Value) {
        self.post("/api/v1/strings", json!({ "value": value })).await
    }

    /// Store several strings, asserting each is new.
    pub async fn seed(&self, values: &[&str]) {
        for value in values {
            let (status, _) = self.create_string(value).await;
            assert_eq!(status, StatusCode::CREATED, "seeding {value}");
        }
    }

    /// Run a natural-language filter query.
    pub async fn nl_query(&self, query: &str) -> (StatusCode, Value) {
        let uri = format!(
            "/api/v1/strings/filter-by-natural-language?query={}",
            encode_query(query)
        );
        self.get(&uri).await
    }

    /// POST /api/v1/chat (or /chat/fast) with an optional conversation.
    pub async fn chat(&self, message: &str, conversation_id: Option<&Value>) -> Value {
        self.chat_at("/api/v1/chat", message, conversation_id).await
    }

    pub async fn chat_fast(&self, message: &str, conversation_id: Option<&Value>) -> Value {
        self.chat_at("/api/v1/chat/fast", message, conversation_id)
            .await
    }

    async fn chat_at(&self, uri: &str, message: &str, conversation_id: Option<&Value>) -> Value {
        let mut body = json!({ "message": message });
        if let Some(id) = conversation_id {
            body["conversation_id"] = id.clone();
        }
        let (status, json) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::OK);
        json
    }
}

/// Values of a `data` array, in order.
pub fn values(json: &Value) -> Vec<String> {
    json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["value"].as_str().unwrap().to_string())
        .collect()
}

/// Minimal query-string encoding for test input.
pub fn encode_query(raw: &str) -> String {
    raw.chars()
        .map(|c| match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' => c.to_string(),
            ' ' => "%20".to_string(),
            other => {
                let mut buf = [0u8; 4];
                other
                    .encode_utf8(&mut buf)
                    .bytes()
                    .map(|b| format!("%{b:02X}"))
                    .collect()
            }
        })
        .collect()
}
