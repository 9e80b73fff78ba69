//! Stand-in for a local Ollama server

use cadence_shared_config::OllamaConfig;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/api/generate";
const CHAT_PATH: &str = "/api/chat";

/// Wiremock server answering the Ollama generate and chat routes
pub struct MockOllamaServer {
    server: MockServer,
}

impl MockOllamaServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    pub fn url(&self) -> String {
        self.server.uri()
    }

    /// Client configuration pointing at this server
    pub fn config(&self) -> OllamaConfig {
        OllamaConfig {
            timeout_secs: 5,
            ..OllamaConfig::with_url(self.url())
        }
    }

    pub fn inner(&self) -> &MockServer {
        &self.server
    }

    /// Answer every generate call with `text`
    pub async fn mock_generate(&self, text: &str) {
        self.mount(
            GENERATE_PATH,
            ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral",
                "response": text,
                "done": true
            })),
        )
        .await;
    }

    /// Answer every chat call with an assistant message
    pub async fn mock_chat(&self, reply: &str) {
        self.mount(
            CHAT_PATH,
            ResponseTemplate::new(200).set_body_json(json!({
                "model": "mistral",
                "message": {"role": "assistant", "content": reply},
                "done": true
            })),
        )
        .await;
    }

    /// Fail every generate call with `{"error": message}`
    pub async fn mock_generate_error(&self, status: u16, message: &str) {
        self.mount(GENERATE_PATH, error_response(status, message))
            .await;
    }

    /// Fail every chat call with `{"error": message}`
    pub async fn mock_chat_error(&self, status: u16, message: &str) {
        self.mount(CHAT_PATH, error_response(status, message)).await;
    }

    pub async fn generate_calls(&self) -> usize {
        self.bodies(GENERATE_PATH).await.len()
    }

    pub async fn chat_calls(&self) -> usize {
        self.bodies(CHAT_PATH).await.len()
    }

    /// `messages` array of the most recent chat request
    pub async fn last_chat_messages(&self) -> Vec<Value> {
        self.bodies(CHAT_PATH)
            .await
            .pop()
            .and_then(|body| body.get("messages").and_then(Value::as_array).cloned())
            .unwrap_or_default()
    }

    async fn mount(&self, route: &str, response: ResponseTemplate) {
        Mock::given(method("POST"))
            .and(path(route))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }

    /// JSON bodies received on `route`, oldest first
    async fn bodies(&self, route: &str) -> Vec<Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|request| request.url.path() == route)
            .map(|request| serde_json::from_slice(&request.body).unwrap_or(Value::Null))
            .collect()
    }
}

fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({ "error": message }))
}
