//! Chat-completion client used by the generator
//!
//! Defines the client trait and message types for asking a language model
//! for text. Two implementations:
//! - `OllamaClient`: posts to a local Ollama server's `/api/chat` (production)
//! - `MockChatClient`: returns scripted replies (testing)

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Mutex;

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single chat turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// Errors from chat-completion calls.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("language model not available: {0}")]
    Unavailable(String),
    #[error("chat request failed: {0}")]
    RequestFailed(String),
    #[error("failed to parse chat response: {0}")]
    ParseError(String),
}

/// Client trait for chat completion.
///
/// Abstracts over transport so the generator doesn't depend on how the
/// model is reached.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send the conversation and return the assistant's reply text.
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;

    /// Base URL of the model server, recorded on generated rows.
    fn host(&self) -> &str;
}

/// Ollama chat client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    host: String,
    model: String,
    http: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: ChatMessage,
}

impl OllamaClient {
    pub fn new(host: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Unavailable(e.to_string()))?;
        Ok(Self {
            host: host.into().trim_end_matches('/').to_string(),
            model: model.into(),
            http,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl ChatClient for OllamaClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "stream": false,
        });
        tracing::debug!(model = %self.model, turns = messages.len(), "ollama chat request");

        let response = self
            .http
            .post(format!("{}/api/chat", self.host))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_connect() {
                    LlmError::Unavailable(format!("{} ({})", self.host, e))
                } else {
                    LlmError::RequestFailed(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(LlmError::RequestFailed(format!("status {}: {}", status, text)));
        }

        let reply: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::ParseError(e.to_string()))?;
        Ok(reply.message.content)
    }

    fn host(&self) -> &str {
        &self.host
    }
}

/// Mock client for testing. Replays scripted replies in order.
///
/// Once the script runs out every call answers `mock reply <n>`, where `n`
/// counts calls from 1.
pub struct MockChatClient {
    available: bool,
    host: String,
    script: Mutex<VecDeque<Result<String, LlmError>>>,
    calls: Mutex<Vec<Vec<ChatMessage>>>,
}

impl MockChatClient {
    /// Create a mock client that answers every call.
    pub fn new() -> Self {
        Self {
            available: true,
            host: "http://localhost:11434".to_string(),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Create a mock client whose calls all fail as unreachable.
    pub fn unavailable() -> Self {
        Self { available: false, ..Self::new() }
    }

    /// Queue a reply.
    pub fn with_reply(self, reply: impl Into<String>) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Ok(reply.into()));
        }
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, error: LlmError) -> Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(Err(error));
        }
        self
    }

    /// Conversations received so far, in call order.
    pub fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        if !self.available {
            return Err(LlmError::Unavailable(
                "mock client configured as unavailable".to_string(),
            ));
        }
        let call_number = {
            let mut calls = self
                .calls
                .lock()
                .map_err(|_| LlmError::RequestFailed("mock call log poisoned".to_string()))?;
            calls.push(messages.to_vec());
            calls.len()
        };
        let scripted = self
            .script
            .lock()
            .map_err(|_| LlmError::RequestFailed("mock script poisoned".to_string()))?
            .pop_front();
        scripted.unwrap_or_else(|| Ok(format!("mock reply {}", call_number)))
    }

    fn host(&self) -> &str {
        &self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn mock_replays_script_then_falls_back() {
        let client = MockChatClient::new().with_reply("first");

        let first = client.chat(&[ChatMessage::user("a")]).await.unwrap();
        let second = client.chat(&[ChatMessage::user("b")]).await.unwrap();

        assert_eq!(first, "first");
        assert_eq!(second, "mock reply 2");
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1][0].content, "b");
    }

    #[tokio::test]
    async fn mock_unavailable_client_returns_error() {
        let client = MockChatClient::unavailable();
        let err = client.chat(&[ChatMessage::user("a")]).await.unwrap_err();
        assert!(matches!(err, LlmError::Unavailable(_)));
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn mock_scripted_failure() {
        let client = MockChatClient::new().with_failure(LlmError::RequestFailed("boom".into()));
        let err = client.chat(&[ChatMessage::user("a")]).await.unwrap_err();
        assert!(matches!(err, LlmError::RequestFailed(_)));
    }

    #[test]
    fn messages_serialize_with_lowercase_roles() {
        let value = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(value, serde_json::json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn ollama_host_is_normalized() {
        let client = OllamaClient::new("http://localhost:11434/", "llama3.1").unwrap();
        assert_eq!(client.host(), "http://localhost:11434");
        assert_eq!(client.model(), "llama3.1");
    }

    #[test]
    fn ollama_reply_parses() {
        let raw = r#"{"model":"llama3.1","message":{"role":"assistant","content":"Hi"},"done":true}"#;
        let reply: OllamaChatResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(reply.message.content, "Hi");
    }
}
