//! Wire types for the Ollama `api/generate` and `api/chat` routes

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Sampling knobs sent as `options`
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Sampling {
    pub temperature: f32,
    /// Ollama's name for the generated-token limit
    pub num_predict: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct PromptBody<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
    pub options: Sampling,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatBody<'a> {
    pub model: &'a str,
    pub messages: &'a [ChatMessage],
    pub stream: bool,
    pub options: Sampling,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PromptReply {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatReply {
    pub message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_body_shape() {
        let messages = [
            ChatMessage::system("You are a music expert."),
            ChatMessage::user("Who sang Yellow?"),
        ];
        let body = ChatBody {
            model: "mistral",
            messages: &messages,
            stream: false,
            options: Sampling {
                temperature: 0.5,
                num_predict: 128,
            },
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "Who sang Yellow?");
        assert_eq!(json["options"]["num_predict"], 128);
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_chat_reply_ignores_extra_fields() {
        let reply: ChatReply = serde_json::from_str(
            r#"{"model":"mistral","message":{"role":"assistant","content":"Coldplay."},"done":true}"#,
        )
        .unwrap();
        assert_eq!(reply.message, ChatMessage::assistant("Coldplay."));
    }
}
