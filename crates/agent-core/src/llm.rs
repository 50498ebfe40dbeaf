use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::agent::transcript::{Transcript, TurnMessage};
use crate::agent::AgentError;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "google/gemini-2.5-flash-image-preview:free";

/// Config for an OpenRouter-style chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Full endpoint URL, e.g. `https://openrouter.ai/api/v1/chat/completions`.
    pub endpoint: String,
    pub model: String,
    pub api_key: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl OpenRouterConfig {
    /// Builds a config from `OPENROUTER_API_KEY`. A missing or empty key is a
    /// fatal startup error: the agent refuses to construct without it.
    pub fn from_env() -> Result<Self, AgentError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or(AgentError::MissingCredential("OPENROUTER_API_KEY"))?;
        Ok(Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key,
            max_tokens: 1_000,
            temperature: 0.7,
        })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [TurnMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// Sends the whole transcript to the completion endpoint and returns the
/// assistant text. Non-success statuses surface both the status and the
/// response body; a success without content is a protocol error.
pub async fn query_chat(
    transcript: &Transcript,
    cfg: &OpenRouterConfig,
) -> Result<String, AgentError> {
    let request = ChatRequest {
        model: &cfg.model,
        messages: transcript.messages(),
        temperature: cfg.temperature,
        max_tokens: cfg.max_tokens,
    };

    let response = Client::new()
        .post(&cfg.endpoint)
        .bearer_auth(&cfg.api_key)
        .header("X-Title", "fe8-agent")
        .json(&request)
        .send()
        .await
        .map_err(|e| AgentError::Transport {
            what: "completion request",
            detail: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AgentError::Transport {
            what: "completion request",
            detail: format!("{status} - {body}"),
        });
    }

    let parsed: ChatResponse = response
        .json()
        .await
        .map_err(|e| AgentError::Protocol(format!("completion response decode failed: {e}")))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| AgentError::Protocol("no response content received".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_assistant_content() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            parsed.choices[0].message.content.as_deref(),
            Some("hello")
        );
    }

    #[test]
    fn response_without_choices_decodes_to_empty() {
        let parsed: ChatResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn request_serializes_messages_in_order() {
        let mut transcript = Transcript::new(10);
        transcript.set_system("sys");
        transcript.push(crate::agent::Role::User, "hi");
        let request = ChatRequest {
            model: "m",
            messages: transcript.messages(),
            temperature: 0.7,
            max_tokens: 1_000,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 1_000);
    }
}
