use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use reqwest::Client;

use fe8_agent_core::agent::{
    AgentConfig, AgentError, AgentLoop, Button, ButtonActuator, ChatClient, TokioPacer,
    Transcript,
};
use fe8_agent_core::llm::{query_chat, OpenRouterConfig};

const DEFAULT_TAP_URL: &str = "http://localhost:5000/mgba-http/button/tap";

struct RunnerLlm {
    cfg: OpenRouterConfig,
}

impl ChatClient for RunnerLlm {
    fn complete<'a>(
        &'a self,
        transcript: &'a Transcript,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>> {
        Box::pin(async move { query_chat(transcript, &self.cfg).await })
    }
}

/// Forwards canonical button taps to the mGBA HTTP control endpoint.
struct HttpActuator {
    tap_url: String,
    http: Client,
}

impl HttpActuator {
    fn new(tap_url: String) -> Self {
        Self {
            tap_url,
            http: Client::new(),
        }
    }
}

impl ButtonActuator for HttpActuator {
    fn tap<'a>(
        &'a self,
        button: Button,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>> {
        Box::pin(async move {
            let response = self
                .http
                .post(&self.tap_url)
                .query(&[("key", button.label())])
                .send()
                .await
                .map_err(|e| AgentError::Transport {
                    what: "button tap",
                    detail: e.to_string(),
                })?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AgentError::Transport {
                    what: "button tap",
                    detail: format!("{status} - {body}"),
                });
            }
            Ok(())
        })
    }
}

fn env_string(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn env_millis(name: &str) -> Option<Duration> {
    env_string(name)
        .and_then(|v| v.parse().ok())
        .map(Duration::from_millis)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut llm_cfg = OpenRouterConfig::from_env()?;
    if let Some(model) = env_string("FE8_AGENT_MODEL") {
        llm_cfg.model = model;
    }
    if let Some(endpoint) = env_string("FE8_AGENT_ENDPOINT") {
        llm_cfg.endpoint = endpoint;
    }

    let tap_url = env_string("FE8_AGENT_TAP_URL").unwrap_or_else(|| DEFAULT_TAP_URL.to_string());

    let mut agent_cfg = AgentConfig::default();
    if let Some(interval) = env_millis("FE8_AGENT_TURN_INTERVAL_MS") {
        agent_cfg.turn_interval = interval;
    }
    if let Some(retry) = env_millis("FE8_AGENT_ERROR_RETRY_MS") {
        agent_cfg.error_retry_delay = retry;
    }
    if let Some(delay) = env_millis("FE8_AGENT_BUTTON_DELAY_MS") {
        agent_cfg.button_delay = delay;
    }
    if let Some(max) = env_string("FE8_AGENT_MAX_HISTORY").and_then(|v| v.parse().ok()) {
        agent_cfg.max_history = max;
    }

    println!("agent.start model={} tap_url={tap_url}", llm_cfg.model);

    let llm = RunnerLlm { cfg: llm_cfg };
    let actuator = HttpActuator::new(tap_url);
    let mut agent = AgentLoop::new(agent_cfg);

    agent.run(&llm, &actuator, &TokioPacer).await;
    Ok(())
}
