//! Agent framework primitives: decision parsing, button dispatch, and the
//! turn-loop state machine.
//!
//! The contract with the model is a JSON Decision object, optionally wrapped
//! in a ```json fence. This module locks that contract down and translates it
//! into typed actions; execution happens through the actuator trait so the
//! loop itself never touches the network directly.

pub mod buttons;
pub mod dispatch;
pub mod harness;
pub mod r#loop;
pub mod prompt;
pub mod transcript;
pub mod wire;

pub use buttons::Button;
pub use dispatch::{press_buttons, ButtonActuator};
pub use harness::{tick, ChatClient, Pacer, TokioPacer, TurnOutcome};
pub use r#loop::{AgentConfig, AgentLoop, LoopState};
pub use transcript::{Role, Transcript, TurnMessage};
pub use wire::{
    extract_fenced_json, parse_decision, resolve_action, ActionRequest, Decision, ToolCallWire,
};

/// The one action identifier the loop knows how to execute.
pub const PRESS_BUTTONS_TOOL: &str = "pressButtons";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// A required credential was absent at startup. Fatal: the agent refuses
    /// to construct without it.
    MissingCredential(&'static str),
    /// The network was unreachable or an external interface answered with a
    /// non-success status. `detail` carries the status and body when present.
    Transport { what: &'static str, detail: String },
    /// The response body was missing expected content or the embedded
    /// Decision JSON did not parse.
    Protocol(String),
    /// A button symbol outside the canonical set was requested.
    InvalidButton(String),
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::MissingCredential(var) => {
                write!(f, "{var} environment variable is required")
            }
            AgentError::Transport { what, detail } => write!(f, "{what} failed: {detail}"),
            AgentError::Protocol(msg) => write!(f, "protocol error: {msg}"),
            AgentError::InvalidButton(sym) => write!(
                f,
                "invalid button \"{sym}\" (valid: {})",
                buttons::VALID_BUTTON_LIST
            ),
        }
    }
}

impl std::error::Error for AgentError {}

impl AgentError {
    /// Only credential absence terminates the process; every other kind is
    /// absorbed by the loop's recovery cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AgentError::MissingCredential(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_button_names_the_symbol() {
        let err = AgentError::InvalidButton("Z".to_string());
        assert!(format!("{err}").contains("\"Z\""));
    }

    #[test]
    fn only_missing_credential_is_fatal() {
        assert!(AgentError::MissingCredential("OPENROUTER_API_KEY").is_fatal());
        assert!(!AgentError::Protocol("bad json".to_string()).is_fatal());
        assert!(!AgentError::Transport {
            what: "button tap",
            detail: "connection refused".to_string(),
        }
        .is_fatal());
    }
}
