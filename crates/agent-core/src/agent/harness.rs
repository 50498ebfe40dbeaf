use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::dispatch::{press_buttons, ButtonActuator};
use super::r#loop::{AgentLoop, LoopState};
use super::transcript::{Role, Transcript};
use super::wire::{parse_decision, resolve_action, ActionRequest};
use super::{AgentError, Button, PRESS_BUTTONS_TOOL};

/// One chat-completions exchange over the whole transcript.
pub trait ChatClient: Send + Sync {
    fn complete<'a>(
        &'a self,
        transcript: &'a Transcript,
    ) -> Pin<Box<dyn Future<Output = Result<String, AgentError>> + Send + 'a>>;
}

/// Timed suspension. Injectable so tests can run the loop synchronously and
/// assert on the requested delays instead of waiting them out.
pub trait Pacer: Send + Sync {
    fn wait<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>>;
}

/// The production pacer: a plain `tokio::time::sleep`.
pub struct TokioPacer;

impl Pacer for TokioPacer {
    fn wait<'a>(&'a self, duration: Duration) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(tokio::time::sleep(duration))
    }
}

/// How one turn ended, short of the failure path. An unrecognized tool name
/// is a successful turn whose report tells the model so.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    Executed {
        tool_name: String,
        pressed: Vec<Button>,
    },
    UnknownTool {
        tool_name: String,
    },
}

impl TurnOutcome {
    pub fn tool_name(&self) -> &str {
        match self {
            TurnOutcome::Executed { tool_name, .. } => tool_name,
            TurnOutcome::UnknownTool { tool_name } => tool_name,
        }
    }

    /// The result string reported back to the model in the next user turn.
    pub fn result_string(&self) -> String {
        match self {
            TurnOutcome::Executed { .. } => "OK".to_string(),
            TurnOutcome::UnknownTool { tool_name } => super::prompt::unknown_tool_result(tool_name),
        }
    }
}

/// One turn of the agent: append the pending user text, query the model,
/// extract the Decision, and dispatch its action.
///
/// Any `Err` here is a turn failure for the caller to convert into the
/// recovery cycle; the assistant text (when one was received) is already in
/// the transcript and is deliberately not rolled back.
pub async fn tick(
    agent: &mut AgentLoop,
    llm: &dyn ChatClient,
    actuator: &dyn ButtonActuator,
    pacer: &dyn Pacer,
) -> Result<TurnOutcome, AgentError> {
    let user_text = std::mem::take(&mut agent.pending_user);
    agent.transcript.push(Role::User, user_text);

    agent.state = LoopState::AwaitingResponse;
    let raw = llm.complete(&agent.transcript).await?;
    agent.transcript.push(Role::Assistant, raw.clone());

    let decision = parse_decision(&raw)?;
    println!("agent.turn.reasoning {}", decision.reasoning);
    println!(
        "agent.turn.plan {}",
        serde_json::to_string(&decision.plan).unwrap_or_else(|_| "[]".to_string())
    );

    agent.state = LoopState::Dispatching;
    match resolve_action(&decision)? {
        ActionRequest::PressButtons { buttons } => {
            println!("agent.turn.action tool={PRESS_BUTTONS_TOOL} buttons={buttons:?}");
            let pressed =
                press_buttons(actuator, pacer, agent.config.button_delay, &buttons).await?;
            Ok(TurnOutcome::Executed {
                tool_name: PRESS_BUTTONS_TOOL.to_string(),
                pressed,
            })
        }
        ActionRequest::Unsupported { tool_name } => {
            println!("agent.turn.action.unknown tool={tool_name}");
            Ok(TurnOutcome::UnknownTool { tool_name })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executed_outcome_reports_ok() {
        let outcome = TurnOutcome::Executed {
            tool_name: PRESS_BUTTONS_TOOL.to_string(),
            pressed: vec![Button::A],
        };
        assert_eq!(outcome.result_string(), "OK");
        assert_eq!(outcome.tool_name(), "pressButtons");
    }

    #[test]
    fn unknown_outcome_reports_the_tool_name() {
        let outcome = TurnOutcome::UnknownTool {
            tool_name: "castSpell".to_string(),
        };
        assert_eq!(outcome.result_string(), "Unknown tool called: castSpell");
    }
}
