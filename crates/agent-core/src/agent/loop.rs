use std::time::Duration;

use super::dispatch::{ButtonActuator, DEFAULT_BUTTON_DELAY};
use super::harness::{tick, ChatClient, Pacer};
use super::prompt;
use super::transcript::Transcript;

#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Pause between successful turns; bounds the request rate to the model.
    pub turn_interval: Duration,
    /// Pause before retrying after a failed turn. At least as long as the
    /// normal pacing.
    pub error_retry_delay: Duration,
    /// Pause between consecutive button taps within one dispatch.
    pub button_delay: Duration,
    /// Transcript retention bound (system message included).
    pub max_history: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            turn_interval: Duration::from_millis(5_000),
            error_retry_delay: Duration::from_millis(3_000),
            button_delay: DEFAULT_BUTTON_DELAY,
            max_history: 20,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// A completion request is outstanding (or about to be issued).
    AwaitingResponse,
    /// A Decision has been parsed and its action is executing.
    Dispatching,
    /// The previous turn failed; the recovery prompt is queued.
    Recovering,
}

/// The conversational control loop: owns the transcript, the pending next
/// user turn, and the loop state. One instance per agent; everything mutable
/// lives here so tests can run several independent loops.
#[derive(Debug)]
pub struct AgentLoop {
    pub config: AgentConfig,
    pub transcript: Transcript,
    pub state: LoopState,
    pub pending_user: String,
}

impl AgentLoop {
    /// Installs the system prompt and seeds the fixed first turn.
    pub fn new(config: AgentConfig) -> Self {
        let mut transcript = Transcript::new(config.max_history);
        transcript.set_system(prompt::SYSTEM);
        Self {
            config,
            transcript,
            state: LoopState::AwaitingResponse,
            pending_user: prompt::INITIAL_TURN.to_string(),
        }
    }

    /// One full iteration: run the turn, synthesize the next user text, and
    /// pace. Every recoverable error is absorbed into the recovery cycle
    /// here; nothing escapes to the caller.
    pub async fn step(
        &mut self,
        llm: &dyn ChatClient,
        actuator: &dyn ButtonActuator,
        pacer: &dyn Pacer,
    ) {
        match tick(self, llm, actuator, pacer).await {
            Ok(outcome) => {
                self.pending_user =
                    prompt::turn_report(outcome.tool_name(), &outcome.result_string());
                self.state = LoopState::AwaitingResponse;
                pacer.wait(self.config.turn_interval).await;
            }
            Err(err) => {
                eprintln!("agent.turn.error {err}");
                self.pending_user = prompt::ERROR_RECOVERY.to_string();
                self.state = LoopState::Recovering;
                pacer.wait(self.config.error_retry_delay).await;
            }
        }
    }

    /// Runs until the hosting process is stopped. There is no termination
    /// condition and no cancellation: a hung external interface stalls the
    /// loop rather than aborting it.
    pub async fn run(
        &mut self,
        llm: &dyn ChatClient,
        actuator: &dyn ButtonActuator,
        pacer: &dyn Pacer,
    ) {
        loop {
            self.step(llm, actuator, pacer).await;
        }
    }
}
