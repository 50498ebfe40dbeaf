use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::harness::Pacer;
use super::{AgentError, Button};

pub const DEFAULT_BUTTON_DELAY: Duration = Duration::from_millis(500);

/// One canonical button tap against the emulator. Implementations report
/// transport failures (unreachable endpoint, non-2xx status) as
/// `AgentError::Transport`.
pub trait ButtonActuator: Send + Sync {
    fn tap<'a>(
        &'a self,
        button: Button,
    ) -> Pin<Box<dyn Future<Output = Result<(), AgentError>> + Send + 'a>>;
}

/// Validates and forwards a button sequence, one tap at a time.
///
/// Each element is parsed case-insensitively; an unknown symbol or a failed
/// tap aborts the whole call (taps already issued are not rolled back, and
/// there is no internal retry: that policy belongs to the loop). The pause
/// between taps exists because the emulator models discrete taps and
/// unspaced requests can get dropped or coalesced.
pub async fn press_buttons(
    actuator: &dyn ButtonActuator,
    pacer: &dyn Pacer,
    delay: Duration,
    inputs: &[String],
) -> Result<Vec<Button>, AgentError> {
    let mut pressed = Vec::with_capacity(inputs.len());
    for (i, raw) in inputs.iter().enumerate() {
        let button =
            Button::parse(raw).ok_or_else(|| AgentError::InvalidButton(raw.clone()))?;
        actuator.tap(button).await?;
        pressed.push(button);
        if i + 1 < inputs.len() {
            pacer.wait(delay).await;
        }
    }
    Ok(pressed)
}
