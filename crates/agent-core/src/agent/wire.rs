use serde::{Deserialize, Serialize};

use super::{AgentError, PRESS_BUTTONS_TOOL};

pub const FENCE_START: &str = "```json";
pub const FENCE_END: &str = "```";

/// The structured object every assistant turn is expected to contain.
///
/// `reasoning` and `plan` are informational only; `tool_call` is what drives
/// the turn and is therefore mandatory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Decision {
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub plan: Vec<String>,
    pub tool_call: ToolCallWire,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ToolCallWire {
    pub tool_name: String,
    #[serde(default)]
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
struct PressButtonsArgs {
    buttons: ButtonsField,
}

/// `buttons` may be a sequence or a single bare symbol; a bare symbol means
/// one tap.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
enum ButtonsField {
    One(String),
    Many(Vec<String>),
}

impl ButtonsField {
    fn into_vec(self) -> Vec<String> {
        match self {
            ButtonsField::One(symbol) => vec![symbol],
            ButtonsField::Many(symbols) => symbols,
        }
    }
}

/// A validated next action. Unknown tool names are a normal variant, not an
/// error: "the model asked for something we don't support" is
/// business-as-usual, unlike a broken exchange.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionRequest {
    PressButtons { buttons: Vec<String> },
    Unsupported { tool_name: String },
}

/// Extracts the contents of the first ```json fenced block, if any.
///
/// Models frequently wrap the payload in a fence; when they don't, the caller
/// falls back to treating the whole message as the payload.
pub fn extract_fenced_json(text: &str) -> Option<&str> {
    let start = text.find(FENCE_START)? + FENCE_START.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_END)?;
    Some(rest[..end].trim())
}

/// Parses an assistant message into a `Decision`.
///
/// Contract: the fence is optional, partial structure is not. A body that
/// does not parse into the full Decision shape is a protocol failure, never a
/// best-effort Decision.
pub fn parse_decision(text: &str) -> Result<Decision, AgentError> {
    let candidate = extract_fenced_json(text).unwrap_or_else(|| text.trim());
    serde_json::from_str(candidate)
        .map_err(|e| AgentError::Protocol(format!("decision parse failed: {e}")))
}

/// Resolves a Decision's tool call against the closed action set.
///
/// Malformed parameters for a recognized tool are a protocol failure;
/// an unrecognized tool name is `ActionRequest::Unsupported`.
pub fn resolve_action(decision: &Decision) -> Result<ActionRequest, AgentError> {
    if decision.tool_call.tool_name == PRESS_BUTTONS_TOOL {
        let args: PressButtonsArgs =
            serde_json::from_value(decision.tool_call.parameters.clone()).map_err(|e| {
                AgentError::Protocol(format!("{PRESS_BUTTONS_TOOL} parameters: {e}"))
            })?;
        Ok(ActionRequest::PressButtons {
            buttons: args.buttons.into_vec(),
        })
    } else {
        Ok(ActionRequest::Unsupported {
            tool_name: decision.tool_call.tool_name.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FENCED: &str = "```json\n{\"reasoning\":\"x\",\"plan\":[],\"tool_call\":{\"tool_name\":\"pressButtons\",\"parameters\":{\"buttons\":[\"A\"]}}}\n```";
    const BARE: &str = "{\"reasoning\":\"x\",\"plan\":[],\"tool_call\":{\"tool_name\":\"pressButtons\",\"parameters\":{\"buttons\":[\"A\"]}}}";

    #[test]
    fn extract_fenced_block() {
        let got = extract_fenced_json(FENCED).unwrap();
        assert_eq!(got, BARE);
    }

    #[test]
    fn parse_fenced_and_bare_agree() {
        let fenced = parse_decision(FENCED).unwrap();
        let bare = parse_decision(BARE).unwrap();
        assert_eq!(fenced, bare);
        assert_eq!(fenced.tool_call.tool_name, "pressButtons");
        match resolve_action(&fenced).unwrap() {
            ActionRequest::PressButtons { buttons } => assert_eq!(buttons, vec!["A"]),
            other => panic!("expected pressButtons, got {other:?}"),
        }
    }

    #[test]
    fn parse_tolerates_prose_around_the_fence() {
        let text = format!("Here is my move.\n\n{FENCED}\nGood luck!");
        let decision = parse_decision(&text).unwrap();
        assert_eq!(decision.reasoning, "x");
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = parse_decision("not json at all").unwrap_err();
        assert!(matches!(err, AgentError::Protocol(_)));
    }

    #[test]
    fn parse_rejects_missing_tool_call() {
        let err = parse_decision("{\"reasoning\":\"x\",\"plan\":[]}").unwrap_err();
        assert!(matches!(err, AgentError::Protocol(_)));
    }

    #[test]
    fn reasoning_and_plan_are_optional() {
        let decision = parse_decision(
            "{\"tool_call\":{\"tool_name\":\"pressButtons\",\"parameters\":{\"buttons\":[]}}}",
        )
        .unwrap();
        assert_eq!(decision.reasoning, "");
        assert!(decision.plan.is_empty());
    }

    #[test]
    fn unknown_tool_is_not_an_error() {
        let decision = parse_decision(
            "{\"tool_call\":{\"tool_name\":\"castSpell\",\"parameters\":{\"spell\":\"fire\"}}}",
        )
        .unwrap();
        match resolve_action(&decision).unwrap() {
            ActionRequest::Unsupported { tool_name } => assert_eq!(tool_name, "castSpell"),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn bare_symbol_buttons_parameter_means_one_tap() {
        let decision = parse_decision(
            "{\"tool_call\":{\"tool_name\":\"pressButtons\",\"parameters\":{\"buttons\":\"A\"}}}",
        )
        .unwrap();
        match resolve_action(&decision).unwrap() {
            ActionRequest::PressButtons { buttons } => assert_eq!(buttons, vec!["A"]),
            other => panic!("expected pressButtons, got {other:?}"),
        }
    }

    #[test]
    fn malformed_press_buttons_parameters_fail() {
        let decision = parse_decision(
            "{\"tool_call\":{\"tool_name\":\"pressButtons\",\"parameters\":{\"keys\":[\"A\"]}}}",
        )
        .unwrap();
        let err = resolve_action(&decision).unwrap_err();
        assert!(matches!(err, AgentError::Protocol(_)));
    }
}
