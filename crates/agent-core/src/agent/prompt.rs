//! Fixed prompt templates and the per-turn report builder.

/// Installed once as the system message before the loop starts.
pub const SYSTEM: &str = "You are an AI agent playing Fire Emblem: The Sacred Stones, a tactical RPG.

Your capabilities:
- Read game memory to understand current state
- Press buttons to control the game
- Take screenshots to see the current screen
- Make strategic decisions based on game information

Your goals:
- Play the game intelligently and strategically
- Make tactical decisions in battles
- Manage units, items, and resources effectively
- Progress through the story

Output format:
You MUST respond in a structured JSON format. Your response must be a single JSON object with the following keys:
- \"reasoning\": A string explaining your thought process and analysis of the current situation.
- \"plan\": An array of strings outlining your next few steps.
- \"tool_call\": An object representing the action to take this turn. It must have:
  - \"tool_name\": The name of the tool to use (e.g., \"pressButtons\").
  - \"parameters\": An object containing the parameters for the tool. For \"pressButtons\", the parameter is \"buttons\", which is an array of strings (e.g., [\"A\", \"Down\", \"Down\", \"A\"]).

Example response:
{
  \"reasoning\": \"The game has just started. I need to navigate the main menu to start a new game. I will press 'A' to get past the title screen, then navigate down to 'New Game'.\",
  \"plan\": [
    \"Select 'New Game' from the main menu.\",
    \"Choose a difficulty.\",
    \"Watch the opening cutscene.\"
  ],
  \"tool_call\": {
    \"tool_name\": \"pressButtons\",
    \"parameters\": {
      \"buttons\": [\"A\"]
    }
  }
}

Guidelines:
- Analyze the current situation before acting.
- Be concise but thorough in your responses.
- Focus on actionable next steps
- Ask for clarification if the game state is unclear";

/// Seeds the very first user turn.
pub const INITIAL_TURN: &str = "You are now controlling Fire Emblem: The Sacred Stones. The game should be loaded and ready at the title screen.

What is your first action? Provide your response in the required JSON format.";

/// Substituted as the next user turn after any recoverable failure. The
/// erroring assistant turn stays in the transcript so the model can see its
/// own mistake.
pub const ERROR_RECOVERY: &str = "An error occurred in the previous action. Please:
1. Assess what went wrong
2. Suggest an alternative approach
3. Try a simpler action if the previous one was complex";

pub const BATTLE_STRATEGY: &str = "You are now in a battle scenario. Consider:
- Unit positions and movement ranges
- Enemy threats and weaknesses
- Terrain advantages
- Available items and abilities
- Win conditions for this map

Plan your next move strategically.";

pub const MENU_NAVIGATION: &str = "You appear to be in a menu or dialogue. Consider:
- What options are available
- What information is being presented
- What your current objective should be
- Whether you need to make a selection or cancel

Decide on the appropriate menu action.";

/// Synthesizes the next user turn from a completed action. There is no
/// observation gathering yet, so the report is the generic outcome sentence.
pub fn turn_report(tool_name: &str, result: &str) -> String {
    format!(
        "The last action ({tool_name}) was executed with result: {result}. What is the next step based on your plan?"
    )
}

/// Result string for a tool name outside the supported set.
pub fn unknown_tool_result(tool_name: &str) -> String {
    format!("Unknown tool called: {tool_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_report_names_tool_and_result() {
        let report = turn_report("pressButtons", "OK");
        assert!(report.contains("(pressButtons)"));
        assert!(report.contains("result: OK"));
        assert!(report.contains("next step"));
    }

    #[test]
    fn unknown_tool_result_contains_the_name() {
        assert_eq!(
            unknown_tool_result("castSpell"),
            "Unknown tool called: castSpell"
        );
    }
}
