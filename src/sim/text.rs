//! On-screen text for the host page
//!
//! Instructions are written for a mouse; touch devices get "Tap" in place of
//! "Click".

use serde::{Deserialize, Serialize};

use super::state::{MatchState, Side};

/// How the player is giving input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputDevice {
    #[default]
    Mouse,
    Touch,
}

impl InputDevice {
    pub fn action_word(&self) -> &'static str {
        match self {
            InputDevice::Mouse => "Click",
            InputDevice::Touch => "Tap",
        }
    }
}

/// Swap "Click" for the device's action word
pub fn instruction(desktop_text: &str, device: InputDevice) -> String {
    match device {
        InputDevice::Mouse => desktop_text.to_string(),
        InputDevice::Touch => desktop_text.replace("Click", device.action_word()),
    }
}

/// Status line for the current phase
pub fn prompt(state: MatchState, device: InputDevice) -> String {
    let text = match state {
        MatchState::Tutorial => "",
        MatchState::WaitingForInput => "Click to start power bar",
        MatchState::PoweringUp => "Click again to throw!",
        MatchState::PlayerThrowing => "...",
        MatchState::OpponentThrowing => "Opponent is throwing...",
        MatchState::GameOver => "Click to Play Again",
    };
    instruction(text, device)
}

/// Status line right after an impact
pub fn outcome_banner(attacker: Side, success: bool) -> &'static str {
    match (attacker, success) {
        (Side::Player, true) => "FLIPPED!",
        (Side::Player, false) => "MISSED!",
        (Side::Opponent, true) => "OPPONENT FLIPPED!",
        (Side::Opponent, false) => "OPPONENT MISSED!",
    }
}

/// Big action text at game over
pub fn result_text(winner: Side) -> &'static str {
    match winner {
        Side::Player => "YOU WIN!",
        Side::Opponent => "YOU LOSE!",
    }
}

/// Tutorial overlay lines
pub fn tutorial_lines(device: InputDevice) -> [String; 3] {
    let action = device.action_word();
    [
        format!("1. {} the screen to start the power bar.", action),
        format!("2. {} again to stop the indicator.", action),
        "Aim for the bright center for a Super Slam!".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touch_prompts() {
        assert_eq!(
            prompt(MatchState::WaitingForInput, InputDevice::Mouse),
            "Click to start power bar"
        );
        assert_eq!(
            prompt(MatchState::WaitingForInput, InputDevice::Touch),
            "Tap to start power bar"
        );
        assert_eq!(
            prompt(MatchState::GameOver, InputDevice::Touch),
            "Tap to Play Again"
        );
        assert_eq!(
            prompt(MatchState::OpponentThrowing, InputDevice::Touch),
            "Opponent is throwing..."
        );
    }

    #[test]
    fn test_banners() {
        assert_eq!(outcome_banner(Side::Player, true), "FLIPPED!");
        assert_eq!(outcome_banner(Side::Opponent, false), "OPPONENT MISSED!");
        assert_eq!(result_text(Side::Opponent), "YOU LOSE!");
    }

    #[test]
    fn test_tutorial_uses_action_word() {
        let lines = tutorial_lines(InputDevice::Touch);
        assert!(lines[0].starts_with("1. Tap"));
        assert!(lines[1].starts_with("2. Tap again"));
    }
}
