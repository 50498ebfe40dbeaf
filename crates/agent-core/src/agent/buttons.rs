use std::fmt;

/// The ten GBA inputs the emulator tap endpoint accepts. Input parsing is
/// case-insensitive; the wire casing is fixed (`Start`, not `START`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    A,
    B,
    L,
    R,
    Start,
    Select,
    Up,
    Down,
    Left,
    Right,
}

pub const VALID_BUTTON_LIST: &str = "A, B, L, R, Start, Select, Up, Down, Left, Right";

impl Button {
    pub const ALL: [Button; 10] = [
        Button::A,
        Button::B,
        Button::L,
        Button::R,
        Button::Start,
        Button::Select,
        Button::Up,
        Button::Down,
        Button::Left,
        Button::Right,
    ];

    /// Parses a symbol case-insensitively. Anything outside the canonical set
    /// is `None`; the caller decides whether that is a validation error.
    pub fn parse(input: &str) -> Option<Button> {
        match input.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Button::A),
            "b" => Some(Button::B),
            "l" => Some(Button::L),
            "r" => Some(Button::R),
            "start" => Some(Button::Start),
            "select" => Some(Button::Select),
            "up" => Some(Button::Up),
            "down" => Some(Button::Down),
            "left" => Some(Button::Left),
            "right" => Some(Button::Right),
            _ => None,
        }
    }

    /// Canonical casing expected by the tap endpoint.
    pub fn label(self) -> &'static str {
        match self {
            Button::A => "A",
            Button::B => "B",
            Button::L => "L",
            Button::R => "R",
            Button::Start => "Start",
            Button::Select => "Select",
            Button::Up => "Up",
            Button::Down => "Down",
            Button::Left => "Left",
            Button::Right => "Right",
        }
    }
}

impl fmt::Display for Button {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Menu shortcuts the prompts reference by name.
pub mod sequences {
    use super::Button;

    pub const CONFIRM: [Button; 1] = [Button::A];
    pub const CANCEL: [Button; 1] = [Button::B];
    pub const MENU_UP: [Button; 1] = [Button::Up];
    pub const MENU_DOWN: [Button; 1] = [Button::Down];
    pub const PAUSE_MENU: [Button; 1] = [Button::Start];
    /// GBA soft reset chord.
    pub const RESET_TO_TITLE: [Button; 4] = [Button::Start, Button::Select, Button::A, Button::B];
}
