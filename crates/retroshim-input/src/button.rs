//! Semantic button names and device-local sources

use serde::{Deserialize, Serialize};

use crate::InputError;

/// Semantic input names, independent of any device or emulator.
///
/// Face buttons follow the positional convention ("south" is the lower
/// face button regardless of its label on the plastic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Button {
    South,
    East,
    West,
    North,
    L1,
    R1,
    L2,
    R2,
    L3,
    R3,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    LeftX,
    LeftY,
    RightX,
    RightY,
    /// Gun trigger (guns only)
    Trigger,
    /// Launcher hotkey modifier
    Hotkey,
}

impl Button {
    /// Wire name used in option keys and mapping files.
    pub fn name(&self) -> &'static str {
        match self {
            Button::South => "south",
            Button::East => "east",
            Button::West => "west",
            Button::North => "north",
            Button::L1 => "l1",
            Button::R1 => "r1",
            Button::L2 => "l2",
            Button::R2 => "r2",
            Button::L3 => "l3",
            Button::R3 => "r3",
            Button::Select => "select",
            Button::Start => "start",
            Button::Up => "up",
            Button::Down => "down",
            Button::Left => "left",
            Button::Right => "right",
            Button::LeftX => "leftx",
            Button::LeftY => "lefty",
            Button::RightX => "rightx",
            Button::RightY => "righty",
            Button::Trigger => "trigger",
            Button::Hotkey => "hotkey",
        }
    }

    /// Parse a wire name, accepting the SDL mapping-string aliases.
    pub fn from_name(name: &str) -> Result<Self, InputError> {
        let button = match name.to_ascii_lowercase().as_str() {
            "south" | "a" => Button::South,
            "east" | "b" => Button::East,
            "west" | "x" => Button::West,
            "north" | "y" => Button::North,
            "l1" | "leftshoulder" => Button::L1,
            "r1" | "rightshoulder" => Button::R1,
            "l2" | "lefttrigger" => Button::L2,
            "r2" | "righttrigger" => Button::R2,
            "l3" | "leftstick" => Button::L3,
            "r3" | "rightstick" => Button::R3,
            "select" | "back" => Button::Select,
            "start" => Button::Start,
            "up" | "dpup" => Button::Up,
            "down" | "dpdown" => Button::Down,
            "left" | "dpleft" => Button::Left,
            "right" | "dpright" => Button::Right,
            "leftx" => Button::LeftX,
            "lefty" => Button::LeftY,
            "rightx" => Button::RightX,
            "righty" => Button::RightY,
            "trigger" => Button::Trigger,
            "hotkey" | "guide" => Button::Hotkey,
            other => return Err(InputError::UnknownButton(other.to_string())),
        };
        Ok(button)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisDir {
    Positive,
    Negative,
    /// Whole axis (analog sticks, gun axes)
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HatDir {
    Up,
    Right,
    Down,
    Left,
}

/// The device-local element a semantic button is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonSource {
    Button(u8),
    Axis { id: u8, dir: AxisDir },
    Hat { id: u8, dir: HatDir },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for button in [
            Button::South,
            Button::L2,
            Button::Select,
            Button::LeftX,
            Button::Hotkey,
        ] {
            assert_eq!(Button::from_name(button.name()).unwrap(), button);
        }
    }

    #[test]
    fn test_sdl_aliases() {
        assert_eq!(Button::from_name("a").unwrap(), Button::South);
        assert_eq!(Button::from_name("leftshoulder").unwrap(), Button::L1);
        assert_eq!(Button::from_name("dpup").unwrap(), Button::Up);
        assert_eq!(Button::from_name("back").unwrap(), Button::Select);
    }

    #[test]
    fn test_unknown_name() {
        assert!(Button::from_name("turbo9000").is_err());
    }
}
