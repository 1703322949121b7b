//! Input device model for RetroShim
//!
//! Resolves heterogeneous physical input devices (SDL-enumerated pads,
//! DirectInput, XInput, light guns, mice) into the semantic button space
//! the generators translate into each emulator's input-code address space.

mod assign;
mod button;
mod device;
mod layout;

pub use assign::{Assignment, PlayerSlot, assign_players};
pub use button::{AxisDir, Button, ButtonSource, HatDir};
pub use device::{DeviceApi, DeviceKind, InputDevice};
pub use layout::{apply_layout, game_layout};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("Invalid SDL mapping: {0}")]
    InvalidMapping(String),

    #[error("Unknown button name: {0}")]
    UnknownButton(String),
}
