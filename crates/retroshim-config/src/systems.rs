//! Supported game systems and their launch defaults

use serde::{Deserialize, Serialize};

/// Logical game platforms the shim can launch.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSystem {
    // Nintendo
    Nes,
    Snes,
    N64,
    GameBoy,
    GameBoyColor,
    GameBoyAdvance,
    Switch,

    // Sega
    MasterSystem,
    Genesis,
    GameGear,
    Dreamcast,
    Model3,

    // Sony
    Psx,

    // Arcade
    Mame,

    // Custom/Unknown
    #[serde(untagged)]
    Custom(String),
}

impl GameSystem {
    /// Resolve a system from its short name.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "nes" => GameSystem::Nes,
            "snes" => GameSystem::Snes,
            "n64" => GameSystem::N64,
            "gb" => GameSystem::GameBoy,
            "gbc" => GameSystem::GameBoyColor,
            "gba" => GameSystem::GameBoyAdvance,
            "switch" => GameSystem::Switch,
            "sms" | "mastersystem" => GameSystem::MasterSystem,
            "genesis" | "megadrive" => GameSystem::Genesis,
            "gg" | "gamegear" => GameSystem::GameGear,
            "dreamcast" => GameSystem::Dreamcast,
            "model3" => GameSystem::Model3,
            "psx" => GameSystem::Psx,
            "mame" | "arcade" => GameSystem::Mame,
            other => GameSystem::Custom(other.to_string()),
        }
    }

    /// Guess the system from a ROM file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "nes" | "fds" => Some(GameSystem::Nes),
            "smc" | "sfc" => Some(GameSystem::Snes),
            "n64" | "z64" | "v64" => Some(GameSystem::N64),
            "gb" => Some(GameSystem::GameBoy),
            "gbc" => Some(GameSystem::GameBoyColor),
            "gba" => Some(GameSystem::GameBoyAdvance),
            "nsp" | "xci" => Some(GameSystem::Switch),
            "sms" => Some(GameSystem::MasterSystem),
            "md" | "gen" => Some(GameSystem::Genesis),
            "gg" => Some(GameSystem::GameGear),
            "gdi" | "cdi" => Some(GameSystem::Dreamcast),
            "cue" | "pbp" => Some(GameSystem::Psx),
            // "zip" is ambiguous between MAME and Model 3 romsets
            _ => None,
        }
    }

    /// Short name used in directory paths.
    pub fn short_name(&self) -> &str {
        match self {
            GameSystem::Nes => "nes",
            GameSystem::Snes => "snes",
            GameSystem::N64 => "n64",
            GameSystem::GameBoy => "gb",
            GameSystem::GameBoyColor => "gbc",
            GameSystem::GameBoyAdvance => "gba",
            GameSystem::Switch => "switch",
            GameSystem::MasterSystem => "sms",
            GameSystem::Genesis => "genesis",
            GameSystem::GameGear => "gg",
            GameSystem::Dreamcast => "dreamcast",
            GameSystem::Model3 => "model3",
            GameSystem::Psx => "psx",
            GameSystem::Mame => "mame",
            GameSystem::Custom(name) => name,
        }
    }

    /// Display name.
    pub fn display_name(&self) -> &str {
        match self {
            GameSystem::Nes => "Nintendo Entertainment System",
            GameSystem::Snes => "Super Nintendo",
            GameSystem::N64 => "Nintendo 64",
            GameSystem::GameBoy => "Game Boy",
            GameSystem::GameBoyColor => "Game Boy Color",
            GameSystem::GameBoyAdvance => "Game Boy Advance",
            GameSystem::Switch => "Nintendo Switch",
            GameSystem::MasterSystem => "Sega Master System",
            GameSystem::Genesis => "Sega Genesis",
            GameSystem::GameGear => "Sega Game Gear",
            GameSystem::Dreamcast => "Sega Dreamcast",
            GameSystem::Model3 => "Sega Model 3",
            GameSystem::Psx => "Sony PlayStation",
            GameSystem::Mame => "MAME",
            GameSystem::Custom(name) => name,
        }
    }

    /// Default emulator family for the system.
    pub fn default_emulator(&self) -> &str {
        match self {
            GameSystem::Mame => "mame",
            GameSystem::Model3 => "supermodel",
            GameSystem::Switch => "yuzu",
            _ => "libretro",
        }
    }

    /// Default libretro core for systems launched through RetroArch.
    pub fn default_core(&self) -> Option<&str> {
        match self {
            GameSystem::Nes => Some("fceumm"),
            GameSystem::Snes => Some("snes9x"),
            GameSystem::N64 => Some("mupen64plus_next"),
            GameSystem::GameBoy | GameSystem::GameBoyColor => Some("gambatte"),
            GameSystem::GameBoyAdvance => Some("mgba"),
            GameSystem::MasterSystem | GameSystem::GameGear | GameSystem::Genesis => {
                Some("genesis_plus_gx")
            }
            GameSystem::Dreamcast => Some("flycast"),
            GameSystem::Psx => Some("pcsx_rearmed"),
            GameSystem::Mame => Some("mame"),
            GameSystem::Switch | GameSystem::Model3 | GameSystem::Custom(_) => None,
        }
    }
}
