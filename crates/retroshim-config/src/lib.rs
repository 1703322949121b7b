//! Configuration layer for RetroShim
//!
//! Holds the launcher's own option dictionary and settings file, plus
//! writers for the on-disk config formats the target emulators parse at
//! their own startup (RetroArch `key = "value"` files and sectioned INI).

mod bios;
mod cfg_file;
mod ini_file;
mod options;
mod settings;
mod systems;

pub use bios::{check_bios, required_bios};
pub use cfg_file::CfgFile;
pub use ini_file::{IniFile, IniStyle};
pub use options::LauncherOptions;
pub use settings::LauncherSettings;
pub use systems::GameSystem;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Missing BIOS file for {system}: {file}")]
    MissingBios { system: String, file: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}
