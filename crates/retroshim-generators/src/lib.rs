//! Configuration generators for RetroShim
//!
//! One generator per emulator family. Each takes a [`LaunchContext`],
//! writes whatever configuration artifacts that emulator parses at its own
//! startup (cfg, INI, controller XML), and returns the command line to
//! spawn it with.

mod context;
mod mame;
mod retroarch;
mod supermodel;
mod xml;
mod yuzu;

pub use context::{LaunchContext, LaunchSpec};
pub use mame::MameGenerator;
pub use retroarch::RetroArchGenerator;
pub use supermodel::SupermodelGenerator;
pub use xml::XmlWriter;
pub use yuzu::YuzuGenerator;

use std::path::PathBuf;
use thiserror::Error;

use retroshim_config::ConfigError;

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("ROM not found: {0}")]
    RomNotFound(PathBuf),

    #[error("Core not found: {0}")]
    CoreNotFound(String),

    #[error("System not supported by this generator: {0}")]
    UnsupportedSystem(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A configuration generator for one emulator family.
pub trait Generator {
    /// Emulator name this generator answers to ("libretro", "mame", ...).
    fn name(&self) -> &'static str;

    /// Write config artifacts and build the launch command.
    fn generate(&self, ctx: &LaunchContext) -> Result<LaunchSpec, GeneratorError>;
}

/// Look up the generator for an emulator name.
pub fn generator_for(emulator: &str) -> Option<Box<dyn Generator>> {
    match emulator.to_ascii_lowercase().as_str() {
        "libretro" | "retroarch" => Some(Box::new(RetroArchGenerator)),
        "mame" => Some(Box::new(MameGenerator)),
        "supermodel" | "model3" => Some(Box::new(SupermodelGenerator)),
        "yuzu" => Some(Box::new(YuzuGenerator)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry() {
        assert_eq!(generator_for("libretro").unwrap().name(), "libretro");
        assert_eq!(generator_for("MAME").unwrap().name(), "mame");
        assert_eq!(generator_for("model3").unwrap().name(), "supermodel");
        assert_eq!(generator_for("yuzu").unwrap().name(), "yuzu");
        assert!(generator_for("dolphin").is_none());
    }
}
