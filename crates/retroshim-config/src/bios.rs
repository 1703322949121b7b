//! BIOS/firmware requirements per system
//!
//! A missing required BIOS is a hard error surfaced to the user before the
//! emulator is spawned; the emulator's own error on the same condition is
//! far less readable.

use std::path::Path;

use crate::{ConfigError, GameSystem};

/// BIOS files a system needs before it can boot.
pub fn required_bios(system: &GameSystem) -> &'static [&'static str] {
    match system {
        GameSystem::Psx => &["scph5501.bin"],
        GameSystem::Dreamcast => &["dc_boot.bin"],
        GameSystem::GameBoyAdvance => &[],     // gba_bios.bin is optional for mgba
        GameSystem::Nes => &[],                // disksys.rom only needed for FDS images
        _ => &[],
    }
}

/// Verify every required BIOS file for the system exists under `bios_dir`.
pub fn check_bios(system: &GameSystem, bios_dir: &Path) -> Result<(), ConfigError> {
    for file in required_bios(system) {
        let path = bios_dir.join(file);
        if !path.exists() {
            return Err(ConfigError::MissingBios {
                system: system.short_name().to_string(),
                file: (*file).to_string(),
            });
        }
        tracing::debug!("Found BIOS {}", path.display());
    }
    Ok(())
}
