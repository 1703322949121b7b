//! Per-game input remap files
//!
//! RetroArch reads `.rmp` files mapping each player's retropad buttons to
//! different retro ids. The shim writes one when the front-end passed any
//! `pN_btn_<name>=<name>` option, under `remaps/<core>/<game>.rmp`.

use std::path::PathBuf;

use retroshim_config::CfgFile;
use retroshim_input::Button;

use crate::{GeneratorError, LaunchContext};

const MAX_PLAYERS: u8 = 4;

/// Retropad buttons a remap can address: (semantic, rmp key suffix,
/// libretro device id).
const RETROPAD: &[(Button, &str, u8)] = &[
    (Button::South, "b", 0),
    (Button::West, "y", 1),
    (Button::Select, "select", 2),
    (Button::Start, "start", 3),
    (Button::East, "a", 8),
    (Button::North, "x", 9),
    (Button::L1, "l", 10),
    (Button::R1, "r", 11),
    (Button::L2, "l2", 12),
    (Button::R2, "r2", 13),
    (Button::L3, "l3", 14),
    (Button::R3, "r3", 15),
];

fn retro_id(button: Button) -> Option<u8> {
    RETROPAD
        .iter()
        .find(|(b, _, _)| *b == button)
        .map(|(_, _, id)| *id)
}

/// Write the remap file if any remap options are present. Returns the path
/// to hand to `--appendconfig`-style loading, or None when no remap was
/// requested.
pub fn write_remap(ctx: &LaunchContext, core: &str) -> Result<Option<PathBuf>, GeneratorError> {
    let mut rmp = CfgFile::new();

    for player in 1..=MAX_PLAYERS {
        for (emitted, suffix, _) in RETROPAD {
            let option_key = format!("p{player}_btn_{}", emitted.name());
            let Some(target_name) = ctx.options.get(&option_key) else {
                continue;
            };
            let Ok(target) = Button::from_name(target_name) else {
                tracing::warn!("Ignoring {option_key}: unknown button '{target_name}'");
                continue;
            };
            let Some(id) = retro_id(target) else {
                tracing::warn!("Ignoring {option_key}: '{target_name}' is not a retropad button");
                continue;
            };
            rmp.set(format!("input_player{player}_btn_{suffix}"), id.to_string());
        }
    }

    if rmp.is_empty() {
        return Ok(None);
    }

    let path = ctx
        .settings
        .retroarch_config_dir
        .join("remaps")
        .join(core)
        .join(format!("{}.rmp", ctx.rom_name()));
    rmp.save(&path)?;
    tracing::info!("Wrote input remap {}", path.display());
    Ok(Some(path))
}
