//! Per-game override layouts
//!
//! Some arcade games expect a button arrangement that differs from the
//! default pad layout (six-button fighters want punches on the top row,
//! Mortal Kombat wants block on a shoulder). Generators apply the remap
//! before looking up device codes, so the table stays emulator-agnostic.

use crate::Button;

/// Semantic remapping for a game: (emitted as, read from).
type Layout = &'static [(Button, Button)];

/// Street Fighter style: three punches across the face top row and L1,
/// three kicks across the bottom row and R1.
const SIX_BUTTON_FIGHTER: Layout = &[
    (Button::West, Button::West),   // LP
    (Button::North, Button::North), // MP
    (Button::L1, Button::R1),       // HP
    (Button::South, Button::South), // LK
    (Button::East, Button::East),   // MK
    (Button::R1, Button::R2),       // HK
];

/// Mortal Kombat: block moves to R2, run on L2.
const MK_LAYOUT: Layout = &[
    (Button::West, Button::North),
    (Button::North, Button::West),
    (Button::L1, Button::R2),
    (Button::R1, Button::L2),
];

/// Games whose default MAME button order reads better rotated one step.
const NEOGEO_LAYOUT: Layout = &[
    (Button::South, Button::West),
    (Button::East, Button::South),
    (Button::West, Button::North),
    (Button::North, Button::East),
];

/// Look up the override layout for a ROM name (MAME set name or file
/// stem). Clone sets share their parent's layout via prefix match.
pub fn game_layout(rom_name: &str) -> Option<Layout> {
    let name = rom_name.to_ascii_lowercase();

    const SF_SETS: &[&str] = &["sf2", "sfa", "sfiii", "ssf2", "hsf2", "xmvsf", "mvsc", "msh"];
    const MK_SETS: &[&str] = &["mk", "mk2", "mk3", "umk3", "mk4"];
    const NEOGEO_SETS: &[&str] = &["kof", "samsho", "garou", "mslug", "fatfury", "lastblad"];

    if MK_SETS.iter().any(|s| name == *s || name.starts_with(&format!("{s}r"))) {
        return Some(MK_LAYOUT);
    }
    if SF_SETS.iter().any(|s| name.starts_with(s)) {
        return Some(SIX_BUTTON_FIGHTER);
    }
    if NEOGEO_SETS.iter().any(|s| name.starts_with(s)) {
        return Some(NEOGEO_LAYOUT);
    }
    None
}

/// Apply a layout to a semantic button: the button to actually read for
/// the given emitted position.
pub fn apply_layout(layout: Option<Layout>, button: Button) -> Button {
    match layout {
        Some(entries) => entries
            .iter()
            .find(|(emitted, _)| *emitted == button)
            .map(|(_, read)| *read)
            .unwrap_or(button),
        None => button,
    }
}
