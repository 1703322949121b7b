//! Player and gun index assignment
//!
//! Pads fill player slots in enumeration order unless the front-end pins a
//! device to a player (`p1index=<enumeration index>` options or a `player`
//! field on the device). Light guns get their own index space, assigned in
//! enumeration order regardless of how pads land.

use retroshim_config::LauncherOptions;

use crate::{DeviceKind, InputDevice};

/// A pad occupying a player slot. `device` indexes the roster slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerSlot {
    /// 1-based player number
    pub player: u8,
    pub device: usize,
}

/// Resolved device assignment for one launch.
#[derive(Debug, Clone, Default)]
pub struct Assignment {
    pub players: Vec<PlayerSlot>,
    /// Roster indices of light guns, in gun-index order (gun 1 first)
    pub guns: Vec<usize>,
    /// Roster indices of mice, in mouse-index order
    pub mice: Vec<usize>,
}

/// Assign devices to player slots and gun/mouse indices.
pub fn assign_players(
    devices: &[InputDevice],
    options: &LauncherOptions,
    max_players: u8,
) -> Assignment {
    let mut assignment = Assignment::default();

    // Guns and mice keep enumeration order
    let mut by_enumeration: Vec<usize> = (0..devices.len()).collect();
    by_enumeration.sort_by_key(|&i| devices[i].index);

    for &i in &by_enumeration {
        match devices[i].kind {
            DeviceKind::LightGun => assignment.guns.push(i),
            DeviceKind::Mouse => assignment.mice.push(i),
            _ => {}
        }
    }

    // Pad slots: pins first, then fill in enumeration order
    let mut slot_device: Vec<Option<usize>> = vec![None; max_players as usize];
    let mut taken = vec![false; devices.len()];

    let mut pin = |player: u8, device: usize| {
        let slot = (player - 1) as usize;
        if slot >= slot_device.len() || slot_device[slot].is_some() || taken[device] {
            tracing::warn!(
                "Ignoring conflicting pin of '{}' to player {player}",
                devices[device].name
            );
            return;
        }
        slot_device[slot] = Some(device);
        taken[device] = true;
    };

    // Option pins take precedence over per-device pins
    for player in 1..=max_players {
        if let Some(idx) = options.get_int(&format!("p{player}index")) {
            if let Some(&device) = by_enumeration.iter().find(|&&i| {
                devices[i].kind == DeviceKind::Gamepad && i64::from(devices[i].index) == idx
            }) {
                pin(player, device);
            } else {
                tracing::warn!("p{player}index={idx} does not match a connected pad");
            }
        }
    }

    for &i in &by_enumeration {
        if devices[i].kind == DeviceKind::Gamepad
            && let Some(player) = devices[i].player
            && player >= 1
        {
            pin(player, i);
        }
    }

    // Remaining pads fill open slots in enumeration order
    let open_slots: Vec<usize> = slot_device
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_none())
        .map(|(s, _)| s)
        .collect();
    let mut next_open = open_slots.into_iter();
    for &i in &by_enumeration {
        if devices[i].kind != DeviceKind::Gamepad || taken[i] {
            continue;
        }
        let Some(slot) = next_open.next() else { break };
        slot_device[slot] = Some(i);
        taken[i] = true;
    }

    for (slot, device) in slot_device.into_iter().enumerate() {
        if let Some(device) = device {
            assignment.players.push(PlayerSlot {
                player: (slot + 1) as u8,
                device,
            });
        }
    }
    assignment.players.sort_by_key(|p| p.player);
    assignment
}

impl Assignment {
    /// Device occupying a player slot, if any.
    pub fn device_for_player(&self, player: u8) -> Option<usize> {
        self.players
            .iter()
            .find(|p| p.player == player)
            .map(|p| p.device)
    }
}
