//! Physical input devices

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{AxisDir, Button, ButtonSource, HatDir, InputError};

/// Input technology the device is enumerated through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceApi {
    Sdl,
    DirectInput,
    XInput,
}

/// What kind of device this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Gamepad,
    Keyboard,
    LightGun,
    Mouse,
}

/// A connected physical input device.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputDevice {
    /// Human-readable name as reported by the driver
    pub name: String,

    pub api: DeviceApi,

    pub kind: DeviceKind,

    /// Enumeration index within the API (0-based)
    pub index: u8,

    /// SDL joystick GUID, when known
    #[serde(default)]
    pub guid: Option<String>,

    /// Player this device is pinned to (1-based), when the front-end asked
    /// for one explicitly
    #[serde(default)]
    pub player: Option<u8>,

    /// Semantic-button to device-element bindings
    #[serde(default)]
    pub sources: HashMap<Button, ButtonSource>,
}

impl InputDevice {
    pub fn new(name: impl Into<String>, api: DeviceApi, kind: DeviceKind, index: u8) -> Self {
        Self {
            name: name.into(),
            api,
            kind,
            index,
            guid: None,
            player: None,
            sources: HashMap::new(),
        }
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    pub fn with_player(mut self, player: u8) -> Self {
        self.player = Some(player);
        self
    }

    pub fn with_source(mut self, button: Button, source: ButtonSource) -> Self {
        self.sources.insert(button, source);
        self
    }

    /// Parse an SDL game-controller-db mapping fragment and absorb its
    /// bindings, e.g. `a:b0,b:b1,leftx:a0,dpup:h0.1,lefttrigger:a2`.
    ///
    /// Unknown field names are skipped; malformed element codes are an
    /// error.
    pub fn parse_sdl_mapping(&mut self, mapping: &str) -> Result<(), InputError> {
        for field in mapping.split(',') {
            let field = field.trim();
            if field.is_empty() {
                continue;
            }
            let Some((name, element)) = field.split_once(':') else {
                return Err(InputError::InvalidMapping(field.to_string()));
            };
            let button = match Button::from_name(name) {
                Ok(b) => b,
                Err(_) => {
                    tracing::debug!("Skipping unmapped SDL field '{name}'");
                    continue;
                }
            };
            self.sources.insert(button, parse_element(element)?);
        }
        Ok(())
    }

    pub fn source(&self, button: Button) -> Option<ButtonSource> {
        self.sources.get(&button).copied()
    }
}

fn parse_element(element: &str) -> Result<ButtonSource, InputError> {
    let bad = || InputError::InvalidMapping(element.to_string());
    let (tag, rest) = element.split_at(element.len().min(1));
    match tag {
        "b" => Ok(ButtonSource::Button(rest.parse().map_err(|_| bad())?)),
        "a" => {
            // Leading +/- selects a half axis: "+a3" / "-a3"
            Ok(ButtonSource::Axis {
                id: rest.parse().map_err(|_| bad())?,
                dir: AxisDir::Full,
            })
        }
        "+" | "-" => {
            let dir = if tag == "+" {
                AxisDir::Positive
            } else {
                AxisDir::Negative
            };
            let id = rest.strip_prefix('a').ok_or_else(bad)?;
            Ok(ButtonSource::Axis {
                id: id.parse().map_err(|_| bad())?,
                dir,
            })
        }
        "h" => {
            // "h0.1" is hat 0, mask 1 (up=1, right=2, down=4, left=8)
            let (id, mask) = rest.split_once('.').ok_or_else(bad)?;
            let dir = match mask {
                "1" => HatDir::Up,
                "2" => HatDir::Right,
                "4" => HatDir::Down,
                "8" => HatDir::Left,
                _ => return Err(bad()),
            };
            Ok(ButtonSource::Hat {
                id: id.parse().map_err(|_| bad())?,
                dir,
            })
        }
        _ => Err(bad()),
    }
}
