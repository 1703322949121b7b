//! Supermodel (Sega Model 3) generator
//!
//! Rewrites the [Global] section of Supermodel.ini: engine/video flags,
//! the input system matching the player-1 device, and the full input
//! binding table in Supermodel's own code space (KEY_*, JOY<n>_*,
//! MOUSE<n>_*). Two-gun games get a second set of gun bindings.

use retroshim_input::{
    Assignment, AxisDir, Button, ButtonSource, DeviceApi, InputDevice, assign_players,
};

use retroshim_config::{IniFile, IniStyle};

use crate::{Generator, GeneratorError, LaunchContext, LaunchSpec};

const GLOBAL: &str = "Global";
const MAX_PLAYERS: u8 = 2;

pub struct SupermodelGenerator;

impl Generator for SupermodelGenerator {
    fn name(&self) -> &'static str {
        "supermodel"
    }

    fn generate(&self, ctx: &LaunchContext) -> Result<LaunchSpec, GeneratorError> {
        if !ctx.rom_path.exists() {
            return Err(GeneratorError::RomNotFound(ctx.rom_path.clone()));
        }

        let assignment = assign_players(&ctx.devices, &ctx.options, MAX_PLAYERS);
        let ini_path = ctx.settings.supermodel_config_dir.join("Supermodel.ini");

        match self.write_ini(ctx, &assignment, &ini_path) {
            Ok(()) => tracing::info!("Wrote {}", ini_path.display()),
            Err(e) => tracing::warn!("Skipping Supermodel.ini update: {e}"),
        }

        let (width, height) = resolution(ctx);
        let mut spec = LaunchSpec::new(&ctx.settings.supermodel_path);
        spec.arg(format!("-res={width},{height}"));
        if !ctx.options.get("video_mode").is_some_and(|m| m == "windowed") {
            spec.arg("-fullscreen");
        }
        if ctx.options.is_enabled("widescreen") {
            spec.arg("-wide-screen");
        }
        spec.arg(ctx.rom_path.display().to_string());
        Ok(spec)
    }
}

fn resolution(ctx: &LaunchContext) -> (u32, u32) {
    ctx.options
        .get("resolution")
        .and_then(|r| r.split_once('x'))
        .and_then(|(w, h)| Some((w.trim().parse().ok()?, h.trim().parse().ok()?)))
        .unwrap_or((1280, 720))
}

impl SupermodelGenerator {
    fn write_ini(
        &self,
        ctx: &LaunchContext,
        assignment: &Assignment,
        path: &std::path::Path,
    ) -> Result<(), GeneratorError> {
        let mut ini = IniFile::load(path, IniStyle::Spaced)?;
        let options = &ctx.options;

        let (width, height) = resolution(ctx);
        ini.set(GLOBAL, "New3DEngine", flag(!options.is_enabled("legacy3d")));
        ini.set(GLOBAL, "WideScreen", flag(options.is_enabled("widescreen")));
        ini.set(GLOBAL, "Stretch", flag(options.is_enabled("stretch")));
        ini.set(
            GLOBAL,
            "FullScreen",
            flag(!options.get("video_mode").is_some_and(|m| m == "windowed")),
        );
        ini.set(GLOBAL, "XResolution", width.to_string());
        ini.set(GLOBAL, "YResolution", height.to_string());
        ini.set(GLOBAL, "Throttle", flag(!options.is_enabled("no_throttle")));
        ini.set(GLOBAL, "ShowFrameRate", flag(options.is_enabled("showfps")));
        ini.set(GLOBAL, "Crosshairs", assignment.guns.len().min(2).to_string());

        let p1 = assignment
            .device_for_player(1)
            .map(|i| &ctx.devices[i]);
        ini.set(GLOBAL, "InputSystem", input_system(p1));

        self.write_common_bindings(&mut ini, ctx, assignment);
        self.write_fighting_bindings(&mut ini, ctx, assignment);
        self.write_racing_bindings(&mut ini, ctx, assignment);
        self.write_gun_bindings(&mut ini, assignment);

        ini.save(path)?;
        Ok(())
    }

    fn write_common_bindings(
        &self,
        ini: &mut IniFile,
        ctx: &LaunchContext,
        assignment: &Assignment,
    ) {
        for player in 1..=MAX_PLAYERS {
            let device = assignment
                .device_for_player(player)
                .map(|i| &ctx.devices[i]);
            let key_start = if player == 1 { "KEY_1" } else { "KEY_2" };
            let key_coin = if player == 1 { "KEY_5" } else { "KEY_6" };

            ini.set(
                GLOBAL,
                format!("InputStart{player}"),
                binding(key_start, device.and_then(|d| joy_code(d, Button::Start))),
            );
            ini.set(
                GLOBAL,
                format!("InputCoin{player}"),
                binding(key_coin, device.and_then(|d| joy_code(d, Button::Select))),
            );

            let suffix = if player == 1 { String::new() } else { player.to_string() };
            let arrows = [
                (Button::Up, "KEY_UP", "InputJoyUp"),
                (Button::Down, "KEY_DOWN", "InputJoyDown"),
                (Button::Left, "KEY_LEFT", "InputJoyLeft"),
                (Button::Right, "KEY_RIGHT", "InputJoyRight"),
            ];
            for (button, key, name) in arrows {
                ini.set(
                    GLOBAL,
                    format!("{name}{suffix}"),
                    binding(key, device.and_then(|d| digital_direction(d, button))),
                );
            }
        }

        ini.set(GLOBAL, "InputServiceA", quoted("KEY_7"));
        ini.set(GLOBAL, "InputTestA", quoted("KEY_8"));
    }

    fn write_fighting_bindings(
        &self,
        ini: &mut IniFile,
        ctx: &LaunchContext,
        assignment: &Assignment,
    ) {
        let device = assignment
            .device_for_player(1)
            .map(|i| &ctx.devices[i]);
        let rows = [
            (Button::West, "KEY_A", "InputPunch"),
            (Button::South, "KEY_S", "InputKick"),
            (Button::East, "KEY_D", "InputGuard"),
            (Button::North, "KEY_F", "InputEscape"),
        ];
        for (button, key, name) in rows {
            ini.set(
                GLOBAL,
                name,
                binding(key, device.and_then(|d| joy_code(d, button))),
            );
        }
    }

    fn write_racing_bindings(
        &self,
        ini: &mut IniFile,
        ctx: &LaunchContext,
        assignment: &Assignment,
    ) {
        let Some(device) = assignment.device_for_player(1).map(|i| &ctx.devices[i]) else {
            return;
        };
        let joy = device.index + 1;

        if let Some(ButtonSource::Axis { id, .. }) = device.source(Button::LeftX) {
            ini.set(
                GLOBAL,
                "InputSteering",
                quoted(&format!("JOY{joy}_{}", axis_name(id))),
            );
        }
        if let Some(code) = trigger_code(device, Button::R2) {
            ini.set(GLOBAL, "InputAccelerator", quoted(&code));
        }
        if let Some(code) = trigger_code(device, Button::L2) {
            ini.set(GLOBAL, "InputBrake", quoted(&code));
        }
        if let Some(code) = joy_code(device, Button::R1) {
            ini.set(GLOBAL, "InputShiftUp", quoted(&code));
        }
        if let Some(code) = joy_code(device, Button::L1) {
            ini.set(GLOBAL, "InputShiftDown", quoted(&code));
        }
    }

    fn write_gun_bindings(&self, ini: &mut IniFile, assignment: &Assignment) {
        for (gun_index, _) in assignment.guns.iter().take(2).enumerate() {
            let mouse = gun_index + 1;
            let suffix = if gun_index == 0 { String::new() } else { "2".to_string() };
            ini.set(
                GLOBAL,
                format!("InputGunX{suffix}"),
                quoted(&format!("MOUSE{mouse}_XAXIS")),
            );
            ini.set(
                GLOBAL,
                format!("InputGunY{suffix}"),
                quoted(&format!("MOUSE{mouse}_YAXIS")),
            );
            ini.set(
                GLOBAL,
                format!("InputTrigger{suffix}"),
                quoted(&format!("MOUSE{mouse}_LEFT_BUTTON")),
            );
            ini.set(
                GLOBAL,
                format!("InputOffscreen{suffix}"),
                quoted(&format!("MOUSE{mouse}_RIGHT_BUTTON")),
            );
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

fn quoted(code: &str) -> String {
    format!("\"{code}\"")
}

/// Keyboard default plus an optional joystick code.
fn binding(key: &str, joy: Option<String>) -> String {
    match joy {
        Some(code) => format!("\"{key},{code}\""),
        None => format!("\"{key}\""),
    }
}

fn input_system(device: Option<&InputDevice>) -> &'static str {
    match device.map(|d| d.api) {
        Some(DeviceApi::XInput) => "xinput",
        Some(DeviceApi::DirectInput) => "dinput",
        _ => "sdl",
    }
}

fn axis_name(id: u8) -> String {
    match id {
        0 => "XAXIS".to_string(),
        1 => "YAXIS".to_string(),
        2 => "ZAXIS".to_string(),
        3 => "RXAXIS".to_string(),
        4 => "RYAXIS".to_string(),
        5 => "RZAXIS".to_string(),
        n => format!("SLIDER{}", n - 5),
    }
}

/// Supermodel code for a button-like binding.
fn joy_code(device: &InputDevice, button: Button) -> Option<String> {
    let joy = device.index + 1;
    match device.source(button)? {
        ButtonSource::Button(n) => Some(format!("JOY{joy}_BUTTON{}", n + 1)),
        ButtonSource::Axis { id, dir } => {
            let sign = if dir == AxisDir::Negative { "NEG" } else { "POS" };
            Some(format!("JOY{joy}_{}_{sign}", axis_name(id)))
        }
        ButtonSource::Hat { .. } => None,
    }
}

/// Digital direction: dpad hat becomes POV, stick becomes a signed axis.
fn digital_direction(device: &InputDevice, button: Button) -> Option<String> {
    let joy = device.index + 1;
    match device.source(button)? {
        ButtonSource::Hat { id, dir } => {
            let name = match dir {
                retroshim_input::HatDir::Up => "UP",
                retroshim_input::HatDir::Down => "DOWN",
                retroshim_input::HatDir::Left => "LEFT",
                retroshim_input::HatDir::Right => "RIGHT",
            };
            Some(format!("JOY{joy}_POV{}_{name}", id + 1))
        }
        ButtonSource::Button(n) => Some(format!("JOY{joy}_BUTTON{}", n + 1)),
        ButtonSource::Axis { id, .. } => {
            let sign = match button {
                Button::Up | Button::Left => "NEG",
                _ => "POS",
            };
            Some(format!("JOY{joy}_{}_{sign}", axis_name(id)))
        }
    }
}

/// Trigger axes: XInput shares one Z axis between both triggers through
/// the legacy path (left positive, right negative); DirectInput and SDL
/// report the bound axis directly.
fn trigger_code(device: &InputDevice, button: Button) -> Option<String> {
    let joy = device.index + 1;
    match device.source(button)? {
        ButtonSource::Axis { id, .. } => {
            if device.api == DeviceApi::XInput && (id == 2 || id == 5) {
                let sign = if button == Button::L2 { "POS" } else { "NEG" };
                return Some(format!("JOY{joy}_ZAXIS_{sign}"));
            }
            Some(format!("JOY{joy}_{}_POS", axis_name(id)))
        }
        ButtonSource::Button(n) => Some(format!("JOY{joy}_BUTTON{}", n + 1)),
        ButtonSource::Hat { .. } => None,
    }
}
