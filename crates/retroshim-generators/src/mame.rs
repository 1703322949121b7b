//! MAME generator
//!
//! Emits a ctrlr file (MAME's controller-definition XML), resolving each
//! assigned device against MAME's input-code address space (JOYCODE /
//! GUNCODE / MOUSECODE / KEYCODE), then launches the standalone MAME
//! binary pointing at it.
//!
//! Pads are read through their SDL-style element bindings; the API matters
//! only where the code spaces genuinely differ (XInput pads expose both
//! triggers on one shared Z axis when reached through the legacy path).

use std::fs;

use retroshim_config::check_bios;
use retroshim_input::{
    Assignment, AxisDir, Button, ButtonSource, DeviceApi, HatDir, InputDevice, apply_layout,
    assign_players, game_layout,
};

use crate::{Generator, GeneratorError, LaunchContext, LaunchSpec, XmlWriter};

const MAX_PLAYERS: u8 = 4;
const CTRLR_NAME: &str = "retroshim";

/// Semantic order behind P<n>_BUTTON1..6.
const BUTTON_ORDER: [Button; 6] = [
    Button::South,
    Button::East,
    Button::West,
    Button::North,
    Button::L1,
    Button::R1,
];

pub struct MameGenerator;

impl Generator for MameGenerator {
    fn name(&self) -> &'static str {
        "mame"
    }

    fn generate(&self, ctx: &LaunchContext) -> Result<LaunchSpec, GeneratorError> {
        if !ctx.rom_path.exists() {
            return Err(GeneratorError::RomNotFound(ctx.rom_path.clone()));
        }
        check_bios(&ctx.system, &ctx.settings.bios_dir)?;

        let assignment = assign_players(&ctx.devices, &ctx.options, MAX_PLAYERS);
        let document = build_ctrlr_xml(ctx, &assignment);

        let ctrlr_path = ctx
            .settings
            .mame_config_dir
            .join("ctrlr")
            .join(format!("{CTRLR_NAME}.cfg"));
        match write_ctrlr(&ctrlr_path, &document) {
            Ok(()) => tracing::info!("Wrote controller file {}", ctrlr_path.display()),
            Err(e) => tracing::warn!("Skipping controller file: {e}"),
        }

        let rom_dir = ctx
            .rom_path
            .parent()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| ".".to_string());

        let mut spec = LaunchSpec::new(&ctx.settings.mame_path);
        spec.arg("-skip_gameinfo");
        spec.arg("-rompath").arg(rom_dir);
        spec.arg("-cfg_directory")
            .arg(ctx.settings.mame_config_dir.display().to_string());
        spec.arg("-ctrlr").arg(CTRLR_NAME);
        if ctx.options.get("video_mode").is_some_and(|m| m == "windowed") {
            spec.arg("-window");
        }
        spec.arg(ctx.rom_name());
        Ok(spec)
    }
}

fn write_ctrlr(path: &std::path::Path, document: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, document)?;
    Ok(())
}

/// Ordered port list; codes for the same port merge with OR.
#[derive(Default)]
struct Ports {
    entries: Vec<(String, Vec<String>)>,
}

impl Ports {
    fn add(&mut self, port: impl Into<String>, code: String) {
        let port = port.into();
        if let Some((_, codes)) = self.entries.iter_mut().find(|(p, _)| *p == port) {
            codes.push(code);
        } else {
            self.entries.push((port, vec![code]));
        }
    }
}

fn build_ctrlr_xml(ctx: &LaunchContext, assignment: &Assignment) -> String {
    let mut ports = Ports::default();
    let layout = game_layout(ctx.rom_name());

    for slot in &assignment.players {
        let device = &ctx.devices[slot.device];
        add_pad_ports(&mut ports, slot.player, device, layout);
    }

    if assignment.device_for_player(1).is_none() {
        add_keyboard_ports(&mut ports);
    }

    for (gun_index, &device) in assignment.guns.iter().enumerate() {
        let gun = (gun_index + 1) as u8;
        add_gun_ports(&mut ports, gun, &ctx.devices[device], ctx);
    }

    for (mouse_index, &device) in assignment.mice.iter().enumerate() {
        let mouse = (mouse_index + 1) as u8;
        add_mouse_ports(&mut ports, mouse, &ctx.devices[device]);
    }

    add_ui_ports(&mut ports, ctx, assignment);

    let mut xml = XmlWriter::new();
    xml.open("mameconfig", &[("version", "10")]);
    xml.open("system", &[("name", "default")]);
    xml.open("input", &[]);
    for (port, codes) in &ports.entries {
        xml.open("port", &[("type", port)]);
        xml.text_element("newseq", &[("type", "standard")], &codes.join(" OR "));
        xml.close();
    }
    xml.finish()
}

fn add_pad_ports(
    ports: &mut Ports,
    player: u8,
    device: &InputDevice,
    layout: Option<&'static [(Button, Button)]>,
) {
    let joy = device.index + 1;

    for direction in [Button::Up, Button::Down, Button::Left, Button::Right] {
        let port = format!("P{player}_JOYSTICK_{}", direction.name().to_uppercase());
        if let Some(source) = device.source(direction)
            && let Some(code) = joy_code(joy, source, device.api)
        {
            ports.add(&port, code);
        }
        // Stick doubles the dpad
        let (stick, dir) = match direction {
            Button::Up => (Button::LeftY, AxisDir::Negative),
            Button::Down => (Button::LeftY, AxisDir::Positive),
            Button::Left => (Button::LeftX, AxisDir::Negative),
            Button::Right => (Button::LeftX, AxisDir::Positive),
            _ => unreachable!(),
        };
        if let Some(ButtonSource::Axis { id, .. }) = device.source(stick) {
            ports.add(&port, joy_axis_switch(joy, id, dir));
        }
    }

    for (i, emitted) in BUTTON_ORDER.iter().enumerate() {
        let read = apply_layout(layout, *emitted);
        if let Some(source) = device.source(read)
            && let Some(code) = joy_code(joy, source, device.api)
        {
            ports.add(format!("P{player}_BUTTON{}", i + 1), code);
        }
    }

    if let Some(source) = device.source(Button::Start)
        && let Some(code) = joy_code(joy, source, device.api)
    {
        ports.add(format!("START{player}"), code);
    }
    if let Some(source) = device.source(Button::Select)
        && let Some(code) = joy_code(joy, source, device.api)
    {
        ports.add(format!("COIN{player}"), code);
    }
}

/// MAME's stock keyboard defaults, restated so a keyboard-only setup still
/// gets an explicit player-1 block.
fn add_keyboard_ports(ports: &mut Ports) {
    ports.add("P1_JOYSTICK_UP", "KEYCODE_UP".to_string());
    ports.add("P1_JOYSTICK_DOWN", "KEYCODE_DOWN".to_string());
    ports.add("P1_JOYSTICK_LEFT", "KEYCODE_LEFT".to_string());
    ports.add("P1_JOYSTICK_RIGHT", "KEYCODE_RIGHT".to_string());
    for (i, key) in ["LCONTROL", "LALT", "SPACE", "LSHIFT", "Z", "X"]
        .iter()
        .enumerate()
    {
        ports.add(format!("P1_BUTTON{}", i + 1), format!("KEYCODE_{key}"));
    }
    ports.add("START1", "KEYCODE_1".to_string());
    ports.add("COIN1", "KEYCODE_5".to_string());
}

fn add_gun_ports(ports: &mut Ports, gun: u8, device: &InputDevice, ctx: &LaunchContext) {
    ports.add(format!("P{gun}_LIGHTGUN_X"), format!("GUNCODE_{gun}_XAXIS"));
    ports.add(format!("P{gun}_LIGHTGUN_Y"), format!("GUNCODE_{gun}_YAXIS"));

    let trigger_button = match device.source(Button::Trigger) {
        Some(ButtonSource::Button(n)) => n + 1,
        _ => 1,
    };
    ports.add(
        format!("P{gun}_BUTTON1"),
        format!("GUNCODE_{gun}_BUTTON{trigger_button}"),
    );
    // Offscreen shot doubles as reload on button 2
    if ctx.options.is_enabled("gun_reload") {
        ports.add(format!("P{gun}_BUTTON2"), format!("GUNCODE_{gun}_BUTTON2"));
    }
}

fn add_mouse_ports(ports: &mut Ports, mouse: u8, _device: &InputDevice) {
    ports.add(format!("P{mouse}_AD_STICK_X"), format!("MOUSECODE_{mouse}_XAXIS"));
    ports.add(format!("P{mouse}_AD_STICK_Y"), format!("MOUSECODE_{mouse}_YAXIS"));
    ports.add(format!("P{mouse}_BUTTON1"), format!("MOUSECODE_{mouse}_BUTTON1"));
}

fn add_ui_ports(ports: &mut Ports, ctx: &LaunchContext, assignment: &Assignment) {
    ports.add("UI_CONFIGURE", "KEYCODE_TAB".to_string());
    ports.add("UI_PAUSE", "KEYCODE_P".to_string());
    ports.add("UI_CANCEL", "KEYCODE_ESC".to_string());

    // Hotkey + start exits on the player-1 pad
    if let Some(device) = assignment.device_for_player(1) {
        let device = &ctx.devices[device];
        let joy = device.index + 1;
        if let (Some(hotkey), Some(start)) =
            (device.source(Button::Hotkey), device.source(Button::Start))
            && let (Some(h), Some(s)) = (
                joy_code(joy, hotkey, device.api),
                joy_code(joy, start, device.api),
            )
        {
            ports.add("UI_CANCEL", format!("{h} {s}"));
        }
    }
}

/// Translate a device-local element into a MAME JOYCODE.
fn joy_code(joy: u8, source: ButtonSource, api: DeviceApi) -> Option<String> {
    match source {
        ButtonSource::Button(n) => Some(format!("JOYCODE_{joy}_BUTTON{}", n + 1)),
        ButtonSource::Axis { id, dir } => {
            // XInput pads reached through the legacy enumeration share one
            // Z axis between both triggers: left pulls positive, right
            // pulls negative.
            if api == DeviceApi::XInput && (id == 2 || id == 5) {
                let dir = if id == 2 { AxisDir::Positive } else { AxisDir::Negative };
                return Some(joy_axis_switch(joy, 2, dir));
            }
            let dir = match dir {
                AxisDir::Full => AxisDir::Positive,
                other => other,
            };
            Some(joy_axis_switch(joy, id, dir))
        }
        ButtonSource::Hat { id, dir } => {
            let suffix = match dir {
                HatDir::Up => "UP",
                HatDir::Down => "DOWN",
                HatDir::Left => "LEFT",
                HatDir::Right => "RIGHT",
            };
            Some(format!("JOYCODE_{joy}_HAT{}{suffix}", id + 1))
        }
    }
}

/// Digital switch code for an analog axis.
fn joy_axis_switch(joy: u8, axis: u8, dir: AxisDir) -> String {
    let axis_name = match axis {
        0 => "XAXIS".to_string(),
        1 => "YAXIS".to_string(),
        2 => "ZAXIS".to_string(),
        3 => "RXAXIS".to_string(),
        4 => "RYAXIS".to_string(),
        5 => "RZAXIS".to_string(),
        n => format!("SLIDER{}", n - 5),
    };
    // X and Y use directional spellings, the rest use NEG/POS
    let suffix = match (axis, dir) {
        (0, AxisDir::Negative) => "LEFT_SWITCH",
        (0, _) => "RIGHT_SWITCH",
        (1, AxisDir::Negative) => "UP_SWITCH",
        (1, _) => "DOWN_SWITCH",
        (_, AxisDir::Negative) => "NEG_SWITCH",
        (_, _) => "POS_SWITCH",
    };
    format!("JOYCODE_{joy}_{axis_name}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroshim_config::{GameSystem, LauncherOptions, LauncherSettings};
    use retroshim_input::DeviceKind;
    use std::fs;
    use tempfile::TempDir;

    fn sdl_pad(index: u8) -> InputDevice {
        let mut dev = InputDevice::new(
            format!("Pad {index}"),
            DeviceApi::Sdl,
            DeviceKind::Gamepad,
            index,
        );
        dev.parse_sdl_mapping(
            "a:b0,b:b1,x:b2,y:b3,leftshoulder:b4,rightshoulder:b5,back:b6,start:b7,\
             guide:b8,leftx:a0,lefty:a1,dpup:h0.1,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,\
             lefttrigger:a2,righttrigger:a5",
        )
        .unwrap();
        dev
    }

    fn test_context(rom: &str, devices: Vec<InputDevice>) -> (TempDir, LaunchContext) {
        let dir = TempDir::new().unwrap();
        let roms = dir.path().join("roms");
        fs::create_dir_all(&roms).unwrap();
        let rom_path = roms.join(format!("{rom}.zip"));
        fs::write(&rom_path, b"ROM").unwrap();

        let mut settings = LauncherSettings::default();
        settings.mame_config_dir = dir.path().join("mame");

        let ctx = LaunchContext::new(GameSystem::Mame, rom_path, settings).with_devices(devices);
        (dir, ctx)
    }

    #[test]
    fn test_args_and_ctrlr_file() {
        let (_dir, ctx) = test_context("pacman", vec![sdl_pad(0)]);
        let spec = MameGenerator.generate(&ctx).unwrap();

        assert_eq!(spec.args[0], "-skip_gameinfo");
        assert!(spec.args.contains(&"-ctrlr".to_string()));
        assert!(spec.args.contains(&"retroshim".to_string()));
        assert_eq!(spec.args.last().unwrap(), "pacman");

        let ctrlr = ctx.settings.mame_config_dir.join("ctrlr/retroshim.cfg");
        let doc = fs::read_to_string(ctrlr).unwrap();
        assert!(doc.contains("<mameconfig version=\"10\">"));
        assert!(doc.contains("<system name=\"default\">"));
    }

    #[test]
    fn test_pad_button_codes() {
        let (_dir, ctx) = test_context("pacman", vec![sdl_pad(0)]);
        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);

        // South is device button 0 -> BUTTON1 on joystick 1
        assert!(doc.contains("<port type=\"P1_BUTTON1\">"));
        assert!(doc.contains(">JOYCODE_1_BUTTON1</newseq>"));
        // Dpad hat merges with the stick via OR
        assert!(doc.contains("JOYCODE_1_HAT1UP OR JOYCODE_1_YAXIS_UP_SWITCH"));
        assert!(doc.contains("<port type=\"START1\">"));
        assert!(doc.contains(">JOYCODE_1_BUTTON8</newseq>"));
    }

    #[test]
    fn test_two_players() {
        let (_dir, ctx) = test_context("pacman", vec![sdl_pad(0), sdl_pad(1)]);
        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);
        assert!(doc.contains("<port type=\"P2_BUTTON1\">"));
        assert!(doc.contains("JOYCODE_2_BUTTON1"));
        assert!(doc.contains("<port type=\"COIN2\">"));
    }

    #[test]
    fn test_game_layout_applied() {
        // sf2 puts HP on the L1 position, read from R1 (device button 5)
        let (_dir, ctx) = test_context("sf2", vec![sdl_pad(0)]);
        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);

        let button5 = doc
            .lines()
            .skip_while(|l| !l.contains("P1_BUTTON5"))
            .nth(1)
            .unwrap();
        assert!(button5.contains("JOYCODE_1_BUTTON6"), "got: {button5}");
    }

    #[test]
    fn test_xinput_trigger_sharing() {
        let mut pad = InputDevice::new("XPad", DeviceApi::XInput, DeviceKind::Gamepad, 0);
        pad.parse_sdl_mapping("a:b0,b:b1,x:b2,y:b3,lefttrigger:a2,righttrigger:a5")
            .unwrap();
        let (_dir, ctx) = test_context("pacman", vec![pad]);

        let device = &ctx.devices[0];
        let l2 = joy_code(1, device.source(Button::L2).unwrap(), device.api).unwrap();
        let r2 = joy_code(1, device.source(Button::R2).unwrap(), device.api).unwrap();
        assert_eq!(l2, "JOYCODE_1_ZAXIS_POS_SWITCH");
        assert_eq!(r2, "JOYCODE_1_ZAXIS_NEG_SWITCH");
    }

    #[test]
    fn test_gun_ports() {
        let gun = InputDevice::new("Gun", DeviceApi::Sdl, DeviceKind::LightGun, 1)
            .with_source(Button::Trigger, ButtonSource::Button(0));
        let (_dir, ctx) = test_context("lethalen", vec![sdl_pad(0), gun]);
        let ctx = ctx.with_options(LauncherOptions::from_pairs([("gun_reload", "1")]));

        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);

        assert!(doc.contains("<port type=\"P1_LIGHTGUN_X\">"));
        assert!(doc.contains(">GUNCODE_1_XAXIS</newseq>"));
        // Gun trigger merges into the pad's BUTTON1 port
        assert!(doc.contains("JOYCODE_1_BUTTON1 OR GUNCODE_1_BUTTON1"));
        assert!(doc.contains(">GUNCODE_1_BUTTON2</newseq>"));
    }

    #[test]
    fn test_keyboard_fallback_without_pads() {
        let (_dir, ctx) = test_context("pacman", vec![]);
        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);
        assert!(doc.contains(">KEYCODE_LCONTROL</newseq>"));
        assert!(doc.contains("<port type=\"START1\">"));
        assert!(doc.contains(">KEYCODE_1</newseq>"));
    }

    #[test]
    fn test_ui_ports_always_present() {
        let (_dir, ctx) = test_context("pacman", vec![sdl_pad(0)]);
        let assignment = assign_players(&ctx.devices, &ctx.options, 4);
        let doc = build_ctrlr_xml(&ctx, &assignment);
        assert!(doc.contains("<port type=\"UI_CONFIGURE\">"));
        assert!(doc.contains(">KEYCODE_TAB</newseq>"));
        // Hotkey + start chord on the pad appends to UI_CANCEL
        assert!(doc.contains("KEYCODE_ESC OR JOYCODE_1_BUTTON9 JOYCODE_1_BUTTON8"));
    }
}
