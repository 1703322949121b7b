//! Yuzu (Switch) generator
//!
//! Edits the Qt-style qt-config.ini in place. Qt tracks whether a value
//! was changed from its default in a sibling `key\default` entry, so
//! every write pairs the value with `key\default=false`. Controller
//! bindings are Yuzu param strings, one per Switch button, built from
//! the player-1 device.

use retroshim_input::{
    Assignment, Button, ButtonSource, HatDir, InputDevice, assign_players,
};

use retroshim_config::{IniFile, IniStyle};

use crate::{Generator, GeneratorError, LaunchContext, LaunchSpec};

const MAX_PLAYERS: u8 = 2;

/// Switch buttons in qt-config order: (config name, semantic to read).
const SWITCH_BUTTONS: &[(&str, Button)] = &[
    ("button_a", Button::East),
    ("button_b", Button::South),
    ("button_x", Button::North),
    ("button_y", Button::West),
    ("button_l", Button::L1),
    ("button_r", Button::R1),
    ("button_zl", Button::L2),
    ("button_zr", Button::R2),
    ("button_plus", Button::Start),
    ("button_minus", Button::Select),
    ("button_lstick", Button::L3),
    ("button_rstick", Button::R3),
    ("button_dup", Button::Up),
    ("button_ddown", Button::Down),
    ("button_dleft", Button::Left),
    ("button_dright", Button::Right),
];

pub struct YuzuGenerator;

impl Generator for YuzuGenerator {
    fn name(&self) -> &'static str {
        "yuzu"
    }

    fn generate(&self, ctx: &LaunchContext) -> Result<LaunchSpec, GeneratorError> {
        if !ctx.rom_path.exists() {
            return Err(GeneratorError::RomNotFound(ctx.rom_path.clone()));
        }

        let assignment = assign_players(&ctx.devices, &ctx.options, MAX_PLAYERS);
        let ini_path = ctx.settings.yuzu_config_dir.join("qt-config.ini");

        match self.write_ini(ctx, &assignment, &ini_path) {
            Ok(()) => tracing::info!("Wrote {}", ini_path.display()),
            Err(e) => tracing::warn!("Skipping qt-config.ini update: {e}"),
        }

        let mut spec = LaunchSpec::new(&ctx.settings.yuzu_path);
        if !ctx.options.get("video_mode").is_some_and(|m| m == "windowed") {
            spec.arg("-f");
        }
        spec.arg("-g").arg(ctx.rom_path.display().to_string());
        Ok(spec)
    }
}

impl YuzuGenerator {
    fn write_ini(
        &self,
        ctx: &LaunchContext,
        assignment: &Assignment,
        path: &std::path::Path,
    ) -> Result<(), GeneratorError> {
        let mut ini = IniFile::load(path, IniStyle::Compact)?;
        let options = &ctx.options;

        let fullscreen = !options.get("video_mode").is_some_and(|m| m == "windowed");
        qt_set(&mut ini, "UI", "fullscreen", bool_str(fullscreen));
        qt_set(&mut ini, "UI", "confirmClose", "false");
        qt_set(&mut ini, "UI", "pauseWhenInBackground", bool_str(options.is_enabled("pause_in_background")));

        let backend = match options.get("renderer") {
            Some("opengl") => "0",
            _ => "1",
        };
        qt_set(&mut ini, "Renderer", "backend", backend);
        qt_set(
            &mut ini,
            "Renderer",
            "resolution_setup",
            options.get_or("scale", "2"),
        );
        qt_set(
            &mut ini,
            "Renderer",
            "use_vsync",
            bool_str(!options.is_enabled("vsync_off")),
        );
        qt_set(
            &mut ini,
            "Renderer",
            "use_asynchronous_shaders",
            bool_str(options.is_enabled("async_shaders")),
        );

        qt_set(&mut ini, "System", "region_index", options.get_or("region_index", "-1"));
        qt_set(&mut ini, "System", "language_index", options.get_or("language_index", "1"));
        qt_set(&mut ini, "System", "sound_index", options.get_or("sound_index", "1"));

        for player in 1..=MAX_PLAYERS {
            if let Some(device) = assignment.device_for_player(player).map(|i| &ctx.devices[i]) {
                write_player_bindings(&mut ini, player, device);
            }
        }

        ini.save(path)?;
        Ok(())
    }
}

fn write_player_bindings(ini: &mut IniFile, player: u8, device: &InputDevice) {
    let slot = player - 1;
    qt_set(
        &mut *ini,
        "Controls",
        format!("player_{slot}_connected"),
        "true",
    );
    qt_set(&mut *ini, "Controls", format!("player_{slot}_type"), "0");

    for (name, button) in SWITCH_BUTTONS {
        if let Some(source) = device.source(*button) {
            ini.set(
                "Controls",
                format!("player_{slot}_{name}"),
                format!("\"{}\"", button_param(device, source)),
            );
            ini.set(
                "Controls",
                format!("player_{slot}_{name}\\default"),
                "false",
            );
        }
    }

    if let Some(ButtonSource::Axis { id: x, .. }) = device.source(Button::LeftX)
        && let Some(ButtonSource::Axis { id: y, .. }) = device.source(Button::LeftY)
    {
        ini.set(
            "Controls",
            format!("player_{slot}_lstick"),
            format!("\"{}\"", stick_param(device, x, y)),
        );
        ini.set("Controls", format!("player_{slot}_lstick\\default"), "false");
    }
    if let Some(ButtonSource::Axis { id: x, .. }) = device.source(Button::RightX)
        && let Some(ButtonSource::Axis { id: y, .. }) = device.source(Button::RightY)
    {
        ini.set(
            "Controls",
            format!("player_{slot}_rstick"),
            format!("\"{}\"", stick_param(device, x, y)),
        );
        ini.set("Controls", format!("player_{slot}_rstick\\default"), "false");
    }
}

/// Yuzu param string for one digital binding.
fn button_param(device: &InputDevice, source: ButtonSource) -> String {
    let prefix = engine_prefix(device);
    match source {
        ButtonSource::Button(n) => format!("{prefix},button:{n}"),
        ButtonSource::Hat { id, dir } => {
            let name = match dir {
                HatDir::Up => "up",
                HatDir::Down => "down",
                HatDir::Left => "left",
                HatDir::Right => "right",
            };
            format!("{prefix},hat:{id},direction:{name}")
        }
        ButtonSource::Axis { id, .. } => {
            format!("{prefix},axis:{id},threshold:0.5,direction:+")
        }
    }
}

fn stick_param(device: &InputDevice, axis_x: u8, axis_y: u8) -> String {
    format!(
        "{},axis_x:{axis_x},axis_y:{axis_y},deadzone:0.15,range:0.95",
        engine_prefix(device)
    )
}

fn engine_prefix(device: &InputDevice) -> String {
    let guid = device.guid.as_deref().unwrap_or("0");
    format!("engine:sdl,guid:{guid},port:{}", device.index)
}

fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Write a value the way Qt does, with its `\default` sibling.
fn qt_set(ini: &mut IniFile, section: &str, key: impl Into<String>, value: impl Into<String>) {
    let key = key.into();
    ini.set(section, format!("{key}\\default"), "false");
    ini.set(section, key, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use retroshim_config::{GameSystem, LauncherOptions, LauncherSettings};
    use retroshim_input::{DeviceApi, DeviceKind};
    use std::fs;
    use tempfile::TempDir;

    fn pad(index: u8) -> InputDevice {
        let mut dev = InputDevice::new("Pad", DeviceApi::Sdl, DeviceKind::Gamepad, index)
            .with_guid("030000005e0400008e02000014010000");
        dev.parse_sdl_mapping(
            "a:b0,b:b1,x:b2,y:b3,leftshoulder:b4,rightshoulder:b5,back:b6,start:b7,\
             leftstick:b9,rightstick:b10,leftx:a0,lefty:a1,rightx:a3,righty:a4,\
             dpup:h0.1,dpdown:h0.4,dpleft:h0.8,dpright:h0.2,lefttrigger:a2,righttrigger:a5",
        )
        .unwrap();
        dev
    }

    fn test_context(devices: Vec<InputDevice>, options: LauncherOptions) -> (TempDir, LaunchContext) {
        let dir = TempDir::new().unwrap();
        let rom = dir.path().join("game.nsp");
        fs::write(&rom, b"ROM").unwrap();

        let mut settings = LauncherSettings::default();
        settings.yuzu_config_dir = dir.path().join("config");

        let ctx = LaunchContext::new(GameSystem::Switch, rom, settings)
            .with_devices(devices)
            .with_options(options);
        (dir, ctx)
    }

    fn load_ini(ctx: &LaunchContext) -> IniFile {
        IniFile::load(
            &ctx.settings.yuzu_config_dir.join("qt-config.ini"),
            IniStyle::Compact,
        )
        .unwrap()
    }

    #[test]
    fn test_args_fullscreen() {
        let (_dir, ctx) = test_context(vec![], LauncherOptions::new());
        let spec = YuzuGenerator.generate(&ctx).unwrap();
        assert_eq!(spec.args[0], "-f");
        assert_eq!(spec.args[1], "-g");
        assert!(spec.args[2].ends_with("game.nsp"));
    }

    #[test]
    fn test_args_windowed() {
        let (_dir, ctx) = test_context(
            vec![],
            LauncherOptions::from_pairs([("video_mode", "windowed")]),
        );
        let spec = YuzuGenerator.generate(&ctx).unwrap();
        assert_eq!(spec.args[0], "-g");
    }

    #[test]
    fn test_renderer_section() {
        let (_dir, ctx) = test_context(
            vec![],
            LauncherOptions::from_pairs([("renderer", "opengl"), ("scale", "3")]),
        );
        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);
        assert_eq!(ini.get("Renderer", "backend"), Some("0"));
        assert_eq!(ini.get("Renderer", "backend\\default"), Some("false"));
        assert_eq!(ini.get("Renderer", "resolution_setup"), Some("3"));
        assert_eq!(ini.get("Renderer", "use_vsync"), Some("true"));
    }

    #[test]
    fn test_vulkan_is_default_backend() {
        let (_dir, ctx) = test_context(vec![], LauncherOptions::new());
        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);
        assert_eq!(ini.get("Renderer", "backend"), Some("1"));
        assert_eq!(ini.get("UI", "fullscreen"), Some("true"));
    }

    #[test]
    fn test_player_button_params() {
        let (_dir, ctx) = test_context(vec![pad(0)], LauncherOptions::new());
        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);

        assert_eq!(ini.get("Controls", "player_0_connected"), Some("true"));
        // Switch A reads the pad's east button (b1)
        assert_eq!(
            ini.get("Controls", "player_0_button_a"),
            Some("engine:sdl,guid:030000005e0400008e02000014010000,port:0,button:1")
        );
        assert_eq!(
            ini.get("Controls", "player_0_button_dup"),
            Some("engine:sdl,guid:030000005e0400008e02000014010000,port:0,hat:0,direction:up")
        );
        assert_eq!(
            ini.get("Controls", "player_0_button_zr"),
            Some("engine:sdl,guid:030000005e0400008e02000014010000,port:0,axis:5,threshold:0.5,direction:+")
        );
    }

    #[test]
    fn test_stick_params() {
        let (_dir, ctx) = test_context(vec![pad(0)], LauncherOptions::new());
        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);
        assert_eq!(
            ini.get("Controls", "player_0_lstick"),
            Some("engine:sdl,guid:030000005e0400008e02000014010000,port:0,axis_x:0,axis_y:1,deadzone:0.15,range:0.95")
        );
        assert_eq!(
            ini.get("Controls", "player_0_rstick"),
            Some("engine:sdl,guid:030000005e0400008e02000014010000,port:0,axis_x:3,axis_y:4,deadzone:0.15,range:0.95")
        );
    }

    #[test]
    fn test_second_player() {
        let (_dir, ctx) = test_context(vec![pad(0), pad(1)], LauncherOptions::new());
        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);
        assert_eq!(ini.get("Controls", "player_1_connected"), Some("true"));
        assert!(
            ini.get("Controls", "player_1_button_a")
                .unwrap()
                .contains("port:1")
        );
    }

    #[test]
    fn test_existing_config_preserved() {
        let (_dir, ctx) = test_context(vec![], LauncherOptions::new());
        let path = ctx.settings.yuzu_config_dir.join("qt-config.ini");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[Data%20Storage]\nnand_directory=/nand\n").unwrap();

        YuzuGenerator.generate(&ctx).unwrap();
        let ini = load_ini(&ctx);
        assert_eq!(ini.get("Data%20Storage", "nand_directory"), Some("/nand"));
        assert_eq!(ini.get("UI", "fullscreen"), Some("true"));
    }

    #[test]
    fn test_missing_rom() {
        let (_dir, mut ctx) = test_context(vec![], LauncherOptions::new());
        ctx.rom_path = std::path::PathBuf::from("/nonexistent/game.nsp");
        assert!(matches!(
            YuzuGenerator.generate(&ctx),
            Err(GeneratorError::RomNotFound(_))
        ));
    }
}
