//! RetroShim launcher
//!
//! The command-line entry point: resolve the system and emulator for a
//! ROM, run the matching configuration generator, and spawn the emulator
//! with the command line it produced.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use serde::Deserialize;
use tracing::{debug, info};

use retroshim_config::{GameSystem, LauncherOptions, LauncherSettings};
use retroshim_generators::{LaunchContext, LaunchSpec, generator_for};
use retroshim_input::{DeviceApi, DeviceKind, InputDevice};

#[derive(Parser, Debug)]
#[command(name = "retroshim", version, about = "Emulator configuration shim and launcher")]
struct Cli {
    /// ROM file to launch
    #[arg(short, long)]
    rom: PathBuf,

    /// System name (inferred from the ROM extension when omitted)
    #[arg(short, long)]
    system: Option<String>,

    /// Emulator family override (libretro, mame, supermodel, yuzu)
    #[arg(short, long)]
    emulator: Option<String>,

    /// Libretro core override
    #[arg(short, long)]
    core: Option<String>,

    /// Launch option, repeatable (key=value)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    options: Vec<String>,

    /// Controller roster file (TOML)
    #[arg(long, value_name = "FILE")]
    controllers: Option<PathBuf>,

    /// Settings file (default: user config, then /etc/retroshim)
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Resolve and print the command line without launching
    #[arg(long)]
    dry_run: bool,

    /// Print the resolved launch as JSON (implies --dry-run)
    #[arg(long)]
    json: bool,

    /// Verbosity level (-vv for most verbose)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
}

/// One device in the roster file.
#[derive(Debug, Deserialize)]
struct DeviceEntry {
    name: String,
    api: DeviceApi,
    kind: DeviceKind,
    index: u8,
    #[serde(default)]
    guid: Option<String>,
    #[serde(default)]
    player: Option<u8>,
    /// SDL game-controller-db style mapping string
    #[serde(default)]
    mapping: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Roster {
    #[serde(default)]
    device: Vec<DeviceEntry>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => LauncherSettings::load(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?,
        None => LauncherSettings::load_default()?,
    };

    let system = resolve_system(&cli)?;
    debug!("Resolved system: {}", system.display_name());

    let mut options = LauncherOptions::new();
    for raw in &cli.options {
        options.parse_pair(raw)?;
    }

    let devices = match &cli.controllers {
        Some(path) => load_roster(path)?,
        None => Vec::new(),
    };

    let emulator = cli
        .emulator
        .clone()
        .unwrap_or_else(|| system.default_emulator().to_string());
    let Some(generator) = generator_for(&emulator) else {
        bail!("Unknown emulator '{emulator}'");
    };

    let mut ctx = LaunchContext::new(system, &cli.rom, settings)
        .with_options(options)
        .with_devices(devices);
    if let Some(core) = &cli.core {
        ctx = ctx.with_core(core);
    }

    let spec = generator
        .generate(&ctx)
        .with_context(|| format!("Generator '{}' failed", generator.name()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&spec)?);
        return Ok(());
    }
    if cli.dry_run {
        println!("{}", spec.command_line());
        return Ok(());
    }

    let program = resolve_program(&spec.program)?;
    info!("Launching {}", spec.command_line());
    let status = run(&program, &spec)?;

    if !status.success() {
        bail!(
            "{} exited with status {}",
            program.display(),
            status.code().map_or("signal".to_string(), |c| c.to_string())
        );
    }
    Ok(())
}

fn setup_logging(verbose: u8) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .init();
}

/// Explicit system name wins; otherwise infer from the ROM extension.
fn resolve_system(cli: &Cli) -> Result<GameSystem> {
    if let Some(name) = &cli.system {
        return Ok(GameSystem::from_name(name));
    }
    let ext = cli
        .rom
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default();
    GameSystem::from_extension(ext).with_context(|| {
        format!(
            "Cannot infer system from '{}', pass --system",
            cli.rom.display()
        )
    })
}

fn load_roster(path: &Path) -> Result<Vec<InputDevice>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read controller roster {}", path.display()))?;
    let roster: Roster = toml::from_str(&contents)
        .with_context(|| format!("Invalid controller roster {}", path.display()))?;

    let mut devices = Vec::with_capacity(roster.device.len());
    for entry in roster.device {
        let mut device = InputDevice::new(entry.name, entry.api, entry.kind, entry.index);
        device.guid = entry.guid;
        device.player = entry.player;
        if let Some(mapping) = &entry.mapping {
            device
                .parse_sdl_mapping(mapping)
                .with_context(|| format!("Bad mapping for '{}'", device.name))?;
        }
        devices.push(device);
    }
    info!("Loaded {} device(s) from roster", devices.len());
    Ok(devices)
}

/// Absolute paths must exist; bare names are looked up on PATH.
fn resolve_program(program: &Path) -> Result<PathBuf> {
    if program.is_absolute() {
        if !program.exists() {
            bail!("Emulator not found: {}", program.display());
        }
        return Ok(program.to_path_buf());
    }
    which::which(program)
        .with_context(|| format!("Emulator '{}' not found on PATH", program.display()))
}

fn run(program: &Path, spec: &LaunchSpec) -> Result<std::process::ExitStatus> {
    let mut cmd = Command::new(program);
    cmd.args(&spec.args);
    if let Some(dir) = &spec.working_dir {
        cmd.current_dir(dir);
    }
    cmd.stdin(Stdio::null());

    let mut child = cmd
        .spawn()
        .with_context(|| format!("Failed to spawn {}", program.display()))?;
    debug!("Spawned pid {}", child.id());

    child.wait().context("Failed waiting for emulator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parses() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_resolve_system_from_extension() {
        let cli = Cli::parse_from(["retroshim", "--rom", "/roms/game.sfc"]);
        assert_eq!(resolve_system(&cli).unwrap(), GameSystem::Snes);
    }

    #[test]
    fn test_resolve_system_explicit_wins() {
        let cli = Cli::parse_from(["retroshim", "--rom", "/roms/game.sfc", "--system", "mame"]);
        assert_eq!(resolve_system(&cli).unwrap(), GameSystem::Mame);
    }

    #[test]
    fn test_resolve_system_unknown_extension() {
        let cli = Cli::parse_from(["retroshim", "--rom", "/roms/game.xyz"]);
        assert!(resolve_system(&cli).is_err());
    }

    #[test]
    fn test_load_roster() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("controllers.toml");
        fs::write(
            &path,
            r#"
[[device]]
name = "Xbox Controller"
api = "xinput"
kind = "gamepad"
index = 0
player = 1
mapping = "a:b0,b:b1,leftx:a0,dpup:h0.1"

[[device]]
name = "AimTrak"
api = "sdl"
kind = "lightgun"
index = 1
"#,
        )
        .unwrap();

        let devices = load_roster(&path).unwrap();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].api, DeviceApi::XInput);
        assert_eq!(devices[0].player, Some(1));
        assert!(devices[0].source(retroshim_input::Button::South).is_some());
        assert_eq!(devices[1].kind, DeviceKind::LightGun);
    }

    #[test]
    fn test_resolve_program_missing() {
        assert!(resolve_program(Path::new("/nonexistent/bin/retroarch")).is_err());
        assert!(resolve_program(Path::new("no-such-emulator-on-path")).is_err());
    }

    #[test]
    fn test_resolve_program_absolute_existing() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("mame");
        fs::write(&bin, b"").unwrap();
        assert_eq!(resolve_program(&bin).unwrap(), bin);
    }

    #[test]
    fn test_load_roster_bad_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("controllers.toml");
        fs::write(
            &path,
            "[[device]]\nname = \"Pad\"\napi = \"sdl\"\nkind = \"gamepad\"\nindex = 0\nmapping = \"a:z9\"\n",
        )
        .unwrap();
        assert!(load_roster(&path).is_err());
    }
}
