//! Launch context and launch spec

use serde::Serialize;
use std::path::PathBuf;

use retroshim_config::{GameSystem, LauncherOptions, LauncherSettings};
use retroshim_input::InputDevice;

/// Everything a generator needs to emit configuration for one launch.
#[derive(Debug, Clone)]
pub struct LaunchContext {
    pub system: GameSystem,

    /// Core override; falls back to the system default
    pub core: Option<String>,

    pub rom_path: PathBuf,

    pub options: LauncherOptions,

    /// Connected devices in roster order
    pub devices: Vec<InputDevice>,

    pub settings: LauncherSettings,
}

impl LaunchContext {
    pub fn new(
        system: GameSystem,
        rom_path: impl Into<PathBuf>,
        settings: LauncherSettings,
    ) -> Self {
        Self {
            system,
            core: None,
            rom_path: rom_path.into(),
            options: LauncherOptions::new(),
            devices: Vec::new(),
            settings,
        }
    }

    pub fn with_core(mut self, core: impl Into<String>) -> Self {
        self.core = Some(core.into());
        self
    }

    pub fn with_options(mut self, options: LauncherOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_devices(mut self, devices: Vec<InputDevice>) -> Self {
        self.devices = devices;
        self
    }

    /// ROM name without directory or extension (MAME set name for arcade
    /// systems).
    pub fn rom_name(&self) -> &str {
        self.rom_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
    }

    /// Core to launch with: explicit override or the system default.
    pub fn core(&self) -> Option<&str> {
        self.core.as_deref().or_else(|| self.system.default_core())
    }
}

/// The resolved command line for one launch.
#[derive(Debug, Clone, Serialize)]
pub struct LaunchSpec {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
}

impl LaunchSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Render as a shell-like string for logging and --dry-run.
    pub fn command_line(&self) -> String {
        let mut parts = vec![self.program.display().to_string()];
        for arg in &self.args {
            if arg.contains(' ') {
                parts.push(format!("\"{arg}\""));
            } else {
                parts.push(arg.clone());
            }
        }
        parts.join(" ")
    }
}
