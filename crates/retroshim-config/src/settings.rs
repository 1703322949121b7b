//! RetroShim's own settings file
//!
//! TOML file describing where the emulator binaries and their config
//! trees live. Every field has a default so a missing file still yields a
//! usable layout.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::ConfigError;

/// Standard configuration paths
pub const CONFIG_DIR: &str = "/etc/retroshim";
pub const USER_CONFIG_DIR: &str = ".config/retroshim";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LauncherSettings {
    /// RetroArch executable
    #[serde(default = "default_retroarch")]
    pub retroarch_path: PathBuf,

    /// Libretro cores directory
    #[serde(default = "default_cores")]
    pub cores_dir: PathBuf,

    /// RetroArch config directory
    #[serde(default = "default_retroarch_config")]
    pub retroarch_config_dir: PathBuf,

    /// Standalone MAME executable
    #[serde(default = "default_mame")]
    pub mame_path: PathBuf,

    /// MAME cfg directory (ctrlr files live under it)
    #[serde(default = "default_mame_config")]
    pub mame_config_dir: PathBuf,

    /// Supermodel executable
    #[serde(default = "default_supermodel")]
    pub supermodel_path: PathBuf,

    /// Directory holding Supermodel.ini
    #[serde(default = "default_supermodel_config")]
    pub supermodel_config_dir: PathBuf,

    /// Yuzu executable
    #[serde(default = "default_yuzu")]
    pub yuzu_path: PathBuf,

    /// Directory holding qt-config.ini
    #[serde(default = "default_yuzu_config")]
    pub yuzu_config_dir: PathBuf,

    /// BIOS/firmware directory
    #[serde(default = "default_bios")]
    pub bios_dir: PathBuf,

    /// Save files directory
    #[serde(default = "default_saves")]
    pub saves_dir: PathBuf,
}

fn default_retroarch() -> PathBuf {
    PathBuf::from("/usr/bin/retroarch")
}

fn default_cores() -> PathBuf {
    PathBuf::from("/usr/lib/libretro")
}

fn default_retroarch_config() -> PathBuf {
    home().join(".config/retroarch")
}

fn default_mame() -> PathBuf {
    PathBuf::from("/usr/bin/mame")
}

fn default_mame_config() -> PathBuf {
    home().join(".mame")
}

fn default_supermodel() -> PathBuf {
    PathBuf::from("/usr/bin/supermodel")
}

fn default_supermodel_config() -> PathBuf {
    home().join(".config/supermodel")
}

fn default_yuzu() -> PathBuf {
    PathBuf::from("/usr/bin/yuzu")
}

fn default_yuzu_config() -> PathBuf {
    home().join(".config/yuzu")
}

fn default_bios() -> PathBuf {
    PathBuf::from("/roms/bios")
}

fn default_saves() -> PathBuf {
    PathBuf::from("/roms/saves")
}

fn home() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("/root"))
}

impl Default for LauncherSettings {
    fn default() -> Self {
        Self {
            retroarch_path: default_retroarch(),
            cores_dir: default_cores(),
            retroarch_config_dir: default_retroarch_config(),
            mame_path: default_mame(),
            mame_config_dir: default_mame_config(),
            supermodel_path: default_supermodel(),
            supermodel_config_dir: default_supermodel_config(),
            yuzu_path: default_yuzu(),
            yuzu_config_dir: default_yuzu_config(),
            bios_dir: default_bios(),
            saves_dir: default_saves(),
        }
    }
}

impl LauncherSettings {
    /// Load settings from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)?;
        Ok(settings)
    }

    /// Load from the default locations: user config first, then system
    /// config, then built-in defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        let user_config = home().join(USER_CONFIG_DIR).join("settings.toml");
        if user_config.exists() {
            return Self::load(&user_config);
        }

        let system_config = Path::new(CONFIG_DIR).join("settings.toml");
        if system_config.exists() {
            return Self::load(&system_config);
        }

        tracing::warn!("No settings file found, using defaults");
        Ok(Self::default())
    }

    /// Save settings to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;
        tracing::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = LauncherSettings::default();
        assert!(settings.retroarch_path.to_string_lossy().contains("retroarch"));
        assert!(settings.cores_dir.to_string_lossy().contains("libretro"));
    }

    #[test]
    fn test_load_partial_file_fills_defaults() {
        let mut temp = NamedTempFile::new().unwrap();
        write!(temp, "retroarch_path = \"/opt/retroarch/bin/retroarch\"\n").unwrap();

        let settings = LauncherSettings::load(temp.path()).unwrap();
        assert_eq!(
            settings.retroarch_path,
            PathBuf::from("/opt/retroarch/bin/retroarch")
        );
        // Unspecified fields keep their defaults
        assert_eq!(settings.mame_path, PathBuf::from("/usr/bin/mame"));
    }

    #[test]
    fn test_save_and_reload() {
        let temp = NamedTempFile::new().unwrap();
        let mut settings = LauncherSettings::default();
        settings.bios_dir = PathBuf::from("/data/bios");

        settings.save(temp.path()).unwrap();
        let loaded = LauncherSettings::load(temp.path()).unwrap();
        assert_eq!(loaded.bios_dir, PathBuf::from("/data/bios"));
    }
}
