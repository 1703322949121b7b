//! Sectioned INI files
//!
//! Two of the target emulators use sectioned INI with different surface
//! syntax: Supermodel writes `Key = value` with quoted input bindings,
//! Yuzu's Qt config writes `key=value` where group keys may contain `\`.
//! Both are covered by one ordered structure plus a style knob.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::ConfigError;

/// Surface syntax for an INI file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IniStyle {
    /// `Key = value` (Supermodel)
    Spaced,
    /// `key=value` (Qt / Yuzu)
    Compact,
}

#[derive(Debug, Clone)]
struct Section {
    name: String,
    /// Comments and blank lines are preserved as entries with an empty key.
    entries: Vec<(String, String)>,
}

/// An editable sectioned INI file. Keys outside any section live in an
/// unnamed section at the top.
#[derive(Debug, Clone)]
pub struct IniFile {
    style: IniStyle,
    sections: Vec<Section>,
}

impl IniFile {
    pub fn new(style: IniStyle) -> Self {
        Self {
            style,
            sections: Vec::new(),
        }
    }

    /// Load from disk; a missing file yields an empty config.
    pub fn load(path: &Path, style: IniStyle) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new(style));
        }
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents, style))
    }

    pub fn parse(contents: &str, style: IniStyle) -> Self {
        let mut ini = Self::new(style);
        let mut current = String::new();

        for line in contents.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with('[') && trimmed.ends_with(']') {
                current = trimmed[1..trimmed.len() - 1].trim().to_string();
                ini.section_mut(&current);
            } else if trimmed.is_empty() || trimmed.starts_with(';') || trimmed.starts_with('#') {
                ini.section_mut(&current)
                    .entries
                    .push((String::new(), line.to_string()));
            } else if let Some((key, value)) = trimmed.split_once('=') {
                // Value text is kept verbatim (including quotes) so
                // entries the shim never touches round-trip unchanged.
                ini.section_mut(&current)
                    .entries
                    .push((key.trim().to_string(), value.trim().to_string()));
            } else {
                ini.section_mut(&current)
                    .entries
                    .push((String::new(), line.to_string()));
            }
        }
        ini
    }

    fn section_mut(&mut self, name: &str) -> &mut Section {
        if let Some(pos) = self.sections.iter().position(|s| s.name == name) {
            return &mut self.sections[pos];
        }
        self.sections.push(Section {
            name: name.to_string(),
            entries: Vec::new(),
        });
        self.sections.last_mut().unwrap()
    }

    /// Read a value with any surrounding quotes removed.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.name == section)?
            .entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str().trim_matches('"'))
    }

    /// Set a key within a section, replacing in place or appending.
    pub fn set(
        &mut self,
        section: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) {
        let key = key.into();
        let value = value.into();
        let section = self.section_mut(section);
        for (k, v) in &mut section.entries {
            if *k == key {
                *v = value;
                return;
            }
        }
        section.entries.push((key, value));
    }

    pub fn remove(&mut self, section: &str, key: &str) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.name == section) {
            s.entries.retain(|(k, _)| k != key);
        }
    }

    pub fn remove_section(&mut self, section: &str) {
        self.sections.retain(|s| s.name != section);
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.sections.iter().any(|s| s.name == section)
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), ConfigError> {
        for (i, section) in self.sections.iter().enumerate() {
            if !section.name.is_empty() {
                if i > 0 {
                    writeln!(out)?;
                }
                writeln!(out, "[{}]", section.name)?;
            }
            for (key, value) in &section.entries {
                if key.is_empty() {
                    writeln!(out, "{value}")?;
                } else {
                    match self.style {
                        IniStyle::Spaced => writeln!(out, "{key} = {value}")?,
                        IniStyle::Compact => writeln!(out, "{key}={value}")?,
                    }
                }
            }
        }
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut buf = Vec::new();
        self.write_to(&mut buf)?;
        fs::write(path, buf)?;
        tracing::debug!("Wrote INI to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn render(ini: &IniFile) -> String {
        let mut buf = Vec::new();
        ini.write_to(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_spaced_style_output() {
        let mut ini = IniFile::new(IniStyle::Spaced);
        ini.set("Global", "FullScreen", "1");
        ini.set("Global", "InputStart1", "\"KEY_1,JOY1_BUTTON9\"");
        let text = render(&ini);
        assert!(text.contains("[Global]\n"));
        assert!(text.contains("FullScreen = 1\n"));
        assert!(text.contains("InputStart1 = \"KEY_1,JOY1_BUTTON9\"\n"));
    }

    #[test]
    fn test_compact_style_output() {
        let mut ini = IniFile::new(IniStyle::Compact);
        ini.set("UI", "fullscreen\\default", "false");
        ini.set("UI", "fullscreen", "true");
        let text = render(&ini);
        assert!(text.contains("[UI]\n"));
        assert!(text.contains("fullscreen\\default=false\n"));
        assert!(text.contains("fullscreen=true\n"));
    }

    #[test]
    fn test_parse_and_update_in_place() {
        let input = "; Supermodel config\n[Global]\nFullScreen = 0\nNew3DEngine = 1\n";
        let mut ini = IniFile::parse(input, IniStyle::Spaced);
        assert_eq!(ini.get("Global", "FullScreen"), Some("0"));

        ini.set("Global", "FullScreen", "1");
        let text = render(&ini);
        assert!(text.starts_with("; Supermodel config\n"));
        let fs_pos = text.find("FullScreen = 1").unwrap();
        let engine_pos = text.find("New3DEngine = 1").unwrap();
        assert!(fs_pos < engine_pos);
    }

    #[test]
    fn test_unmanaged_quoted_values_survive() {
        // Supermodel requires input bindings quoted; bindings the shim
        // never sets must come back byte-for-byte.
        let input = "[Global]\nInputVR = \"KEY_ALT,JOY1_BUTTON4\"\nFullScreen = 0\n";
        let mut ini = IniFile::parse(input, IniStyle::Spaced);
        assert_eq!(render(&ini), input);

        ini.set("Global", "FullScreen", "1");
        let text = render(&ini);
        assert!(text.contains("InputVR = \"KEY_ALT,JOY1_BUTTON4\"\n"));
        // get still exposes the unquoted value
        assert_eq!(ini.get("Global", "InputVR"), Some("KEY_ALT,JOY1_BUTTON4"));
    }

    #[test]
    fn test_sections_are_ordered() {
        let mut ini = IniFile::new(IniStyle::Compact);
        ini.set("UI", "a", "1");
        ini.set("Renderer", "b", "2");
        ini.set("UI", "c", "3");
        let text = render(&ini);
        let ui = text.find("[UI]").unwrap();
        let renderer = text.find("[Renderer]").unwrap();
        assert!(ui < renderer);
        assert!(text.contains("c=3"));
    }

    #[test]
    fn test_remove_key_and_section() {
        let mut ini = IniFile::new(IniStyle::Spaced);
        ini.set("Global", "a", "1");
        ini.set("Game", "b", "2");
        ini.remove("Global", "a");
        ini.remove_section("Game");
        assert_eq!(ini.get("Global", "a"), None);
        assert!(!ini.has_section("Game"));
    }

    #[test]
    fn test_load_save_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Supermodel.ini");

        let mut ini = IniFile::new(IniStyle::Spaced);
        ini.set("Global", "XResolution", "1280");
        ini.save(&path).unwrap();

        let loaded = IniFile::load(&path, IniStyle::Spaced).unwrap();
        assert_eq!(loaded.get("Global", "XResolution"), Some("1280"));
    }
}
