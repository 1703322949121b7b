//! RetroArch-style `key = "value"` config files
//!
//! RetroArch and its core-options files share one line format. The file is
//! kept as an ordered list of lines so comments and unrelated settings
//! survive a load/edit/save round trip; edits replace a key in place and
//! new keys append at the end.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::ConfigError;

#[derive(Debug, Clone)]
enum Line {
    /// Comment or anything else we do not understand. Preserved verbatim.
    Raw(String),
    Pair { key: String, value: String },
}

/// An editable RetroArch-format config file.
#[derive(Debug, Clone, Default)]
pub struct CfgFile {
    lines: Vec<Line>,
}

impl CfgFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from disk; a missing file yields an empty config.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::new());
        }
        let contents = fs::read_to_string(path)?;
        Ok(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let lines = contents
            .lines()
            .map(|line| {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    return Line::Raw(line.to_string());
                }
                match trimmed.split_once('=') {
                    Some((key, value)) => Line::Pair {
                        key: key.trim().to_string(),
                        value: value.trim().trim_matches('"').to_string(),
                    },
                    None => Line::Raw(line.to_string()),
                }
            })
            .collect();
        Self { lines }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.lines.iter().find_map(|line| match line {
            Line::Pair { key: k, value } if k == key => Some(value.as_str()),
            _ => None,
        })
    }

    /// Set a key, replacing an existing entry in place or appending.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        for line in &mut self.lines {
            if let Line::Pair { key: k, value: v } = line
                && *k == key
            {
                *v = value;
                return;
            }
        }
        self.lines.push(Line::Pair { key, value });
    }

    /// Remove a key if present.
    pub fn unset(&mut self, key: &str) {
        self.lines
            .retain(|line| !matches!(line, Line::Pair { key: k, .. } if k == key));
    }

    pub fn len(&self) -> usize {
        self.lines
            .iter()
            .filter(|l| matches!(l, Line::Pair { .. }))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn write_to<W: Write>(&self, mut out: W) -> Result<(), ConfigError> {
        for line in &self.lines {
            match line {
                Line::Raw(raw) => writeln!(out, "{raw}")?,
                Line::Pair { key, value } => writeln!(out, "{key} = \"{value}\"")?,
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
        tracing::debug!("Wrote {} entries to {}", self.len(), path.display());
        Ok(())
    }
}
