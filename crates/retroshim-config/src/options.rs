//! Launcher option dictionary
//!
//! The front-end hands RetroShim an opaque set of string key/value pairs
//! (display flags, per-player device picks, per-core tweaks). Generators
//! read it through typed accessors and never see where a value came from.

use std::collections::HashMap;

use crate::ConfigError;

/// Opaque key/value options passed down from the front-end.
#[derive(Debug, Clone, Default)]
pub struct LauncherOptions {
    values: HashMap<String, String>,
}

impl LauncherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an iterator of (key, value) pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Parse a `key=value` argument as handed on the command line.
    pub fn parse_pair(&mut self, raw: &str) -> Result<(), ConfigError> {
        let (key, value) = raw
            .split_once('=')
            .ok_or_else(|| ConfigError::Invalid(format!("expected key=value, got '{raw}'")))?;
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::Invalid(format!("empty key in '{raw}'")));
        }
        self.values.insert(key.to_string(), value.trim().to_string());
        Ok(())
    }

    /// Absorb a TOML table of scalar values.
    pub fn extend_from_toml(&mut self, table: &toml::Table) {
        for (key, value) in table {
            let text = match value {
                toml::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            self.values.insert(key.clone(), text);
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value or fall back to a default.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// True when the key is present with a truthy value. Absent keys are
    /// false.
    pub fn is_enabled(&self, key: &str) -> bool {
        match self.get(key) {
            Some(v) => matches!(
                v.to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on" | "enabled"
            ),
            None => false,
        }
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    pub fn get_float(&self, key: &str) -> Option<f64> {
        self.get(key).and_then(|v| v.trim().parse().ok())
    }

    /// Overlay another option set; the overlay wins on conflicts.
    pub fn merge(&mut self, overlay: &LauncherOptions) {
        for (key, value) in &overlay.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        let mut opts = LauncherOptions::new();
        opts.parse_pair("video_mode=fullscreen").unwrap();
        assert_eq!(opts.get("video_mode"), Some("fullscreen"));

        assert!(opts.parse_pair("no-equals-sign").is_err());
        assert!(opts.parse_pair("=value").is_err());
    }

    #[test]
    fn test_is_enabled_truthy_values() {
        let opts = LauncherOptions::from_pairs([
            ("a", "1"),
            ("b", "true"),
            ("c", "Yes"),
            ("d", "0"),
            ("e", "false"),
        ]);
        assert!(opts.is_enabled("a"));
        assert!(opts.is_enabled("b"));
        assert!(opts.is_enabled("c"));
        assert!(!opts.is_enabled("d"));
        assert!(!opts.is_enabled("e"));
        assert!(!opts.is_enabled("missing"));
    }

    #[test]
    fn test_typed_getters() {
        let opts = LauncherOptions::from_pairs([("players", "2"), ("scale", "1.5")]);
        assert_eq!(opts.get_int("players"), Some(2));
        assert_eq!(opts.get_float("scale"), Some(1.5));
        assert_eq!(opts.get_int("scale"), None);
        assert_eq!(opts.get_or("missing", "def"), "def");
    }

    #[test]
    fn test_merge_overlay_wins() {
        let mut base = LauncherOptions::from_pairs([("a", "1"), ("b", "2")]);
        let overlay = LauncherOptions::from_pairs([("b", "9"), ("c", "3")]);
        base.merge(&overlay);
        assert_eq!(base.get("a"), Some("1"));
        assert_eq!(base.get("b"), Some("9"));
        assert_eq!(base.get("c"), Some("3"));
    }

    #[test]
    fn test_extend_from_toml() {
        let table: toml::Table = toml::from_str("ratio = 4\nshader = \"crt\"").unwrap();
        let mut opts = LauncherOptions::new();
        opts.extend_from_toml(&table);
        assert_eq!(opts.get("ratio"), Some("4"));
        assert_eq!(opts.get("shader"), Some("crt"));
    }
}
