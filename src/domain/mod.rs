//! Core domain types
//!
//! Runtime settings shared by every command.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default tracing filter when neither `RUST_LOG` nor a config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Whether log output on stderr is colored
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stderr is a color-capable terminal
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve against the current stderr stream.
    pub fn use_ansi(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled_stderr(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

/// Effective runtime settings for git-highlights
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Tracing filter directive, e.g. `info` or `git_highlights=debug`.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub color: ColorMode,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self { log_level: default_log_level(), color: ColorMode::default() }
    }
}

/// Settings together with the config file they were read from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedSettings {
    pub settings: Settings,

    /// `None` when no config file was found and only defaults/env applied.
    pub source: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_default_to_warn_and_auto_color() {
        let settings = Settings::default();
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.color, ColorMode::Auto);
    }

    #[test]
    fn partial_toml_keeps_remaining_defaults() {
        let settings: Settings = toml::from_str("color = \"never\"").expect("valid toml");
        assert_eq!(settings.color, ColorMode::Never);
        assert_eq!(settings.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn explicit_color_modes_ignore_terminal() {
        assert!(ColorMode::Always.use_ansi());
        assert!(!ColorMode::Never.use_ansi());
    }
}
