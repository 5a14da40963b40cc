//! CLI argument merging with config

use crate::domain::{ColorMode, Settings};

#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub log_level: Option<String>,
    pub color: Option<ColorMode>,
}

pub fn merge_cli_with_config(mut base_settings: Settings, cli: CliOverrides) -> Settings {
    if let Some(log_level) = cli.log_level {
        base_settings.log_level = log_level;
    }
    if let Some(color) = cli.color {
        base_settings.color = color;
    }

    base_settings
}
