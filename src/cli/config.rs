//! Config command implementation

use anyhow::Result;
use clap::{Args, ValueEnum};
use serde_json::json;

use super::write_stdout;
use crate::domain::LoadedSettings;

#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = ConfigFormat::Toml)]
    pub format: ConfigFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Json,
}

pub fn run(args: ConfigArgs, loaded: &LoadedSettings) -> Result<()> {
    write_stdout(render(args.format, loaded)?.as_bytes())?;
    Ok(())
}

fn render(format: ConfigFormat, loaded: &LoadedSettings) -> Result<String> {
    let source = loaded.source.as_ref().map(|path| path.display().to_string());
    match format {
        ConfigFormat::Toml => {
            let body = toml::to_string_pretty(&loaded.settings)?;
            let source = source.as_deref().unwrap_or("defaults");
            Ok(format!("# source: {source}\n{body}"))
        }
        ConfigFormat::Json => {
            let value = json!({ "source": source, "settings": loaded.settings });
            Ok(format!("{}\n", serde_json::to_string_pretty(&value)?))
        }
    }
}
