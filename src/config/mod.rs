//! Configuration loading
//!
//! Settings are layered with figment: built-in defaults, then a TOML or YAML
//! config file, then `GIT_HIGHLIGHTS_*` environment variables. Command-line
//! flags are applied last by [`merge_cli_with_config`].

use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use figment::Figment;
use std::path::{Path, PathBuf};

use crate::domain::{LoadedSettings, Settings};
use crate::error::{HighlightsError, Result};

mod merge;

pub use merge::{merge_cli_with_config, CliOverrides};

/// Config file names probed in the working directory, in order.
pub const CONFIG_FILE_NAMES: &[&str] =
    &["git-highlights.toml", ".git-highlights.toml", ".git-highlights.yml", ".git-highlights.yaml"];

/// Prefix for environment overrides (`GIT_HIGHLIGHTS_LOG_LEVEL`, ...).
pub const ENV_PREFIX: &str = "GIT_HIGHLIGHTS_";

/// Load settings from `explicit` if given, otherwise from the first config
/// file found in `cwd`.
///
/// An explicit path that does not exist is an error; a missing discovered
/// file just means defaults and environment apply.
pub fn load_config(cwd: &Path, explicit: Option<&Path>) -> Result<LoadedSettings> {
    let source = match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(HighlightsError::ConfigNotFound(path.to_path_buf()));
            }
            Some(path.to_path_buf())
        }
        None => discover_config(cwd),
    };

    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(path) = &source {
        figment = if is_yaml(path) {
            figment.merge(Yaml::file(path))
        } else {
            figment.merge(Toml::file(path))
        };
    }

    let settings: Settings = figment.merge(Env::prefixed(ENV_PREFIX)).extract()?;
    Ok(LoadedSettings { settings, source })
}

fn discover_config(cwd: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES.iter().map(|name| cwd.join(name)).find(|path| path.is_file())
}

fn is_yaml(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("yml" | "yaml"))
}
