use serde::Deserialize;
use std::env;
use std::fs;
use std::iter::FromIterator;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::ui::theme::{Theme, ThemeSpec};

const CONFIG_PATH_ENV_VAR: &str = "CALBOARD_CONFIG_FILE";

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let config_env: Option<PathBuf> = env::var_os(CONFIG_PATH_ENV_VAR).map(PathBuf::from);

    let mut locations = Vec::new();

    if let Some(path) = config_env {
        locations.push(path);
    }

    if let Ok(dir) = env::var("XDG_CONFIG_HOME") {
        locations.push(PathBuf::from_iter(
            [dir, "calboard".to_string(), "config.toml".to_string()].iter(),
        ));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(PathBuf::from_iter(
            [
                home.as_path(),
                Path::new(".config"),
                Path::new("calboard"),
                Path::new("config.toml"),
            ]
            .iter(),
        ));
        locations.push(home.join(".calboard.toml"));
    }

    locations
}

fn default_tick_rate() -> u64 {
    500
}

fn default_items() -> Vec<String> {
    vec!["Item 1".to_owned(), "Item 2".to_owned()]
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Interval of the clock tick in milliseconds.
    #[serde(default = "default_tick_rate")]
    tick_rate: u64,
    /// Contents of the source pool on startup.
    #[serde(default = "default_items")]
    pub items: Vec<String>,
    #[serde(default)]
    theme: ThemeSpec,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            tick_rate: default_tick_rate(),
            items: default_items(),
            theme: ThemeSpec::new(),
        }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        // surface bad colours or class names at load time
        Theme::from_spec(&config.theme)?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Config> {
        let content = fs::read_to_string(path)?;
        Config::from_toml_str(&content).map_err(|e| {
            let detail = e.message.clone().unwrap_or_default();
            e.with_msg(&format!("{}: {}", path.display(), detail))
        })
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate)
    }

    pub fn theme(&self) -> Theme {
        Theme::from_spec(&self.theme).unwrap_or_default()
    }
}

/// Loads `path` if given, otherwise the first existing file of the usual
/// locations. Falls back to the defaults when there is none.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(Error::new(
                ErrorKind::ConfigMissing,
                &path.display().to_string(),
            ));
        }
        return Config::from_path(path);
    }

    match find_configfile_locations()
        .into_iter()
        .find(|location| location.is_file())
    {
        Some(location) => {
            log::info!("Using config file {}", location.display());
            Config::from_path(&location)
        }
        None => {
            log::info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }
}
