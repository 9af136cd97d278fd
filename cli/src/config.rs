//! Settings: defaults, then an optional TOML file, then the environment,
//! then command-line flags.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONFIG_FILE: &str = "spycats.toml";
pub const API_URL_ENV: &str = "SPYCATS_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the backend, without the `/cats/` suffix.
    pub api_url: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
        }
    }
}

pub fn load_settings(config: Option<&Path>, api_url_flag: Option<&str>) -> anyhow::Result<Settings> {
    load_settings_with(config, api_url_flag, |key| std::env::var(key).ok())
}

/// `load_settings` with the environment lookup injected.
pub fn load_settings_with<F>(
    config: Option<&Path>,
    api_url_flag: Option<&str>,
    env: F,
) -> anyhow::Result<Settings>
where
    F: Fn(&str) -> Option<String>,
{
    let mut settings = match config {
        // An explicit file must exist.
        Some(path) => read_file(path)?,
        None => {
            let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                read_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    if let Some(v) = env(API_URL_ENV).filter(|v| !v.trim().is_empty()) {
        settings.api_url = v;
    }
    if let Some(v) = api_url_flag {
        settings.api_url = v.to_string();
    }

    settings.api_url = settings.api_url.trim().to_string();
    if settings.api_url.is_empty() {
        anyhow::bail!("api_url must not be empty");
    }
    Ok(settings)
}

fn read_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing {}", path.display()))
}
