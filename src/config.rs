// File: src/config.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const DEFAULT_URL: &str = "http://localhost:9090";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the events server, without the `/api` suffix.
    pub url: String,
    /// Last user that logged in successfully; prefills the login form.
    pub username: String,
    pub allow_insecure_certs: bool,
    /// Keep session cookies on disk so later runs stay logged in.
    pub remember_session: bool,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            username: String::new(),
            allow_insecure_certs: false,
            remember_session: true,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Missing file means defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("Invalid config in {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        // Write next to the target, then rename over it.
        let tmp = path.with_extension("toml.tmp");
        fs::write(&tmp, raw).with_context(|| format!("Failed to write {}", tmp.display()))?;
        fs::rename(&tmp, path)?;
        Ok(())
    }
}
