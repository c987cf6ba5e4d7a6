// File: src/paths.rs
use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

pub struct AppPaths;

impl AppPaths {
    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("org", "eventdesk", "eventdesk")
            .context("Could not determine a home directory")
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.config_dir().join("config.toml"))
    }

    /// Where cookies live between runs.
    pub fn session_file() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("session.json"))
    }

    pub fn log_file() -> Result<PathBuf> {
        Ok(Self::project_dirs()?.data_dir().join("eventdesk.log"))
    }
}
