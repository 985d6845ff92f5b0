//! Common paths for shloka data storage
//!
//! Everything lives under ~/.config/shloka/ on all platforms:
//! - config.toml - User configuration
//! - reports.jsonl - Submitted content reports

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// Get the shloka data directory (~/.config/shloka/)
pub fn shloka_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    let dir = home.join(".config").join("shloka");
    fs::create_dir_all(&dir).context("Failed to create shloka directory")?;
    Ok(dir)
}

/// Get the config file path (~/.config/shloka/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(shloka_dir()?.join("config.toml"))
}

/// Get the default report log path (~/.config/shloka/reports.jsonl)
pub fn reports_path() -> Result<PathBuf> {
    Ok(shloka_dir()?.join("reports.jsonl"))
}
