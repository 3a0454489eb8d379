//! Configuration command handlers
//!
//! Handles the `configure` subcommand for setting up d2rpk CLI defaults.

use crate::config::Config;
use anyhow::Result;
use std::path::PathBuf;

/// Handle the configure command
///
/// # Arguments
/// * `data_dir` - Optional game data directory to set as default
/// * `show` - If true, show current configuration
pub fn handle(data_dir: Option<PathBuf>, show: bool) -> Result<()> {
    let mut config = Config::load()?;

    if show {
        show_config(&config)?;
        return Ok(());
    }

    if let Some(dir) = data_dir {
        set_data_dir(&mut config, dir)?;
    } else {
        show_usage();
    }

    Ok(())
}

/// Display current configuration
fn show_config(config: &Config) -> Result<()> {
    if let Some(dir) = config.get_data_dir() {
        println!("Data directory: {}", dir.display());
    } else {
        println!("No data directory configured");
    }

    if let Ok(path) = Config::config_path() {
        println!("Config file: {}", path.display());
    }

    Ok(())
}

/// Set the data directory in configuration
fn set_data_dir(config: &mut Config, dir: PathBuf) -> Result<()> {
    if !dir.is_dir() {
        eprintln!("Warning: {} is not a directory", dir.display());
    }

    config.set_data_dir(dir.clone());
    config.save()?;

    println!("Data directory configured: {}", dir.display());
    if let Ok(path) = Config::config_path() {
        println!("Config saved to: {}", path.display());
    }

    Ok(())
}

/// Show usage help for the configure command
fn show_usage() {
    println!("Usage: d2rpk configure --data-dir PATH/TO/excel");
    println!();
    println!("The directory must contain TreasureClassEx.txt and misc.txt.");
    println!("Use 'd2rpk configure --show' to see current settings.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_usage_does_not_panic() {
        // Just verify it doesn't panic
        show_usage();
    }

    #[test]
    fn test_config_path_exists() {
        // Config::config_path() should return a valid path
        let result = Config::config_path();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_load() {
        // Should be able to load config (may be empty)
        let result = Config::load();
        assert!(result.is_ok());
    }
}
