//! Init command.

use std::path::PathBuf;

use crate::config::Settings;

/// Writes a default `codescribe.toml` in the current directory.
pub fn run_init(force: bool) {
    let config_path = PathBuf::from("codescribe.toml");

    if config_path.exists() && !force {
        eprintln!("Configuration file already exists at: {}", config_path.display());
        eprintln!("Use --force to overwrite");
        std::process::exit(1);
    }

    match Settings::default().save(&config_path) {
        Ok(()) => {
            println!("Created configuration file at: {}", config_path.display());
            println!("Edit this file to customize your settings.");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
