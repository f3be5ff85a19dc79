//! Layered configuration for the indexing engine.
//!
//! Sources, in increasing priority: built-in defaults, a `codescribe.toml`
//! file, then `CODESCRIBE_`-prefixed environment variables. Every field has a
//! default, so an unconfigured workspace still indexes correctly — config
//! only lets an operator retune limits the engine already applies.

use std::collections::HashMap;
use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub indexing: IndexingConfig,

    #[serde(default)]
    pub limits: LimitsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IndexingConfig {
    /// Extra directory basenames pruned in addition to the engine's
    /// hardcoded default set.
    #[serde(default)]
    pub excluded_dirs: Vec<String>,

    /// Number of rayon threads used for parallel per-file extraction during
    /// a full index. `0` means "let rayon decide" (its own default: one
    /// thread per logical core).
    #[serde(default = "default_index_threads")]
    pub index_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LimitsConfig {
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,

    #[serde(default = "default_max_indexed_files")]
    pub max_indexed_files: usize,

    #[serde(default = "default_query_limit")]
    pub find_symbols_limit: usize,

    #[serde(default = "default_query_limit")]
    pub semantic_grep_limit: usize,

    #[serde(default = "default_query_limit")]
    pub find_files_limit: usize,

    #[serde(default = "default_glob_limit")]
    pub glob_limit: usize,

    #[serde(default = "default_references_limit")]
    pub find_references_limit: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_version() -> u32 {
    1
}
fn default_index_threads() -> usize {
    num_cpus::get()
}
fn default_max_file_bytes() -> u64 {
    1024 * 1024
}
fn default_max_indexed_files() -> usize {
    50_000
}
fn default_query_limit() -> usize {
    50
}
fn default_glob_limit() -> usize {
    200
}
fn default_references_limit() -> usize {
    100
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            indexing: IndexingConfig::default(),
            limits: LimitsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: Vec::new(),
            index_threads: default_index_threads(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            max_indexed_files: default_max_indexed_files(),
            find_symbols_limit: default_query_limit(),
            semantic_grep_limit: default_query_limit(),
            find_files_limit: default_query_limit(),
            glob_limit: default_glob_limit(),
            find_references_limit: default_references_limit(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl Settings {
    /// Loads configuration from `./codescribe.toml` (if present) layered
    /// under `CODESCRIBE_`-prefixed environment variables, over defaults.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(PathBuf::from("codescribe.toml"))
    }

    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("CODESCRIBE_").split("__"))
            .extract()
    }

    pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_settings_have_spec_limits() {
        let settings = Settings::default();
        assert_eq!(settings.limits.max_file_bytes, 1024 * 1024);
        assert_eq!(settings.limits.max_indexed_files, 50_000);
        assert_eq!(settings.limits.find_symbols_limit, 50);
        assert_eq!(settings.limits.glob_limit, 200);
        assert_eq!(settings.limits.find_references_limit, 100);
    }

    #[test]
    fn load_from_toml_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("codescribe.toml");
        fs::write(
            &config_path,
            r#"
[indexing]
excluded_dirs = ["fixtures"]

[limits]
find_symbols_limit = 10
"#,
        )
        .unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.indexing.excluded_dirs, vec!["fixtures".to_string()]);
        assert_eq!(settings.limits.find_symbols_limit, 10);
        assert_eq!(settings.limits.glob_limit, 200);
    }

    #[test]
    fn save_then_load_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("codescribe.toml");

        let mut settings = Settings::default();
        settings.limits.find_symbols_limit = 25;
        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.limits.find_symbols_limit, 25);
    }
}
