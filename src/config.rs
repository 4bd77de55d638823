// src/config.rs
//! Layered runtime settings: an optional TOML file plus environment
//! overrides. Everything has a built-in default; a missing config file is not
//! an error, a present-but-broken one is.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::network::TrainOptions;

// --- env defaults & names ---
pub const ENV_CONFIG_PATH: &str = "WASTE_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "config/waste.toml";

pub const ENV_DATA_DIR: &str = "WASTE_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

pub const ENV_PORT: &str = "PORT";
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone)]
pub struct Settings {
    pub port: u16,
    pub data_dir: PathBuf,
    pub static_dir: Option<PathBuf>,
    pub training: TrainOptions,
}

/* ----------------------------
Config schema (from TOML)
---------------------------- */

#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    data: DataSection,
    #[serde(default)]
    training: Option<TrainOptions>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ServerSection {
    port: Option<u16>,
    static_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DataSection {
    dir: Option<PathBuf>,
}

impl Settings {
    /// Resolution order per field: environment, then config file, then the
    /// built-in default.
    pub fn load() -> Result<Self> {
        let file = match config_path() {
            Some(path) => read_file(&path)?,
            None => FileConfig::default(),
        };

        let port = std::env::var(ENV_PORT)
            .ok()
            .and_then(|s| s.trim().parse::<u16>().ok())
            .or(file.server.port)
            .unwrap_or(DEFAULT_PORT);

        let data_dir = std::env::var(ENV_DATA_DIR)
            .ok()
            .map(PathBuf::from)
            .or(file.data.dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Ok(Self {
            port,
            data_dir,
            static_dir: file.server.static_dir,
            training: file.training.unwrap_or_default(),
        })
    }
}

/// $WASTE_CONFIG_PATH always wins; the default path only counts if present.
fn config_path() -> Option<PathBuf> {
    if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(p));
    }
    let fallback = PathBuf::from(DEFAULT_CONFIG_PATH);
    fallback.exists().then_some(fallback)
}

fn read_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parsing config from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use std::{env, fs};

    fn clear_env() {
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_DATA_DIR);
        env::remove_var(ENV_PORT);
    }

    #[serial_test::serial]
    #[test]
    fn defaults_apply_without_file_or_env() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let old = env::current_dir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();

        let settings = Settings::load().unwrap();
        assert_eq!(settings.port, DEFAULT_PORT);
        assert_eq!(settings.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
        assert!(settings.static_dir.is_none());
        assert_eq!(settings.training.iterations, 20_000);

        env::set_current_dir(&old).unwrap();
    }

    #[serial_test::serial]
    #[test]
    fn file_values_fill_in_and_env_wins() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("waste.toml");
        let mut f = fs::File::create(&path).unwrap();
        write!(
            f,
            "[server]\nport = 8080\n\n[data]\ndir = \"fixtures\"\n\n[training]\niterations = 500\nseed = 42\n"
        )
        .unwrap();

        env::set_var(ENV_CONFIG_PATH, path.display().to_string());
        let settings = Settings::load().unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.data_dir, PathBuf::from("fixtures"));
        assert_eq!(settings.training.iterations, 500);
        assert_eq!(settings.training.seed, Some(42));
        // Partial [training] sections keep defaults for the rest.
        assert_eq!(settings.training.learning_rate, 0.01);

        env::set_var(ENV_PORT, "9090");
        env::set_var(ENV_DATA_DIR, "elsewhere");
        let settings = Settings::load().unwrap();
        assert_eq!(settings.port, 9090);
        assert_eq!(settings.data_dir, PathBuf::from("elsewhere"));

        clear_env();
    }

    #[serial_test::serial]
    #[test]
    fn broken_config_file_is_an_error() {
        clear_env();
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("waste.toml");
        fs::write(&path, "this is not toml [").unwrap();

        env::set_var(ENV_CONFIG_PATH, path.display().to_string());
        assert!(Settings::load().is_err());
        clear_env();
    }
}
