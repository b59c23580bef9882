//! Mirror configuration management for `dirmirror.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── serve      # [serve]
//! │   ├── watch      # [watch]
//! │   └── mirror     # [mirror]
//! ├── error          # ConfigError
//! └── mod.rs         # MirrorConfig (this file)
//! ```
//!
//! The file is optional. Values come from defaults, then the file, then CLI
//! flags, in that order.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{MirrorSectionConfig, ServeConfig, WatchConfig};

use crate::cli::Cli;
use crate::utils::path::{file_name_of, normalize_path};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file looked up in the current directory when `-C` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "dirmirror.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing dirmirror.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MirrorConfig {
    /// Absolute path of the watched root (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Display name of the root directory (internal use only)
    #[serde(skip)]
    pub name: String,

    /// Config file that was loaded, if any (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Snapshot server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Event source settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Splice settings
    #[serde(default)]
    pub mirror: MirrorSectionConfig,
}

impl MirrorConfig {
    /// Load configuration from CLI arguments.
    pub fn load(cli: &Cli) -> Result<Self> {
        let config_path = Self::resolve_config_path(cli)?;

        let mut config = match &config_path {
            Some(path) => Self::from_path(path)?,
            None => Self::default(),
        };

        config.config_path = config_path;
        config.finalize(cli);
        config.validate()?;

        Ok(config)
    }

    /// Resolve the config file to read.
    ///
    /// An explicit `-C` path must exist; the default file is optional.
    fn resolve_config_path(cli: &Cli) -> Result<Option<PathBuf>> {
        match &cli.config {
            Some(path) if path.exists() => Ok(Some(normalize_path(path))),
            Some(path) => Err(ConfigError::Io(
                path.clone(),
                std::io::Error::new(std::io::ErrorKind::NotFound, "config file not found"),
            )
            .into()),
            None => {
                let cwd =
                    std::env::current_dir().context("Failed to get current working directory")?;
                let candidate = cwd.join(DEFAULT_CONFIG_FILE);
                Ok(candidate.exists().then_some(candidate))
            }
        }
    }

    /// Resolve root and name, then apply CLI overrides.
    fn finalize(&mut self, cli: &Cli) {
        crate::logger::set_verbose(cli.verbose);

        self.root = normalize_path(&cli.root);
        self.name = cli
            .name
            .clone()
            .unwrap_or_else(|| file_name_of(&self.root));

        Self::update_option(&mut self.serve.interface, cli.interface.as_ref());
        Self::update_option(&mut self.serve.port, cli.port.as_ref());
        Self::update_option(&mut self.watch.interval_ms, cli.interval.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::from)?;
        Ok(config)
    }

    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content).with_context(|| format!("in `{}`", path.display()))
    }

    /// Check values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.watch.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "watch.interval_ms must be greater than 0".into(),
            ));
        }
        if self.serve.io_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "serve.io_timeout_ms must be greater than 0".into(),
            ));
        }
        if self.name.contains('/') {
            return Err(ConfigError::Validation(format!(
                "root name `{}` must be a single path segment",
                self.name
            )));
        }
        Ok(())
    }

    /// Get the watched root path
    pub fn get_root(&self) -> &Path {
        &self.root
    }
}

/// Parse a config snippet in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> MirrorConfig {
    MirrorConfig::from_str(content).expect("valid test config")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["dirmirror"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_empty_config_is_default() {
        let config = test_parse_config("");
        assert_eq!(config.serve.port, 3600);
        assert_eq!(config.watch.interval_ms, 100);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(MirrorConfig::from_str("[serve\nport = 1").is_err());
    }

    #[test]
    fn test_load_with_explicit_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("m.toml");
        fs::write(&file, "[serve]\nport = 4100\n[watch]\ninterval_ms = 50\n").unwrap();
        let root = temp.path().to_str().unwrap();

        let config = MirrorConfig::load(&cli(&[root, "proj", "-C", file.to_str().unwrap()])).unwrap();

        assert_eq!(config.serve.port, 4100);
        assert_eq!(config.watch.interval_ms, 50);
        assert_eq!(config.name, "proj");
        assert_eq!(config.get_root(), normalize_path(temp.path()));
        assert!(config.config_path.is_some());
    }

    #[test]
    fn test_cli_overrides_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("m.toml");
        fs::write(&file, "[serve]\nport = 4100\n").unwrap();
        let root = temp.path().to_str().unwrap();

        let config = MirrorConfig::load(&cli(&[
            root,
            "-C",
            file.to_str().unwrap(),
            "-p",
            "4200",
            "--interval",
            "300",
        ]))
        .unwrap();

        assert_eq!(config.serve.port, 4200);
        assert_eq!(config.watch.interval_ms, 300);
    }

    #[test]
    fn test_name_defaults_to_root_segment() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("project");
        fs::create_dir(&root).unwrap();
        let file = temp.path().join("m.toml");
        fs::write(&file, "").unwrap();

        let config = MirrorConfig::load(&cli(&[
            root.to_str().unwrap(),
            "-C",
            file.to_str().unwrap(),
        ]))
        .unwrap();
        assert_eq!(config.name, "project");
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");
        let root = temp.path().to_str().unwrap();

        assert!(MirrorConfig::load(&cli(&[root, "-C", missing.to_str().unwrap()])).is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("m.toml");
        fs::write(&file, "").unwrap();
        let root = temp.path().to_str().unwrap();

        let err = MirrorConfig::load(&cli(&[
            root,
            "-C",
            file.to_str().unwrap(),
            "--interval",
            "0",
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("interval_ms"));
    }

    #[test]
    fn test_zero_io_timeout_rejected() {
        let mut config = test_parse_config("[serve]\nio_timeout_ms = 0");
        config.name = "r".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("io_timeout_ms"));
    }
}
