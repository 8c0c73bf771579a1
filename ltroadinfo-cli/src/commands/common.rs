//! Common types and utilities shared across CLI commands.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use ltroadinfo::config::ConfigFile;
use ltroadinfo::provider::ReqwestClient;
use ltroadinfo::Dataset;

use crate::error::CliError;

/// Dataset selection for CLI arguments.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum DataType {
    /// Road restrictions and speed control sections
    All,
    /// Road restrictions from eismoinfo.lt
    Restrictions,
    /// Average speed control sections from ArcGIS
    SpeedControl,
}

impl DataType {
    pub fn datasets(self) -> Vec<Dataset> {
        match self {
            DataType::All => Dataset::ALL.to_vec(),
            DataType::Restrictions => vec![Dataset::Restrictions],
            DataType::SpeedControl => vec![Dataset::SpeedControl],
        }
    }
}

/// Load configuration from `--config` or the default location.
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    let config = match path {
        Some(path) => ConfigFile::load_from(path)?,
        None => ConfigFile::load()?,
    };
    Ok(config)
}

/// CLI value takes precedence over the config file.
pub fn resolve_output_dir(cli_output: Option<PathBuf>, config: &ConfigFile) -> PathBuf {
    cli_output.unwrap_or_else(|| config.output.directory.clone())
}

/// Create the HTTP client using the configured timeout.
pub fn create_client(config: &ConfigFile) -> Result<ReqwestClient, CliError> {
    ReqwestClient::with_timeout(config.download.timeout_secs).map_err(CliError::HttpClient)
}

/// Ensure the output directory exists.
pub fn ensure_dir(path: &Path) -> Result<(), CliError> {
    std::fs::create_dir_all(path).map_err(|error| CliError::OutputDir {
        path: path.display().to_string(),
        error,
    })
}
