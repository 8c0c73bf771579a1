//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use ltroadinfo::config::ConfigFileError;
use ltroadinfo::provider::ProviderError;
use ltroadinfo::verify::VerifyError;
use ltroadinfo::DownloadError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration error
    Config(String),
    /// Failed to create HTTP client
    HttpClient(ProviderError),
    /// Failed to download a dataset
    Download(DownloadError),
    /// Failed to read a GPX file for verification
    Verify(VerifyError),
    /// Produced coordinates did not pass verification
    VerificationFailed(String),
    /// Failed to create output directory
    OutputDir { path: String, error: std::io::Error },
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Download(DownloadError::Fetch { .. }) => {
                eprintln!();
                eprintln!("No output file was written. Common issues:");
                eprintln!("  1. No network access to eismoinfo.lt or gis.ktvis.lt");
                eprintln!("  2. The service is temporarily unavailable; try again later");
                eprintln!("  3. A custom endpoint in config.ini is wrong");
            }
            CliError::VerificationFailed(_) => {
                eprintln!();
                eprintln!("Points outside Lithuania usually mean latitude and longitude");
                eprintln!("were swapped, or the server returned a different projection.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::HttpClient(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Download(e) => write!(f, "{}", e),
            CliError::Verify(e) => write!(f, "Verification error: {}", e),
            CliError::VerificationFailed(msg) => write!(f, "Verification failed: {}", msg),
            CliError::OutputDir { path, error } => {
                write!(f, "Failed to create output directory '{}': {}", path, error)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::HttpClient(e) => Some(e),
            CliError::Download(e) => Some(e),
            CliError::Verify(e) => Some(e),
            CliError::OutputDir { error, .. } => Some(error),
            _ => None,
        }
    }
}

impl From<DownloadError> for CliError {
    fn from(e: DownloadError) -> Self {
        CliError::Download(e)
    }
}

impl From<VerifyError> for CliError {
    fn from(e: VerifyError) -> Self {
        CliError::Verify(e)
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e.to_string())
    }
}
