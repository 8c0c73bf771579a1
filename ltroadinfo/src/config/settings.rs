//! Settings structs and their defaults.

use std::path::PathBuf;

use crate::provider::{DEFAULT_ARCGIS_LAYER_URL, DEFAULT_RESTRICTIONS_URL, DEFAULT_TIMEOUT_SECS};

/// Full configuration file contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub endpoints: EndpointSettings,
    pub download: DownloadSettings,
    pub output: OutputSettings,
}

/// `[endpoints]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct EndpointSettings {
    pub restrictions_url: String,
    pub speed_control_url: String,
}

impl Default for EndpointSettings {
    fn default() -> Self {
        Self {
            restrictions_url: DEFAULT_RESTRICTIONS_URL.to_string(),
            speed_control_url: DEFAULT_ARCGIS_LAYER_URL.to_string(),
        }
    }
}

/// `[download]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadSettings {
    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
    /// Fixed page size; `None` asks the server for its maximum
    pub page_size: Option<usize>,
}

impl Default for DownloadSettings {
    fn default() -> Self {
        Self {
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: None,
        }
    }
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSettings {
    pub directory: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
        }
    }
}
