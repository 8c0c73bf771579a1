//! Download pipeline: fetch, normalize, assemble, write.
//!
//! Each dataset runs as one sequential task. Nothing is written until the
//! fetch has fully succeeded, so a network or decode failure leaves the
//! output directory untouched.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::config::ConfigFile;
use crate::normalize::Normalizer;
use crate::output::{write_gpx, OutputError};
use crate::provider::{HttpClient, ProviderError, RestrictionSource, SpeedControlSource};
use crate::track::{assemble_restrictions, assemble_speed_control, Track};

/// Download errors.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Fetching from the remote service failed
    #[error("Failed to fetch {dataset}: {source}")]
    Fetch {
        dataset: Dataset,
        #[source]
        source: ProviderError,
    },

    /// Writing the GPX file failed
    #[error("Failed to write {dataset}: {source}")]
    Output {
        dataset: Dataset,
        #[source]
        source: OutputError,
    },
}

/// The datasets this tool can download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Restrictions,
    SpeedControl,
}

impl Dataset {
    pub const ALL: [Dataset; 2] = [Dataset::Restrictions, Dataset::SpeedControl];

    pub fn file_name(&self) -> &'static str {
        match self {
            Dataset::Restrictions => "lt-road-restrictions.gpx",
            Dataset::SpeedControl => "lt-speed-control.gpx",
        }
    }

    /// GPX document name.
    pub fn title(&self) -> &'static str {
        match self {
            Dataset::Restrictions => "Lithuanian Road Restrictions",
            Dataset::SpeedControl => "Lithuanian Speed Control Sections",
        }
    }

    pub fn output_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.file_name())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Restrictions => write!(f, "road restrictions"),
            Dataset::SpeedControl => write!(f, "speed control sections"),
        }
    }
}

/// Result of one dataset download.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadReport {
    pub dataset: Dataset,
    pub path: PathBuf,
    pub tracks: usize,
    pub points: usize,
}

/// Runs the pipeline for either dataset over one HTTP client.
pub struct Downloader<C: HttpClient> {
    http_client: C,
    normalizer: Normalizer,
    restrictions_url: String,
    speed_control_url: String,
    page_size: Option<usize>,
}

impl<C: HttpClient> Downloader<C> {
    /// Creates a downloader for the public endpoints.
    pub fn new(http_client: C) -> Self {
        Self::from_config(http_client, &ConfigFile::default())
    }

    pub fn from_config(http_client: C, config: &ConfigFile) -> Self {
        Self {
            http_client,
            normalizer: Normalizer::default(),
            restrictions_url: config.endpoints.restrictions_url.clone(),
            speed_control_url: config.endpoints.speed_control_url.clone(),
            page_size: config.download.page_size,
        }
    }

    pub fn with_normalizer(mut self, normalizer: Normalizer) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Uses a fixed page size instead of asking the server.
    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn restrictions_tracks(&self) -> Result<Vec<Track>, ProviderError> {
        let source = RestrictionSource::with_url(&self.http_client, self.restrictions_url.as_str());
        let layers = source.fetch()?;
        Ok(assemble_restrictions(&layers, &self.normalizer))
    }

    pub fn speed_control_tracks(&self) -> Result<Vec<Track>, ProviderError> {
        let source =
            SpeedControlSource::with_layer_url(&self.http_client, self.speed_control_url.as_str());
        let features = match self.page_size {
            Some(page_size) => source.fetch_all_with_page_size(page_size)?,
            None => source.fetch_all()?,
        };
        Ok(assemble_speed_control(&features, &self.normalizer))
    }

    pub fn tracks(&self, dataset: Dataset) -> Result<Vec<Track>, DownloadError> {
        let result = match dataset {
            Dataset::Restrictions => self.restrictions_tracks(),
            Dataset::SpeedControl => self.speed_control_tracks(),
        };
        result.map_err(|source| DownloadError::Fetch { dataset, source })
    }

    /// Downloads `dataset` and writes it to `output_dir`.
    pub fn download(&self, dataset: Dataset, output_dir: &Path) -> Result<DownloadReport, DownloadError> {
        let path = dataset.output_path(output_dir);
        info!(%dataset, path = %path.display(), "Downloading");

        let tracks = self.tracks(dataset)?;
        write_gpx(&path, dataset.title(), &tracks)
            .map_err(|source| DownloadError::Output { dataset, source })?;

        let report = DownloadReport {
            dataset,
            path,
            tracks: tracks.len(),
            points: tracks.iter().map(Track::point_count).sum(),
        };
        info!(%dataset, tracks = report.tracks, points = report.points, "Download complete");
        Ok(report)
    }
}
