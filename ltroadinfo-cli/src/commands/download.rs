//! Download command - fetch datasets and write GPX files.

use std::path::PathBuf;

use ltroadinfo::config::ConfigFile;
use ltroadinfo::Downloader;
use tracing::info;

use super::common::{create_client, ensure_dir, resolve_output_dir, DataType};
use crate::error::CliError;

/// Arguments for the download command.
pub struct DownloadArgs {
    pub output: Option<PathBuf>,
    pub data_type: DataType,
    pub page_size: Option<usize>,
    pub timeout: Option<u64>,
}

/// Run the download command.
///
/// Datasets are downloaded one after another; the first failure stops the
/// run.
pub fn run(args: DownloadArgs, mut config: ConfigFile) -> Result<(), CliError> {
    if let Some(timeout) = args.timeout {
        config.download.timeout_secs = timeout;
    }
    if args.page_size.is_some() {
        config.download.page_size = args.page_size;
    }

    let output_dir = resolve_output_dir(args.output, &config);
    ensure_dir(&output_dir)?;

    let client = create_client(&config)?;
    let downloader = Downloader::from_config(client, &config);

    for dataset in args.data_type.datasets() {
        let report = downloader.download(dataset, &output_dir)?;
        info!(
            "Successfully downloaded {} to {} ({} tracks, {} points)",
            dataset,
            report.path.display(),
            report.tracks,
            report.points
        );
    }

    Ok(())
}
