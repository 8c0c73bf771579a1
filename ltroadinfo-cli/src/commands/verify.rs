//! Verify command - check that produced coordinates lie in Lithuania.
//!
//! With `--dir`, existing GPX files in that directory are checked. Without
//! it, fresh copies are downloaded into a temporary directory first.

use std::path::PathBuf;

use ltroadinfo::config::ConfigFile;
use ltroadinfo::verify::verify_gpx_file;
use ltroadinfo::Downloader;

use super::common::{create_client, DataType};
use crate::error::CliError;

/// Arguments for the verify command.
pub struct VerifyArgs {
    pub dir: Option<PathBuf>,
    pub data_type: DataType,
}

/// Run the verify command.
pub fn run(args: VerifyArgs, config: ConfigFile) -> Result<(), CliError> {
    // Keeps the temporary directory alive until verification is done.
    let mut _tmp: Option<tempfile::TempDir> = None;
    let dir = match args.dir {
        Some(dir) => dir,
        None => {
            let tmp = tempfile::tempdir().map_err(|error| CliError::OutputDir {
                path: std::env::temp_dir().display().to_string(),
                error,
            })?;
            let path = tmp.path().to_path_buf();
            let downloader = Downloader::from_config(create_client(&config)?, &config);
            for dataset in args.data_type.datasets() {
                downloader.download(dataset, &path)?;
            }
            _tmp = Some(tmp);
            path
        }
    };

    let mut failures = Vec::new();
    for dataset in args.data_type.datasets() {
        let path = dataset.output_path(&dir);
        let report = verify_gpx_file(&path)?;

        println!("{}: {}", dataset, report);
        for sample in &report.samples {
            println!("  sample [{:.6}, {:.6}]", sample.lat, sample.lon);
        }
        for swapped in &report.swapped {
            println!("  swapped lat/lon at [{:.6}, {:.6}]", swapped.lat, swapped.lon);
        }

        if report.passed() {
            println!("  OK");
        } else {
            failures.push(format!("{} ({})", dataset, report));
        }
    }

    if failures.is_empty() {
        println!("All coordinates are in Lithuania");
        Ok(())
    } else {
        Err(CliError::VerificationFailed(failures.join("; ")))
    }
}
