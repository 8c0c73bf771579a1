//! lt-road-info CLI - Command-line interface
//!
//! Downloads Lithuanian road restrictions and speed control sections and
//! writes them as GPX files for navigation apps.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ltroadinfo::logging::init_logging;

use commands::common::{load_config, DataType};
use commands::download::DownloadArgs;
use commands::verify::VerifyArgs;
use error::CliError;

#[derive(Parser)]
#[command(name = "lt-road-info")]
#[command(version)]
#[command(about = "Lithuanian road information GPX downloader", long_about = None)]
#[command(after_help = "Examples:\n  \
    lt-road-info download\n  \
    lt-road-info download --type restrictions\n  \
    lt-road-info download --output /path/to/gpx --verbose\n  \
    lt-road-info convert --easting 581234 --northing 6095678")]
struct Cli {
    /// Configuration file (default: ~/.lt-road-info/config.ini)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Download datasets and write GPX files (default)
    Download {
        /// Output directory for GPX files
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Type of data to download
        #[arg(short = 't', long = "type", value_enum, default_value = "all")]
        data_type: DataType,

        /// Fixed page size for speed control queries (default: server maximum)
        #[arg(long)]
        page_size: Option<usize>,

        /// HTTP timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Verify that produced coordinates lie in Lithuania
    Verify {
        /// Directory with existing GPX files (default: download fresh copies)
        #[arg(long)]
        dir: Option<PathBuf>,

        /// Type of data to verify
        #[arg(short = 't', long = "type", value_enum, default_value = "all")]
        data_type: DataType,
    },

    /// Convert one LKS-94 coordinate to WGS-84 latitude/longitude
    Convert {
        /// LKS-94 easting (X) in meters
        #[arg(long, allow_negative_numbers = true)]
        easting: f64,

        /// LKS-94 northing (Y) in meters
        #[arg(long, allow_negative_numbers = true)]
        northing: f64,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        e.exit();
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let _logging = init_logging(cli.verbose, cli.log_file.as_deref())
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    let config = load_config(cli.config.as_deref())?;

    let command = cli.command.unwrap_or(Commands::Download {
        output: None,
        data_type: DataType::All,
        page_size: None,
        timeout: None,
    });

    match command {
        Commands::Download {
            output,
            data_type,
            page_size,
            timeout,
        } => commands::download::run(
            DownloadArgs {
                output,
                data_type,
                page_size,
                timeout,
            },
            config,
        ),
        Commands::Verify { dir, data_type } => {
            commands::verify::run(VerifyArgs { dir, data_type }, config)
        }
        Commands::Convert { easting, northing } => commands::convert::run(easting, northing),
    }
}
