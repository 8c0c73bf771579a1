//! Configuration for lt-road-info.
//!
//! Settings live in `~/.lt-road-info/config.ini`:
//!
//! ```ini
//! [endpoints]
//! restrictions_url = https://eismoinfo.lt/eismoinfo-backend/layer-dynamic-features/EAL?lks=true
//! speed_control_url = https://gis.ktvis.lt/arcgis/rest/services/PUB/PUB_ITS/MapServer/13
//!
//! [download]
//! timeout = 30
//! page_size =
//!
//! [output]
//! directory = .
//! ```
//!
//! A missing file means defaults. Command-line flags override file values.

mod file;
mod parser;
mod settings;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ConfigFile, DownloadSettings, EndpointSettings, OutputSettings};
