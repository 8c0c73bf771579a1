//! lt-road-info - Lithuanian road information as GPX
//!
//! This library downloads road restrictions (eismoinfo.lt) and speed
//! control sections (ArcGIS), reprojects their LKS-94 grid coordinates to
//! WGS-84, and assembles them into named GPX tracks.
//!
//! The pipeline, leaf first:
//!
//! - [`transform`] - LKS-94 → WGS-84 datum transform, `(lat, lon)` output
//! - [`provider`] - HTTP boundary and the two remote sources
//! - [`feature`] - decoded feature records and geometry shapes
//! - [`normalize`] - geometry → transformed segments
//! - [`track`] - segments → named tracks
//! - [`output`] - tracks → GPX files
//! - [`download`] - the above, end to end
//! - [`verify`] - sanity check of produced coordinates

pub mod config;
pub mod download;
pub mod feature;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod provider;
pub mod track;
pub mod transform;
pub mod verify;

pub use download::{Dataset, DownloadError, DownloadReport, Downloader};
pub use transform::{DatumTransform, GeoCoord, GridCoord};
