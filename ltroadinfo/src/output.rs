//! GPX output.
//!
//! Serializes assembled tracks as a GPX 1.1 document. The document is
//! rendered in memory first and written through a temporary sibling file,
//! so a failed run never leaves a partial GPX behind.

use std::fs;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use gpx::{Gpx, GpxVersion, Metadata, TrackSegment, Waypoint};
use thiserror::Error;
use tracing::info;

use crate::track::Track;

/// Value of the GPX `creator` attribute.
pub const CREATOR: &str = "lt-road-info";

/// Output errors.
#[derive(Debug, Error)]
pub enum OutputError {
    /// GPX serialization or parsing failed
    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    /// Filesystem operation failed
    #[error("Failed to access '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OutputError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        OutputError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Builds the GPX document for `tracks`.
pub fn to_gpx(name: &str, tracks: &[Track]) -> Gpx {
    let metadata = Metadata {
        name: Some(name.to_string()),
        time: Some(time::OffsetDateTime::now_utc().into()),
        ..Default::default()
    };

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(CREATOR.to_string()),
        metadata: Some(metadata),
        tracks: tracks.iter().map(to_gpx_track).collect(),
        ..Default::default()
    }
}

fn to_gpx_track(track: &Track) -> gpx::Track {
    let mut gpx_track = gpx::Track::new();
    gpx_track.name = Some(track.name.clone());
    gpx_track.segments = track
        .segments
        .iter()
        .map(|segment| {
            let mut gpx_segment = TrackSegment::new();
            gpx_segment.points = segment
                .points()
                .iter()
                // geo points are (x = longitude, y = latitude)
                .map(|p| Waypoint::new(geo::Point::new(p.lon, p.lat)))
                .collect();
            gpx_segment
        })
        .collect();
    gpx_track
}

/// Renders the document to bytes.
pub fn render_gpx(name: &str, tracks: &[Track]) -> Result<Vec<u8>, OutputError> {
    let document = to_gpx(name, tracks);
    let mut buffer = Vec::new();
    gpx::write(&document, &mut buffer)?;
    Ok(buffer)
}

/// Writes `tracks` to `path` as GPX.
pub fn write_gpx(path: &Path, name: &str, tracks: &[Track]) -> Result<(), OutputError> {
    let bytes = render_gpx(name, tracks)?;

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    fs::write(&tmp_path, &bytes).map_err(|e| OutputError::io(&tmp_path, e))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(OutputError::io(path, e));
    }

    info!(path = %path.display(), tracks = tracks.len(), bytes = bytes.len(), "Wrote GPX file");
    Ok(())
}

/// Reads a GPX file.
pub fn read_gpx(path: &Path) -> Result<Gpx, OutputError> {
    let file = fs::File::open(path).map_err(|e| OutputError::io(path, e))?;
    Ok(gpx::read(BufReader::new(file))?)
}
