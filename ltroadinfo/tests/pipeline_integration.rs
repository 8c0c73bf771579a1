//! Integration tests for the download pipeline.
//!
//! These tests drive the public API end to end against a scripted HTTP
//! client:
//! - restriction layers → one track per restriction → GPX file
//! - paginated speed control pages → numbered tracks → GPX file
//! - produced files pass the coordinate verification
//!
//! Run with: `cargo test --test pipeline_integration`

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::{json, Value};

use ltroadinfo::config::ConfigFile;
use ltroadinfo::provider::{HttpClient, ProviderError};
use ltroadinfo::verify::verify_gpx_file;
use ltroadinfo::{Dataset, DownloadError, Downloader};

// ============================================================================
// Helper Functions
// ============================================================================

const RESTRICTIONS_URL: &str = "http://test.local/EAL?lks=true";
const LAYER_URL: &str = "http://test.local/MapServer/13";

/// HTTP client answering from a URL → body table and logging every request.
#[derive(Default)]
struct ScriptedClient {
    routes: HashMap<String, Value>,
    log: Mutex<Vec<String>>,
}

impl ScriptedClient {
    fn route(mut self, url: impl Into<String>, body: Value) -> Self {
        self.routes.insert(url.into(), body);
        self
    }

    fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }
}

impl HttpClient for ScriptedClient {
    fn get(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        self.log.lock().unwrap().push(url.to_string());
        self.routes
            .get(url)
            .map(|body| body.to_string().into_bytes())
            .ok_or_else(|| ProviderError::Http(format!("HTTP 404 from {}", url)))
    }
}

fn config() -> ConfigFile {
    let mut config = ConfigFile::default();
    config.endpoints.restrictions_url = RESTRICTIONS_URL.to_string();
    config.endpoints.speed_control_url = LAYER_URL.to_string();
    config
}

fn page_url(offset: usize, limit: usize) -> String {
    format!(
        "{}/query?where=1%3D1&outFields=*&returnGeometry=true&f=json&resultOffset={}&resultRecordCount={}&outSR=3346",
        LAYER_URL, offset, limit
    )
}

fn section(road: &str, limit: u32, start_easting: f64) -> Value {
    json!({
        "attributes": {"road_number": road, "speed_limit": limit},
        "geometry": {"paths": [[
            [start_easting, 6_095_678.0],
            [start_easting + 500.0, 6_095_900.0],
            [start_easting + 1_000.0, 6_096_100.0]
        ]]}
    })
}

/// Vilnius-area restriction, as served by the EAL endpoint.
fn restriction_layers() -> Value {
    json!([{
        "layer": "EAL",
        "name": "Eismo apribojimai",
        "features": [
            {
                "id": "1",
                "name": "Test Restriction",
                "restrictions": [{
                    "id": "r1",
                    "icon": "76",
                    "iconValue": 50,
                    "lines": {"paths": [[
                        [581_234.0, 6_095_678.0],
                        [581_300.0, 6_095_700.0],
                        [581_400.0, 6_095_750.0]
                    ]]}
                }]
            },
            {
                "id": "2",
                "name": "Kaunas bypass",
                "restrictions": [
                    {"icon": "3", "lines": {"paths": [[[568_123.0, 6_062_456.0], [568_200.0]]]}},
                    {"icon": "4", "lines": {"paths": [[[0.0, 0.0]]]}}
                ]
            }
        ]
    }])
}

// ============================================================================
// Restrictions
// ============================================================================

#[test]
fn test_restrictions_end_to_end() {
    let client = ScriptedClient::default().route(RESTRICTIONS_URL, restriction_layers());
    let downloader = Downloader::from_config(&client, &config());

    let tracks = downloader.restrictions_tracks().unwrap();

    assert_eq!(tracks.len(), 2, "restriction outside the grid must be dropped");
    let first = &tracks[0];
    assert!(first.name.contains("Test Restriction"));
    assert!(first.name.contains("76"));
    assert!(first.name.contains("50"));
    assert_eq!(first.segments.len(), 1);
    assert_eq!(first.segments[0].len(), 3);

    let kaunas = tracks[1].segments[0].points()[0];
    assert!((kaunas.lat - 54.693908).abs() < 1e-4);
    assert!((kaunas.lon - 25.056723).abs() < 1e-4);
}

#[test]
fn test_restrictions_file_verifies() {
    let client = ScriptedClient::default().route(RESTRICTIONS_URL, restriction_layers());
    let dir = tempfile::tempdir().unwrap();

    let report = Downloader::from_config(&client, &config())
        .download(Dataset::Restrictions, dir.path())
        .unwrap();

    assert_eq!(report.path, dir.path().join("lt-road-restrictions.gpx"));
    let verification = verify_gpx_file(&report.path).unwrap();
    assert!(verification.passed(), "{}", verification);
    assert_eq!(verification.total, 4);
}

// ============================================================================
// Speed control
// ============================================================================

#[test]
fn test_speed_control_paginates_until_flag_clears() {
    let client = ScriptedClient::default()
        .route(format!("{}?f=json", LAYER_URL), json!({"maxRecordCount": 2}))
        .route(
            page_url(0, 2),
            json!({
                "features": [section("A1", 110, 500_000.0), section("A2", 90, 510_000.0)],
                "exceededTransferLimit": true
            }),
        )
        .route(
            page_url(2, 2),
            json!({
                "features": [section("A3", 70, 520_000.0)],
                "exceededTransferLimit": false
            }),
        );

    let tracks = Downloader::from_config(&client, &config())
        .speed_control_tracks()
        .unwrap();

    let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "Speed Control Section 1 - Road A1 - Speed limit: 110 km/h",
            "Speed Control Section 2 - Road A2 - Speed limit: 90 km/h",
            "Speed Control Section 3 - Road A3 - Speed limit: 70 km/h",
        ]
    );
    assert_eq!(client.requests().len(), 3);
}

#[test]
fn test_speed_control_missing_page_aborts_without_file() {
    let client = ScriptedClient::default()
        .route(format!("{}?f=json", LAYER_URL), json!({"maxRecordCount": 1}))
        .route(
            page_url(0, 1),
            json!({"features": [section("A1", 110, 500_000.0)], "exceededTransferLimit": true}),
        );
    let dir = tempfile::tempdir().unwrap();

    let err = Downloader::from_config(&client, &config())
        .download(Dataset::SpeedControl, dir.path())
        .unwrap_err();

    assert!(matches!(err, DownloadError::Fetch { .. }));
    assert!(err.to_string().contains("speed control sections"));
    assert!(!dir.path().join("lt-speed-control.gpx").exists());
}
