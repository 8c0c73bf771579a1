//! ArcGIS MapServer speed control source.
//!
//! Average-speed enforcement sections are published as a polyline layer on
//! the Lithuanian road administration's ArcGIS server.
//!
//! # Endpoints
//!
//! - `{layer}?f=json` - layer metadata, including `maxRecordCount`
//! - `{layer}/query?...&resultOffset=N&resultRecordCount=M` - one page
//!
//! Pages are requested strictly in order. The offset advances by the number
//! of features the previous page actually returned, and paging stops only
//! when the server no longer sets `exceededTransferLimit`. A short page is
//! not treated as the last one.

use serde::Deserialize;
use tracing::{debug, info};

use crate::feature::RawFeature;
use crate::provider::{HttpClient, ProviderError};

/// Public speed control layer.
pub const DEFAULT_ARCGIS_LAYER_URL: &str =
    "https://gis.ktvis.lt/arcgis/rest/services/PUB/PUB_ITS/MapServer/13";

/// Page size used when the layer metadata does not report one.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

/// Spatial reference requested for output geometry (LKS-94).
const LKS94_WKID: u32 = 3346;

/// One page of query results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub features: Vec<RawFeature>,
    /// Server-reported continuation flag (`exceededTransferLimit`).
    pub has_more: bool,
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceInfo {
    #[serde(default)]
    max_record_count: Option<i64>,
    #[serde(default)]
    error: Option<ServiceError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct QueryResponse {
    #[serde(default)]
    features: Vec<RawFeature>,
    #[serde(default)]
    exceeded_transfer_limit: bool,
    #[serde(default)]
    error: Option<ServiceError>,
}

/// Paginated reader for the speed control layer.
pub struct SpeedControlSource<C: HttpClient> {
    http_client: C,
    layer_url: String,
}

impl<C: HttpClient> SpeedControlSource<C> {
    /// Creates a source for the default public layer.
    pub fn new(http_client: C) -> Self {
        Self::with_layer_url(http_client, DEFAULT_ARCGIS_LAYER_URL)
    }

    /// Creates a source for a specific MapServer layer URL.
    pub fn with_layer_url(http_client: C, layer_url: impl Into<String>) -> Self {
        let layer_url = layer_url.into().trim_end_matches('/').to_string();
        Self {
            http_client,
            layer_url,
        }
    }

    fn metadata_url(&self) -> String {
        format!("{}?f=json", self.layer_url)
    }

    fn query_url(&self, offset: usize, limit: usize) -> String {
        format!(
            "{}/query?where=1%3D1&outFields=*&returnGeometry=true&f=json&resultOffset={}&resultRecordCount={}&outSR={}",
            self.layer_url, offset, limit, LKS94_WKID
        )
    }

    /// Reads the server's maximum page size from the layer metadata.
    ///
    /// Falls back to [`DEFAULT_PAGE_SIZE`] when the value is missing or not
    /// positive.
    pub fn max_record_count(&self) -> Result<usize, ProviderError> {
        let url = self.metadata_url();
        let body = self.http_client.get(&url)?;
        let info: ServiceInfo =
            serde_json::from_slice(&body).map_err(|e| ProviderError::decode(&url, e))?;

        if let Some(err) = info.error {
            return Err(service_error(&url, err));
        }

        let page_size = match info.max_record_count {
            Some(n) if n > 0 => n as usize,
            _ => DEFAULT_PAGE_SIZE,
        };
        debug!(page_size, "Speed control layer metadata");
        Ok(page_size)
    }

    /// Fetches one page starting at `offset`.
    pub fn fetch_page(&self, offset: usize, limit: usize) -> Result<Page, ProviderError> {
        let url = self.query_url(offset, limit);
        let body = self.http_client.get(&url)?;
        let response: QueryResponse =
            serde_json::from_slice(&body).map_err(|e| ProviderError::decode(&url, e))?;

        if let Some(err) = response.error {
            return Err(service_error(&url, err));
        }

        debug!(
            offset,
            limit,
            returned = response.features.len(),
            has_more = response.exceeded_transfer_limit,
            "Fetched speed control page"
        );

        Ok(Page {
            features: response.features,
            has_more: response.exceeded_transfer_limit,
        })
    }

    /// Fetches every feature, discovering the page size from metadata.
    pub fn fetch_all(&self) -> Result<Vec<RawFeature>, ProviderError> {
        let page_size = self.max_record_count()?;
        self.fetch_all_with_page_size(page_size)
    }

    /// Fetches every feature using the given page size.
    ///
    /// Any failing page aborts the whole fetch; no partial result is
    /// returned.
    pub fn fetch_all_with_page_size(
        &self,
        page_size: usize,
    ) -> Result<Vec<RawFeature>, ProviderError> {
        let page_size = if page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size
        };

        let mut all = Vec::new();
        let mut offset = 0;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(offset, page_size)?;
            pages += 1;
            let returned = page.features.len();
            all.extend(page.features);

            if !page.has_more {
                break;
            }

            if returned == 0 {
                return Err(ProviderError::InvalidResponse(format!(
                    "server reported more records after offset {} but returned none",
                    offset
                )));
            }

            offset += returned;
        }

        info!(features = all.len(), pages, "Fetched speed control sections");
        Ok(all)
    }
}

fn service_error(url: &str, err: ServiceError) -> ProviderError {
    ProviderError::Service {
        url: url.to_string(),
        code: err.code,
        message: err.message,
    }
}
