//! Remote feature sources
//!
//! This module provides the HTTP abstraction and the two data sources the
//! tool reads from:
//!
//! - [`RestrictionSource`] - eismoinfo.lt road restrictions, one request
//! - [`SpeedControlSource`] - ArcGIS speed control sections, paginated
//!
//! ```ignore
//! use ltroadinfo::provider::{ReqwestClient, SpeedControlSource};
//!
//! let http_client = ReqwestClient::new()?;
//! let features = SpeedControlSource::new(&http_client).fetch_all()?;
//! ```

pub mod arcgis;
pub mod eismoinfo;
mod http;
mod types;

pub use arcgis::{Page, SpeedControlSource, DEFAULT_ARCGIS_LAYER_URL, DEFAULT_PAGE_SIZE};
pub use eismoinfo::{
    EalFeature, EalLayer, EalRestriction, RestrictionSource, DEFAULT_RESTRICTIONS_URL,
};
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};
pub use types::ProviderError;

#[cfg(test)]
pub use http::tests::MockHttpClient;
