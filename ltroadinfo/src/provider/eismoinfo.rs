//! eismoinfo.lt road restriction source (EAL layer).
//!
//! The endpoint returns a JSON array of layers. Each layer holds named
//! features, and each feature holds zero or more restriction entries with
//! their own polyline geometry and sign icon. Requesting `lks=true` makes
//! the service return LKS-94 grid coordinates.
//!
//! There is no pagination; the whole dataset comes back in one response.
//! Descriptive text may be served in a legacy Baltic code page, so the body
//! is read through [`HttpClient::get_text`], which decodes by the response
//! charset.

use serde::Deserialize;
use tracing::info;

use crate::feature::Geometry;
use crate::provider::{HttpClient, ProviderError};

/// Public EAL restrictions endpoint.
pub const DEFAULT_RESTRICTIONS_URL: &str =
    "https://eismoinfo.lt/eismoinfo-backend/layer-dynamic-features/EAL?lks=true";

/// A layer from the EAL response.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EalLayer {
    #[serde(default, deserialize_with = "string_or_number")]
    pub layer: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub features: Vec<EalFeature>,
}

/// A road section carrying one or more restrictions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EalFeature {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub details: bool,
    #[serde(default, deserialize_with = "string_or_number")]
    pub icon: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub restrictions: Vec<EalRestriction>,
}

/// One restriction entry within a feature.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EalRestriction {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: String,
    /// Road sign code, e.g. `"76"`.
    #[serde(default, deserialize_with = "string_or_number")]
    pub icon: String,
    /// Sign value, e.g. a speed or weight limit. Zero when not applicable.
    #[serde(default, deserialize_with = "number_or_numeric_string")]
    pub icon_value: Option<f64>,
    /// Esri `{"paths": ...}` polyline.
    #[serde(default)]
    pub lines: Geometry,
}

impl EalRestriction {
    /// Sign value if one applies.
    pub fn value(&self) -> Option<f64> {
        self.icon_value.filter(|v| v.is_finite() && *v > 0.0)
    }
}

/// Accepts `"76"`, `76` or `null` for identifier-like and text fields.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

/// Accepts `50`, `"50"` or `null`. Anything unparsable is absent.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// `null` decodes as the type's default.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reader for the EAL restrictions endpoint.
pub struct RestrictionSource<C: HttpClient> {
    http_client: C,
    url: String,
}

impl<C: HttpClient> RestrictionSource<C> {
    pub fn new(http_client: C) -> Self {
        Self::with_url(http_client, DEFAULT_RESTRICTIONS_URL)
    }

    pub fn with_url(http_client: C, url: impl Into<String>) -> Self {
        Self {
            http_client,
            url: url.into(),
        }
    }

    /// Fetches and decodes all layers.
    pub fn fetch(&self) -> Result<Vec<EalLayer>, ProviderError> {
        let body = self.http_client.get_text(&self.url)?;
        let layers: Vec<EalLayer> =
            serde_json::from_str(&body).map_err(|e| ProviderError::decode(&self.url, e))?;

        let restrictions: usize = layers
            .iter()
            .flat_map(|l| &l.features)
            .map(|f| f.restrictions.len())
            .sum();
        info!(layers = layers.len(), restrictions, "Fetched road restrictions");

        Ok(layers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockHttpClient;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!([{
            "layer": "EAL",
            "name": "Eismo apribojimai",
            "features": [{
                "id": "f-1",
                "name": "Vilnius–Kaunas",
                "details": true,
                "icon": "road",
                "points": [{"min": 0, "max": 10, "point": [581234.0, 6095678.0]}],
                "restrictions": [
                    {
                        "id": "r-1",
                        "icon": "76",
                        "iconValue": 50,
                        "lines": {"paths": [[[581234.0, 6095678.0], [581300.0, 6095700.0]]]}
                    },
                    {
                        "id": 2,
                        "icon": 3,
                        "iconValue": null,
                        "lines": {"paths": []}
                    }
                ]
            }]
        }])
    }

    #[test]
    fn test_fetch_decodes_layers() {
        let mock = MockHttpClient::new();
        mock.push_json(sample());
        let source = RestrictionSource::with_url(&mock, "https://example.com/EAL");

        let layers = source.fetch().unwrap();

        assert_eq!(mock.requests(), vec!["https://example.com/EAL".to_string()]);
        assert_eq!(layers.len(), 1);
        let feature = &layers[0].features[0];
        assert_eq!(feature.name, "Vilnius–Kaunas");
        assert_eq!(feature.restrictions.len(), 2);

        let first = &feature.restrictions[0];
        assert_eq!(first.icon, "76");
        assert_eq!(first.value(), Some(50.0));
        assert_eq!(first.lines.position_count(), 2);

        let second = &feature.restrictions[1];
        assert_eq!(second.id, "2");
        assert_eq!(second.icon, "3");
        assert_eq!(second.value(), None);
    }

    #[test]
    fn test_fetch_propagates_transport_error() {
        let mock = MockHttpClient::new();
        mock.push_error(ProviderError::Http("timed out".to_string()));
        let source = RestrictionSource::new(&mock);

        assert!(matches!(source.fetch(), Err(ProviderError::Http(_))));
    }

    #[test]
    fn test_fetch_rejects_non_array() {
        let mock = MockHttpClient::new();
        mock.push_json(json!({"features": []}));
        let source = RestrictionSource::new(&mock);

        assert!(matches!(source.fetch(), Err(ProviderError::Decode { .. })));
    }

    #[test]
    fn test_numeric_string_icon_value() {
        let restriction: EalRestriction = serde_json::from_value(json!({
            "icon": "76",
            "iconValue": " 50 ",
            "lines": {"paths": []}
        }))
        .unwrap();
        assert_eq!(restriction.value(), Some(50.0));

        let garbled: EalRestriction =
            serde_json::from_value(json!({"icon": "76", "iconValue": "n/a"})).unwrap();
        assert_eq!(garbled.value(), None);
    }

    #[test]
    fn test_null_fields_decode_as_defaults() {
        let mock = MockHttpClient::new();
        mock.push_json(json!([
            {"layer": null, "name": null, "features": null},
            {
                "name": "EAL",
                "features": [
                    {"id": null, "name": null, "details": null, "icon": null, "restrictions": null},
                    {
                        "name": "A1",
                        "restrictions": [{"id": null, "icon": null, "iconValue": null, "lines": null}]
                    }
                ]
            }
        ]));
        let source = RestrictionSource::new(&mock);

        let layers = source.fetch().unwrap();

        assert_eq!(layers.len(), 2);
        assert!(layers[0].features.is_empty());
        assert_eq!(layers[0].name, "");
        let features = &layers[1].features;
        assert_eq!(features[0], EalFeature::default());
        let restriction = &features[1].restrictions[0];
        assert_eq!(restriction.icon, "");
        assert_eq!(restriction.value(), None);
        assert_eq!(restriction.lines, Geometry::empty());
    }

    #[test]
    fn test_zero_value_is_absent() {
        let restriction = EalRestriction {
            icon_value: Some(0.0),
            ..Default::default()
        };
        assert_eq!(restriction.value(), None);
    }
}
