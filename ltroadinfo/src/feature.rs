//! Raw feature records as decoded from the remote services.
//!
//! Geometry arrives in three shapes: a GeoJSON `LineString`, a GeoJSON
//! `MultiLineString`, or an Esri `{"paths": [...]}` polyline. Decoding
//! picks the shape once, here, and the rest of the pipeline matches on
//! [`Geometry`].
//!
//! Lines and positions are decoded leniently: a malformed line becomes an
//! empty [`Line`] and a malformed entry becomes a [`Position`] that the
//! normalizer later drops, instead of failing the whole page.

use serde::de::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// One coordinate entry, components in source order.
///
/// Non-numeric components decode as `NaN`; a non-array entry decodes as
/// an empty position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Position(pub Vec<f64>);

impl Position {
    /// Returns `(x, y)` when the entry has at least two finite components.
    #[inline]
    pub fn xy(&self) -> Option<(f64, f64)> {
        match self.0.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Some((*x, *y)),
            _ => None,
        }
    }
}

impl From<Vec<f64>> for Position {
    fn from(components: Vec<f64>) -> Self {
        Position(components)
    }
}

impl Position {
    fn from_json(value: &Value) -> Self {
        let components = match value {
            Value::Array(items) => items
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN))
                .collect(),
            _ => Vec::new(),
        };
        Position(components)
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Position::from_json(&value))
    }
}

/// An ordered run of positions.
pub type Line = Vec<Position>;

/// Feature geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    /// A single line (GeoJSON `LineString`).
    FlatLine(Line),
    /// Several lines (GeoJSON `MultiLineString`).
    MultiLine(Vec<Line>),
    /// Esri polyline `paths`.
    PathArray(Vec<Line>),
}

impl Geometry {
    /// Geometry with no lines.
    pub fn empty() -> Self {
        Geometry::PathArray(Vec::new())
    }

    /// Lines in source order. A flat line yields itself as the single line.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        let lines: &[Line] = match self {
            Geometry::FlatLine(line) => std::slice::from_ref(line),
            Geometry::MultiLine(lines) | Geometry::PathArray(lines) => lines,
        };
        lines.iter()
    }

    pub fn position_count(&self) -> usize {
        self.lines().map(Vec::len).sum()
    }

    /// Decodes geometry from a JSON object.
    ///
    /// Unknown or malformed shapes decode to [`Geometry::empty`].
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Geometry::empty();
        };

        if let Some(paths) = object.get("paths") {
            return Geometry::PathArray(decode_lines(paths));
        }

        let coordinates = object.get("coordinates").unwrap_or(&Value::Null);
        match object.get("type").and_then(Value::as_str) {
            Some("LineString") => Geometry::FlatLine(decode_line(coordinates)),
            Some("MultiLineString") => Geometry::MultiLine(decode_lines(coordinates)),
            _ => Geometry::empty(),
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry::empty()
    }
}

impl<'de> Deserialize<'de> for Geometry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Geometry::from_json(&value))
    }
}

/// A non-array value decodes as an empty line.
fn decode_line(value: &Value) -> Line {
    match value {
        Value::Array(items) => items.iter().map(Position::from_json).collect(),
        _ => Line::new(),
    }
}

/// Lines decode independently of each other.
fn decode_lines(value: &Value) -> Vec<Line> {
    match value {
        Value::Array(items) => items.iter().map(decode_line).collect(),
        _ => Vec::new(),
    }
}

/// Feature attribute map with typed, optional lookups.
///
/// `null` or any non-object value decodes as an empty map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes(Map<String, Value>);

impl<'de> Deserialize<'de> for Attributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Attributes(map)),
            _ => Ok(Attributes::default()),
        }
    }
}

impl Attributes {
    pub fn new(map: Map<String, Value>) -> Self {
        Attributes(map)
    }

    /// Non-empty string value for `key`.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Any non-null scalar rendered for display. Strings render without
    /// quotes, integral numbers without a fractional part.
    pub fn display(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::Null | Value::Array(_) | Value::Object(_) => None,
            Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A decoded feature: attributes plus geometry.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize)]
pub struct RawFeature {
    #[serde(default, alias = "properties")]
    pub attributes: Attributes,
    #[serde(default)]
    pub geometry: Geometry,
}

impl RawFeature {
    pub fn new(attributes: Attributes, geometry: Geometry) -> Self {
        Self {
            attributes,
            geometry,
        }
    }
}
