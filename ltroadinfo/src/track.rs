//! Track assembly.
//!
//! Groups normalized segments into named tracks. Names come from feature
//! attributes on a best-effort basis: every lookup is optional and a
//! missing attribute only shortens the name.

use tracing::debug;

use crate::feature::{Attributes, RawFeature};
use crate::normalize::{Normalizer, Segment};
use crate::provider::{EalLayer, EalRestriction};

/// Attribute keys on speed control features.
pub mod keys {
    pub const ROAD_NAME: &str = "road_name";
    pub const ROAD_NUMBER: &str = "road_number";
    pub const SPEED_LIMIT: &str = "speed_limit";
}

/// A named track with at least one non-empty segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub segments: Vec<Segment>,
}

impl Track {
    /// Returns `None` when there are no segments.
    pub fn new(name: impl Into<String>, segments: Vec<Segment>) -> Option<Self> {
        if segments.is_empty() {
            None
        } else {
            Some(Self {
                name: name.into(),
                segments,
            })
        }
    }

    pub fn point_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }
}

/// Builds tracks from labelled segment groups, skipping groups with no
/// segments. Input order is kept.
pub fn assemble<I>(groups: I) -> Vec<Track>
where
    I: IntoIterator<Item = (String, Vec<Segment>)>,
{
    groups
        .into_iter()
        .filter_map(|(name, segments)| Track::new(name, segments))
        .collect()
}

/// One track per restriction entry, named `"{feature} - {restriction}"`.
pub fn assemble_restrictions(layers: &[EalLayer], normalizer: &Normalizer) -> Vec<Track> {
    let groups = layers
        .iter()
        .flat_map(|layer| &layer.features)
        .flat_map(|feature| {
            feature.restrictions.iter().map(move |restriction| {
                (
                    restriction_label(&feature.name, restriction),
                    normalizer.normalize_geometry(&restriction.lines),
                )
            })
        });

    let tracks = assemble(groups);
    debug!(tracks = tracks.len(), "Assembled restriction tracks");
    tracks
}

/// One track per speed control feature, numbered from 1 in fetch order.
pub fn assemble_speed_control(features: &[RawFeature], normalizer: &Normalizer) -> Vec<Track> {
    let segments = normalizer.normalize_all(features);
    let groups = features
        .iter()
        .zip(segments)
        .enumerate()
        .map(|(i, (feature, segments))| (speed_control_label(i, &feature.attributes), segments));

    let tracks = assemble(groups);
    debug!(tracks = tracks.len(), "Assembled speed control tracks");
    tracks
}

/// `"{feature} - Restriction {icon}"`, with `" ({value})"` appended when
/// the sign carries a value. An empty icon is left out.
pub fn restriction_label(feature_name: &str, restriction: &EalRestriction) -> String {
    let mut description = String::from("Restriction");
    let icon = restriction.icon.trim();
    if !icon.is_empty() {
        description.push(' ');
        description.push_str(icon);
    }
    if let Some(value) = restriction.value() {
        description.push_str(&format!(" ({:.0})", value));
    }

    let feature_name = clean_text(feature_name);
    if feature_name.is_empty() {
        description
    } else {
        format!("{} - {}", feature_name, description)
    }
}

/// `"Speed Control Section {n}"`, followed by `" - {description}"` when the
/// attributes allow one. `index` is zero-based.
pub fn speed_control_label(index: usize, attributes: &Attributes) -> String {
    let base = format!("Speed Control Section {}", index + 1);
    match speed_control_description(attributes) {
        Some(description) => format!("{} - {}", base, description),
        None => base,
    }
}

/// Road name, road number and speed limit, whichever are present.
pub fn speed_control_description(attributes: &Attributes) -> Option<String> {
    let road_name = attributes.text(keys::ROAD_NAME).map(clean_text);
    let road_number = attributes.display(keys::ROAD_NUMBER);
    let speed_limit = attributes.display(keys::SPEED_LIMIT);

    let road = match (road_name, road_number) {
        (Some(name), Some(number)) => Some(format!("{} ({})", name, number)),
        (Some(name), None) => Some(name),
        (None, Some(number)) => Some(format!("Road {}", number)),
        (None, None) => None,
    };
    let limit = speed_limit.map(|v| format!("Speed limit: {} km/h", v));

    match (road, limit) {
        (Some(road), Some(limit)) => Some(format!("{} - {}", road, limit)),
        (road, limit) => road.or(limit),
    }
}

/// Replaces `&nbsp;` entities, collapses whitespace runs and trims.
pub fn clean_text(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
