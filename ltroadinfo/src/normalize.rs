//! Geometry normalization.
//!
//! Turns feature geometry in LKS-94 grid meters into ordered WGS-84
//! segments. Each source line becomes at most one [`Segment`]; points that
//! are malformed or fall outside the grid envelope are dropped, and lines
//! left with no points are dropped with them.

use std::ops::AddAssign;

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::feature::{Geometry, Line, RawFeature};
use crate::transform::{DatumTransform, GeoCoord, GridCoord, GridEnvelope};

/// Non-empty, ordered run of WGS-84 points.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment(Vec<GeoCoord>);

impl Segment {
    /// Returns `None` for an empty point list.
    pub fn new(points: Vec<GeoCoord>) -> Option<Self> {
        if points.is_empty() {
            None
        } else {
            Some(Segment(points))
        }
    }

    pub fn points(&self) -> &[GeoCoord] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_points(self) -> Vec<GeoCoord> {
        self.0
    }
}

/// Counters collected while normalizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub points: usize,
    pub malformed: usize,
    pub out_of_envelope: usize,
    pub empty_segments: usize,
}

impl AddAssign for NormalizeStats {
    fn add_assign(&mut self, other: Self) {
        self.points += other.points;
        self.malformed += other.malformed;
        self.out_of_envelope += other.out_of_envelope;
        self.empty_segments += other.empty_segments;
    }
}

/// Applies the datum transform to feature geometry.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer {
    transform: DatumTransform,
    envelope: Option<GridEnvelope>,
}

impl Normalizer {
    /// Creates a normalizer that checks input against [`GridEnvelope::LKS94`].
    pub fn new(transform: DatumTransform) -> Self {
        Self {
            transform,
            envelope: Some(GridEnvelope::LKS94),
        }
    }

    pub fn with_envelope(mut self, envelope: GridEnvelope) -> Self {
        self.envelope = Some(envelope);
        self
    }

    /// Disables the input envelope check. Only malformed points are dropped.
    pub fn without_envelope(mut self) -> Self {
        self.envelope = None;
        self
    }

    pub fn transform(&self) -> &DatumTransform {
        &self.transform
    }

    pub fn normalize(&self, feature: &RawFeature) -> Vec<Segment> {
        self.normalize_geometry(&feature.geometry)
    }

    pub fn normalize_geometry(&self, geometry: &Geometry) -> Vec<Segment> {
        let mut stats = NormalizeStats::default();
        self.normalize_counted(geometry, &mut stats)
    }

    /// Normalizes a batch of features in parallel. Output order matches
    /// input order.
    pub fn normalize_all(&self, features: &[RawFeature]) -> Vec<Vec<Segment>> {
        let results: Vec<(Vec<Segment>, NormalizeStats)> = features
            .par_iter()
            .map(|feature| {
                let mut stats = NormalizeStats::default();
                let segments = self.normalize_counted(&feature.geometry, &mut stats);
                (segments, stats)
            })
            .collect();

        let mut total = NormalizeStats::default();
        let segments = results
            .into_iter()
            .map(|(segments, stats)| {
                total += stats;
                segments
            })
            .collect();

        debug!(
            features = features.len(),
            points = total.points,
            malformed = total.malformed,
            out_of_envelope = total.out_of_envelope,
            empty_segments = total.empty_segments,
            "Normalized feature geometry"
        );
        segments
    }

    /// Normalizes geometry and accumulates counters into `stats`.
    pub fn normalize_counted(&self, geometry: &Geometry, stats: &mut NormalizeStats) -> Vec<Segment> {
        match geometry {
            Geometry::FlatLine(line) => self.line_segment(line, stats).into_iter().collect(),
            Geometry::MultiLine(lines) | Geometry::PathArray(lines) => lines
                .iter()
                .filter_map(|line| self.line_segment(line, stats))
                .collect(),
        }
    }

    fn line_segment(&self, line: &Line, stats: &mut NormalizeStats) -> Option<Segment> {
        let points: Vec<GeoCoord> = line
            .iter()
            .filter_map(|position| {
                let Some((easting, northing)) = position.xy() else {
                    trace!(?position, "Dropping malformed position");
                    stats.malformed += 1;
                    return None;
                };
                let grid = GridCoord::new(easting, northing);
                if let Some(envelope) = &self.envelope {
                    if !envelope.contains(grid) {
                        trace!(easting, northing, "Dropping position outside grid envelope");
                        stats.out_of_envelope += 1;
                        return None;
                    }
                }
                stats.points += 1;
                Some(self.transform.transform(grid))
            })
            .collect();

        let segment = Segment::new(points);
        if segment.is_none() {
            stats.empty_segments += 1;
        }
        segment
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DatumTransform::lks94())
    }
}
