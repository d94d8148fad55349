use serde::Serialize;

use crate::modules::CandidateRegion;

///
/// Rounds to 2 decimal places, half away from zero
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

///
/// Position on the inspected surface, mm, serialized as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionMm(pub f64, pub f64);
//
//
impl PositionMm {
    ///
    /// Euclidean distance, mm
    pub fn distance(&self, other: &PositionMm) -> f64 {
        (self.0 - other.0).hypot(self.1 - other.1)
    }
}

///
/// Hole measured on a single frame, has no identity yet
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedHole {
    pub diameter_mm: f64,
    pub position_mm: PositionMm,
    /// Pixel circle used to annotate the frame
    pub circle: CandidateRegion,
}

///
/// Confirmed hole, identified by its discovery order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HoleRecord {
    pub id: usize,
    pub diameter_mm: f64,
    #[serde(rename = "coordinates_mm")]
    pub position_mm: PositionMm,
}
