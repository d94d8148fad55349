use crate::modules::{DetectedHole, HoleRecord};

///
/// Default minimum distance between two distinct holes, mm
pub const HOLE_DISTANCE_THRESHOLD_MM: f64 = 15.0;

///
/// # Session store of the confirmed holes
///
/// A detected hole closer than `threshold` to any known hole
/// is taken as the same physical hole seen again and dropped,
/// otherwise it is appended with the next id.
/// Records are never changed or removed until [HoleRegistry::clear].
#[derive(Debug, Clone)]
pub struct HoleRegistry {
    threshold_mm: f64,
    holes: Vec<HoleRecord>,
}
//
//
impl HoleRegistry {
    ///
    /// Returns empty [HoleRegistry]
    /// - `threshold_mm` - holes nearer than this are merged
    pub fn new(threshold_mm: f64) -> Self {
        Self {
            threshold_mm,
            holes: vec![],
        }
    }
    ///
    /// Returns true if the hole is already known
    pub fn is_duplicate(&self, hole: &DetectedHole) -> bool {
        self.holes
            .iter()
            .any(|known| known.position_mm.distance(&hole.position_mm) < self.threshold_mm)
    }
    ///
    /// Appends a new hole, returns its record, `None` for a duplicate
    pub fn insert(&mut self, hole: &DetectedHole) -> Option<HoleRecord> {
        if self.is_duplicate(hole) {
            log::trace!("HoleRegistry.insert | Duplicate at {:?}", hole.position_mm);
            return None;
        }
        let record = HoleRecord {
            id: self.holes.len() + 1,
            diameter_mm: hole.diameter_mm,
            position_mm: hole.position_mm,
        };
        log::debug!("HoleRegistry.insert | New hole {:?}", record);
        self.holes.push(record.clone());
        Some(record)
    }
    ///
    /// Inserts holes in order, returns the ones that were new
    pub fn merge(&mut self, holes: &[DetectedHole]) -> Vec<HoleRecord> {
        holes.iter().filter_map(|hole| self.insert(hole)).collect()
    }
    ///
    /// Confirmed holes in discovery order
    pub fn holes(&self) -> &[HoleRecord] {
        &self.holes
    }
    pub fn len(&self) -> usize {
        self.holes.len()
    }
    pub fn is_empty(&self) -> bool {
        self.holes.is_empty()
    }
    ///
    /// Forgets all holes, next id starts from 1
    pub fn clear(&mut self) {
        self.holes.clear();
    }
}
//
//
impl Default for HoleRegistry {
    fn default() -> Self {
        Self::new(HOLE_DISTANCE_THRESHOLD_MM)
    }
}
