use opencv::core::Point2f;

///
/// Minimum enclosing circle of an accepted contour, in pixels,
/// along with the contour's own area and perimeter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateRegion {
    pub center: Point2f,
    pub radius: f32,
    pub area: f64,
    pub perimeter: f64,
}
//
//
impl CandidateRegion {
    ///
    /// Returns `4π·area / perimeter²`, `None` for zero perimeter
    pub fn circularity(area: f64, perimeter: f64) -> Option<f64> {
        if perimeter > 0.0 {
            Some(4.0 * std::f64::consts::PI * area / (perimeter * perimeter))
        } else {
            None
        }
    }
}
