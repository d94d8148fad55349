use serde::Serialize;

use crate::modules::{ControllerStatus, HoleRecord};

///
/// Value of `stitched_image_path` when no panorama was produced
pub const NO_PANORAMA: &str = "None";

///
/// Whether frames are being captured at the moment of the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CaptureStatus {
    Capturing,
    #[serde(rename = "Not Capturing")]
    NotCapturing,
}

///
/// Snapshot of the session handed to the report sinks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub controller_status: ControllerStatus,
    pub capture_status: CaptureStatus,
    pub total_holes: usize,
    pub hole_info: Vec<HoleRecord>,
    /// `<images-prefix><file name>` of the panorama or [NO_PANORAMA]
    pub stitched_image_path: String,
}
//
//
impl Report {
    ///
    /// Returns [Report] of the given holes, `total_holes` always equals their count
    pub fn new(
        controller_status: ControllerStatus,
        capture_status: CaptureStatus,
        hole_info: &[HoleRecord],
        stitched_image_path: impl Into<String>,
    ) -> Self {
        Self {
            controller_status,
            capture_status,
            total_holes: hole_info.len(),
            hole_info: hole_info.to_vec(),
            stitched_image_path: stitched_image_path.into(),
        }
    }
}
