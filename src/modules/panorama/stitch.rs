use thiserror::Error;

use crate::modules::Frame;

///
/// Classified panorama assembly failure, never fatal to the session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StitchError {
    #[error("need at least 2 images, got {0}")]
    NeedMoreImages(usize),
    #[error("not enough distinguishing features to match the images")]
    NotEnoughFeatures,
    #[error("homography estimation failed")]
    HomographyEstimation,
    #[error("camera parameters adjustment failed")]
    CameraParamsAdjust,
    #[error("internal stitcher error: {0}")]
    Internal(String),
}
//
//
impl From<opencv::Error> for StitchError {
    fn from(err: opencv::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

///
/// Capability to compose overlapping frames into a single image
pub trait Stitch {
    ///
    /// Returns the panorama composed of `frames`, in the given order
    fn stitch(&mut self, frames: &[Frame]) -> Result<Frame, StitchError>;
}
