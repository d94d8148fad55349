use std::time::Instant;
use opencv::{
    core::{KeyPoint, Mat, Vector},
    features2d::ORB,
    prelude::*,
    stitching::{Stitcher, Stitcher_Mode, Stitcher_Status},
};

use crate::modules::{Frame, PanoramaConf, PanoramaMode, Stitch, StitchError};

///
/// # Stitches preprocessed frames into a panorama
///
/// Every frame is checked for enough ORB keypoints first,
/// the status codes of the vision library stitcher don't tell
/// a featureless frame from any other matching failure.
pub struct PanoramaAssembler {
    conf: PanoramaConf,
}
//
//
impl PanoramaAssembler {
    ///
    /// Returns [PanoramaAssembler] new instance
    pub fn new(conf: PanoramaConf) -> Self {
        Self { conf }
    }
    ///
    /// Number of ORB keypoints on the frame
    fn features(orb: &mut opencv::core::Ptr<ORB>, frame: &Frame) -> Result<usize, StitchError> {
        let mut keypoints: Vector<KeyPoint> = Vector::new();
        orb.detect_def(&frame.mat, &mut keypoints)?;
        Ok(keypoints.len())
    }
    ///
    /// Failure reason of the stitcher status, at least two frames assumed given
    pub fn classify(status: Stitcher_Status) -> Result<(), StitchError> {
        match status {
            Stitcher_Status::OK => Ok(()),
            // Enough images were given, so they just couldn't be matched
            Stitcher_Status::ERR_NEED_MORE_IMGS => Err(StitchError::NotEnoughFeatures),
            Stitcher_Status::ERR_HOMOGRAPHY_EST_FAIL => Err(StitchError::HomographyEstimation),
            Stitcher_Status::ERR_CAMERA_PARAMS_ADJUST_FAIL => Err(StitchError::CameraParamsAdjust),
        }
    }
    ///
    /// Fails with [StitchError::NotEnoughFeatures] if any frame is too plain to be matched
    fn check_features(&self, frames: &[Frame]) -> Result<(), StitchError> {
        if self.conf.min_features == 0 {
            return Ok(());
        }
        let mut orb = ORB::create_def()?;
        for frame in frames {
            let found = Self::features(&mut orb, frame)?;
            log::debug!("PanoramaAssembler.check_features | Frame {}: {} keypoints", frame.index, found);
            if found < self.conf.min_features {
                log::warn!(
                    "PanoramaAssembler.check_features | Frame {}: {} keypoints, {} required",
                    frame.index, found, self.conf.min_features,
                );
                return Err(StitchError::NotEnoughFeatures);
            }
        }
        Ok(())
    }
}
//
//
impl Stitch for PanoramaAssembler {
    fn stitch(&mut self, frames: &[Frame]) -> Result<Frame, StitchError> {
        let t = Instant::now();
        if frames.len() < 2 {
            return Err(StitchError::NeedMoreImages(frames.len()));
        }
        self.check_features(frames)?;
        let mode = match self.conf.mode {
            PanoramaMode::Scans => Stitcher_Mode::SCANS,
            PanoramaMode::Panorama => Stitcher_Mode::PANORAMA,
        };
        let mut stitcher = Stitcher::create(mode)?;
        let images: Vector<Mat> = frames.iter().map(|frame| frame.mat.clone()).collect();
        let mut pano = Mat::default();
        let status = stitcher.stitch(&images, &mut pano)?;
        log::debug!("PanoramaAssembler.stitch | {} frames, status {:?}, elapsed: {:?}", frames.len(), status, t.elapsed());
        Self::classify(status)?;
        if pano.empty() {
            return Err(StitchError::Internal("stitcher returned an empty image".to_owned()));
        }
        log::info!("PanoramaAssembler.stitch | Panorama {}x{} from {} frames", pano.cols(), pano.rows(), frames.len());
        Ok(Frame::new(0, pano))
    }
}
