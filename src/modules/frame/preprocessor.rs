use std::time::Instant;
use opencv::{core::{AlgorithmHint, Mat, Size}, imgproc, prelude::*};
use thiserror::Error;

use crate::modules::{Frame, PreprocessConf};

///
/// The frame can't be used and must be omitted by the caller
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SkippedFrame {
    #[error("frame {0} is empty")]
    Empty(usize),
    #[error("frame {index} has unsupported channel count {channels}")]
    Channels { index: usize, channels: i32 },
    #[error("frame {index} can't be converted: {err}")]
    Vision { index: usize, err: String },
}

///
/// Brings a raw frame to the canonical color space and geometry:
/// - 1 channel - replicated into 3 channels
/// - 4 channels - alpha dropped
/// - resized with bilinear interpolation
#[derive(Debug, Clone)]
pub struct Preprocessor {
    size: Size,
}
//
//
impl Preprocessor {
    ///
    /// Returns [Preprocessor] new instance
    pub fn new(conf: &PreprocessConf) -> Self {
        Self {
            size: Size::new(conf.width, conf.height),
        }
    }
    ///
    /// Returns 3-channel frame of the canonical size
    pub fn process(&self, frame: &Frame) -> Result<Frame, SkippedFrame> {
        let t = Instant::now();
        let index = frame.index;
        if frame.is_empty() {
            return Err(SkippedFrame::Empty(index));
        }
        let vision = |err: opencv::Error| SkippedFrame::Vision { index, err: err.to_string() };
        let mut color = Mat::default();
        let src = match frame.channels() {
            3 => &frame.mat,
            1 => {
                imgproc::cvt_color(&frame.mat, &mut color, imgproc::COLOR_GRAY2BGR, 0, AlgorithmHint::ALGO_HINT_DEFAULT).map_err(vision)?;
                &color
            }
            4 => {
                imgproc::cvt_color(&frame.mat, &mut color, imgproc::COLOR_BGRA2BGR, 0, AlgorithmHint::ALGO_HINT_DEFAULT).map_err(vision)?;
                &color
            }
            channels => return Err(SkippedFrame::Channels { index, channels }),
        };
        let mut resized = Mat::default();
        imgproc::resize(src, &mut resized, self.size, 0.0, 0.0, imgproc::INTER_LINEAR).map_err(vision)?;
        log::trace!("Preprocessor.process | frame {index} elapsed: {:?}", t.elapsed());
        Ok(Frame::new(index, resized))
    }
}
