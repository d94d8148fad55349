use opencv::core::Mat;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaptureError {
    /// No frame within the acquisition timeout, worth retrying
    #[error("no frame within the acquisition timeout")]
    AcquisitionTimeout,
    /// The source is gone, capture can't continue
    #[error("capture device unavailable: {0}")]
    DeviceUnavailable(String),
}

///
/// Source of raw frames for the capture loop
pub trait CaptureSource {
    ///
    /// Prepares the source, [CaptureError::DeviceUnavailable] if it can't be used
    fn open(&mut self) -> Result<(), CaptureError>;
    ///
    /// Returns the next raw frame, `None` when the source is exhausted
    fn next_frame(&mut self) -> Result<Option<Mat>, CaptureError>;
    ///
    /// Releases the source, safe to call more than once
    fn close(&mut self);
}
