use opencv::{core::Mat, prelude::*};

///
/// Single image taken by the capture source
/// - `index` - capture order within the session, starting from 1,
///   `0` is reserved for the stitched panorama
#[derive(Debug, Clone)]
pub struct Frame {
    pub index: usize,
    pub mat: Mat,
}
//
//
impl Frame {
    ///
    /// Returns [Frame] new instance
    pub fn new(index: usize, mat: Mat) -> Self {
        Self { index, mat }
    }
    ///
    /// Returns true if frame contains no pixels
    pub fn is_empty(&self) -> bool {
        self.mat.empty() || self.mat.rows() == 0 || self.mat.cols() == 0
    }
    ///
    /// Width in pixels
    pub fn width(&self) -> i32 {
        self.mat.cols()
    }
    ///
    /// Height in pixels
    pub fn height(&self) -> i32 {
        self.mat.rows()
    }
    ///
    /// Number of color channels
    pub fn channels(&self) -> i32 {
        self.mat.channels()
    }
}
