use std::time::Instant;
use opencv::{
    core::{self, AlgorithmHint, Mat, Point, Point2f, Rect, Scalar, Size, Vector},
    imgproc,
    prelude::*,
};
use thiserror::Error;

use crate::modules::{
    round2, CandidateRegion, DetectedHole, EdgesConf, Extraction, Frame,
    HoleDetectorConf, PositionMm, ThresholdConf,
};

#[derive(Debug, Error)]
pub enum DetectError {
    #[error("HoleDetector | unsupported channel count {0}")]
    Channels(i32),
    #[error("HoleDetector | vision error: {0}")]
    Vision(#[from] opencv::Error),
}

///
/// Reason a contour was not taken as a hole
#[derive(Debug, Clone, Copy, PartialEq)]
enum DetectionNoise {
    Area(f64),
    ZeroPerimeter,
    Circularity(f64),
    TooFewPoints(usize),
    TooSmall(f64),
    Geometry,
}

///
/// # Finds round holes on a single frame
///
/// - frame converted to gray and blurred
/// - candidate boundaries extracted by the configured [Extraction]
/// - external contours filtered by area and circularity
/// - each survivor measured by its minimum enclosing circle,
///   diameter and center converted to mm and rounded to 0.01
///
/// Contours failing any check are dropped silently,
/// only a failure of the vision library on the whole frame is an error.
pub struct HoleDetector {
    conf: HoleDetectorConf,
    mm_per_pixel: f64,
}
//
//
impl HoleDetector {
    ///
    /// Returns [HoleDetector] new instance
    /// - `mm_per_pixel` - fixed scale of the camera setup
    pub fn new(conf: HoleDetectorConf, mm_per_pixel: f64) -> Self {
        Self { conf, mm_per_pixel }
    }
    ///
    /// Returns holes found on the frame, in contour order
    pub fn detect(&self, frame: &Frame) -> Result<Vec<DetectedHole>, DetectError> {
        let t = Instant::now();
        if frame.is_empty() {
            return Ok(vec![]);
        }
        let gray = Self::gray(&frame.mat)?;
        let blurred = self.blur(gray)?;
        let mask = match &self.conf.extraction {
            Extraction::Threshold(conf) => Some(Self::threshold_mask(&blurred, conf)?),
            Extraction::Edges(conf) => Self::edges_mask(&blurred, conf)?,
        };
        let Some(mask) = mask else {
            log::debug!("HoleDetector.detect | Frame {}: region of interest is empty", frame.index);
            return Ok(vec![]);
        };
        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours(&mask, &mut contours, imgproc::RETR_EXTERNAL, imgproc::CHAIN_APPROX_SIMPLE, Point::new(0, 0))?;
        let frame_area = (frame.width() as f64) * (frame.height() as f64);
        let mut holes = vec![];
        for contour in contours.iter() {
            match self.measure(&contour, frame_area)? {
                Ok(hole) => holes.push(hole),
                Err(noise) => log::trace!("HoleDetector.detect | Frame {}: dropped {:?}", frame.index, noise),
            }
        }
        log::debug!(
            "HoleDetector.detect | Frame {}: {} contours, {} holes, elapsed: {:?}",
            frame.index, contours.len(), holes.len(), t.elapsed(),
        );
        Ok(holes)
    }
    ///
    /// Returns a color copy of the frame with every hole circled in green
    pub fn annotate(&self, frame: &Frame, holes: &[DetectedHole]) -> Result<Mat, DetectError> {
        let mut image = match frame.channels() {
            3 => frame.mat.clone(),
            1 => {
                let mut color = Mat::default();
                imgproc::cvt_color(&frame.mat, &mut color, imgproc::COLOR_GRAY2BGR, 0, AlgorithmHint::ALGO_HINT_DEFAULT)?;
                color
            }
            4 => {
                let mut color = Mat::default();
                imgproc::cvt_color(&frame.mat, &mut color, imgproc::COLOR_BGRA2BGR, 0, AlgorithmHint::ALGO_HINT_DEFAULT)?;
                color
            }
            channels => return Err(DetectError::Channels(channels)),
        };
        for hole in holes {
            let center = Point::new(hole.circle.center.x.round() as i32, hole.circle.center.y.round() as i32);
            imgproc::circle(
                &mut image,
                center,
                hole.circle.radius.round() as i32,
                Scalar::new(0.0, 255.0, 0.0, 0.0),
                2,
                imgproc::LINE_8,
                0,
            )?;
        }
        Ok(image)
    }
    ///
    /// Single channel view of the frame
    fn gray(mat: &Mat) -> Result<Mat, DetectError> {
        let code = match mat.channels() {
            1 => return Ok(mat.clone()),
            3 => imgproc::COLOR_BGR2GRAY,
            4 => imgproc::COLOR_BGRA2GRAY,
            channels => return Err(DetectError::Channels(channels)),
        };
        let mut gray = Mat::default();
        imgproc::cvt_color(mat, &mut gray, code, 0, AlgorithmHint::ALGO_HINT_DEFAULT)?;
        Ok(gray)
    }
    ///
    /// Gaussian blur, even kernel sizes rounded up to odd
    fn blur(&self, gray: Mat) -> Result<Mat, DetectError> {
        let size = self.conf.blur_size;
        if size <= 1 {
            return Ok(gray);
        }
        let size = if size % 2 == 0 { size + 1 } else { size };
        let mut blurred = Mat::default();
        imgproc::gaussian_blur(
            &gray,
            &mut blurred,
            Size::new(size, size),
            0.0,
            0.0,
            core::BORDER_DEFAULT,
            AlgorithmHint::ALGO_HINT_DEFAULT,
        )?;
        Ok(blurred)
    }
    ///
    /// Dark regions become foreground, then closed and opened
    fn threshold_mask(gray: &Mat, conf: &ThresholdConf) -> Result<Mat, DetectError> {
        let mut binary = Mat::default();
        let otsu = imgproc::threshold(gray, &mut binary, 0.0, 255.0, imgproc::THRESH_BINARY_INV | imgproc::THRESH_OTSU)?;
        log::trace!("HoleDetector.threshold_mask | Otsu level: {otsu}");
        let kernel = imgproc::get_structuring_element(
            imgproc::MORPH_ELLIPSE,
            Size::new(conf.kernel_size, conf.kernel_size),
            Point::new(-1, -1),
        )?;
        let binary = Self::morphology(binary, &kernel, imgproc::MORPH_CLOSE, conf.close_iterations)?;
        Self::morphology(binary, &kernel, imgproc::MORPH_OPEN, conf.open_iterations)
    }
    ///
    /// Applies morphological `op`, no-op for zero iterations
    fn morphology(src: Mat, kernel: &Mat, op: i32, iterations: i32) -> Result<Mat, DetectError> {
        if iterations <= 0 {
            return Ok(src);
        }
        let mut dst = Mat::default();
        imgproc::morphology_ex(
            &src,
            &mut dst,
            op,
            kernel,
            Point::new(-1, -1),
            iterations,
            core::BORDER_CONSTANT,
            imgproc::morphology_default_border_value()?,
        )?;
        Ok(dst)
    }
    ///
    /// Region of interest from `(inset, inset)` to `(cols - inset, rows - inset)`, both corners included,
    /// `None` if the corners cross
    pub fn roi(cols: i32, rows: i32, inset: i32) -> Option<Rect> {
        let roi = Rect::new(inset, inset, cols - 2 * inset + 1, rows - 2 * inset + 1);
        (roi.width > 0 && roi.height > 0).then_some(roi)
    }
    ///
    /// Canny edges kept inside the inset rectangle, `None` if the rectangle is empty
    fn edges_mask(gray: &Mat, conf: &EdgesConf) -> Result<Option<Mat>, DetectError> {
        let Some(roi) = Self::roi(gray.cols(), gray.rows(), conf.roi_inset) else {
            return Ok(None);
        };
        let mut edges = Mat::default();
        imgproc::canny(gray, &mut edges, conf.low_threshold, conf.high_threshold, 3, false)?;
        let mut roi_mask = Mat::new_rows_cols_with_default(gray.rows(), gray.cols(), core::CV_8UC1, Scalar::all(0.0))?;
        imgproc::rectangle(&mut roi_mask, roi, Scalar::all(255.0), imgproc::FILLED, imgproc::LINE_8, 0)?;
        let mut masked = Mat::default();
        core::bitwise_and_def(&edges, &roi_mask, &mut masked)?;
        Ok(Some(masked))
    }
    ///
    /// Filters a single contour and measures it
    fn measure(&self, contour: &Vector<Point>, frame_area: f64) -> Result<Result<DetectedHole, DetectionNoise>, DetectError> {
        let area = imgproc::contour_area(contour, false)?;
        let max_area = match &self.conf.extraction {
            Extraction::Threshold(conf) => conf.max_area,
            Extraction::Edges(conf) => conf.max_area_ratio * frame_area,
        };
        if !(self.conf.min_area < area && area < max_area) {
            return Ok(Err(DetectionNoise::Area(area)));
        }
        let perimeter = imgproc::arc_length(contour, true)?;
        let Some(circularity) = CandidateRegion::circularity(area, perimeter) else {
            return Ok(Err(DetectionNoise::ZeroPerimeter));
        };
        let round_enough = match &self.conf.extraction {
            Extraction::Threshold(_) => circularity >= self.conf.min_circularity,
            Extraction::Edges(conf) => {
                if contour.len() < conf.min_points {
                    return Ok(Err(DetectionNoise::TooFewPoints(contour.len())));
                }
                self.conf.min_circularity < circularity && circularity < conf.max_circularity
            }
        };
        if !round_enough {
            return Ok(Err(DetectionNoise::Circularity(circularity)));
        }
        let mut center = Point2f::default();
        let mut radius = 0.0f32;
        imgproc::min_enclosing_circle(contour, &mut center, &mut radius)?;
        if !(radius.is_finite() && center.x.is_finite() && center.y.is_finite()) || radius <= 0.0 {
            return Ok(Err(DetectionNoise::Geometry));
        }
        let diameter_mm = round2(2.0 * radius as f64 * self.mm_per_pixel);
        if diameter_mm <= self.conf.min_diameter {
            return Ok(Err(DetectionNoise::TooSmall(diameter_mm)));
        }
        Ok(Ok(DetectedHole {
            diameter_mm,
            position_mm: PositionMm(
                round2(center.x as f64 * self.mm_per_pixel),
                round2(center.y as f64 * self.mm_per_pixel),
            ),
            circle: CandidateRegion { center, radius, area, perimeter },
        }))
    }
}
