use serde::Deserialize;

///
/// ## Hole detection parameters
///
/// ### Conf example
/// ```yaml
/// detector:
///     blur-size: 5                # Gaussian kernel, odd, 1 disables blur
///     min-area: 100.0             # px²
///     min-circularity: 0.7
///     min-diameter: 5.0           # mm, exclusive
///     extraction:
///         strategy: edges         # edges / threshold
///         low-threshold: 30.0
///         high-threshold: 100.0
///         roi-inset: 100          # px from every border
///         max-area-ratio: 0.5     # of the frame pixel count
///         max-circularity: 1.2
///         min-points: 5
///     # extraction:
///     #     strategy: threshold
///     #     kernel-size: 7        # elliptical structuring element
///     #     close-iterations: 3
///     #     open-iterations: 2
///     #     max-area: 5000.0      # px²
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct HoleDetectorConf {
    pub blur_size: i32,
    pub min_area: f64,
    pub min_circularity: f64,
    pub min_diameter: f64,
    pub extraction: Extraction,
}
//
//
impl Default for HoleDetectorConf {
    fn default() -> Self {
        Self {
            blur_size: 5,
            min_area: 100.0,
            min_circularity: 0.7,
            min_diameter: 5.0,
            extraction: Extraction::default(),
        }
    }
}

///
/// How candidate boundaries are pulled out of the blurred gray frame
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "strategy", rename_all = "kebab-case")]
pub enum Extraction {
    Threshold(ThresholdConf),
    Edges(EdgesConf),
}
//
//
impl Default for Extraction {
    fn default() -> Self {
        Self::Edges(EdgesConf::default())
    }
}

///
/// Otsu binary-inverse threshold cleaned with morphology
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThresholdConf {
    pub kernel_size: i32,
    /// 0 disables closing
    pub close_iterations: i32,
    /// 0 disables opening
    pub open_iterations: i32,
    pub max_area: f64,
}
//
//
impl Default for ThresholdConf {
    fn default() -> Self {
        Self {
            kernel_size: 7,
            close_iterations: 3,
            open_iterations: 2,
            max_area: 5000.0,
        }
    }
}

///
/// Canny edges inside the inset region of interest
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EdgesConf {
    pub low_threshold: f64,
    pub high_threshold: f64,
    pub roi_inset: i32,
    pub max_area_ratio: f64,
    /// Exclusive
    pub max_circularity: f64,
    pub min_points: usize,
}
//
//
impl Default for EdgesConf {
    fn default() -> Self {
        Self {
            low_threshold: 30.0,
            high_threshold: 100.0,
            roi_inset: 100,
            max_area_ratio: 0.5,
            max_circularity: 1.2,
            min_points: 5,
        }
    }
}
