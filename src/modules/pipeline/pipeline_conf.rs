use std::path::{Path, PathBuf};
use serde::Deserialize;
use thiserror::Error;

use crate::modules::{
    CaptureConf, FrameStoreConf, HoleDetectorConf, ModbusConf,
    PanoramaConf, PreprocessConf, ReportConf, HOLE_DISTANCE_THRESHOLD_MM,
};

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("can't read config '{path}': {err}")]
    Io { path: PathBuf, err: std::io::Error },
    #[error("wrong config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

///
/// ## The configuration of the inspection session
///
/// Every key is optional, missing ones take the defaults shown below
///
/// ### Conf example
/// ```yaml
/// mm-per-pixel: 0.1
/// hole-distance-threshold: 15.0   # mm, closer holes are the same hole
/// max-frames: 100                 # optional, capture stops after this many frames
/// max-stitch-frames: 5
/// workers: 4                      # threads loading frames for the panorama
/// preprocess:
///     width: 1024
///     height: 768
/// detector:
///     blur-size: 5
///     extraction:
///         strategy: edges
/// panorama:
///     mode: scans
///     min-features: 25
/// store:
///     dir: captured_frames
///     format: jpg
/// capture:
///     source: camera
///     index: 0
///     timeout-ms: 5000
/// controller:
///     address: 192.168.0.1:502
///     unit: 1
/// report:
///     dashboard: dashboard_data.json
///     hole-table: hole_info.txt
///     images-prefix: /images/
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipelineConf {
    pub mm_per_pixel: f64,
    pub hole_distance_threshold: f64,
    pub max_frames: Option<usize>,
    pub max_stitch_frames: usize,
    pub workers: usize,
    pub preprocess: PreprocessConf,
    pub detector: HoleDetectorConf,
    pub panorama: PanoramaConf,
    pub store: FrameStoreConf,
    pub capture: CaptureConf,
    pub controller: ModbusConf,
    pub report: ReportConf,
}
//
//
impl PipelineConf {
    ///
    /// Returns [PipelineConf] read from the YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfError> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|err| ConfError::Io { path: path.to_owned(), err })?;
        log::debug!("PipelineConf.load | Reading '{}'", path.display());
        Self::from_yaml(&yaml)
    }
    ///
    /// Returns [PipelineConf] parsed from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfError> {
        let conf: Self = serde_yaml::from_str(yaml)?;
        log::trace!("PipelineConf.from_yaml | mm-per-pixel: {}", conf.mm_per_pixel);
        log::trace!("PipelineConf.from_yaml | hole-distance-threshold: {}", conf.hole_distance_threshold);
        log::trace!("PipelineConf.from_yaml | max-frames: {:?}", conf.max_frames);
        log::trace!("PipelineConf.from_yaml | max-stitch-frames: {}", conf.max_stitch_frames);
        log::trace!("PipelineConf.from_yaml | workers: {}", conf.workers);
        log::trace!("PipelineConf.from_yaml | preprocess: {:?}", conf.preprocess);
        log::trace!("PipelineConf.from_yaml | detector: {:?}", conf.detector);
        log::trace!("PipelineConf.from_yaml | panorama: {:?}", conf.panorama);
        log::trace!("PipelineConf.from_yaml | store: {:?}", conf.store);
        log::trace!("PipelineConf.from_yaml | capture: {:?}", conf.capture);
        log::trace!("PipelineConf.from_yaml | controller: {:?}", conf.controller);
        log::trace!("PipelineConf.from_yaml | report: {:?}", conf.report);
        Ok(conf)
    }
}
//
//
impl Default for PipelineConf {
    fn default() -> Self {
        Self {
            mm_per_pixel: 0.1,
            hole_distance_threshold: HOLE_DISTANCE_THRESHOLD_MM,
            max_frames: None,
            max_stitch_frames: 5,
            workers: 4,
            preprocess: PreprocessConf::default(),
            detector: HoleDetectorConf::default(),
            panorama: PanoramaConf::default(),
            store: FrameStoreConf::default(),
            capture: CaptureConf::default(),
            controller: ModbusConf::default(),
            report: ReportConf::default(),
        }
    }
}
