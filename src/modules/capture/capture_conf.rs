use std::path::PathBuf;
use serde::Deserialize;

///
/// ## Where the frames come from
///
/// ### Conf example
/// ```yaml
/// capture:
///     source: camera
///     index: 0                # video device index
///     timeout-ms: 5000        # single frame acquisition timeout
///     buffer: 4               # frames kept between the grab thread and the pipeline
/// # capture:
/// #     source: directory     # replays stored images in file name order
/// #     path: captured_frames
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "source", rename_all = "kebab-case")]
pub enum CaptureConf {
    Camera(CameraConf),
    Directory(DirConf),
}
//
//
impl Default for CaptureConf {
    fn default() -> Self {
        Self::Camera(CameraConf::default())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CameraConf {
    pub index: i32,
    pub timeout_ms: u64,
    pub buffer: usize,
}
//
//
impl Default for CameraConf {
    fn default() -> Self {
        Self {
            index: 0,
            timeout_ms: 5000,
            buffer: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DirConf {
    pub path: PathBuf,
}
//
//
impl Default for DirConf {
    fn default() -> Self {
        Self {
            path: PathBuf::from("captured_frames"),
        }
    }
}
