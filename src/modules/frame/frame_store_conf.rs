use std::path::PathBuf;
use serde::Deserialize;

///
/// ## Where the captured frames and the panorama are kept
///
/// ### Conf example
/// ```yaml
/// store:
///     dir: captured_frames
///     format: jpg         # any extension supported by imgcodecs
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FrameStoreConf {
    pub dir: PathBuf,
    pub format: String,
}
//
//
impl Default for FrameStoreConf {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("captured_frames"),
            format: "jpg".to_owned(),
        }
    }
}
