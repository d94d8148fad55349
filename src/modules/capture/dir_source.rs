use std::{collections::VecDeque, path::{Path, PathBuf}};
use opencv::{core::Mat, imgcodecs};

use crate::modules::{CaptureError, CaptureSource, DirConf};

const IMAGE_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "bmp", "tif", "tiff"];

///
/// Replays the images of a directory in file name order
pub struct DirSource {
    path: PathBuf,
    files: VecDeque<PathBuf>,
}
//
//
impl DirSource {
    ///
    /// Returns [DirSource] new instance
    pub fn new(conf: DirConf) -> Self {
        Self {
            path: conf.path,
            files: VecDeque::new(),
        }
    }
    fn is_image(path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
    }
}
//
//
impl CaptureSource for DirSource {
    fn open(&mut self) -> Result<(), CaptureError> {
        let entries = std::fs::read_dir(&self.path)
            .map_err(|err| CaptureError::DeviceUnavailable(format!("'{}': {}", self.path.display(), err)))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.is_file() && Self::is_image(path))
            .collect();
        files.sort();
        log::info!("DirSource.open | {} images in '{}'", files.len(), self.path.display());
        self.files = files.into();
        Ok(())
    }
    //
    //
    fn next_frame(&mut self) -> Result<Option<Mat>, CaptureError> {
        let Some(path) = self.files.pop_front() else {
            return Ok(None);
        };
        log::debug!("DirSource.next_frame | Reading '{}'", path.display());
        match imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_UNCHANGED) {
            Ok(mat) => Ok(Some(mat)),
            Err(err) => {
                log::warn!("DirSource.next_frame | Can't read '{}': {}", path.display(), err);
                Ok(Some(Mat::default()))
            }
        }
    }
    //
    //
    fn close(&mut self) {
        self.files.clear();
    }
}
