use std::path::{Path, PathBuf};
use opencv::{core::{Mat, Vector}, imgcodecs};
use thiserror::Error;

use crate::modules::{Frame, FrameStoreConf};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("FrameStore | io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("FrameStore | vision error: {0}")]
    Vision(#[from] opencv::Error),
    #[error("FrameStore | image not written: {0}")]
    NotWritten(PathBuf),
}

///
/// Keeps raw frames on disk until the panorama is assembled
#[derive(Debug, Clone)]
pub struct FrameStore {
    dir: PathBuf,
    format: String,
}
//
//
impl FrameStore {
    ///
    /// Returns [FrameStore] new instance, the directory is created if missing
    pub fn new(conf: FrameStoreConf) -> Result<Self, StoreError> {
        std::fs::create_dir_all(&conf.dir)?;
        log::debug!("FrameStore.new | Directory '{}' is ready", conf.dir.display());
        Ok(Self {
            dir: conf.dir,
            format: conf.format,
        })
    }
    ///
    /// Writes the frame as `frame_<index>.<format>`, returns its path
    pub fn save(&self, frame: &Frame) -> Result<PathBuf, StoreError> {
        self.save_image(&format!("frame_{}", frame.index), &frame.mat)
    }
    ///
    /// Writes an image as `<name>.<format>`, returns its path
    pub fn save_image(&self, name: &str, image: &Mat) -> Result<PathBuf, StoreError> {
        let path = self.dir.join(format!("{name}.{}", self.format));
        let written = imgcodecs::imwrite(&path.to_string_lossy(), image, &Vector::new())?;
        if written {
            log::debug!("FrameStore.save_image | Saved '{}'", path.display());
            Ok(path)
        } else {
            Err(StoreError::NotWritten(path))
        }
    }
    ///
    /// Reads a stored frame back, unreadable file gives an empty frame
    pub fn load(&self, index: usize, path: &Path) -> Frame {
        match imgcodecs::imread(&path.to_string_lossy(), imgcodecs::IMREAD_UNCHANGED) {
            Ok(mat) => Frame::new(index, mat),
            Err(err) => {
                log::warn!("FrameStore.load | Can't read '{}': {}", path.display(), err);
                Frame::new(index, Mat::default())
            }
        }
    }
}
