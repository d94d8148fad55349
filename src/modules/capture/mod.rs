mod camera_source;
mod capture_conf;
mod capture_source;
mod dir_source;

pub(crate) use camera_source::*;
pub(crate) use capture_conf::*;
pub(crate) use capture_source::*;
pub(crate) use dir_source::*;
