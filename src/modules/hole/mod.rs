mod candidate_region;
mod hole_detector_conf;
mod hole_detector;
mod hole_record;
mod hole_registry;

pub(crate) use candidate_region::*;
pub(crate) use hole_detector_conf::*;
pub(crate) use hole_detector::*;
pub(crate) use hole_record::*;
pub(crate) use hole_registry::*;
