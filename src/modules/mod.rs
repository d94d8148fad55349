mod capture;
mod controller;
mod frame;
mod hole;
mod panorama;
mod pipeline;
mod report;

pub(crate) use capture::*;
pub(crate) use controller::*;
pub(crate) use frame::*;
pub(crate) use hole::*;
pub(crate) use panorama::*;
pub(crate) use pipeline::*;
pub(crate) use report::*;
