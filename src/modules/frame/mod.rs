mod frame;
mod frame_store_conf;
mod frame_store;
mod preprocess_conf;
mod preprocessor;

pub(crate) use frame::*;
pub(crate) use frame_store_conf::*;
pub(crate) use frame_store::*;
pub(crate) use preprocess_conf::*;
pub(crate) use preprocessor::*;
