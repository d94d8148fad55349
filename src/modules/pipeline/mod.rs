mod pipeline_conf;
mod pipeline_state;
mod pipeline;

pub(crate) use pipeline_conf::*;
pub(crate) use pipeline_state::*;
pub(crate) use pipeline::*;
