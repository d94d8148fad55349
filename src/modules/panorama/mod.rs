mod panorama_assembler;
mod panorama_conf;
mod stitch;

pub(crate) use panorama_assembler::*;
pub(crate) use panorama_conf::*;
pub(crate) use stitch::*;
