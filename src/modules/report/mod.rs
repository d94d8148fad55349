mod dashboard_sink;
mod hole_table_sink;
mod report_conf;
mod report_sink;
mod report;

pub(crate) use dashboard_sink::*;
pub(crate) use hole_table_sink::*;
pub(crate) use report_conf::*;
pub(crate) use report_sink::*;
pub(crate) use report::*;
