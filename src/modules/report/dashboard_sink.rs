use std::path::PathBuf;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::modules::{Report, ReportError, ReportSink};

///
/// Writes the report as a JSON document read by the dashboard,
/// the file is rewritten on every live update
pub struct DashboardSink {
    path: PathBuf,
}
//
//
impl DashboardSink {
    ///
    /// Returns [DashboardSink] new instance
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    ///
    /// JSON text of the report, 4 spaces indented
    pub fn to_json(report: &Report) -> Result<String, ReportError> {
        let mut buf = vec![];
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        report.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
    fn write(&self, report: &Report) -> Result<(), ReportError> {
        let json = Self::to_json(report)?;
        std::fs::write(&self.path, json).map_err(|err| ReportError::Io { path: self.path.clone(), err })?;
        log::debug!("DashboardSink.write | Saved '{}'", self.path.display());
        Ok(())
    }
}
//
//
impl ReportSink for DashboardSink {
    fn live(&mut self, report: &Report) -> Result<(), ReportError> {
        self.write(report)
    }
    //
    //
    fn finalize(&mut self, report: &Report) -> Result<(), ReportError> {
        self.write(report)?;
        log::info!("DashboardSink.finalize | Dashboard data saved to '{}'", self.path.display());
        Ok(())
    }
}
