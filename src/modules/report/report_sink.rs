use std::path::PathBuf;
use thiserror::Error;

use crate::modules::Report;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report io error on '{path}': {err}")]
    Io { path: PathBuf, err: std::io::Error },
    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

///
/// Consumer of the session reports
pub trait ReportSink {
    ///
    /// Intermediate status published during capture, ignored by default
    fn live(&mut self, _report: &Report) -> Result<(), ReportError> {
        Ok(())
    }
    ///
    /// Final report of the session
    fn finalize(&mut self, report: &Report) -> Result<(), ReportError>;
}
