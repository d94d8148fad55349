use std::{fmt::Write, path::PathBuf};

use crate::modules::{HoleRecord, Report, ReportError, ReportSink};

///
/// Writes the final list of holes as a fixed width text table:
///
/// ```text
/// Hole Detection Report
///
/// Hole ID   Diameter (mm)       Coordinates (x, y) in mm
/// 1         6.00                (32.00, 24.00)
/// ```
///
/// Nothing is written when no holes were found.
pub struct HoleTableSink {
    path: PathBuf,
}
//
//
impl HoleTableSink {
    ///
    /// Returns [HoleTableSink] new instance
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
    ///
    /// Text of the table
    pub fn table(holes: &[HoleRecord]) -> String {
        let mut text = String::from("Hole Detection Report\n\n");
        let _ = writeln!(text, "{:<10}{:<20}{:<30}", "Hole ID", "Diameter (mm)", "Coordinates (x, y) in mm");
        for hole in holes {
            let coordinates = format!("({:.2}, {:.2})", hole.position_mm.0, hole.position_mm.1);
            let _ = writeln!(text, "{:<10}{:<20.2}{:<30}", hole.id, hole.diameter_mm, coordinates);
        }
        text
    }
}
//
//
impl ReportSink for HoleTableSink {
    fn finalize(&mut self, report: &Report) -> Result<(), ReportError> {
        if report.hole_info.is_empty() {
            log::info!("HoleTableSink.finalize | No holes, '{}' not written", self.path.display());
            return Ok(());
        }
        std::fs::write(&self.path, Self::table(&report.hole_info))
            .map_err(|err| ReportError::Io { path: self.path.clone(), err })?;
        log::info!("HoleTableSink.finalize | {} holes saved to '{}'", report.hole_info.len(), self.path.display());
        Ok(())
    }
}
