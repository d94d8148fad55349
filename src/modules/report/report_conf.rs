use std::path::PathBuf;
use serde::Deserialize;

///
/// ## Report outputs
///
/// ### Conf example
/// ```yaml
/// report:
///     dashboard: dashboard_data.json      # JSON status for the dashboard
///     hole-table: hole_info.txt           # fixed width text table of the holes
///     images-prefix: /images/             # prepended to the panorama file name
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ReportConf {
    pub dashboard: PathBuf,
    pub hole_table: PathBuf,
    pub images_prefix: String,
}
//
//
impl Default for ReportConf {
    fn default() -> Self {
        Self {
            dashboard: PathBuf::from("dashboard_data.json"),
            hole_table: PathBuf::from("hole_info.txt"),
            images_prefix: "/images/".to_owned(),
        }
    }
}
