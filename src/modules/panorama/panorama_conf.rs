use serde::Deserialize;

///
/// ## Panorama assembly parameters
///
/// ### Conf example
/// ```yaml
/// panorama:
///     mode: scans             # scans / panorama
///     min-features: 25        # ORB keypoints required on every frame
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PanoramaConf {
    pub mode: PanoramaMode,
    pub min_features: usize,
}
//
//
impl Default for PanoramaConf {
    fn default() -> Self {
        Self {
            mode: PanoramaMode::Scans,
            min_features: 25,
        }
    }
}

///
/// Motion model of the stitcher
/// - `Scans` - affine, flat surface scanned by a moving camera
/// - `Panorama` - spherical, camera rotating around its center
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PanoramaMode {
    Scans,
    Panorama,
}
