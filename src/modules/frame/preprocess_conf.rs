use serde::Deserialize;

///
/// ## Canonical geometry of the frames entering detection and stitching
///
/// ### Conf example
/// ```yaml
/// preprocess:
///     width: 1024
///     height: 768
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PreprocessConf {
    /// Target width, px
    pub width: i32,
    /// Target height, px
    pub height: i32,
}
//
//
impl Default for PreprocessConf {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}
