///
/// Stage of the inspection session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Connecting,
    Capturing,
    Assembling,
    ReDetecting,
    Reporting,
}
