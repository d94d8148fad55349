use serde::Serialize;
use thiserror::Error;

///
/// Reachability of the line controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ControllerStatus {
    Connected,
    Unavailable,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("controller is not connected")]
    NotConnected,
    #[error("controller io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("controller exception code {0:#04x}")]
    Exception(u8),
    #[error("controller reply doesn't match the request")]
    Mismatch,
}

///
/// Session with the line controller, used for signaling only
pub trait ControllerSession {
    ///
    /// Tries to connect, returns the resulting status
    fn connect(&mut self) -> ControllerStatus;
    ///
    /// Current status
    fn status(&self) -> ControllerStatus;
    ///
    /// Writes a single holding register
    fn write_register(&mut self, register: u16, value: u16) -> Result<(), ControllerError>;
    ///
    /// Closes the session, status becomes [ControllerStatus::Unavailable]
    fn disconnect(&mut self);
}
