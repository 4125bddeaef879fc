//! Error types
//!
//! Only backend failures and listener misuse are errors.
//! Unresolved characters, keysyms, keycodes and unsupported named keys are
//! plain `None` values threaded through every layer.

use thiserror::Error;

/// Result type for keysim operations
pub type Result<T> = std::result::Result<T, KeysimError>;

/// Failure reported by an input backend
#[derive(Error, Debug)]
pub enum BackendError {
    /// Could not open a connection to the display server
    #[error("Cannot connect to display: {0}")]
    Connect(String),

    /// Connection broke while talking to the display server
    #[error("Display connection error: {0}")]
    Connection(String),

    /// Server answered a request with a protocol error
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Required server extension is not available
    #[error("Extension not available: {0}")]
    MissingExtension(&'static str),

    /// Exclusive keyboard grab was refused
    #[error("Keyboard grab denied: {0}")]
    GrabDenied(String),

    /// Keymap could not be compiled or queried
    #[error("Keymap error: {0}")]
    Keymap(String),

    /// Keycode does not fit the protocol's keycode range
    #[error("Keycode out of range: {0}")]
    KeycodeOutOfRange(u32),

    /// Capture was used before being registered
    #[error("Event capture is not registered")]
    CaptureNotRegistered,
}

/// Top-level error type
#[derive(Error, Debug)]
pub enum KeysimError {
    /// Input backend failure (fatal to the current operation)
    #[error("Input backend failure: {0}")]
    Backend(#[from] BackendError),

    /// `start` called while already listening
    #[error("Listener is already running")]
    AlreadyListening,

    /// `stop` called while not listening
    #[error("Listener is not running")]
    NotListening,
}
