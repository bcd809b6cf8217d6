//! Error types for button scanning.

use hiveboard_hal::HalError;

/// Errors that can occur while configuring the button scanner.
///
/// Every variant is a configuration-time failure: once a scanner is
/// constructed, its operations are infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ButtonError {
    /// More buttons requested than the board physically has.
    #[error("{requested} buttons requested but the board has {available}")]
    TooManyButtons {
        /// Number of buttons the application asked to scan.
        requested: u8,
        /// Number of buttons present on the board.
        available: u8,
    },
    /// The configuration names no buttons at all.
    #[error("at least one button must be configured")]
    NoButtons,
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable rejection reason.
        reason: &'static str,
    },
    /// A hardware service could not be acquired; nothing was armed.
    #[error("hardware service unavailable")]
    Hal(#[from] HalError),
}

/// A specialized `Result` type for button scanner operations.
pub type ButtonResult<T> = core::result::Result<T, ButtonError>;
