//! Error types for the LED bank.

/// Errors that can occur while configuring the LED bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LedError {
    /// The bank was configured with no LEDs at all.
    #[error("at least one LED must be configured")]
    NoLeds,
    /// More LEDs requested than the board physically has.
    #[error("{requested} LEDs requested but the board supports {supported}")]
    TooManyLeds {
        /// Number of LEDs the application asked for.
        requested: usize,
        /// Number of LEDs the board supports.
        supported: usize,
    },
}

/// A specialized `Result` type for LED bank operations.
pub type LedResult<T> = core::result::Result<T, LedError>;
