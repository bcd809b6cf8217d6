//! Error types for watchdog supervision.

/// Errors that can occur while configuring the watchdog supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SupervisorError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Human-readable rejection reason.
        reason: &'static str,
    },
}

/// A specialized `Result` type for watchdog supervisor operations.
pub type SupervisorResult<T> = core::result::Result<T, SupervisorError>;
