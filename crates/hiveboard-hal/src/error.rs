//! Error types for hardware service operations.

/// Errors reported by the fallible hardware services.
///
/// Most collaborator calls mirror vendor SDK functions that cannot fail;
/// the exceptions are resource allocations, which can be exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum HalError {
    /// The timer service has no free timer slots.
    #[error("no timer slots available")]
    NoTimerAvailable,
}

/// A specialized `Result` type for hardware service operations.
pub type HalResult<T> = core::result::Result<T, HalError>;
