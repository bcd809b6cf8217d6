//! Millisecond timer service contract.

use crate::error::HalResult;

/// Handle onto one allocated timer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerHandle(u8);

impl TimerHandle {
    /// Create a handle from a raw slot index.
    #[must_use]
    pub const fn new(slot: u8) -> Self {
        Self(slot)
    }

    /// Raw slot index of this handle.
    #[must_use]
    pub const fn slot(self) -> u8 {
        self.0
    }
}

/// Periodic timer facility with millisecond granularity.
///
/// Expiry delivery is owned by the embedding interrupt shim: when an armed
/// timer fires, the shim calls back into whichever component armed it (for
/// the button scanner, `ButtonScanner::scan_tick`). The service itself only
/// arms and disarms; it holds no callbacks.
pub trait TimerService {
    /// Allocate a timer slot for the lifetime of the caller.
    ///
    /// # Errors
    ///
    /// Returns [`crate::HalError::NoTimerAvailable`] when every slot is taken.
    fn allocate(&mut self) -> HalResult<TimerHandle>;

    /// Arm a single-shot expiry `delay_ms` milliseconds from now.
    ///
    /// Re-arming an already armed timer restarts the delay.
    fn start_single_shot(&mut self, handle: TimerHandle, delay_ms: u32);

    /// Disarm the timer; a pending expiry is discarded.
    fn stop(&mut self, handle: TimerHandle);
}
