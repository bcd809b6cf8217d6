//! Supervisor state machine.
//!
//! The refresh counter and status are shared between application context
//! (`kick`) and interrupt context (dispatch). On the target the hardware's
//! own interrupt masking serialises the two, so plain atomic loads and
//! stores are all the synchronisation this state needs.

use portable_atomic::{AtomicU8, AtomicU32, Ordering};

/// Supervisor operational status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SupervisorStatus {
    /// Normal operation, no warnings outstanding.
    #[default]
    Armed = 0,
    /// One or more warnings absorbed, grace budget not yet exhausted.
    WarningGrace = 1,
    /// Grace exhausted; diagnostic unwind and reset/halt in progress.
    /// Terminal for the process.
    Escalated = 2,
}

impl SupervisorStatus {
    /// Convert from a raw `u8` value.
    #[must_use]
    pub fn from_raw(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Armed),
            1 => Some(Self::WarningGrace),
            2 => Some(Self::Escalated),
            _ => None,
        }
    }

    /// Convert to a raw `u8` value.
    #[must_use]
    pub fn to_raw(self) -> u8 {
        self as u8
    }

    /// Check whether the status is terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Escalated)
    }

    /// Get the status as a string slice.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Armed => "Armed",
            Self::WarningGrace => "WarningGrace",
            Self::Escalated => "Escalated",
        }
    }
}

impl core::fmt::Display for SupervisorStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Atomic supervisor state: status, grace counter and counters.
#[derive(Debug)]
pub struct SupervisorState {
    status: AtomicU8,
    refresh_count: AtomicU8,
    warnings_absorbed: AtomicU32,
    kicks: AtomicU32,
}

impl SupervisorState {
    /// New state: armed, counter at zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            status: AtomicU8::new(SupervisorStatus::Armed.to_raw()),
            refresh_count: AtomicU8::new(0),
            warnings_absorbed: AtomicU32::new(0),
            kicks: AtomicU32::new(0),
        }
    }

    /// Current status.
    #[must_use]
    pub fn status(&self) -> SupervisorStatus {
        let raw = self.status.load(Ordering::Acquire);
        SupervisorStatus::from_raw(raw).unwrap_or(SupervisorStatus::Armed)
    }

    /// Warnings absorbed since the last kick or escalation.
    #[must_use]
    pub fn refresh_count(&self) -> u8 {
        self.refresh_count.load(Ordering::Acquire)
    }

    /// Total warnings absorbed over the process lifetime.
    #[must_use]
    pub fn warnings_absorbed(&self) -> u32 {
        self.warnings_absorbed.load(Ordering::Acquire)
    }

    /// Total explicit kicks over the process lifetime.
    #[must_use]
    pub fn kicks(&self) -> u32 {
        self.kicks.load(Ordering::Acquire)
    }

    /// Record an explicit kick: counter back to zero, status armed.
    pub fn record_kick(&self) {
        self.refresh_count.store(0, Ordering::Release);
        self.status
            .store(SupervisorStatus::Armed.to_raw(), Ordering::Release);
        self.kicks.fetch_add(1, Ordering::Relaxed);
    }

    /// Consume one warning against the grace budget.
    ///
    /// Within budget: increments the counter, moves to
    /// [`SupervisorStatus::WarningGrace`] and returns the new count.
    /// Budget exhausted: zeroes the counter, moves to
    /// [`SupervisorStatus::Escalated`] and returns `None`.
    pub fn absorb_warning(&self, grace_period: u8) -> Option<u8> {
        let count = self.refresh_count.load(Ordering::Acquire);
        if count < grace_period {
            let count = count.saturating_add(1);
            self.refresh_count.store(count, Ordering::Release);
            self.status
                .store(SupervisorStatus::WarningGrace.to_raw(), Ordering::Release);
            self.warnings_absorbed.fetch_add(1, Ordering::Relaxed);
            Some(count)
        } else {
            self.refresh_count.store(0, Ordering::Release);
            self.status
                .store(SupervisorStatus::Escalated.to_raw(), Ordering::Release);
            None
        }
    }
}

impl Default for SupervisorState {
    fn default() -> Self {
        Self::new()
    }
}
