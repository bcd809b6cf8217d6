//! Reset-cause inspection contract.

/// Bitmask of reset causes as reported by the ROM API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetCauseFlags(u32);

impl ResetCauseFlags {
    /// The previous reset was triggered by the watchdog.
    pub const WATCHDOG: Self = Self(1 << 2);

    /// Build from a raw cause register value.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Raw cause bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True when the watchdog-reset bit is set.
    #[must_use]
    pub const fn is_watchdog_reset(self) -> bool {
        self.0 & Self::WATCHDOG.0 == Self::WATCHDOG.0
    }
}

/// Persistent reset-cause query.
///
/// The live reset-cause register is not reliable across low-power
/// transitions; implementations must use the ROM API, which is.
pub trait ResetCause {
    /// Causes of the most recent reset.
    fn reset_cause(&self) -> ResetCauseFlags;
}
