//! Windowed watchdog peripheral contract.

/// Status flags of the watchdog peripheral.
///
/// Both flags can be pending at once; the interrupt dispatch inspects and
/// clears them individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchdogFlags {
    /// The feed window elapsed without a refresh.
    pub timeout: bool,
    /// The warning threshold was crossed ahead of the timeout.
    pub warning: bool,
}

impl WatchdogFlags {
    /// No flags set.
    pub const NONE: Self = Self {
        timeout: false,
        warning: false,
    };
    /// Only the timeout flag.
    pub const TIMEOUT: Self = Self {
        timeout: true,
        warning: false,
    };
    /// Only the warning flag.
    pub const WARNING: Self = Self {
        timeout: false,
        warning: true,
    };

    /// True when any flag is pending.
    #[must_use]
    pub const fn any(self) -> bool {
        self.timeout || self.warning
    }
}

/// Watchdog peripheral configuration, in watchdog ticks.
///
/// The peripheral divides its input clock by four; callers derive tick
/// counts from [`crate::ClockControl::frequency_hz`] accordingly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatchdogPeripheralConfig {
    /// Input clock frequency in Hz (before the internal divide-by-four).
    pub clock_hz: u32,
    /// Ticks until the timeout condition fires.
    pub timeout_ticks: u32,
    /// Ticks before timeout at which the warning interrupt fires.
    pub warning_ticks: u32,
    /// Width of the refresh window in ticks.
    pub window_ticks: u32,
    /// Reset the device when the timeout condition fires.
    pub reset_on_timeout: bool,
}

/// Register interface of the windowed watchdog.
pub trait WatchdogPeripheral {
    /// Vendor default configuration, to be overridden field by field.
    fn default_config(&self) -> WatchdogPeripheralConfig;

    /// Program the peripheral. The watchdog stays disarmed until the first
    /// [`refresh`](Self::refresh).
    fn init(&mut self, config: &WatchdogPeripheralConfig);

    /// Feed the watchdog, restarting the window.
    fn refresh(&mut self);

    /// Stop the watchdog counting without releasing its resources.
    fn disable(&mut self);

    /// Tear the peripheral down completely.
    fn deinit(&mut self);

    /// Read the pending status flags.
    fn status_flags(&self) -> WatchdogFlags;

    /// Clear the flags set in `flags`, leaving the others pending.
    fn clear_status_flags(&mut self, flags: WatchdogFlags);
}
