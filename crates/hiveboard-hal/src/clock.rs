//! Clock and peripheral-reset driver contract.

/// Clock sources the board core queries or gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockSource {
    /// Dedicated oscillator feeding the windowed watchdog.
    WatchdogOscillator,
}

/// Peripherals the board core can reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeripheralId {
    /// The windowed watchdog timer block.
    WindowedWatchdog,
}

/// Clock gating, frequency queries and peripheral resets.
pub trait ClockControl {
    /// Frequency of the given source in Hz.
    fn frequency_hz(&self, source: ClockSource) -> u32;

    /// Enable the clock for the given source. Enabling an already running
    /// clock is harmless.
    fn enable(&mut self, source: ClockSource);

    /// Pulse the reset line of a peripheral block.
    fn reset_peripheral(&mut self, peripheral: PeripheralId);
}
