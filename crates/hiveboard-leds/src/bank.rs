//! The LED bank.

use core::fmt;

use hiveboard_hal::{GpioDriver, PinId};
use tracing::debug;

use crate::error::{LedError, LedResult};

/// Most LEDs any supported board carries.
pub const MAX_BOARD_LEDS: usize = 2;

/// Bounded bank of active-low board LEDs.
pub struct LedBank<G>
where
    G: GpioDriver,
{
    pins: [PinId; MAX_BOARD_LEDS],
    count: u8,
    states: u8,
    gpio: G,
}

impl<G> LedBank<G>
where
    G: GpioDriver,
{
    /// Bring the bank up: one pin per LED, in index order.
    ///
    /// Configures every pin as a digital output and drives all LEDs off.
    ///
    /// # Errors
    ///
    /// Returns [`LedError::NoLeds`] for an empty pin list and
    /// [`LedError::TooManyLeds`] when the list exceeds the board capacity.
    pub fn new(pins: &[PinId], mut gpio: G) -> LedResult<Self> {
        if pins.is_empty() {
            return Err(LedError::NoLeds);
        }
        if pins.len() > MAX_BOARD_LEDS {
            return Err(LedError::TooManyLeds {
                requested: pins.len(),
                supported: MAX_BOARD_LEDS,
            });
        }

        let mut bank_pins = [PinId::new(0); MAX_BOARD_LEDS];
        for (slot, pin) in bank_pins.iter_mut().zip(pins.iter().copied()) {
            *slot = pin;
            gpio.configure_output(pin);
            // Active low: idle high keeps the LED dark.
            gpio.write_pin(pin, true);
        }

        debug!(leds = pins.len(), "LED bank initialised");

        Ok(Self {
            pins: bank_pins,
            count: pins.len() as u8,
            states: 0,
            gpio,
        })
    }

    /// Switch one LED on or off.
    ///
    /// An out-of-range index is silently ignored, matching the fire-and-
    /// forget contract of status LEDs.
    pub fn set(&mut self, led: u8, on: bool) {
        if led >= self.count {
            return;
        }
        let Some(pin) = self.pins.get(usize::from(led)).copied() else {
            return;
        };

        self.gpio.write_pin(pin, !on);
        if on {
            self.states |= 1 << led;
        } else {
            self.states &= !(1 << led);
        }
    }

    /// Logical on/off state of every LED, packed LSB-first by index.
    #[must_use]
    pub const fn states(&self) -> u8 {
        self.states
    }

    /// Number of LEDs in the bank.
    #[must_use]
    pub const fn len(&self) -> u8 {
        self.count
    }

    /// Whether the bank is empty. Construction forbids it; this exists for
    /// API completeness.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }
}

impl<G> fmt::Debug for LedBank<G>
where
    G: GpioDriver,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LedBank")
            .field("count", &self.count)
            .field("states", &self.states)
            .finish_non_exhaustive()
    }
}
