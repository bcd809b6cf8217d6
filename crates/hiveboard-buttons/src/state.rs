//! Per-button debounce state.

use hiveboard_hal::PinId;

/// A debounced press or release transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEdge {
    /// The button settled into the pressed state.
    Pressed,
    /// The button settled into the released state.
    Released,
}

/// 8-bit shift history of raw pin samples, newest bit at the LSB.
///
/// Button pins are pulled up and active low, so an all-zero register means
/// the pin has read pressed for 8 consecutive samples and an all-one
/// register means released for 8 consecutive samples. Anything in between
/// is still bouncing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BounceRegister(u8);

impl BounceRegister {
    /// Register value once a button has settled released.
    pub const SETTLED_RELEASED: u8 = 0xFF;
    /// Register value once a button has settled pressed.
    pub const SETTLED_PRESSED: u8 = 0x00;

    /// New register, seeded as settled released.
    #[must_use]
    pub const fn new() -> Self {
        Self(Self::SETTLED_RELEASED)
    }

    /// Shift one raw sample in at the LSB and return the new value.
    pub fn shift_in(&mut self, level_high: bool) -> u8 {
        self.0 = (self.0 << 1) | u8::from(level_high);
        self.0
    }

    /// Current register value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// True once 8 consecutive samples read pressed (low).
    #[must_use]
    pub const fn settled_pressed(self) -> bool {
        self.0 == Self::SETTLED_PRESSED
    }

    /// True once 8 consecutive samples read released (high).
    #[must_use]
    pub const fn settled_released(self) -> bool {
        self.0 == Self::SETTLED_RELEASED
    }
}

impl Default for BounceRegister {
    fn default() -> Self {
        Self::new()
    }
}

/// One physical button: its pin, bounce history and debounced state.
#[derive(Debug, Clone, Copy)]
pub struct Button {
    pin: PinId,
    bounce: BounceRegister,
    pressed: bool,
}

impl Button {
    /// New button on the given pin, settled released.
    #[must_use]
    pub const fn new(pin: PinId) -> Self {
        Self {
            pin,
            bounce: BounceRegister::new(),
            pressed: false,
        }
    }

    /// Pin this button samples.
    #[must_use]
    pub const fn pin(self) -> PinId {
        self.pin
    }

    /// Debounced belief of whether the button is pressed.
    #[must_use]
    pub const fn is_pressed(self) -> bool {
        self.pressed
    }

    /// Feed one raw sample.
    ///
    /// Returns the bounce register value after the shift, plus the debounced
    /// edge if this sample settled one. The state flips to pressed only on
    /// an all-zero register while released, and to released only on an
    /// all-one register while pressed; every other value leaves it alone.
    pub fn sample(&mut self, level_high: bool) -> (u8, Option<ButtonEdge>) {
        let value = self.bounce.shift_in(level_high);

        let edge = if self.bounce.settled_pressed() && !self.pressed {
            self.pressed = true;
            Some(ButtonEdge::Pressed)
        } else if self.bounce.settled_released() && self.pressed {
            self.pressed = false;
            Some(ButtonEdge::Released)
        } else {
            None
        };

        (value, edge)
    }
}
