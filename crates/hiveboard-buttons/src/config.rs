//! Scanner configuration.

use hiveboard_hal::PinId;

use crate::error::{ButtonError, ButtonResult};

/// Most buttons any supported board carries.
pub const MAX_BOARD_BUTTONS: usize = 4;

/// Default single-shot scan delay between samples.
pub const DEFAULT_SCAN_INTERVAL_MS: u32 = 10;

/// Default NVIC priority for the edge interrupt.
///
/// Deliberately low: the edge handler starts timers, so it must not preempt
/// the timer subsystem it calls into.
pub const DEFAULT_EDGE_IRQ_PRIORITY: u8 = 0x80;

/// Button scanner configuration.
///
/// Constructed through [`ScannerConfig::builder`], which validates the
/// board description before a scanner can exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    board_pins: [PinId; MAX_BOARD_BUTTONS],
    board_buttons: u8,
    num_buttons: u8,
    scan_interval_ms: u32,
    edge_irq_priority: u8,
}

impl ScannerConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> ScannerConfigBuilder {
        ScannerConfigBuilder::default()
    }

    /// Pins of the buttons actually scanned, in button-index order.
    #[must_use]
    pub fn scanned_pins(&self) -> &[PinId] {
        self.board_pins
            .get(..usize::from(self.num_buttons))
            .unwrap_or(&[])
    }

    /// Number of buttons scanned.
    #[must_use]
    pub const fn num_buttons(&self) -> u8 {
        self.num_buttons
    }

    /// Delay between scan samples in milliseconds.
    #[must_use]
    pub const fn scan_interval_ms(&self) -> u32 {
        self.scan_interval_ms
    }

    /// NVIC priority programmed for the edge interrupt.
    #[must_use]
    pub const fn edge_irq_priority(&self) -> u8 {
        self.edge_irq_priority
    }
}

/// Builder for [`ScannerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ScannerConfigBuilder {
    board_pins: [Option<PinId>; MAX_BOARD_BUTTONS],
    board_buttons: usize,
    overflowed: bool,
    num_buttons: Option<u8>,
    scan_interval_ms: Option<u32>,
    edge_irq_priority: Option<u8>,
}

impl ScannerConfigBuilder {
    /// Describe the board: one pin per physical button, in index order.
    #[must_use]
    pub fn board_pins(mut self, pins: &[PinId]) -> Self {
        self.board_buttons = pins.len();
        self.overflowed = pins.len() > MAX_BOARD_BUTTONS;
        for (slot, pin) in self.board_pins.iter_mut().zip(pins.iter().copied()) {
            *slot = Some(pin);
        }
        self
    }

    /// Scan only the first `count` board buttons.
    ///
    /// Defaults to every button the board has.
    #[must_use]
    pub fn num_buttons(mut self, count: u8) -> Self {
        self.num_buttons = Some(count);
        self
    }

    /// Delay between scan samples in milliseconds.
    #[must_use]
    pub fn scan_interval_ms(mut self, ms: u32) -> Self {
        self.scan_interval_ms = Some(ms);
        self
    }

    /// NVIC priority for the edge interrupt.
    #[must_use]
    pub fn edge_irq_priority(mut self, priority: u8) -> Self {
        self.edge_irq_priority = Some(priority);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ButtonError::NoButtons`] when the board description is
    /// empty, [`ButtonError::TooManyButtons`] when more buttons are
    /// requested than described, and
    /// [`ButtonError::InvalidConfiguration`] for out-of-range values.
    pub fn build(self) -> ButtonResult<ScannerConfig> {
        if self.board_buttons == 0 {
            return Err(ButtonError::NoButtons);
        }
        if self.overflowed {
            return Err(ButtonError::InvalidConfiguration {
                reason: "board describes more buttons than the fixed capacity",
            });
        }

        // Capacity checked above, so the description fits the fixed array.
        let board_buttons = self.board_buttons as u8;
        let num_buttons = self.num_buttons.unwrap_or(board_buttons);
        if num_buttons == 0 {
            return Err(ButtonError::NoButtons);
        }
        if num_buttons > board_buttons {
            return Err(ButtonError::TooManyButtons {
                requested: num_buttons,
                available: board_buttons,
            });
        }

        let mut board_pins = [PinId::new(0); MAX_BOARD_BUTTONS];
        for (slot, pin) in board_pins.iter_mut().zip(self.board_pins.iter()) {
            if let Some(pin) = pin {
                if pin.index() >= 32 {
                    return Err(ButtonError::InvalidConfiguration {
                        reason: "button pin index exceeds the port width",
                    });
                }
                *slot = *pin;
            }
        }

        let scan_interval_ms = self.scan_interval_ms.unwrap_or(DEFAULT_SCAN_INTERVAL_MS);
        if scan_interval_ms == 0 {
            return Err(ButtonError::InvalidConfiguration {
                reason: "scan interval must be at least 1 ms",
            });
        }

        Ok(ScannerConfig {
            board_pins,
            board_buttons,
            num_buttons,
            scan_interval_ms,
            edge_irq_priority: self.edge_irq_priority.unwrap_or(DEFAULT_EDGE_IRQ_PRIORITY),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_scan_every_board_button() {
        let config = ScannerConfig::builder()
            .board_pins(&[PinId::new(14), PinId::new(15)])
            .build()
            .unwrap();

        assert_eq!(config.num_buttons(), 2);
        assert_eq!(config.scanned_pins(), [PinId::new(14), PinId::new(15)]);
        assert_eq!(config.scan_interval_ms(), DEFAULT_SCAN_INTERVAL_MS);
    }

    #[test]
    fn rejects_empty_board() {
        let result = ScannerConfig::builder().build();
        assert_eq!(result.unwrap_err(), ButtonError::NoButtons);
    }

    #[test]
    fn rejects_more_buttons_than_the_board_has() {
        let result = ScannerConfig::builder()
            .board_pins(&[PinId::new(14)])
            .num_buttons(2)
            .build();

        assert_eq!(
            result.unwrap_err(),
            ButtonError::TooManyButtons {
                requested: 2,
                available: 1,
            }
        );
    }

    #[test]
    fn rejects_zero_scan_interval() {
        let result = ScannerConfig::builder()
            .board_pins(&[PinId::new(14)])
            .scan_interval_ms(0)
            .build();

        assert!(matches!(
            result,
            Err(ButtonError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_pins_outside_the_port() {
        let result = ScannerConfig::builder()
            .board_pins(&[PinId::new(32)])
            .build();

        assert!(matches!(
            result,
            Err(ButtonError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn rejects_boards_beyond_capacity() {
        let pins = [
            PinId::new(0),
            PinId::new(1),
            PinId::new(2),
            PinId::new(3),
            PinId::new(4),
        ];
        let result = ScannerConfig::builder().board_pins(&pins).build();

        assert!(matches!(
            result,
            Err(ButtonError::InvalidConfiguration { .. })
        ));
    }
}
