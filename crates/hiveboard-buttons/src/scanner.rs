//! The debounce and edge-interrupt scanning state machine.

use alloc::boxed::Box;
use core::fmt;

use hiveboard_hal::{EdgeInterrupt, GpioDriver, TimerHandle, TimerService};
use tracing::{debug, trace};

use crate::config::{MAX_BOARD_BUTTONS, ScannerConfig};
use crate::error::ButtonResult;
use crate::state::{BounceRegister, Button, ButtonEdge};

/// Press notification callback, invoked with the button index.
///
/// Runs synchronously on whatever execution context drives the scan tick;
/// it must not block.
pub type PressCallback = Box<dyn FnMut(u8) + Send>;

/// Timer-and-interrupt driven button debounce scanner.
///
/// Owns every piece of per-button state and the hardware handles it drives.
/// The embedding interrupt shim routes the group-interrupt event to
/// [`on_edge_interrupt`](Self::on_edge_interrupt) and the scan timer expiry
/// to [`scan_tick`](Self::scan_tick); nothing else mutates button state, so
/// the machine needs no locking.
pub struct ButtonScanner<G, T, E>
where
    G: GpioDriver,
    T: TimerService,
    E: EdgeInterrupt,
{
    config: ScannerConfig,
    gpio: G,
    timer: T,
    edge_irq: E,
    timer_handle: TimerHandle,
    buttons: [Button; MAX_BOARD_BUTTONS],
    callback: PressCallback,
    pin_mask: u32,
    scan_active: bool,
    pressed_at_boot: bool,
}

impl<G, T, E> ButtonScanner<G, T, E>
where
    G: GpioDriver,
    T: TimerService,
    E: EdgeInterrupt,
{
    /// Bring the scanner up.
    ///
    /// Configures every scanned pin as a pulled-up input, arms the combined
    /// edge interrupt across them at a lowered priority, allocates the scan
    /// timer and runs one immediate scan pass so state present at boot
    /// (for instance a button held while waking from deep sleep) enters the
    /// debounce pipeline straight away.
    ///
    /// # Errors
    ///
    /// Returns a configuration error from [`ScannerConfig`] validation or
    /// [`crate::ButtonError::Hal`] when the timer service is exhausted; on
    /// failure nothing stays armed.
    pub fn new(
        config: ScannerConfig,
        mut gpio: G,
        mut timer: T,
        mut edge_irq: E,
        callback: PressCallback,
    ) -> ButtonResult<Self> {
        // Claim the fallible resource first: a failed init must leave no
        // interrupt enabled and no timer armed.
        let timer_handle = timer.allocate()?;

        let mut pin_mask = 0u32;
        for pin in config.scanned_pins() {
            gpio.configure_input_pullup(*pin);
            pin_mask |= pin.mask();
        }

        // Edge trigger, OR across all button pins, active low.
        edge_irq.configure(pin_mask, 0);
        edge_irq.enable_callback();
        edge_irq.set_priority(config.edge_irq_priority());

        let mut buttons = [Button::new(hiveboard_hal::PinId::new(0)); MAX_BOARD_BUTTONS];
        for (slot, pin) in buttons.iter_mut().zip(config.scanned_pins()) {
            *slot = Button::new(*pin);
        }

        let mut scanner = Self {
            config,
            gpio,
            timer,
            edge_irq,
            timer_handle,
            buttons,
            callback,
            pin_mask,
            scan_active: false,
            pressed_at_boot: false,
        };

        scanner.scan_tick();
        scanner.pressed_at_boot = scanner.raw_state() != 0;

        debug!(
            buttons = scanner.config.num_buttons(),
            pressed_at_boot = scanner.pressed_at_boot,
            "button scanner initialised"
        );

        Ok(scanner)
    }

    /// Instantaneous raw press mask, independent of the debounce machine.
    ///
    /// Bit `i` is set when button `i` currently reads electrically pressed
    /// (pin low under the pull-up), packed LSB-first by button index.
    #[must_use]
    pub fn raw_state(&self) -> u32 {
        let raw = self.read_button_pins();
        let mut state = 0u32;
        for (i, pin) in self.config.scanned_pins().iter().enumerate() {
            let high = (raw >> u32::from(pin.index())) & 1 == 1;
            state |= u32::from(!high) << i;
        }
        state
    }

    /// Whether any scanned button read pressed at the moment
    /// [`new`](Self::new) returned.
    #[must_use]
    pub const fn pressed_at_boot(&self) -> bool {
        self.pressed_at_boot
    }

    /// Whether the periodic scan timer is currently driving polling.
    #[must_use]
    pub const fn scan_active(&self) -> bool {
        self.scan_active
    }

    /// Group-interrupt handler: wake polling on a contact edge.
    ///
    /// Masks further edge callbacks while the contacts chatter and arms the
    /// first single-shot scan tick. A spurious edge with every pin already
    /// reading released is ignored.
    pub fn on_edge_interrupt(&mut self) {
        let raw = self.read_button_pins();
        if raw != self.pin_mask {
            self.edge_irq.disable_callback();
            self.timer
                .start_single_shot(self.timer_handle, self.config.scan_interval_ms());
            self.scan_active = true;
        }
    }

    /// One scan pass over every button.
    ///
    /// Shifts the freshly sampled level into each bounce register, applies
    /// the two-edge transition rule, reports debounced presses through the
    /// callback, and either re-arms the single-shot timer (something still
    /// unsettled or held) or returns to edge-interrupt idle (every register
    /// reads settled released).
    pub fn scan_tick(&mut self) {
        let raw = self.read_button_pins();
        let mut settled = BounceRegister::SETTLED_RELEASED;

        let count = usize::from(self.config.num_buttons());
        for (i, button) in self.buttons.iter_mut().take(count).enumerate() {
            let high = (raw >> u32::from(button.pin().index())) & 1 == 1;
            let (value, edge) = button.sample(high);
            settled &= value;

            match edge {
                Some(ButtonEdge::Pressed) => {
                    let index = i as u8;
                    debug!(button = index, "button press debounced");
                    (self.callback)(index);
                }
                Some(ButtonEdge::Released) => {
                    trace!(button = i, "button release debounced");
                }
                None => {}
            }
        }

        if settled == BounceRegister::SETTLED_RELEASED {
            // Every button settled released: hand detection back to edges.
            self.edge_irq.enable_callback();
            self.timer.stop(self.timer_handle);
            self.scan_active = false;
        } else {
            self.timer
                .start_single_shot(self.timer_handle, self.config.scan_interval_ms());
            self.scan_active = true;
        }
    }

    /// The configuration this scanner was built with.
    #[must_use]
    pub const fn config(&self) -> &ScannerConfig {
        &self.config
    }

    fn read_button_pins(&self) -> u32 {
        self.gpio.read_port() & self.pin_mask
    }
}

impl<G, T, E> fmt::Debug for ButtonScanner<G, T, E>
where
    G: GpioDriver,
    T: TimerService,
    E: EdgeInterrupt,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ButtonScanner")
            .field("num_buttons", &self.config.num_buttons())
            .field("scan_active", &self.scan_active)
            .field("pressed_at_boot", &self.pressed_at_boot)
            .finish_non_exhaustive()
    }
}
