//! The watchdog supervision and escalation state machine.

use core::fmt;

use hiveboard_hal::{
    ClockControl, ClockSource, DiagnosticSink, Halt, InterruptLine, PeripheralId, ResetCause,
    StackRegion, WatchdogFlags, WatchdogPeripheral,
};
use tracing::{debug, error, warn};

use crate::config::{EscalationPolicy, SupervisorConfig};
use crate::diagnostic;
use crate::error::SupervisorResult;
use crate::hooks::{SupervisorHook, SupervisorHooks};
use crate::state::{SupervisorState, SupervisorStatus};

/// Grace-policy supervisor over the windowed watchdog peripheral.
///
/// Owns the peripheral and its clock path. The embedding interrupt shim
/// routes the shared watchdog/brown-out interrupt to
/// [`dispatch_interrupt`](Self::dispatch_interrupt); the application calls
/// [`kick`](Self::kick) from its main loop faster than the configured
/// window.
pub struct WatchdogSupervisor<P, C>
where
    P: WatchdogPeripheral,
    C: ClockControl,
{
    config: SupervisorConfig,
    peripheral: P,
    clock: C,
    state: SupervisorState,
    hooks: SupervisorHooks,
}

impl<P, C> WatchdogSupervisor<P, C>
where
    P: WatchdogPeripheral,
    C: ClockControl,
{
    /// Program the peripheral and arm the watchdog.
    ///
    /// Derives the tick rate from the watchdog oscillator (the peripheral
    /// divides its input clock by four), sets timeout and window to the
    /// configured one-second-class budget, the warning threshold a small
    /// fixed tick count ahead of timeout, enables reset-on-timeout, and
    /// performs the first refresh - the watchdog is disarmed until that
    /// refresh and armed from then on.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SupervisorError::InvalidConfiguration`] when the
    /// configuration fails validation; nothing is armed in that case.
    pub fn init(
        config: SupervisorConfig,
        mut peripheral: P,
        clock: C,
        irq: &mut impl InterruptLine,
    ) -> SupervisorResult<Self> {
        config.validate()?;

        let clock_hz = clock.frequency_hz(ClockSource::WatchdogOscillator);
        let tick_hz = clock_hz >> 2;

        irq.enable();

        let mut peripheral_config = peripheral.default_config();
        peripheral_config.clock_hz = clock_hz;
        peripheral_config.timeout_ticks = tick_hz.saturating_mul(config.window_seconds);
        peripheral_config.warning_ticks = config.warning_ticks;
        peripheral_config.window_ticks = tick_hz.saturating_mul(config.window_seconds);
        peripheral_config.reset_on_timeout = true;
        peripheral.init(&peripheral_config);

        // First feed starts the watchdog.
        peripheral.refresh();

        irq.set_priority(config.irq_priority);

        debug!(
            tick_hz,
            grace = config.grace_period,
            "watchdog supervisor armed"
        );

        Ok(Self {
            config,
            peripheral,
            clock,
            state: SupervisorState::new(),
            hooks: SupervisorHooks::default(),
        })
    }

    /// Refresh the watchdog and forget all absorbed warnings.
    ///
    /// Must be called periodically faster than the configured window;
    /// missing it leads to warning and eventually timeout interrupts.
    pub fn kick(&mut self) {
        self.peripheral.refresh();
        self.state.record_kick();
    }

    /// Tear the watchdog down.
    ///
    /// Used only around persistent-storage programming, where a spurious
    /// reset mid-write must be impossible. Enables the watchdog clock
    /// first so the peripheral reset is guaranteed to take.
    pub fn deinit(&mut self) {
        self.clock.enable(ClockSource::WatchdogOscillator);
        self.clock.reset_peripheral(PeripheralId::WindowedWatchdog);
        self.peripheral.deinit();
    }

    /// Install the prologue hook; it replaces the default interrupt
    /// response entirely. Registering again overwrites.
    pub fn register_prologue(&mut self, hook: SupervisorHook) {
        self.hooks.set_prologue(hook);
    }

    /// Install the epilogue hook; it runs after every dispatch that
    /// returns. Registering again overwrites.
    pub fn register_epilogue(&mut self, hook: SupervisorHook) {
        self.hooks.set_epilogue(hook);
    }

    /// Install the hook invoked when a boot-time check finds the previous
    /// reset was watchdog-caused. Registering again overwrites.
    pub fn register_reset_check(&mut self, hook: SupervisorHook) {
        self.hooks.set_reset_check(hook);
    }

    /// Boot-time reset-cause inspection.
    ///
    /// Queries the ROM API (the live reset-cause register is not reliable
    /// across power modes); on a watchdog-caused reset the watchdog is torn
    /// down and the reset-check hook, if registered, runs once.
    pub fn check_reset_cause<R: ResetCause>(&mut self, rom: &R) {
        if rom.reset_cause().is_watchdog_reset() {
            warn!("previous reset was caused by the watchdog");
            self.deinit();
            if let Some(hook) = self.hooks.reset_check_mut() {
                hook();
            }
        }
    }

    /// Handle one firing of the shared watchdog/brown-out interrupt.
    ///
    /// A registered prologue replaces the default response entirely;
    /// otherwise the default response handles the pending flags, absorbing
    /// warnings while grace remains and escalating once it is exhausted.
    /// The epilogue, if registered, runs after either path - unless
    /// escalation halted or reset the device, in which case execution never
    /// gets there.
    pub fn dispatch_interrupt<S, D, H>(&mut self, stack: &S, sink: &mut D, halt: &H)
    where
        S: StackRegion,
        D: DiagnosticSink,
        H: Halt,
    {
        let ran_prologue = if let Some(prologue) = self.hooks.prologue_mut() {
            prologue();
            true
        } else {
            false
        };
        if !ran_prologue {
            self.default_response(stack, sink, halt);
        }

        if let Some(epilogue) = self.hooks.epilogue_mut() {
            epilogue();
        }
    }

    /// Warnings absorbed since the last kick or escalation.
    #[must_use]
    pub fn refresh_count(&self) -> u8 {
        self.state.refresh_count()
    }

    /// Current supervisor status.
    #[must_use]
    pub fn status(&self) -> SupervisorStatus {
        self.state.status()
    }

    /// Lifetime counters of the state machine.
    #[must_use]
    pub const fn state(&self) -> &SupervisorState {
        &self.state
    }

    /// The configuration this supervisor was built with.
    #[must_use]
    pub const fn config(&self) -> &SupervisorConfig {
        &self.config
    }

    fn default_response<S, D, H>(&mut self, stack: &S, sink: &mut D, halt: &H)
    where
        S: StackRegion,
        D: DiagnosticSink,
        H: Halt,
    {
        let flags = self.peripheral.status_flags();

        if flags.timeout {
            // The reset should have fired before this interrupt could run;
            // reaching here means the reset path was missed.
            self.peripheral.disable();
            self.peripheral.clear_status_flags(WatchdogFlags::TIMEOUT);
            warn!("watchdog timeout flag raised without a device reset");
        }

        if flags.warning {
            self.peripheral.clear_status_flags(WatchdogFlags::WARNING);
            match self.state.absorb_warning(self.config.grace_period) {
                Some(count) => {
                    self.peripheral.refresh();
                    debug!(
                        count,
                        grace = self.config.grace_period,
                        "watchdog warning absorbed"
                    );
                }
                None => self.escalate(stack, sink, halt),
            }
        }
    }

    fn escalate<S, D, H>(&mut self, stack: &S, sink: &mut D, halt: &H) -> !
    where
        S: StackRegion,
        D: DiagnosticSink,
        H: Halt,
    {
        error!(
            grace = self.config.grace_period,
            "watchdog grace budget exhausted"
        );
        diagnostic::unwind_stack(stack, sink, &mut self.peripheral);

        match self.config.escalation {
            EscalationPolicy::ResetDevice => {
                // The watchdog stays armed; the pending timeout resets the
                // device while we spin.
                error!("watchdog resets device");
            }
            EscalationPolicy::Halt => {
                error!("device halted");
                self.clock.reset_peripheral(PeripheralId::WindowedWatchdog);
                self.peripheral.deinit();
            }
        }

        halt.halt()
    }
}

impl<P, C> fmt::Debug for WatchdogSupervisor<P, C>
where
    P: WatchdogPeripheral,
    C: ClockControl,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WatchdogSupervisor")
            .field("status", &self.state.status())
            .field("refresh_count", &self.state.refresh_count())
            .field("hooks", &self.hooks)
            .finish_non_exhaustive()
    }
}
