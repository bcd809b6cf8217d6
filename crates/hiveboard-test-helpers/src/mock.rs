//! In-memory fakes for the hardware collaborator contracts.

use std::sync::Arc;

use parking_lot::Mutex;

use hiveboard_hal::{
    ClockControl, ClockSource, DiagnosticSink, EdgeInterrupt, GpioDriver, Halt, HalError,
    HalResult, InterruptLine, PeripheralId, PinId, ResetCause, ResetCauseFlags, StackRegion,
    TimerHandle, TimerService, WatchdogFlags, WatchdogPeripheral, WatchdogPeripheralConfig,
};

/// Shared GPIO port fake.
///
/// All pins idle high, as they would under the board pull-ups. Tests drive
/// levels through [`press`](Self::press)/[`release`](Self::release) (button
/// convention: pressed = low) or [`set_pin_level`](Self::set_pin_level).
#[derive(Debug, Clone)]
pub struct FakeGpio {
    inner: Arc<Mutex<GpioState>>,
}

#[derive(Debug)]
struct GpioState {
    levels: u32,
    inputs: Vec<PinId>,
    outputs: Vec<PinId>,
    writes: Vec<(PinId, bool)>,
}

impl FakeGpio {
    /// New port with every pin reading high.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(GpioState {
                levels: u32::MAX,
                inputs: Vec::new(),
                outputs: Vec::new(),
                writes: Vec::new(),
            })),
        }
    }

    /// Force a pin to a raw level.
    pub fn set_pin_level(&self, pin: PinId, high: bool) {
        let mut state = self.inner.lock();
        if high {
            state.levels |= pin.mask();
        } else {
            state.levels &= !pin.mask();
        }
    }

    /// Close the contact of an active-low button: pin reads low.
    pub fn press(&self, pin: PinId) {
        self.set_pin_level(pin, false);
    }

    /// Open the contact of an active-low button: pin reads high.
    pub fn release(&self, pin: PinId) {
        self.set_pin_level(pin, true);
    }

    /// Raw level of one pin.
    #[must_use]
    pub fn pin_level(&self, pin: PinId) -> bool {
        self.inner.lock().levels & pin.mask() != 0
    }

    /// Pins configured as pulled-up inputs, in configuration order.
    #[must_use]
    pub fn configured_inputs(&self) -> Vec<PinId> {
        self.inner.lock().inputs.clone()
    }

    /// Pins configured as outputs, in configuration order.
    #[must_use]
    pub fn configured_outputs(&self) -> Vec<PinId> {
        self.inner.lock().outputs.clone()
    }

    /// Every `write_pin` call in order.
    #[must_use]
    pub fn writes(&self) -> Vec<(PinId, bool)> {
        self.inner.lock().writes.clone()
    }
}

impl Default for FakeGpio {
    fn default() -> Self {
        Self::new()
    }
}

impl GpioDriver for FakeGpio {
    fn configure_input_pullup(&mut self, pin: PinId) {
        let mut state = self.inner.lock();
        state.inputs.push(pin);
        // The pull-up holds an untouched input high.
        state.levels |= pin.mask();
    }

    fn configure_output(&mut self, pin: PinId) {
        self.inner.lock().outputs.push(pin);
    }

    fn read_port(&self) -> u32 {
        self.inner.lock().levels
    }

    fn write_pin(&mut self, pin: PinId, level: bool) {
        let mut state = self.inner.lock();
        if level {
            state.levels |= pin.mask();
        } else {
            state.levels &= !pin.mask();
        }
        state.writes.push((pin, level));
    }
}

/// Timer service fake recording allocation and arming.
#[derive(Debug, Clone)]
pub struct FakeTimer {
    inner: Arc<Mutex<TimerState>>,
}

#[derive(Debug)]
struct TimerState {
    capacity: u8,
    allocated: u8,
    armed: Option<(TimerHandle, u32)>,
    starts: u32,
    stops: u32,
}

impl FakeTimer {
    /// New service with free timer slots.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(8)
    }

    /// New service with `capacity` slots; zero exercises exhaustion paths.
    #[must_use]
    pub fn with_capacity(capacity: u8) -> Self {
        Self {
            inner: Arc::new(Mutex::new(TimerState {
                capacity,
                allocated: 0,
                armed: None,
                starts: 0,
                stops: 0,
            })),
        }
    }

    /// New service that fails every allocation.
    #[must_use]
    pub fn exhausted() -> Self {
        Self::with_capacity(0)
    }

    /// Whether a single-shot is currently armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.inner.lock().armed.is_some()
    }

    /// Delay of the currently armed single-shot, if any.
    #[must_use]
    pub fn armed_delay_ms(&self) -> Option<u32> {
        self.inner.lock().armed.map(|(_, delay)| delay)
    }

    /// Total `start_single_shot` calls.
    #[must_use]
    pub fn start_count(&self) -> u32 {
        self.inner.lock().starts
    }

    /// Total `stop` calls.
    #[must_use]
    pub fn stop_count(&self) -> u32 {
        self.inner.lock().stops
    }
}

impl Default for FakeTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerService for FakeTimer {
    fn allocate(&mut self) -> HalResult<TimerHandle> {
        let mut state = self.inner.lock();
        if state.allocated >= state.capacity {
            return Err(HalError::NoTimerAvailable);
        }
        let handle = TimerHandle::new(state.allocated);
        state.allocated += 1;
        Ok(handle)
    }

    fn start_single_shot(&mut self, handle: TimerHandle, delay_ms: u32) {
        let mut state = self.inner.lock();
        state.armed = Some((handle, delay_ms));
        state.starts += 1;
    }

    fn stop(&mut self, handle: TimerHandle) {
        let mut state = self.inner.lock();
        if let Some((armed, _)) = state.armed {
            if armed == handle {
                state.armed = None;
            }
        }
        state.stops += 1;
    }
}

/// Combined pin-change interrupt fake.
#[derive(Debug, Clone)]
pub struct FakeEdgeInterrupt {
    inner: Arc<Mutex<EdgeState>>,
}

#[derive(Debug, Default)]
struct EdgeState {
    pin_mask: u32,
    polarity_mask: u32,
    enabled: bool,
    priority: Option<u8>,
    enables: u32,
    disables: u32,
}

impl FakeEdgeInterrupt {
    /// New, unconfigured and disabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(EdgeState::default())),
        }
    }

    /// Whether edge callbacks are currently enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }

    /// Pin mask passed to `configure`.
    #[must_use]
    pub fn configured_mask(&self) -> u32 {
        self.inner.lock().pin_mask
    }

    /// Polarity mask passed to `configure`.
    #[must_use]
    pub fn configured_polarity(&self) -> u32 {
        self.inner.lock().polarity_mask
    }

    /// Programmed NVIC priority, if any.
    #[must_use]
    pub fn priority(&self) -> Option<u8> {
        self.inner.lock().priority
    }

    /// Total `disable_callback` calls.
    #[must_use]
    pub fn disable_count(&self) -> u32 {
        self.inner.lock().disables
    }
}

impl Default for FakeEdgeInterrupt {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeInterrupt for FakeEdgeInterrupt {
    fn configure(&mut self, pin_mask: u32, polarity_mask: u32) {
        let mut state = self.inner.lock();
        state.pin_mask = pin_mask;
        state.polarity_mask = polarity_mask;
    }

    fn enable_callback(&mut self) {
        let mut state = self.inner.lock();
        state.enabled = true;
        state.enables += 1;
    }

    fn disable_callback(&mut self) {
        let mut state = self.inner.lock();
        state.enabled = false;
        state.disables += 1;
    }

    fn set_priority(&mut self, priority: u8) {
        self.inner.lock().priority = Some(priority);
    }
}

/// Peripheral interrupt line fake.
#[derive(Debug, Clone)]
pub struct FakeInterruptLine {
    inner: Arc<Mutex<LineState>>,
}

#[derive(Debug, Default)]
struct LineState {
    enabled: bool,
    priority: Option<u8>,
}

impl FakeInterruptLine {
    /// New, disabled line.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(LineState::default())),
        }
    }

    /// Whether the line has been enabled.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().enabled
    }

    /// Programmed NVIC priority, if any.
    #[must_use]
    pub fn priority(&self) -> Option<u8> {
        self.inner.lock().priority
    }
}

impl Default for FakeInterruptLine {
    fn default() -> Self {
        Self::new()
    }
}

impl InterruptLine for FakeInterruptLine {
    fn enable(&mut self) {
        self.inner.lock().enabled = true;
    }

    fn set_priority(&mut self, priority: u8) {
        self.inner.lock().priority = Some(priority);
    }
}

/// Windowed watchdog peripheral fake with scriptable status flags.
#[derive(Debug, Clone)]
pub struct FakeWatchdogPeripheral {
    inner: Arc<Mutex<WatchdogState>>,
}

#[derive(Debug, Default)]
struct WatchdogState {
    init_config: Option<WatchdogPeripheralConfig>,
    flags: WatchdogFlags,
    refreshes: u32,
    disabled: bool,
    deinitialized: bool,
}

impl FakeWatchdogPeripheral {
    /// New peripheral with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(WatchdogState::default())),
        }
    }

    /// Script the warning flag as pending.
    pub fn raise_warning(&self) {
        self.inner.lock().flags.warning = true;
    }

    /// Script the timeout flag as pending.
    pub fn raise_timeout(&self) {
        self.inner.lock().flags.timeout = true;
    }

    /// Configuration passed to `init`, if any.
    #[must_use]
    pub fn init_config(&self) -> Option<WatchdogPeripheralConfig> {
        self.inner.lock().init_config
    }

    /// Total `refresh` calls.
    #[must_use]
    pub fn refresh_count(&self) -> u32 {
        self.inner.lock().refreshes
    }

    /// Currently pending flags.
    #[must_use]
    pub fn pending_flags(&self) -> WatchdogFlags {
        self.inner.lock().flags
    }

    /// Whether `disable` has been called.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.inner.lock().disabled
    }

    /// Whether `deinit` has been called.
    #[must_use]
    pub fn is_deinitialized(&self) -> bool {
        self.inner.lock().deinitialized
    }
}

impl Default for FakeWatchdogPeripheral {
    fn default() -> Self {
        Self::new()
    }
}

impl WatchdogPeripheral for FakeWatchdogPeripheral {
    fn default_config(&self) -> WatchdogPeripheralConfig {
        WatchdogPeripheralConfig::default()
    }

    fn init(&mut self, config: &WatchdogPeripheralConfig) {
        let mut state = self.inner.lock();
        state.init_config = Some(*config);
        state.disabled = false;
        state.deinitialized = false;
    }

    fn refresh(&mut self) {
        self.inner.lock().refreshes += 1;
    }

    fn disable(&mut self) {
        self.inner.lock().disabled = true;
    }

    fn deinit(&mut self) {
        self.inner.lock().deinitialized = true;
    }

    fn status_flags(&self) -> WatchdogFlags {
        self.inner.lock().flags
    }

    fn clear_status_flags(&mut self, flags: WatchdogFlags) {
        let mut state = self.inner.lock();
        if flags.timeout {
            state.flags.timeout = false;
        }
        if flags.warning {
            state.flags.warning = false;
        }
    }
}

/// Clock/reset driver fake with a fixed source frequency.
#[derive(Debug, Clone)]
pub struct FakeClock {
    hz: u32,
    inner: Arc<Mutex<ClockState>>,
}

#[derive(Debug, Default)]
struct ClockState {
    enabled: Vec<ClockSource>,
    resets: Vec<PeripheralId>,
}

impl FakeClock {
    /// New driver reporting the 32.768 kHz watchdog oscillator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_frequency(32_768)
    }

    /// New driver reporting `hz` for every source.
    #[must_use]
    pub fn with_frequency(hz: u32) -> Self {
        Self {
            hz,
            inner: Arc::new(Mutex::new(ClockState::default())),
        }
    }

    /// Sources enabled so far, in order.
    #[must_use]
    pub fn enabled_sources(&self) -> Vec<ClockSource> {
        self.inner.lock().enabled.clone()
    }

    /// Peripheral resets pulsed so far, in order.
    #[must_use]
    pub fn peripheral_resets(&self) -> Vec<PeripheralId> {
        self.inner.lock().resets.clone()
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl ClockControl for FakeClock {
    fn frequency_hz(&self, _source: ClockSource) -> u32 {
        self.hz
    }

    fn enable(&mut self, source: ClockSource) {
        self.inner.lock().enabled.push(source);
    }

    fn reset_peripheral(&mut self, peripheral: PeripheralId) {
        self.inner.lock().resets.push(peripheral);
    }
}

/// ROM reset-cause fake.
#[derive(Debug, Clone, Copy)]
pub struct FakeResetCause {
    flags: ResetCauseFlags,
}

impl FakeResetCause {
    /// A clean power-on: no causes flagged.
    #[must_use]
    pub fn power_on() -> Self {
        Self {
            flags: ResetCauseFlags::from_bits(0),
        }
    }

    /// A watchdog-caused reset.
    #[must_use]
    pub fn watchdog() -> Self {
        Self {
            flags: ResetCauseFlags::WATCHDOG,
        }
    }
}

impl ResetCause for FakeResetCause {
    fn reset_cause(&self) -> ResetCauseFlags {
        self.flags
    }
}

/// Stack region fake backed by a word vector.
#[derive(Debug, Clone)]
pub struct FakeStackRegion {
    base: u32,
    words: Vec<u32>,
}

impl FakeStackRegion {
    /// Region whose stack pointer is `base` and whose live content is
    /// `words`, oldest frame last.
    #[must_use]
    pub fn new(base: u32, words: Vec<u32>) -> Self {
        Self { base, words }
    }
}

impl StackRegion for FakeStackRegion {
    fn bounds(&self) -> (u32, u32) {
        (self.base, self.base + 4 * self.words.len() as u32)
    }

    fn read_word(&self, address: u32) -> u32 {
        let index = ((address - self.base) / 4) as usize;
        self.words.get(index).copied().unwrap_or(0)
    }
}

/// Diagnostic sink collecting every dumped word.
#[derive(Debug, Default)]
pub struct RecordingSink {
    words: Vec<(u32, u32)>,
}

impl RecordingSink {
    /// New, empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(address, word)` recorded, in dump order.
    #[must_use]
    pub fn words(&self) -> &[(u32, u32)] {
        &self.words
    }
}

impl DiagnosticSink for RecordingSink {
    fn record_word(&mut self, address: u32, word: u32) {
        self.words.push((address, word));
    }
}

/// Halt fake that panics instead of spinning, so tests observe the
/// escalation terminus with `#[should_panic]` or `catch_unwind`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicHalt;

impl Halt for PanicHalt {
    fn halt(&self) -> ! {
        panic!("device halted");
    }
}

/// Recorder for button press callbacks.
#[derive(Debug, Clone, Default)]
pub struct PressRecorder {
    presses: Arc<Mutex<Vec<u8>>>,
}

impl PressRecorder {
    /// New, empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A callback that records every reported button index here.
    #[must_use]
    pub fn callback(&self) -> Box<dyn FnMut(u8) + Send> {
        let presses = Arc::clone(&self.presses);
        Box::new(move |index| presses.lock().push(index))
    }

    /// Button indices reported so far, in order.
    #[must_use]
    pub fn presses(&self) -> Vec<u8> {
        self.presses.lock().clone()
    }

    /// Number of presses reported so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.presses.lock().len()
    }
}

/// Recorder for supervisor hooks.
#[derive(Debug, Clone, Default)]
pub struct HookProbe {
    fires: Arc<Mutex<u32>>,
}

impl HookProbe {
    /// New, unfired probe.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A hook that counts its invocations here.
    #[must_use]
    pub fn hook(&self) -> Box<dyn FnMut() + Send> {
        let fires = Arc::clone(&self.fires);
        Box::new(move || *fires.lock() += 1)
    }

    /// Times the hook has fired.
    #[must_use]
    pub fn count(&self) -> u32 {
        *self.fires.lock()
    }
}
