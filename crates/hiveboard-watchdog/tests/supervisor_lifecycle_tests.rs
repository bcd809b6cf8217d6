//! Tests for full supervisor lifecycle scenarios.

use std::panic::{AssertUnwindSafe, catch_unwind};

use hiveboard_hal::{ClockSource, PeripheralId, WatchdogFlags};
use hiveboard_test_helpers::prelude::*;
use hiveboard_watchdog::prelude::*;

struct Rig {
    peripheral: FakeWatchdogPeripheral,
    clock: FakeClock,
    irq: FakeInterruptLine,
    stack: FakeStackRegion,
}

impl Rig {
    fn new() -> Self {
        Self {
            peripheral: FakeWatchdogPeripheral::new(),
            clock: FakeClock::new(),
            irq: FakeInterruptLine::new(),
            stack: FakeStackRegion::new(0x2000_0000, vec![0xDEAD_BEEF, 0x1234_5678]),
        }
    }

    fn supervisor(
        &mut self,
        config: SupervisorConfig,
    ) -> SupervisorResult<WatchdogSupervisor<FakeWatchdogPeripheral, FakeClock>> {
        WatchdogSupervisor::init(
            config,
            self.peripheral.clone(),
            self.clock.clone(),
            &mut self.irq,
        )
    }
}

#[test]
fn init_programs_the_peripheral_and_arms_it() {
    let mut rig = Rig::new();
    let supervisor = must(rig.supervisor(SupervisorConfig::default()));

    let programmed = must_some(rig.peripheral.init_config(), "peripheral was programmed");
    // 32.768 kHz oscillator divided by four, one second budget.
    assert_eq!(programmed.clock_hz, 32_768);
    assert_eq!(programmed.timeout_ticks, 8_192);
    assert_eq!(programmed.window_ticks, 8_192);
    assert_eq!(programmed.warning_ticks, 512);
    assert!(programmed.reset_on_timeout);

    // The first refresh is what arms the watchdog.
    assert_eq!(rig.peripheral.refresh_count(), 1);
    assert!(rig.irq.is_enabled());
    assert_eq!(rig.irq.priority(), Some(1));
    assert_eq!(supervisor.status(), SupervisorStatus::Armed);
}

#[test]
fn init_rejects_an_invalid_configuration_without_arming() {
    let mut rig = Rig::new();
    let config = SupervisorConfig {
        warning_ticks: 0,
        ..SupervisorConfig::default()
    };

    let err = must_err(rig.supervisor(config));

    assert!(matches!(err, SupervisorError::InvalidConfiguration { .. }));
    assert!(!rig.irq.is_enabled());
    assert!(rig.peripheral.init_config().is_none());
    assert_eq!(rig.peripheral.refresh_count(), 0);
}

#[test]
fn warnings_within_grace_are_absorbed_by_auto_refresh() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();

    for expected in 1..=6u8 {
        rig.peripheral.raise_warning();
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);

        assert_eq!(supervisor.refresh_count(), expected);
        assert_eq!(supervisor.status(), SupervisorStatus::WarningGrace);
        assert_eq!(rig.peripheral.pending_flags(), WatchdogFlags::NONE);
    }

    // One init refresh plus one per absorbed warning.
    assert_eq!(rig.peripheral.refresh_count(), 7);
    assert!(sink.words().is_empty());
}

#[test]
#[should_panic(expected = "device halted")]
fn the_warning_after_grace_exhaustion_escalates() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();

    for _ in 0..7 {
        rig.peripheral.raise_warning();
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }
}

#[test]
fn escalation_dumps_the_stack_and_feeds_the_watchdog_per_word() {
    let mut rig = Rig::new();
    rig.stack = FakeStackRegion::new(0x2000_0000, vec![1, 2, 3, 4]);
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();

    for _ in 0..6 {
        rig.peripheral.raise_warning();
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }
    let refreshes_before = rig.peripheral.refresh_count();

    rig.peripheral.raise_warning();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }));

    assert!(outcome.is_err());
    assert_eq!(
        sink.words(),
        [
            (0x2000_0000, 1),
            (0x2000_0004, 2),
            (0x2000_0008, 3),
            (0x2000_000C, 4),
        ]
    );
    // One feed per dumped word keeps the dump itself inside the window.
    assert_eq!(rig.peripheral.refresh_count(), refreshes_before + 4);

    assert_eq!(supervisor.status(), SupervisorStatus::Escalated);
    assert_eq!(supervisor.refresh_count(), 0);

    // Reset policy: the watchdog stays armed so the pending timeout can
    // reset the device.
    assert!(!rig.peripheral.is_deinitialized());
    assert!(rig.clock.peripheral_resets().is_empty());
}

#[test]
fn halt_policy_tears_the_watchdog_down_before_freezing() {
    let mut rig = Rig::new();
    let config = SupervisorConfig {
        escalation: EscalationPolicy::Halt,
        grace_period: 0,
        ..SupervisorConfig::default()
    };
    let mut supervisor = must(rig.supervisor(config));
    let mut sink = RecordingSink::new();

    rig.peripheral.raise_warning();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }));

    assert!(outcome.is_err());
    assert!(rig.peripheral.is_deinitialized());
    assert_eq!(
        rig.clock.peripheral_resets(),
        [PeripheralId::WindowedWatchdog]
    );
}

#[test]
fn kick_undoes_partial_grace_consumption() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();

    for _ in 0..3 {
        rig.peripheral.raise_warning();
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }
    assert_eq!(supervisor.refresh_count(), 3);

    supervisor.kick();
    assert_eq!(supervisor.refresh_count(), 0);
    assert_eq!(supervisor.status(), SupervisorStatus::Armed);

    // The full grace budget is available again.
    for expected in 1..=6u8 {
        rig.peripheral.raise_warning();
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
        assert_eq!(supervisor.refresh_count(), expected);
    }
    assert!(sink.words().is_empty());
}

#[test]
fn a_timeout_flag_without_a_reset_is_an_absorbed_anomaly() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();

    rig.peripheral.raise_timeout();
    supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);

    assert!(rig.peripheral.is_disabled());
    assert_eq!(rig.peripheral.pending_flags(), WatchdogFlags::NONE);
    assert_eq!(supervisor.refresh_count(), 0);
    assert_eq!(supervisor.status(), SupervisorStatus::Armed);
    assert!(sink.words().is_empty());
}

#[test]
fn a_prologue_hook_replaces_the_default_response() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();
    let prologue = HookProbe::new();

    supervisor.register_prologue(prologue.hook());
    rig.peripheral.raise_warning();
    supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);

    assert_eq!(prologue.count(), 1);
    // The default response never ran: the flag is still pending and no
    // auto-refresh happened beyond the arming one.
    assert_eq!(rig.peripheral.pending_flags(), WatchdogFlags::WARNING);
    assert_eq!(rig.peripheral.refresh_count(), 1);
    assert_eq!(supervisor.refresh_count(), 0);
}

#[test]
fn the_epilogue_runs_on_every_returning_dispatch() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();
    let epilogue = HookProbe::new();

    supervisor.register_epilogue(epilogue.hook());

    // With the default response...
    rig.peripheral.raise_warning();
    supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    assert_eq!(epilogue.count(), 1);

    // ...with a prologue installed...
    let prologue = HookProbe::new();
    supervisor.register_prologue(prologue.hook());
    supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    assert_eq!(prologue.count(), 1);
    assert_eq!(epilogue.count(), 2);
}

#[test]
fn the_epilogue_is_skipped_when_escalation_never_returns() {
    let mut rig = Rig::new();
    let config = SupervisorConfig {
        grace_period: 0,
        ..SupervisorConfig::default()
    };
    let mut supervisor = must(rig.supervisor(config));
    let mut sink = RecordingSink::new();
    let epilogue = HookProbe::new();

    supervisor.register_epilogue(epilogue.hook());
    rig.peripheral.raise_warning();
    let outcome = catch_unwind(AssertUnwindSafe(|| {
        supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);
    }));

    assert!(outcome.is_err());
    assert_eq!(epilogue.count(), 0);
}

#[test]
fn dispatch_with_nothing_pending_only_runs_the_epilogue() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let mut sink = RecordingSink::new();
    let epilogue = HookProbe::new();

    supervisor.register_epilogue(epilogue.hook());
    supervisor.dispatch_interrupt(&rig.stack, &mut sink, &PanicHalt);

    assert_eq!(epilogue.count(), 1);
    assert_eq!(rig.peripheral.refresh_count(), 1);
    assert_eq!(supervisor.status(), SupervisorStatus::Armed);
}

#[test]
fn deinit_tears_the_clock_path_and_peripheral_down() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));

    supervisor.deinit();

    assert_eq!(
        rig.clock.enabled_sources(),
        [ClockSource::WatchdogOscillator]
    );
    assert_eq!(
        rig.clock.peripheral_resets(),
        [PeripheralId::WindowedWatchdog]
    );
    assert!(rig.peripheral.is_deinitialized());
}

#[test]
fn a_watchdog_caused_reset_is_detected_at_boot() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let probe = HookProbe::new();

    supervisor.register_reset_check(probe.hook());
    supervisor.check_reset_cause(&FakeResetCause::watchdog());

    assert_eq!(probe.count(), 1);
    assert!(rig.peripheral.is_deinitialized());
}

#[test]
fn a_clean_power_on_leaves_the_watchdog_alone() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));
    let probe = HookProbe::new();

    supervisor.register_reset_check(probe.hook());
    supervisor.check_reset_cause(&FakeResetCause::power_on());

    assert_eq!(probe.count(), 0);
    assert!(!rig.peripheral.is_deinitialized());
}

#[test]
fn the_reset_check_hook_is_optional() {
    let mut rig = Rig::new();
    let mut supervisor = must(rig.supervisor(SupervisorConfig::default()));

    supervisor.check_reset_cause(&FakeResetCause::watchdog());

    assert!(rig.peripheral.is_deinitialized());
}
