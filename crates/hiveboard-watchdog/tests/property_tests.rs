//! Property-based tests for the grace-budget invariants.

use hiveboard_test_helpers::prelude::*;
use hiveboard_watchdog::prelude::*;
use proptest::prelude::*;

fn supervisor_with_grace(
    grace: u8,
    peripheral: &FakeWatchdogPeripheral,
) -> WatchdogSupervisor<FakeWatchdogPeripheral, FakeClock> {
    let config = SupervisorConfig {
        grace_period: grace,
        ..SupervisorConfig::default()
    };
    must(WatchdogSupervisor::init(
        config,
        peripheral.clone(),
        FakeClock::new(),
        &mut FakeInterruptLine::new(),
    ))
}

proptest! {
    #[test]
    fn warnings_within_the_grace_budget_never_escalate(
        grace in 1u8..12,
        warnings in 0u8..12,
    ) {
        prop_assume!(warnings <= grace);

        let peripheral = FakeWatchdogPeripheral::new();
        let mut supervisor = supervisor_with_grace(grace, &peripheral);
        let stack = FakeStackRegion::new(0x2000_0000, vec![0]);
        let mut sink = RecordingSink::new();

        for _ in 0..warnings {
            peripheral.raise_warning();
            supervisor.dispatch_interrupt(&stack, &mut sink, &PanicHalt);
        }

        prop_assert_eq!(supervisor.refresh_count(), warnings);
        prop_assert!(!supervisor.status().is_terminal());
        prop_assert!(sink.words().is_empty());
        // Every absorbed warning fed the watchdog once, on top of the
        // arming refresh.
        prop_assert_eq!(peripheral.refresh_count(), 1 + u32::from(warnings));
    }

    #[test]
    fn a_kick_always_zeroes_the_grace_counter(
        grace in 1u8..12,
        warnings in 0u8..12,
    ) {
        prop_assume!(warnings <= grace);

        let peripheral = FakeWatchdogPeripheral::new();
        let mut supervisor = supervisor_with_grace(grace, &peripheral);
        let stack = FakeStackRegion::new(0x2000_0000, vec![0]);
        let mut sink = RecordingSink::new();

        for _ in 0..warnings {
            peripheral.raise_warning();
            supervisor.dispatch_interrupt(&stack, &mut sink, &PanicHalt);
        }

        supervisor.kick();

        prop_assert_eq!(supervisor.refresh_count(), 0);
        prop_assert_eq!(supervisor.status(), SupervisorStatus::Armed);
    }

    #[test]
    fn the_dump_feeds_the_watchdog_once_per_word(
        words in prop::collection::vec(any::<u32>(), 0..64),
    ) {
        let peripheral = FakeWatchdogPeripheral::new();
        let mut supervisor = supervisor_with_grace(0, &peripheral);
        let stack = FakeStackRegion::new(0x2000_0000, words.clone());
        let mut sink = RecordingSink::new();

        peripheral.raise_warning();
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            supervisor.dispatch_interrupt(&stack, &mut sink, &PanicHalt);
        }));

        prop_assert!(outcome.is_err());
        prop_assert_eq!(sink.words().len(), words.len());
        prop_assert_eq!(peripheral.refresh_count(), 1 + words.len() as u32);
    }
}
