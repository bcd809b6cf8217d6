//! Property-based tests for the debounce invariants.

use hiveboard_buttons::{Button, ButtonEdge};
use hiveboard_hal::PinId;
use proptest::prelude::*;

/// True when `samples` contains `run` consecutive entries equal to `level`.
fn has_run(samples: &[bool], level: bool, run: usize) -> bool {
    let mut streak = 0;
    for sample in samples {
        if *sample == level {
            streak += 1;
            if streak >= run {
                return true;
            }
        } else {
            streak = 0;
        }
    }
    false
}

fn count_edges(button: &mut Button, samples: &[bool], wanted: ButtonEdge) -> usize {
    samples
        .iter()
        .filter(|sample| button.sample(**sample).1 == Some(wanted))
        .count()
}

proptest! {
    #[test]
    fn no_eight_consistent_lows_means_no_press(
        samples in prop::collection::vec(any::<bool>(), 0..64),
    ) {
        prop_assume!(!has_run(&samples, false, 8));

        let mut button = Button::new(PinId::new(0));
        let presses = count_edges(&mut button, &samples, ButtonEdge::Pressed);

        prop_assert_eq!(presses, 0);
        prop_assert!(!button.is_pressed());
    }

    #[test]
    fn a_held_press_is_reported_exactly_once(
        chatter in prop::collection::vec(any::<bool>(), 0..16),
        hold in 8usize..32,
    ) {
        prop_assume!(!has_run(&chatter, false, 8));

        let mut samples = chatter;
        samples.extend(core::iter::repeat_n(false, hold));

        let mut button = Button::new(PinId::new(0));
        let presses = count_edges(&mut button, &samples, ButtonEdge::Pressed);

        prop_assert_eq!(presses, 1);
        prop_assert!(button.is_pressed());
    }

    #[test]
    fn a_full_cycle_releases_exactly_once_and_never_re_presses(
        hold in 8usize..32,
        settle in 8usize..32,
    ) {
        let mut button = Button::new(PinId::new(0));

        let mut samples = Vec::new();
        samples.extend(core::iter::repeat_n(false, hold));
        samples.extend(core::iter::repeat_n(true, settle));

        let mut presses = 0;
        let mut releases = 0;
        for sample in &samples {
            match button.sample(*sample).1 {
                Some(ButtonEdge::Pressed) => presses += 1,
                Some(ButtonEdge::Released) => releases += 1,
                None => {}
            }
        }

        prop_assert_eq!(presses, 1);
        prop_assert_eq!(releases, 1);
        prop_assert!(!button.is_pressed());
    }

    #[test]
    fn debounced_state_only_flips_on_settled_registers(
        samples in prop::collection::vec(any::<bool>(), 1..128),
    ) {
        let mut button = Button::new(PinId::new(0));

        for sample in &samples {
            let before = button.is_pressed();
            let (value, edge) = button.sample(*sample);
            let after = button.is_pressed();

            if before != after {
                // State only flips on a fully settled register, and the
                // edge direction must match the new state.
                if after {
                    prop_assert_eq!(value, 0x00);
                    prop_assert_eq!(edge, Some(ButtonEdge::Pressed));
                } else {
                    prop_assert_eq!(value, 0xFF);
                    prop_assert_eq!(edge, Some(ButtonEdge::Released));
                }
            } else {
                prop_assert_eq!(edge, None);
            }
        }
    }
}
