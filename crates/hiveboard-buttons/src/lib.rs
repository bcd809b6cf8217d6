//! # hiveboard-buttons
//!
//! Button debounce and edge-interrupt scanning for the HiveBoard
//! board-support core.
//!
//! The scanner idles on a combined pin-change interrupt and only polls while
//! contacts are unsettled: an edge on any button pin masks further edges and
//! arms a single-shot scan timer; each tick shifts one raw sample into an
//! 8-bit bounce register per button, and once every register reads all-ones
//! (all buttons released and settled for 8 consecutive samples) the scanner
//! stops the timer and re-enables the edge interrupt.
//!
//! A press is reported through the registered callback exactly once, on the
//! 8th consecutive low sample; releases are debounced the same way but not
//! reported. The callback runs synchronously on the context driving the
//! scan tick and must not block.
//!
//! # Example
//!
//! ```rust
//! # use hiveboard_buttons::prelude::*;
//! # use hiveboard_hal::PinId;
//! # use hiveboard_test_helpers::prelude::*;
//! # fn demo() -> ButtonResult<()> {
//! let gpio = FakeGpio::new();
//! let timer = FakeTimer::new();
//! let edge_irq = FakeEdgeInterrupt::new();
//! let presses = PressRecorder::new();
//!
//! let config = ScannerConfig::builder()
//!     .board_pins(&[PinId::new(14)])
//!     .build()?;
//! let mut scanner = ButtonScanner::new(
//!     config,
//!     gpio.clone(),
//!     timer,
//!     edge_irq,
//!     presses.callback(),
//! )?;
//!
//! // Contact closes: the edge interrupt wakes polling, and eight settled
//! // samples later the press is reported.
//! gpio.press(PinId::new(14));
//! scanner.on_edge_interrupt();
//! for _ in 0..8 {
//!     scanner.scan_tick();
//! }
//! assert_eq!(presses.presses(), [0]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

#![no_std]
#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

pub mod config;
pub mod error;
pub mod prelude;
pub mod scanner;
pub mod state;

pub use config::{MAX_BOARD_BUTTONS, ScannerConfig, ScannerConfigBuilder};
pub use error::{ButtonError, ButtonResult};
pub use scanner::{ButtonScanner, PressCallback};
pub use state::{BounceRegister, Button, ButtonEdge};
