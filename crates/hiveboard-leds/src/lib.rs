//! # hiveboard-leds
//!
//! Board LED bank for the HiveBoard board-support core.
//!
//! LEDs on the board are wired active low; the bank hides the inversion
//! and tracks the logical on/off state of each LED so callers can read the
//! whole bank back as a bitmask.

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

pub mod bank;
pub mod error;

pub use bank::{LedBank, MAX_BOARD_LEDS};
pub use error::{LedError, LedResult};
