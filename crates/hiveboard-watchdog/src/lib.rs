//! # hiveboard-watchdog
//!
//! Watchdog supervision and escalation for the HiveBoard board-support core.
//!
//! The supervisor wraps the windowed watchdog peripheral with a grace
//! policy: an application that misses its refresh window first receives
//! warning interrupts, which the supervisor absorbs by auto-refreshing up
//! to [`config::DEFAULT_GRACE_PERIOD`] times. Once the grace budget is
//! exhausted the supervisor escalates - it captures a diagnostic stack dump
//! (feeding the watchdog per word so the dump itself cannot trip a second
//! timeout) and then either lets the armed watchdog reset the device or
//! halts it forever, a policy fixed when the supervisor is built.
//!
//! The owning application can intercept both ends of the interrupt path:
//! a registered prologue hook replaces the default response entirely, and
//! an epilogue hook runs after every dispatch that returns (the watchdog
//! interrupt line is shared with brown-out detection on this board, so
//! applications routinely need the tail hook).
//!
//! A kicked supervisor forgets all absorbed warnings: the grace budget is
//! consecutive, not cumulative.

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
pub mod diagnostic;
pub mod error;
pub mod hooks;
pub mod prelude;
pub mod state;
pub mod supervisor;

pub use config::{EscalationPolicy, SupervisorConfig, SupervisorConfigBuilder};
pub use error::{SupervisorError, SupervisorResult};
pub use hooks::SupervisorHook;
pub use state::{SupervisorState, SupervisorStatus};
pub use supervisor::WatchdogSupervisor;
