//! # hiveboard-hal
//!
//! Hardware collaborator contracts for the HiveBoard board-support core.
//!
//! The board logic in `hiveboard-buttons`, `hiveboard-watchdog` and
//! `hiveboard-leds` never touches peripheral registers directly. Everything
//! it needs from the platform is expressed here as a small trait, one per
//! vendor driver:
//!
//! - [`GpioDriver`] - pin configuration, port reads, pin writes
//! - [`TimerService`] - allocation and single-shot arming of millisecond timers
//! - [`EdgeInterrupt`] - the combined pin-change interrupt used to wake scanning
//! - [`InterruptLine`] - enable/priority control for a peripheral interrupt
//! - [`ClockControl`] - clock gating, frequency queries, peripheral resets
//! - [`WatchdogPeripheral`] - the windowed watchdog register interface
//! - [`ResetCause`] - the ROM reset-cause query, reliable across power modes
//! - [`StackRegion`], [`DiagnosticSink`], [`Halt`] - post-mortem dump seams
//!
//! Production implementations wrap the vendor peripheral SDK; the
//! `hiveboard-test-helpers` crate provides in-memory fakes so every state
//! machine in the workspace runs on the host.
//!
//! All trait methods are short, non-blocking, run-to-completion operations
//! safe to call from interrupt context unless documented otherwise.

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

pub mod clock;
pub mod diag;
pub mod error;
pub mod gpio;
pub mod interrupt;
pub mod prelude;
pub mod reset;
pub mod timer;
pub mod watchdog;

pub use clock::{ClockControl, ClockSource, PeripheralId};
pub use diag::{DiagnosticSink, Halt, StackRegion};
pub use error::{HalError, HalResult};
pub use gpio::{GpioDriver, PinId};
pub use interrupt::{EdgeInterrupt, InterruptLine};
pub use reset::{ResetCause, ResetCauseFlags};
pub use timer::{TimerHandle, TimerService};
pub use watchdog::{WatchdogFlags, WatchdogPeripheral, WatchdogPeripheralConfig};
