//! Shared test utilities for HiveBoard.
//!
//! Every hardware collaborator contract in `hiveboard-hal` has an in-memory
//! fake here, so the board state machines run and assert on the host:
//!
//! - [`mock::FakeGpio`] - a shared GPIO port with settable pin levels
//! - [`mock::FakeTimer`] - records allocation and single-shot arming
//! - [`mock::FakeEdgeInterrupt`] / [`mock::FakeInterruptLine`]
//! - [`mock::FakeWatchdogPeripheral`] - scripted status flags
//! - [`mock::FakeClock`], [`mock::FakeResetCause`]
//! - [`mock::FakeStackRegion`], [`mock::RecordingSink`], [`mock::PanicHalt`]
//! - [`mock::PressRecorder`], [`mock::HookProbe`] - callback recorders
//!
//! The fakes are cheap clones of shared state, mirroring how production
//! implementations are thin handles onto one peripheral block: tests keep a
//! clone for assertions while the component under test owns another.

#![deny(unsafe_op_in_unsafe_fn)]
#![allow(clippy::unwrap_used, clippy::panic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod mock;
pub mod must;
pub mod prelude;

pub use must::*;
