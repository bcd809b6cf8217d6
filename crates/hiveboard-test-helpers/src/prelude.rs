//! Convenience re-exports for test code.

pub use crate::mock::{
    FakeClock, FakeEdgeInterrupt, FakeGpio, FakeInterruptLine, FakeResetCause, FakeStackRegion,
    FakeTimer, FakeWatchdogPeripheral, HookProbe, PanicHalt, PressRecorder, RecordingSink,
};
pub use crate::must::{must, must_err, must_some};
