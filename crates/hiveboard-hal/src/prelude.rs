//! Prelude for hiveboard-hal.
//!
//! Re-exports every collaborator contract for convenient importing.

pub use crate::clock::{ClockControl, ClockSource, PeripheralId};
pub use crate::diag::{DiagnosticSink, Halt, StackRegion};
pub use crate::error::{HalError, HalResult};
pub use crate::gpio::{GpioDriver, PinId};
pub use crate::interrupt::{EdgeInterrupt, InterruptLine};
pub use crate::reset::{ResetCause, ResetCauseFlags};
pub use crate::timer::{TimerHandle, TimerService};
pub use crate::watchdog::{WatchdogFlags, WatchdogPeripheral, WatchdogPeripheralConfig};
