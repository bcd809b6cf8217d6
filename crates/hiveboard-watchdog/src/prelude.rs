//! Prelude for hiveboard-watchdog.
//!
//! Re-exports the most commonly used types for convenient importing.

pub use crate::config::{EscalationPolicy, SupervisorConfig, SupervisorConfigBuilder};
pub use crate::error::{SupervisorError, SupervisorResult};
pub use crate::hooks::SupervisorHook;
pub use crate::state::{SupervisorState, SupervisorStatus};
pub use crate::supervisor::WatchdogSupervisor;
