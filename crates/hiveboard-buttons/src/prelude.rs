//! Prelude for hiveboard-buttons.
//!
//! Re-exports the most commonly used types for convenient importing.

pub use crate::config::{MAX_BOARD_BUTTONS, ScannerConfig, ScannerConfigBuilder};
pub use crate::error::{ButtonError, ButtonResult};
pub use crate::scanner::{ButtonScanner, PressCallback};
pub use crate::state::{BounceRegister, Button, ButtonEdge};
