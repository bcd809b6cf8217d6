//! Supervisor configuration.

use serde::{Deserialize, Serialize};

use crate::error::{SupervisorError, SupervisorResult};

/// Consecutive warnings absorbed before escalation.
pub const DEFAULT_GRACE_PERIOD: u8 = 6;

/// Warning threshold in watchdog ticks ahead of the timeout.
pub const DEFAULT_WARNING_TICKS: u32 = 512;

/// Refresh window and timeout budget in seconds.
pub const DEFAULT_WINDOW_SECONDS: u32 = 1;

/// NVIC priority of the shared watchdog/brown-out interrupt.
pub const DEFAULT_IRQ_PRIORITY: u8 = 1;

/// What escalation does once the diagnostic dump has been captured.
///
/// Fixed for the process lifetime: the supervisor is constructed exactly
/// once at start-up and the policy cannot be changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EscalationPolicy {
    /// Leave the watchdog armed and spin; the pending hardware timeout
    /// resets the device.
    #[default]
    ResetDevice,
    /// Tear the watchdog down and freeze; the device stays halted until
    /// external intervention.
    Halt,
}

/// Watchdog supervisor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorConfig {
    /// Consecutive warnings absorbed by auto-refresh before escalation.
    pub grace_period: u8,
    /// Ticks before timeout at which the warning interrupt fires.
    pub warning_ticks: u32,
    /// Refresh window and timeout budget in seconds.
    pub window_seconds: u32,
    /// NVIC priority for the watchdog interrupt line.
    pub irq_priority: u8,
    /// Terminal action once the grace budget is exhausted.
    pub escalation: EscalationPolicy,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            grace_period: DEFAULT_GRACE_PERIOD,
            warning_ticks: DEFAULT_WARNING_TICKS,
            window_seconds: DEFAULT_WINDOW_SECONDS,
            irq_priority: DEFAULT_IRQ_PRIORITY,
            escalation: EscalationPolicy::ResetDevice,
        }
    }
}

impl SupervisorConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> SupervisorConfigBuilder {
        SupervisorConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> SupervisorResult<()> {
        if self.warning_ticks == 0 {
            return Err(SupervisorError::InvalidConfiguration {
                reason: "warning_ticks must be greater than 0",
            });
        }
        if self.window_seconds == 0 {
            return Err(SupervisorError::InvalidConfiguration {
                reason: "window_seconds must be greater than 0",
            });
        }
        Ok(())
    }
}

/// Builder for [`SupervisorConfig`].
#[derive(Debug, Default)]
pub struct SupervisorConfigBuilder {
    config: SupervisorConfig,
}

impl SupervisorConfigBuilder {
    /// Set the number of consecutive warnings absorbed before escalation.
    #[must_use]
    pub fn grace_period(mut self, warnings: u8) -> Self {
        self.config.grace_period = warnings;
        self
    }

    /// Set the warning threshold in watchdog ticks.
    #[must_use]
    pub fn warning_ticks(mut self, ticks: u32) -> Self {
        self.config.warning_ticks = ticks;
        self
    }

    /// Set the refresh window and timeout budget in seconds.
    #[must_use]
    pub fn window_seconds(mut self, seconds: u32) -> Self {
        self.config.window_seconds = seconds;
        self
    }

    /// Set the NVIC priority for the watchdog interrupt line.
    #[must_use]
    pub fn irq_priority(mut self, priority: u8) -> Self {
        self.config.irq_priority = priority;
        self
    }

    /// Set the terminal escalation action.
    #[must_use]
    pub fn escalation(mut self, policy: EscalationPolicy) -> Self {
        self.config.escalation = policy;
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> SupervisorResult<SupervisorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
