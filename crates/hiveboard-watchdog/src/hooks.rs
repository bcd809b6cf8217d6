//! Application hook slots.

use alloc::boxed::Box;
use core::fmt;

/// Application-registered interrupt hook.
///
/// Runs synchronously in interrupt context; it must not block.
pub type SupervisorHook = Box<dyn FnMut() + Send>;

/// The three optional hook slots of the supervisor.
///
/// Each slot holds at most one hook; registering again overwrites. There is
/// deliberately no way to clear a slot - the supervisor supports exactly
/// one owner, not an observer list.
#[derive(Default)]
pub struct SupervisorHooks {
    prologue: Option<SupervisorHook>,
    epilogue: Option<SupervisorHook>,
    reset_check: Option<SupervisorHook>,
}

impl SupervisorHooks {
    /// Install the prologue hook, replacing any previous one.
    pub fn set_prologue(&mut self, hook: SupervisorHook) {
        self.prologue = Some(hook);
    }

    /// Install the epilogue hook, replacing any previous one.
    pub fn set_epilogue(&mut self, hook: SupervisorHook) {
        self.epilogue = Some(hook);
    }

    /// Install the reset-check hook, replacing any previous one.
    pub fn set_reset_check(&mut self, hook: SupervisorHook) {
        self.reset_check = Some(hook);
    }

    /// Whether a prologue hook is installed.
    #[must_use]
    pub fn has_prologue(&self) -> bool {
        self.prologue.is_some()
    }

    /// Mutable access to the prologue hook for invocation.
    pub fn prologue_mut(&mut self) -> Option<&mut SupervisorHook> {
        self.prologue.as_mut()
    }

    /// Mutable access to the epilogue hook for invocation.
    pub fn epilogue_mut(&mut self) -> Option<&mut SupervisorHook> {
        self.epilogue.as_mut()
    }

    /// Mutable access to the reset-check hook for invocation.
    pub fn reset_check_mut(&mut self) -> Option<&mut SupervisorHook> {
        self.reset_check.as_mut()
    }
}

impl fmt::Debug for SupervisorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SupervisorHooks")
            .field("prologue", &self.prologue.is_some())
            .field("epilogue", &self.epilogue.is_some())
            .field("reset_check", &self.reset_check.is_some())
            .finish()
    }
}
