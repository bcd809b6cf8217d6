//! Interrupt facility contracts.

/// Combined pin-change (group) interrupt.
///
/// All button pins are OR-ed into a single edge-triggered interrupt source.
/// The callback toggle gates delivery without tearing down the pin
/// configuration, so scanning can mask edges while contacts chatter.
pub trait EdgeInterrupt {
    /// Select the pins and polarity the group interrupt watches.
    ///
    /// `pin_mask` has one bit per watched pin; `polarity_mask` selects the
    /// active level per pin (0 = active low).
    fn configure(&mut self, pin_mask: u32, polarity_mask: u32);

    /// Allow edge events to invoke the registered handler.
    fn enable_callback(&mut self);

    /// Suppress edge events without unconfiguring the pins.
    fn disable_callback(&mut self);

    /// Set the NVIC priority of the group interrupt.
    ///
    /// Scanning lowers this below the timer subsystem it calls into.
    fn set_priority(&mut self, priority: u8);
}

/// Enable and priority control for a single peripheral interrupt line.
pub trait InterruptLine {
    /// Enable delivery of this interrupt.
    fn enable(&mut self);

    /// Set the NVIC priority of this interrupt.
    fn set_priority(&mut self, priority: u8);
}
