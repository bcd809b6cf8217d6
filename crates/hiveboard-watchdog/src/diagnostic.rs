//! Post-mortem stack capture.

use hiveboard_hal::{DiagnosticSink, StackRegion, WatchdogPeripheral};
use tracing::error;

/// Word size of the dumped stack, in bytes.
const WORD_BYTES: u32 = 4;

/// Walk the stack upward from the current pointer to the top-of-stack
/// boundary, emitting every word through the sink.
///
/// The walk is unbounded in stack depth, so the watchdog is fed after each
/// word; the dump itself can then never trip a second timeout while it
/// runs.
pub fn unwind_stack<S, D, W>(stack: &S, sink: &mut D, watchdog: &mut W)
where
    S: StackRegion,
    D: DiagnosticSink,
    W: WatchdogPeripheral,
{
    let (pointer, top) = stack.bounds();
    error!(pointer, top, "stack dump");

    let mut address = pointer;
    while address < top {
        sink.record_word(address, stack.read_word(address));
        watchdog.refresh();
        address = address.saturating_add(WORD_BYTES);
    }
}
