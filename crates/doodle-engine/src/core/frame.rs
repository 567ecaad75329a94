use crate::surface::Surface;
use crate::time::TimeReadout;

/// Loop commands issued from inside callbacks.
///
/// Commands are buffered and applied after the in-flight tick (or dispatch)
/// completes, so a stop request never interrupts the tick that issued it.
#[derive(Debug, Default)]
pub struct LoopControl {
    end_requested: bool,
}

impl LoopControl {
    /// Requests that the loop stop after the current tick completes.
    pub fn end(&mut self) {
        self.end_requested = true;
    }

    pub(crate) fn take_end(&mut self) -> bool {
        std::mem::take(&mut self.end_requested)
    }
}

/// Per-invocation context passed to every registered callback.
///
/// Borrows last only for the duration of one callback; the dispatcher rebuilds
/// the context between invocations so each callback sees a live clock readout.
pub struct Frame<'a> {
    /// The sketch's drawing surface.
    pub surface: &'a mut Surface,

    /// Clock readout taken just before the callback was invoked.
    pub time: TimeReadout,

    /// Buffered loop commands.
    pub control: &'a mut LoopControl,
}
