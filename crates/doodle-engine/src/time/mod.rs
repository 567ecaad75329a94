//! Time subsystem.
//!
//! Provides the loop clock and the injectable time source it reads from.
//! Intended usage:
//! - one `Clock` per sketch loop
//! - `mark_frame()` once per tick, after the update phase
//! - `readout()` anywhere for derived values (pure read)

mod clock;
mod source;

pub use clock::{Clock, TimeReadout};
pub use source::{ManualTime, MonotonicTime, TimeSource};
