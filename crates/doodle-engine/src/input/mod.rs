//! Input subsystem.
//!
//! Public API is platform-agnostic: the host (or the test harness) delivers
//! [`RawInput`] events, and the dispatcher translates them into the normalized
//! snapshots handed to registered callbacks.

mod snapshot;
mod types;

pub use snapshot::{KeySnapshot, MouseSnapshot, is_control_key};
pub use types::{ButtonMask, Modifiers, MouseButton, RawInput, RawKeyEvent, RawMouseEvent};
