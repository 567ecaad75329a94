//! Core loop/dispatch.
//!
//! This module owns the stable contract between sketch code and the engine:
//! the [`Sketch`] object callers register callbacks on, the [`Frame`] context
//! each callback receives, and the start/stop state machine driving the tick
//! loop.

mod frame;
mod registry;
mod sketch;

pub use frame::{Frame, LoopControl};
pub use registry::{EventRegistry, KeyCallback, LifecycleCallback, MouseCallback, UpdateCallback};
pub use sketch::{RateError, Sketch, TimerId};
