//! Host-side loop driving.
//!
//! The sketch itself owns no thread and no timer; this module provides the
//! blocking pump a host runs to stand in for its scheduler.

mod driver;

pub use driver::{Driver, EventSource, NoInput, Poll};
