//! Doodle engine crate.
//!
//! Callback-driven sketch loop (update/draw/input dispatch) plus a fluent 2D
//! drawing surface, both decoupled from any concrete windowing system through
//! injected host capabilities.

pub mod coords;
pub mod host;
pub mod input;
pub mod surface;
pub mod time;

pub mod core;
pub mod runtime;

pub mod logging;
