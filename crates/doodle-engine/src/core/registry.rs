use crate::input::{KeySnapshot, MouseSnapshot};

use super::frame::Frame;

/// Callback taking no event payload (initialize, draw).
pub type LifecycleCallback<S> = Box<dyn FnMut(&mut Frame<'_>, &mut S)>;

/// Update callback; the third argument is the elapsed seconds of the tick
/// interval ending at the *previous* tick.
pub type UpdateCallback<S> = Box<dyn FnMut(&mut Frame<'_>, &mut S, f64)>;

/// Keyboard callback.
pub type KeyCallback<S> = Box<dyn FnMut(&mut Frame<'_>, &mut S, &KeySnapshot)>;

/// Mouse callback.
pub type MouseCallback<S> = Box<dyn FnMut(&mut Frame<'_>, &mut S, &MouseSnapshot)>;

/// Ordered callback lists, one per event kind.
///
/// Registration is append-only; callbacks execute in registration order.
pub struct EventRegistry<S> {
    pub(crate) initialize: Vec<LifecycleCallback<S>>,
    pub(crate) update: Vec<UpdateCallback<S>>,
    pub(crate) draw: Vec<LifecycleCallback<S>>,

    pub(crate) key_up: Vec<KeyCallback<S>>,
    pub(crate) key_down: Vec<KeyCallback<S>>,

    pub(crate) mouse_enter: Vec<MouseCallback<S>>,
    pub(crate) mouse_exit: Vec<MouseCallback<S>>,
    pub(crate) mouse_move: Vec<MouseCallback<S>>,
    pub(crate) mouse_up: Vec<MouseCallback<S>>,
    pub(crate) mouse_down: Vec<MouseCallback<S>>,
    pub(crate) mouse_click: Vec<MouseCallback<S>>,
    pub(crate) mouse_double_click: Vec<MouseCallback<S>>,
}

// Manual impl: `derive(Default)` would demand `S: Default` for no reason.
impl<S> Default for EventRegistry<S> {
    fn default() -> Self {
        Self {
            initialize: Vec::new(),
            update: Vec::new(),
            draw: Vec::new(),
            key_up: Vec::new(),
            key_down: Vec::new(),
            mouse_enter: Vec::new(),
            mouse_exit: Vec::new(),
            mouse_move: Vec::new(),
            mouse_up: Vec::new(),
            mouse_down: Vec::new(),
            mouse_click: Vec::new(),
            mouse_double_click: Vec::new(),
        }
    }
}
