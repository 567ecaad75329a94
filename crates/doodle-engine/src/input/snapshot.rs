use crate::coords::Vec2;

use super::types::{ButtonMask, Modifiers, MouseButton, RawKeyEvent, RawMouseEvent};

/// Returns `true` for keys that are modifiers themselves.
pub fn is_control_key(key: &str) -> bool {
    matches!(key, "Control" | "Shift" | "Alt" | "Meta")
}

/// Normalized keyboard data handed to key callbacks.
///
/// Built fresh per raw event, never stored by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct KeySnapshot {
    pub key: String,
    pub modifiers: Modifiers,
    /// Intentionally mirrors `modifiers.shift`, not the host's key-repeat
    /// flag. Long-standing behavior callers may depend on.
    /// TODO: surface `RawKeyEvent::repeat` here once callers can migrate.
    pub repeat: bool,
    pub is_control_key: bool,
}

impl KeySnapshot {
    pub fn from_raw(raw: &RawKeyEvent) -> Self {
        Self {
            key: raw.key.clone(),
            modifiers: raw.modifiers,
            repeat: raw.modifiers.shift,
            is_control_key: is_control_key(&raw.key),
        }
    }
}

/// Normalized mouse data handed to mouse callbacks.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MouseSnapshot {
    /// Viewport-absolute position.
    pub abs: Vec2,
    /// Target-relative position. The dispatcher additionally shifts this by
    /// the surface's on-screen offset for mouse-move events only.
    pub pos: Vec2,
    /// Movement since the previous mouse event.
    pub movement: Vec2,
    /// Button that triggered the event.
    pub button: MouseButton,
    /// Buttons held when the event fired.
    pub buttons: ButtonMask,
    pub modifiers: Modifiers,
}

impl MouseSnapshot {
    pub fn from_raw(raw: &RawMouseEvent) -> Self {
        Self {
            abs: raw.client,
            pos: raw.target,
            movement: raw.movement,
            button: raw.button,
            buttons: raw.buttons,
            modifiers: raw.modifiers,
        }
    }

    /// Shifts the target-relative position by the surface's on-screen offset.
    pub(crate) fn offset_by(mut self, offset: Vec2) -> Self {
        self.pos = self.pos - offset;
        self
    }
}
