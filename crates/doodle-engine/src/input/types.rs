use crate::coords::Vec2;

/// Modifier keys state.
///
/// Stored as booleans rather than bitflags to keep it explicit and stable.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.shift || self.ctrl || self.alt || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Forward,
    Back,
    /// Platform-dependent button not represented above.
    Other(u16),
}

impl MouseButton {
    /// Bit position used in [`ButtonMask`].
    #[inline]
    pub fn bit(self) -> u16 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
            MouseButton::Forward => 3,
            MouseButton::Back => 4,
            MouseButton::Other(n) => n,
        }
    }

    /// Inverse of [`bit`](Self::bit).
    pub fn from_bit(bit: u16) -> Self {
        match bit {
            0 => MouseButton::Left,
            1 => MouseButton::Middle,
            2 => MouseButton::Right,
            3 => MouseButton::Forward,
            4 => MouseButton::Back,
            n => MouseButton::Other(n),
        }
    }
}

/// Set of mouse buttons held at the moment an event fired.
///
/// Bit `n` corresponds to `MouseButton::from_bit(n)`.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ButtonMask(pub u16);

impl ButtonMask {
    #[inline]
    pub fn contains(self, button: MouseButton) -> bool {
        self.0 & (1 << button.bit()) != 0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Raw keyboard event as delivered by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct RawKeyEvent {
    /// Host key name (e.g. `"a"`, `"Enter"`, `"Shift"`).
    pub key: String,
    pub modifiers: Modifiers,
    /// Host-reported key-repeat flag. Not surfaced in the snapshot today;
    /// see the note on [`KeySnapshot::repeat`](crate::input::KeySnapshot).
    pub repeat: bool,
}

/// Raw mouse event as delivered by the host.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RawMouseEvent {
    /// Position relative to the host viewport.
    pub client: Vec2,
    /// Position relative to the event target.
    pub target: Vec2,
    /// Movement since the previous mouse event.
    pub movement: Vec2,
    /// Button that triggered the event.
    pub button: MouseButton,
    /// Buttons held when the event fired.
    pub buttons: ButtonMask,
    pub modifiers: Modifiers,
}

/// Platform-agnostic input events the host feeds into the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum RawInput {
    KeyDown(RawKeyEvent),
    KeyUp(RawKeyEvent),
    MouseEnter(RawMouseEvent),
    MouseExit(RawMouseEvent),
    MouseMove(RawMouseEvent),
    MouseUp(RawMouseEvent),
    MouseDown(RawMouseEvent),
    MouseClick(RawMouseEvent),
    MouseDoubleClick(RawMouseEvent),
}
