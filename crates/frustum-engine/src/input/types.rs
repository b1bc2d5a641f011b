/// Keyboard key identifier.
///
/// Only the keys the viewer binds are named. The runtime maps platform
/// keycodes into these variants; everything else becomes `Key::Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Q,

    /// Platform-dependent key not represented here.
    Unknown(u32),
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

/// A single key transition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
    /// Auto-repeat from the OS while the key is held.
    pub repeat: bool,
}

impl KeyEvent {
    /// True for the initial press of `key` (ignores auto-repeat).
    #[inline]
    pub fn is_press_of(&self, key: Key) -> bool {
        self.key == key && self.state == KeyState::Pressed && !self.repeat
    }
}
