use std::cell::Cell;
use std::rc::Rc;

/// Shared "should close" flag.
///
/// Set by the quit key or a window close request, polled once per frame.
/// Clones observe the same flag. Single-threaded by construction (`Rc`).
#[derive(Debug, Clone, Default)]
pub struct CloseFlag(Rc<Cell<bool>>);

impl CloseFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&self) {
        self.0.set(true);
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.get()
    }
}
