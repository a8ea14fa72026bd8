//! Session-scoped pointer capture.
//!
//! While a node is being dragged the host must deliver pointer move and
//! release events from anywhere in the window, not just over the node. The
//! drag holds a [`PointerCapture`] for exactly that long; dropping the guard
//! releases the subscription on every exit path.

use std::cell::Cell;
use std::rc::Rc;

/// Tracks whether window-level pointer events are currently subscribed.
#[derive(Debug, Clone, Default)]
pub struct CaptureHandle {
    active: Rc<Cell<usize>>,
}

impl CaptureHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the global pointer subscription.
    pub fn acquire(&self) -> PointerCapture {
        self.active.set(self.active.get() + 1);
        log::debug!("Pointer capture acquired");
        PointerCapture {
            active: Rc::clone(&self.active),
        }
    }

    /// Whether any capture is outstanding.
    pub fn is_captured(&self) -> bool {
        self.active.get() > 0
    }
}

/// RAII guard for an acquired pointer capture.
#[derive(Debug)]
pub struct PointerCapture {
    active: Rc<Cell<usize>>,
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        log::debug!("Pointer capture released");
    }
}
