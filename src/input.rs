//! Single-slot mailbox between event handlers and the frame step.
//!
//! Handlers overwrite the latest observation; the frame step takes it once
//! per frame. Each slot holds at most one value, so a burst of events between
//! two frames collapses to the most recent one.

use std::sync::{Arc, Mutex, MutexGuard};

use glam::DVec2;

use crate::types::Surface;

/// Latest known state of the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Pointer {
    /// No pointer over the surface: never seen, or it left.
    #[default]
    Absent,
    /// Pointer position in surface pixels.
    Present(DVec2),
}

impl Pointer {
    pub fn position(self) -> Option<DVec2> {
        match self {
            Pointer::Absent => None,
            Pointer::Present(p) => Some(p),
        }
    }
}

/// What the frame step reads each frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Snapshot {
    pub pointer: Pointer,
    /// New surface, if a resize arrived since the last take.
    pub resize: Option<Surface>,
}

#[derive(Debug, Default)]
struct Slots {
    pointer: Pointer,
    resize: Option<Surface>,
}

/// Cloneable handle to the shared slots. Safe to post from any thread.
#[derive(Debug, Clone, Default)]
pub struct Mailbox {
    slots: Arc<Mutex<Slots>>,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn post_pointer(&self, position: DVec2) {
        self.lock().pointer = Pointer::Present(position);
    }

    pub fn post_leave(&self) {
        self.lock().pointer = Pointer::Absent;
    }

    pub fn post_resize(&self, surface: Surface) {
        self.lock().resize = Some(surface);
    }

    /// Read the current slots. The pointer is sticky (it stays until
    /// overwritten); a pending resize is consumed.
    pub fn take(&self) -> Snapshot {
        let mut slots = self.lock();
        Snapshot {
            pointer: slots.pointer,
            resize: slots.resize.take(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Slots> {
        // Slots are plain values, a panic mid-write cannot leave them torn.
        self.slots.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn surface(columns: u16) -> Surface {
        Surface {
            columns,
            rows: 10,
            cell_width: 8.0,
            cell_height: 16.0,
        }
    }

    #[test]
    fn latest_pointer_wins() {
        let mailbox = Mailbox::new();
        mailbox.post_pointer(DVec2::new(1.0, 1.0));
        mailbox.post_pointer(DVec2::new(2.0, 3.0));
        assert_eq!(mailbox.take().pointer, Pointer::Present(DVec2::new(2.0, 3.0)));
        // Still there on the next frame.
        assert_eq!(mailbox.take().pointer.position(), Some(DVec2::new(2.0, 3.0)));
    }

    #[test]
    fn leave_clears_pointer() {
        let mailbox = Mailbox::new();
        mailbox.post_pointer(DVec2::new(1.0, 1.0));
        mailbox.post_leave();
        assert_eq!(mailbox.take().pointer, Pointer::Absent);
    }

    #[test]
    fn resize_is_consumed_once() {
        let mailbox = Mailbox::new();
        mailbox.post_resize(surface(20));
        mailbox.post_resize(surface(40));
        assert_eq!(mailbox.take().resize, Some(surface(40)));
        assert_eq!(mailbox.take().resize, None);
    }

    #[test]
    fn handles_posts_from_other_threads() {
        let mailbox = Mailbox::new();
        let writer = mailbox.clone();
        thread::spawn(move || {
            for i in 0..100 {
                writer.post_pointer(DVec2::new(i as f64, 0.0));
            }
        })
        .join()
        .unwrap();
        assert_eq!(mailbox.take().pointer, Pointer::Present(DVec2::new(99.0, 0.0)));
    }
}
