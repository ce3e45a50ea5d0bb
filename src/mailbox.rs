//! One-slot, latest-value-wins mailboxes drained once per animation frame.
//!
//! High-frequency input (pan deltas, compartment drag moves) is posted here
//! instead of being applied immediately. The first post after a drain asks
//! the host for an animation frame; later posts before that frame fires only
//! overwrite (or merge into) the pending value. Work per frame is therefore
//! bounded no matter how fast events arrive.

#[cfg(test)]
#[path = "mailbox_test.rs"]
mod mailbox_test;

/// A coalescing slot for values consumed on the next frame tick.
#[derive(Debug, Clone)]
pub struct Mailbox<T> {
    pending: Option<T>,
    frame_requested: bool,
}

impl<T> Default for Mailbox<T> {
    fn default() -> Self {
        Self { pending: None, frame_requested: false }
    }
}

impl<T> Mailbox<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the pending value.
    ///
    /// Returns `true` when the caller must request an animation frame, i.e.
    /// no frame is outstanding for this mailbox yet.
    pub fn post(&mut self, value: T) -> bool {
        self.pending = Some(value);
        self.request_frame()
    }

    /// Fold `value` into the pending value with `merge`, or store it if the
    /// slot is empty. Same return contract as [`Mailbox::post`].
    pub fn post_with(&mut self, value: T, merge: impl FnOnce(T, T) -> T) -> bool {
        self.pending = Some(match self.pending.take() {
            Some(prev) => merge(prev, value),
            None => value,
        });
        self.request_frame()
    }

    /// Drain the pending value. Called from the frame callback; re-arms the
    /// mailbox so the next post requests a new frame.
    pub fn take(&mut self) -> Option<T> {
        self.frame_requested = false;
        self.pending.take()
    }

    /// Drop any pending value without consuming it.
    pub fn clear(&mut self) {
        self.pending = None;
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn request_frame(&mut self) -> bool {
        if self.frame_requested {
            return false;
        }
        self.frame_requested = true;
        true
    }
}
