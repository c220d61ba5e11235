//! Latest-wins frame storage shared between the delivery and render paths.

use std::sync::{Arc, Mutex};

use crate::frame::ImageFrame;

/// Holds the most recent frame for each quad index.
///
/// `store` is called from the message-delivery thread, `latest` from the
/// per-frame render tick. Frames are immutable `Arc` handles, so the lock is
/// held only long enough to swap a pointer; pixel data is never copied or
/// mutated under the lock.
#[derive(Debug, Default)]
pub struct FrameCache {
    slots: Mutex<Vec<Option<Arc<ImageFrame>>>>,
}

impl FrameCache {
    /// Creates a cache with `count` empty slots.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            slots: Mutex::new(vec![None; count]),
        }
    }

    /// Replaces the slot set with `count` empty slots.
    ///
    /// Atomic with respect to concurrent readers: a tick either sees the old
    /// complete set or the new one, never a partial resize.
    pub fn resize(&self, count: usize) {
        let mut slots = self.slots.lock().expect("frame cache lock poisoned");
        *slots = vec![None; count];
    }

    /// Publishes `frame` as the current frame for `index` (latest wins).
    ///
    /// Returns false when the index is outside the configured slot range,
    /// which can happen transiently while the quad count is being changed.
    pub fn store(&self, index: usize, frame: Arc<ImageFrame>) -> bool {
        let mut slots = self.slots.lock().expect("frame cache lock poisoned");
        match slots.get_mut(index) {
            Some(slot) => {
                *slot = Some(frame);
                true
            }
            None => {
                log::debug!("dropping frame for out-of-range quad index {index}");
                false
            }
        }
    }

    /// Returns the latest frame for `index`, if any has arrived.
    #[must_use]
    pub fn latest(&self, index: usize) -> Option<Arc<ImageFrame>> {
        let slots = self.slots.lock().expect("frame cache lock poisoned");
        slots.get(index).and_then(Clone::clone)
    }

    /// Clears every slot without changing the slot count.
    pub fn clear(&self) {
        let mut slots = self.slots.lock().expect("frame cache lock poisoned");
        for slot in slots.iter_mut() {
            *slot = None;
        }
    }

    /// Returns the number of slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.lock().expect("frame cache lock poisoned").len()
    }

    /// Returns true if the cache has no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
