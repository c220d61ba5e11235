//! Image subscription capability and an in-process bus implementation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::error::{DecalError, Result};
use crate::frame::ImageFrame;

/// Callback invoked on the delivery thread for each arriving frame.
pub type FrameCallback = Arc<dyn Fn(Arc<ImageFrame>) + Send + Sync>;

/// Capability for subscribing to a stream of image frames per topic.
pub trait ImageStream: Send + Sync {
    /// Subscribes `callback` to `topic`.
    ///
    /// The returned guard unsubscribes when dropped.
    ///
    /// # Errors
    ///
    /// [`DecalError::InvalidTopic`] when the topic name is unusable.
    fn subscribe(&self, topic: &str, callback: FrameCallback) -> Result<Subscription>;
}

/// Active subscription guard; dropping it unsubscribes.
pub struct Subscription {
    topic: String,
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl Subscription {
    /// Creates a guard whose drop runs `cancel`.
    pub fn new(topic: impl Into<String>, cancel: Box<dyn FnOnce() + Send>) -> Self {
        Self {
            topic: topic.into(),
            cancel: Some(cancel),
        }
    }

    /// Returns the subscribed topic.
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("topic", &self.topic)
            .finish_non_exhaustive()
    }
}

/// In-process image bus: topics fan out to subscribed callbacks.
///
/// `publish` may be called from any thread; callbacks run on the publisher's
/// thread, outside the bus lock. Tests and demos drive displays through this
/// bus; a host integration adapts its own transport to [`ImageStream`].
#[derive(Clone, Default)]
pub struct ImageBus {
    inner: Arc<BusInner>,
}

#[derive(Default)]
struct BusInner {
    topics: Mutex<HashMap<String, HashMap<u64, FrameCallback>>>,
    next_id: AtomicU64,
}

impl ImageBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers `frame` to every subscriber of `topic`.
    ///
    /// Returns the number of callbacks notified.
    pub fn publish(&self, topic: &str, frame: ImageFrame) -> usize {
        let frame = Arc::new(frame);
        let callbacks: Vec<FrameCallback> = {
            let topics = self.inner.topics.lock().expect("image bus lock poisoned");
            topics
                .get(topic)
                .map(|subs| subs.values().cloned().collect())
                .unwrap_or_default()
        };
        for callback in &callbacks {
            callback(Arc::clone(&frame));
        }
        callbacks.len()
    }

    /// Returns the number of subscribers on `topic`.
    #[must_use]
    pub fn subscriber_count(&self, topic: &str) -> usize {
        let topics = self.inner.topics.lock().expect("image bus lock poisoned");
        topics.get(topic).map_or(0, HashMap::len)
    }
}

impl ImageStream for ImageBus {
    fn subscribe(&self, topic: &str, callback: FrameCallback) -> Result<Subscription> {
        if topic.trim().is_empty() {
            return Err(DecalError::InvalidTopic(topic.to_string()));
        }

        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        {
            let mut topics = self.inner.topics.lock().expect("image bus lock poisoned");
            topics
                .entry(topic.to_string())
                .or_default()
                .insert(id, callback);
        }
        log::debug!("subscribed #{id} to image topic '{topic}'");

        let weak: Weak<BusInner> = Arc::downgrade(&self.inner);
        let topic_owned = topic.to_string();
        let cancel_topic = topic_owned.clone();
        Ok(Subscription::new(
            topic_owned,
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    let mut topics = inner.topics.lock().expect("image bus lock poisoned");
                    if let Some(subs) = topics.get_mut(&cancel_topic) {
                        subs.remove(&id);
                        if subs.is_empty() {
                            topics.remove(&cancel_topic);
                        }
                    }
                }
            }),
        ))
    }
}
