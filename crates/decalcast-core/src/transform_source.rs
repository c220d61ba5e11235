//! Transform-frame lookup capability.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{DecalError, Result};
use crate::pose::{Pose, StampedPose};

/// Capability for resolving a named coordinate frame to a pose.
///
/// Lookups are non-blocking: a frame that is not available yet or has grown
/// too old yields an error for this tick and is retried by the next one.
pub trait TransformSource: Send + Sync {
    /// Resolves `frame_id` to a pose in the fixed frame.
    ///
    /// # Errors
    ///
    /// [`DecalError::UnknownFrame`] when the frame has never been seen, and
    /// [`DecalError::StaleTransform`] when the last observation is older than
    /// the source's staleness threshold.
    fn lookup(&self, frame_id: &str) -> Result<StampedPose>;
}

/// In-memory transform source backed by a map of named frames.
///
/// Used by tests and demos; a host integration would adapt its own transform
/// listener to [`TransformSource`] instead.
#[derive(Debug)]
pub struct StaticTransformSource {
    frames: RwLock<HashMap<String, StampedPose>>,
    stale_threshold: f32,
}

impl StaticTransformSource {
    /// Creates an empty source with the given staleness threshold (seconds).
    #[must_use]
    pub fn new(stale_threshold: f32) -> Self {
        Self {
            frames: RwLock::new(HashMap::new()),
            stale_threshold,
        }
    }

    /// Inserts or replaces a frame with a fresh observation.
    pub fn insert(&self, frame_id: impl Into<String>, pose: Pose) {
        let mut frames = self.frames.write().expect("transform map lock poisoned");
        frames.insert(frame_id.into(), StampedPose::fresh(pose));
    }

    /// Sets the observation age for an existing frame.
    pub fn set_age(&self, frame_id: &str, age_seconds: f32) {
        let mut frames = self.frames.write().expect("transform map lock poisoned");
        if let Some(stamped) = frames.get_mut(frame_id) {
            stamped.age_seconds = age_seconds;
        }
    }

    /// Removes a frame, making subsequent lookups fail as unknown.
    pub fn remove(&self, frame_id: &str) {
        let mut frames = self.frames.write().expect("transform map lock poisoned");
        frames.remove(frame_id);
    }
}

impl Default for StaticTransformSource {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl TransformSource for StaticTransformSource {
    fn lookup(&self, frame_id: &str) -> Result<StampedPose> {
        let frames = self.frames.read().expect("transform map lock poisoned");
        let stamped = frames
            .get(frame_id)
            .ok_or_else(|| DecalError::UnknownFrame(frame_id.to_string()))?;
        if stamped.age_seconds > self.stale_threshold {
            return Err(DecalError::StaleTransform {
                frame: frame_id.to_string(),
                age_seconds: stamped.age_seconds,
            });
        }
        Ok(*stamped)
    }
}
