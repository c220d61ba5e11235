//! Property-change commands crossing from the UI context to the frame tick.
//!
//! UI handlers never touch render state directly; they push commands here and
//! the display controller drains the queue at the start of each `update`, so
//! all render-state mutation happens on the render actor.

use std::collections::VecDeque;
use std::sync::Mutex;

use glam::Vec4;

use crate::pose::Pose;

/// A deferred property change for a decal display.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Change the anchor frame for every quad.
    SetTfFrame(String),
    /// Change the image-size-to-meters scale.
    SetMetersPerPixel(f32),
    /// Change the number of quads (tears down and rebuilds the full set).
    SetQuadCount(usize),
    /// Re-subscribe one quad to a different topic.
    SetImageTopic { quad: usize, topic: String },
    /// Move one quad's offset pose.
    SetQuadPose { quad: usize, pose: Pose },
    /// Resize one quad.
    SetQuadSize { quad: usize, width: f32, height: f32 },
    /// Change one quad's border strip.
    SetBorder {
        quad: usize,
        size: f32,
        color: Vec4,
    },
    /// Force a full geometry/projector rebuild.
    RebuildAll,
}

/// Thread-safe FIFO of pending display commands.
#[derive(Debug, Default)]
pub struct CommandQueue {
    pending: Mutex<VecDeque<DisplayCommand>>,
}

impl CommandQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues a command; callable from any thread.
    pub fn push(&self, command: DisplayCommand) {
        let mut pending = self.pending.lock().expect("command queue lock poisoned");
        pending.push_back(command);
    }

    /// Takes every pending command, preserving arrival order.
    #[must_use]
    pub fn drain(&self) -> Vec<DisplayCommand> {
        let mut pending = self.pending.lock().expect("command queue lock poisoned");
        pending.drain(..).collect()
    }

    /// Returns the number of queued commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().expect("command queue lock poisoned").len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let queue = CommandQueue::new();
        queue.push(DisplayCommand::SetQuadCount(2));
        queue.push(DisplayCommand::RebuildAll);

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![DisplayCommand::SetQuadCount(2), DisplayCommand::RebuildAll]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_from_other_thread() {
        let queue = std::sync::Arc::new(CommandQueue::new());
        let ui_queue = std::sync::Arc::clone(&queue);
        std::thread::spawn(move || {
            ui_queue.push(DisplayCommand::SetMetersPerPixel(0.01));
        })
        .join()
        .unwrap();

        assert_eq!(queue.drain().len(), 1);
    }
}
