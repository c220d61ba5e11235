//! Configuration options for a decal display.

use glam::Vec4;
use serde::{Deserialize, Serialize};

use crate::pose::Pose;

/// Options for one quad of a decal display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadOptions {
    /// Image topic this quad subscribes to.
    pub image_topic: String,

    /// Offset pose relative to the display's anchor frame.
    pub offset: Pose,

    /// Physical width in meters. Zero means "derive from the image size
    /// times `meters_per_pixel` when the first frame arrives".
    pub width: f32,

    /// Physical height in meters. Zero means "derive from the image size".
    pub height: f32,

    /// Border strip thickness in meters (zero disables the border).
    pub border_size: f32,

    /// Border color (RGBA).
    pub border_color: Vec4,
}

impl Default for QuadOptions {
    fn default() -> Self {
        Self {
            image_topic: String::new(),
            offset: Pose::IDENTITY,
            width: 0.0,
            height: 0.0,
            border_size: 0.0,
            border_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
        }
    }
}

/// Configuration surface for a decal display.
///
/// The UI layer edits these values; the display controller consumes them when
/// (re)building quads. Changing `tf_frame` re-anchors every quad; changing a
/// quad's `image_topic` re-subscribes that quad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayOptions {
    /// The coordinate frame all quads are anchored to.
    pub tf_frame: String,

    /// Scale used to derive physical quad size from image dimensions.
    pub meters_per_pixel: f32,

    /// Position tolerance (meters) below which an anchor move does not
    /// trigger a projector/mesh rebuild.
    pub pose_tolerance: f32,

    /// Transform lookups older than this (seconds) are treated as stale.
    pub stale_threshold: f32,

    /// Per-quad options; the length of this list is the quad count.
    pub quads: Vec<QuadOptions>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            tf_frame: "base_link".to_string(),
            meters_per_pixel: 0.001,
            pose_tolerance: 1e-4,
            stale_threshold: 2.0,
            quads: Vec::new(),
        }
    }
}

impl DisplayOptions {
    /// Returns the configured quad count.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.quads.len()
    }

    /// Returns whether the frame name is usable.
    #[must_use]
    pub fn has_valid_frame(&self) -> bool {
        !self.tf_frame.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = DisplayOptions::default();
        assert_eq!(opts.quad_count(), 0);
        assert!(opts.has_valid_frame());
        assert!(opts.meters_per_pixel > 0.0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut opts = DisplayOptions::default();
        opts.quads.push(QuadOptions {
            image_topic: "/camera/image".to_string(),
            width: 1.0,
            height: 0.5,
            border_size: 0.05,
            ..QuadOptions::default()
        });

        let json = serde_json::to_string(&opts).expect("serialize");
        let back: DisplayOptions = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(opts, back);
    }

    #[test]
    fn test_blank_frame_is_invalid() {
        let opts = DisplayOptions {
            tf_frame: "   ".to_string(),
            ..DisplayOptions::default()
        };
        assert!(!opts.has_valid_frame());
    }
}
