//! Core abstractions for decalcast.
//!
//! This crate provides the fundamental types used throughout decalcast:
//! - [`ImageFrame`] and the concurrent latest-wins [`FrameCache`]
//! - [`Pose`] and the [`TransformSource`] lookup capability
//! - [`DisplayOptions`] configuration surface
//! - The [`ImageStream`] subscription capability and in-process [`ImageBus`]
//! - The [`CommandQueue`] carrying UI property changes to the frame tick

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod command;
pub mod error;
pub mod frame;
pub mod frame_cache;
pub mod image_stream;
pub mod options;
pub mod pose;
pub mod transform_source;

pub use command::{CommandQueue, DisplayCommand};
pub use error::{DecalError, Result};
pub use frame::{ImageFrame, PixelEncoding};
pub use frame_cache::FrameCache;
pub use image_stream::{FrameCallback, ImageBus, ImageStream, Subscription};
pub use options::{DisplayOptions, QuadOptions};
pub use pose::{Pose, StampedPose};
pub use transform_source::{StaticTransformSource, TransformSource};

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
