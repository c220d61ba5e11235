//! decalcast: live camera images projected decal-style onto tracked quads.
//!
//! decalcast renders a subscribed camera image as a texture projected onto
//! one or more rectangular quads positioned in 3D space, each anchored to a
//! tracked coordinate frame plus a configurable offset. It is used to
//! visualize where a sensor image maps onto a robot part or surface for
//! operator inspection.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use decalcast::*;
//!
//! // The host supplies an image stream and a transform source; tests and
//! // demos can use the in-process implementations.
//! let bus = ImageBus::new();
//! let transforms = Arc::new(StaticTransformSource::new(2.0));
//! transforms.insert("base_link", Pose::IDENTITY);
//!
//! let mut options = DisplayOptions::default();
//! options.quads.push(QuadOptions {
//!     image_topic: "/camera/image".to_string(),
//!     width: 1.0,
//!     height: 0.5,
//!     ..QuadOptions::default()
//! });
//!
//! let mut display = CameraQuadDisplay::new(options, Arc::new(bus.clone()), transforms);
//! let mut engine = RecordingEngine::new();
//!
//! display.on_initialize();
//! display.on_enable(&mut engine);
//! // ... host drives display.update(wall_dt, ros_dt, &mut engine) per frame
//! // and registers the display's render-queue listener with the engine.
//! ```
//!
//! # Architecture
//!
//! - `decalcast-core`: frames, poses, options, and capability traits
//! - `decalcast-render`: engine capabilities, frustum projectors, binding
//! - `decalcast-display`: quad records, mesh construction, the controller

// Re-export core types
pub use decalcast_core::{
    CommandQueue, DecalError, DisplayCommand, DisplayOptions, FrameCache, ImageBus, ImageFrame,
    ImageStream, Mat4, PixelEncoding, Pose, Quat, QuadOptions, Result, StampedPose,
    StaticTransformSource, Subscription, TransformSource, Vec2, Vec3, Vec4,
};

// Re-export render types
pub use decalcast_render::{
    DecalBinder, DecalEngine, DecalProjector, Frustum, FrustumUniforms, MaterialBindings,
    MeshData, NodeId, RecordingEngine, RenderQueueId, RenderQueueListener, RenderTargetListener,
    SceneGraph, PROJECTION_DISTANCE,
};

// Re-export display types
pub use decalcast_display::{
    construct_mesh, CameraQuadDisplay, DisplayState, Quad, QuadMesh, QuadStatus, StatusLevel,
};

/// Initializes env-filtered logging for binaries and examples.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
