//! Rendering layer for decalcast.
//!
//! Contains the render-engine capability traits ([`SceneGraph`],
//! [`MaterialBindings`], the listener traits), the frustum math and per-quad
//! [`DecalProjector`], the event-scoped [`DecalBinder`], GPU texture upload
//! helpers, and a [`RecordingEngine`] test double.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod decal;
pub mod engine;
pub mod frustum;
pub mod projector;
pub mod recording;
pub mod texture;

pub use decal::DecalBinder;
pub use engine::{
    DecalEngine, MaterialBindings, MeshData, NodeId, RenderQueueId, RenderQueueListener,
    RenderTargetListener, SceneGraph,
};
pub use frustum::{Frustum, FrustumUniforms};
pub use projector::{DecalProjector, PROJECTION_DISTANCE};
pub use recording::{RecordedNode, RecordingEngine};
pub use texture::{aligned_bytes_per_row, create_decal_texture, upload_frame};
