//! Quad records, mesh construction, and the display controller.
//!
//! This crate ties the core types and the render layer together:
//! [`construct_mesh`] builds quad geometry, [`Quad`] is the composite
//! per-quad record, and [`CameraQuadDisplay`] is the controller the host
//! visualization framework drives each frame.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod display;
pub mod mesh;
pub mod quad;

pub use display::{CameraQuadDisplay, DisplayState, QuadStatus, StatusLevel};
pub use mesh::{construct_mesh, QuadMesh};
pub use quad::Quad;
