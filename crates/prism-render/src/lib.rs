//! Rendering of generated shader programs.
//!
//! The renderer turns a [`ShaderProgramDescription`](prism_core::ShaderProgramDescription)
//! into one indexed draw call. It never touches a graphics API directly: the browser
//! crate implements [`GraphicsBackend`] over WebGL, and tests use the recording
//! backend behind the `testing` feature.
//!
//! Every render rebuilds the whole pipeline from scratch; nothing is cached between
//! calls.

mod backend;
mod pipeline;

#[cfg(any(test, feature = "testing"))]
pub mod recording;

pub use backend::{GraphicsBackend, RenderSurface, POSITION_ATTRIBUTE};
pub use pipeline::{RenderReport, RendererOptions, ShaderRenderer};
