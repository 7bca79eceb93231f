//! Client for the shader generation service.
//!
//! A request is a single `POST {base}/generate-shader` with a JSON body
//! `{"description": ...}`. There is no retry, timeout, or queue: each call either
//! yields a complete [`GeneratedShader`] or a [`ServiceError`](prism_core::ServiceError)
//! whose text is shown to the user as is.

mod client;
mod config;
mod transport;

pub use client::{interpret_reply, GeneratedShader, ShaderService};
pub use config::{ServiceConfig, BACKEND_URL_ENV, DEFAULT_BACKEND_URL, GENERATE_SHADER_PATH};
pub use transport::{HttpReply, ReqwestTransport, ShaderTransport};
