//! Per-pixel effect core for gooshade.
//!
//! Every effect in this crate is a pure function from a pixel position plus a
//! per-frame uniform bundle (and, for the distortion effects, a read-only
//! [`ImageSampler`]) to an output color or displaced coordinate. The functions
//! hold no state between invocations, so the renderer is free to evaluate them
//! for every pixel of a frame concurrently and in any order:
//!
//! ```text
//!   host (renderer / CLI)
//!          │ uniforms, sampler        one call per output pixel
//!          ▼
//!   spectrum::shade ─┐
//!   gooey::shade    ─┼─▶ Vec4 color (RGBA, premultiplied where stated)
//!   depth::shade    ─┤
//!   crt::shade      ─┘
//! ```
//!
//! Cross-frame continuity (spring-smoothed tilt, gesture state, playlist
//! position) is owned by the caller and re-supplied through next frame's
//! uniform bundle; nothing in this crate caches between evaluations.

pub mod crt;
pub mod depth;
pub mod gooey;
pub mod math;
pub mod sampler;
pub mod sdf;
pub mod spectrum;

pub use crt::CrtUniforms;
pub use depth::DepthUniforms;
pub use gooey::GooeyUniforms;
pub use sampler::{CheckerSampler, ImageSampler, SolidSampler};
pub use spectrum::SpectrumUniforms;
