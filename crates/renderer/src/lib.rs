//! CPU renderer for the gooshade effect core.
//!
//! The crate turns a pure per-pixel effect function into frames on disk. The
//! overall flow is:
//!
//! ```text
//!   CLI / gooshade
//!          │ EffectInstance + ImageSampler
//!          ▼
//!   FrameTimeline ──▶ render_into() ──▶ Pixmap ──▶ FrameSink ──▶ PNG files
//!                        (rayon rows)              (writer thread)
//! ```
//!
//! `render_into` evaluates the effect once per output pixel with no shared
//! mutable state between invocations, so rows are dispatched across the rayon
//! pool. The `FrameSink` keeps PNG encoding off the render thread by handing
//! finished pixmaps to a background writer over a channel.

mod dispatch;
mod instance;
mod pixmap;
mod sink;
mod timeline;

pub use dispatch::{blend_into, render_into};
pub use instance::{EffectInstance, ParamError, StrokeLayer};
pub use pixmap::{Pixmap, PixmapSampler};
pub use sink::{FrameSink, FrameSinkError};
pub use timeline::{FrameStamp, FrameTimeline};
