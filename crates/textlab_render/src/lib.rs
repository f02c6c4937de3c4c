//! textlab compositor
//!
//! Turns a [`RenderSpec`] into a [`Canvas`]: background, glow, outline and
//! text fill layers are built independently and composited in a fixed
//! order. Presets persist a `RenderSpec` as JSON, and finished canvases are
//! exported as PNG or JPEG.
//!
//! # Example
//!
//! ```rust
//! use textlab_render::{Renderer, RenderSpec};
//!
//! let mut renderer = Renderer::builtin_only();
//! let spec = RenderSpec {
//!     text: "Hello".to_string(),
//!     width: 200,
//!     height: 80,
//!     ..RenderSpec::default()
//! };
//! let canvas = renderer.render(&spec);
//! assert_eq!((canvas.width(), canvas.height()), (200, 80));
//! ```

pub mod background;
pub mod effects;
pub mod export;
mod lenient;
pub mod preset;
pub mod render_spec;
pub mod renderer;

pub use export::{encode_image, save_image, ExportError, OutputFormat, JPEG_QUALITY};
pub use preset::{list_presets, Preset, PresetError};
pub use render_spec::{Background, Fill, FontSpec, GlowParams, GradientFill, OutlineParams, RenderSpec};
pub use renderer::Renderer;
pub use textlab_paint::Canvas;
