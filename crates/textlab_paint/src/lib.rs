//! textlab raster buffers
//!
//! CPU pixel operations for the text compositing pipeline:
//!
//! - [`Canvas`]: owned RGBA8 buffer with paste, put-alpha and stamp operations
//! - [`AlphaMask`]: single-channel coverage buffer with Gaussian blur
//! - [`generate_gradient`]: two-color linear/radial/circular gradients with a
//!   sharpness control
//! - [`composite`]: the Porter-Duff "over" operator on straight-alpha pixels
//!
//! # Example
//!
//! ```rust
//! use textlab_core::Color;
//! use textlab_paint::{generate_gradient, Canvas, GradientKind};
//!
//! let mut canvas = Canvas::filled(64, 32, Color::WHITE);
//! let overlay = generate_gradient(
//!     64,
//!     32,
//!     Color::rgba(255, 0, 0, 128),
//!     Color::rgba(0, 0, 255, 128),
//!     GradientKind::Linear,
//!     0.0,
//!     100,
//! );
//! canvas.composite_over(&overlay);
//! assert_eq!(canvas.pixel(0, 0).map(|c| c.a), Some(255));
//! ```

pub mod canvas;
pub mod composite;
pub mod gradient;
pub mod mask;

pub use canvas::Canvas;
pub use gradient::{generate_gradient, GradientKind};
pub use mask::AlphaMask;
