//! Background layer

use crate::render_spec::{Background, Fill};
use textlab_core::Size;
use textlab_paint::{generate_gradient, Canvas};

/// Paint the full-canvas background
///
/// The opacity is applied to both gradient colors before the gradient is
/// generated, so transparency is uniform across the layer.
pub fn background_layer(background: &Background, size: Size) -> Canvas {
    let alpha = background.alpha();
    match &background.fill {
        Fill::Solid(color) => Canvas::filled(size.width, size.height, color.with_alpha(alpha)),
        Fill::Gradient(gradient) => generate_gradient(
            size.width,
            size.height,
            gradient.from.with_alpha(alpha),
            gradient.to.with_alpha(alpha),
            gradient.kind,
            gradient.angle,
            gradient.size,
        ),
    }
}
