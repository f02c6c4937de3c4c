//! Text block placement inside a canvas

use textlab_core::{Alignment, AxisAnchor, Margins, Size};

/// Top-left position of a `text` sized block pinned by `alignment`
///
/// The available area is the canvas minus margins. Start anchors pin to the
/// leading margin, end anchors to the trailing margin, and middle anchors
/// split the leftover space with floor division. Results may be negative when
/// the text does not fit.
pub fn text_origin(canvas: Size, margins: Margins, text: Size, alignment: Alignment) -> (i32, i32) {
    let x = axis_position(
        alignment.horizontal(),
        canvas.width,
        margins.left,
        margins.right,
        text.width,
    );
    let y = axis_position(
        alignment.vertical(),
        canvas.height,
        margins.top,
        margins.bottom,
        text.height,
    );
    (x, y)
}

fn axis_position(anchor: AxisAnchor, extent: u32, lead: u32, trail: u32, length: u32) -> i32 {
    let (extent, lead, trail, length) = (extent as i64, lead as i64, trail as i64, length as i64);
    let position = match anchor {
        AxisAnchor::Start => lead,
        AxisAnchor::Middle => lead + (extent - lead - trail - length).div_euclid(2),
        AxisAnchor::End => extent - trail - length,
    };
    position.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: Size = Size::new(800, 400);

    #[test]
    fn test_all_anchors() {
        let margins = Margins::new(10, 20, 30, 40);
        let text = Size::new(100, 50);
        let expected = [
            (Alignment::NorthWest, (10, 30)),
            (Alignment::North, (345, 30)),
            (Alignment::NorthEast, (680, 30)),
            (Alignment::West, (10, 170)),
            (Alignment::Center, (345, 170)),
            (Alignment::East, (680, 170)),
            (Alignment::SouthWest, (10, 310)),
            (Alignment::South, (345, 310)),
            (Alignment::SouthEast, (680, 310)),
        ];
        for (alignment, origin) in expected {
            assert_eq!(text_origin(CANVAS, margins, text, alignment), origin, "{alignment}");
        }
    }

    #[test]
    fn test_center_is_centered() {
        let (x, y) = text_origin(CANVAS, Margins::uniform(0), Size::new(101, 51), Alignment::Center);
        assert_eq!((x, y), (349, 174));
        // Block center within one pixel of the canvas center
        assert!((x as f32 + 50.5 - 400.0).abs() <= 1.0);
        assert!((y as f32 + 25.5 - 200.0).abs() <= 1.0);
    }

    #[test]
    fn test_oversized_text_floors_negative() {
        // (100 - 0 - 0 - 105) / 2 floors to -3
        let origin = text_origin(
            Size::new(100, 100),
            Margins::uniform(0),
            Size::new(105, 10),
            Alignment::North,
        );
        assert_eq!(origin, (-3, 0));

        let origin = text_origin(
            Size::new(100, 100),
            Margins::uniform(0),
            Size::new(150, 150),
            Alignment::SouthEast,
        );
        assert_eq!(origin, (-50, -50));
    }
}
