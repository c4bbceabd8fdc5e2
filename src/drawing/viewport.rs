//! World-to-pixel mapping for a single panel.

use super::Bounds;
use crate::geometry::Point2D;

/// Pixel rectangle measured from the top-left corner of the output.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl PixelRect {
    /// Rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Uniform scale from world feet to output pixels.
///
/// The world rectangle is fitted inside the pixel rectangle, less a padding fraction
/// on each side, and centred along the axis with room to spare. The y axis is flipped
/// so world "up" is screen "up". `pixel_aspect` is the height of one output pixel
/// divided by its width; it is 1 for images and about 2 for terminal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// World rectangle being shown.
    bounds: Bounds,
    /// Pixel rectangle it is fitted into.
    rect: PixelRect,
    /// Horizontal pixel offset of `bounds.min_x` inside `rect`.
    offset_x: f64,
    /// Vertical pixel offset of `bounds.max_y` inside `rect`.
    offset_y: f64,
    /// Horizontal pixels per foot.
    scale: f64,
    /// Output pixel height over width.
    pixel_aspect: f64,
}

impl Viewport {
    /// Fit `bounds` into `rect`.
    #[must_use]
    pub fn fit(bounds: Bounds, rect: PixelRect, padding: f64, pixel_aspect: f64) -> Self {
        let pad_x = padding * rect.width;
        let pad_y = padding * rect.height;
        let draw_width = rect.width - 2.0 * pad_x;
        let draw_height = rect.height - 2.0 * pad_y;
        let scale_x = draw_width / bounds.width();
        let scale_y = draw_height * pixel_aspect / bounds.height();
        let scale = scale_x.min(scale_y);
        Self {
            bounds,
            rect,
            offset_x: pad_x + (draw_width - scale * bounds.width()) / 2.0,
            offset_y: pad_y + (draw_height - scale / pixel_aspect * bounds.height()) / 2.0,
            scale,
            pixel_aspect,
        }
    }

    /// Pixel position of a world point.
    #[must_use]
    pub fn to_pixel(&self, point: Point2D) -> (f64, f64) {
        let x = self.rect.x + self.offset_x + (point.x - self.bounds.min_x) * self.scale;
        let y = self.rect.y + self.rect.height
            - (self.offset_y + (point.y - self.bounds.min_y) * self.scale / self.pixel_aspect);
        (x, y)
    }

    /// Horizontal pixels per foot.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// World rectangle being displayed.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Pixel rectangle actually covered by the world bounds.
    #[must_use]
    pub fn plot_area(&self) -> PixelRect {
        let (left, top) = self.to_pixel(Point2D::new(self.bounds.min_x, self.bounds.max_y));
        let (right, bottom) = self.to_pixel(Point2D::new(self.bounds.max_x, self.bounds.min_y));
        PixelRect::new(left, top, right - left, bottom - top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::point;

    #[test]
    fn corners_map_inside_rect_with_flipped_y() {
        let viewport = Viewport::fit(
            Bounds::new(0.0, 10.0, 0.0, 5.0),
            PixelRect::new(0.0, 0.0, 200.0, 100.0),
            0.0,
            1.0,
        );
        assert_eq!(viewport.to_pixel(point(0.0, 0.0)), (0.0, 100.0));
        assert_eq!(viewport.to_pixel(point(10.0, 5.0)), (200.0, 0.0));
        assert!((viewport.scale() - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn narrow_axis_is_centred() {
        let viewport = Viewport::fit(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            PixelRect::new(0.0, 0.0, 200.0, 100.0),
            0.0,
            1.0,
        );
        let (x, _) = viewport.to_pixel(point(0.0, 0.0));
        assert!((x - 50.0).abs() < 1.0e-12);
        let area = viewport.plot_area();
        assert!((area.width - 100.0).abs() < 1.0e-12);
        assert!((area.height - 100.0).abs() < 1.0e-12);
    }

    #[test]
    fn tall_cells_halve_vertical_scale() {
        let viewport = Viewport::fit(
            Bounds::new(0.0, 10.0, 0.0, 10.0),
            PixelRect::new(0.0, 0.0, 40.0, 20.0),
            0.0,
            2.0,
        );
        let area = viewport.plot_area();
        assert!((area.width - 40.0).abs() < 1.0e-12);
        assert!((area.height - 20.0).abs() < 1.0e-12);
    }
}
