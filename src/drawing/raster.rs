//! Raster output rendered with tiny-skia.
//!
//! Labels are filled as glyph outlines so rotated dimension text stays crisp. The
//! font comes from the system font database; when no sans-serif face is installed the
//! drawing is still produced, only without text.

use std::path::Path;

use fontdb::{Database, Family, Query, Stretch, Style, Weight};
use rusttype::{point as rt_point, Font, OutlineBuilder, Scale};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, StrokeDash, Transform};
use tracing::{debug, info, warn};

use super::surface::{paint_sheet, Pixel, Surface};
use super::{Anchor, Color, Sheet, Stroke, TextStyle};
use crate::errors::RenderError;

/// Regular and bold faces used for labels.
struct Fonts {
    /// Face used for regular and italic labels.
    regular: Font<'static>,
    /// Bold face, when the system has one.
    bold: Option<Font<'static>>,
}

impl Fonts {
    /// Look up a sans-serif family among the installed system fonts.
    fn load() -> Option<Self> {
        let mut database = Database::new();
        database.load_system_fonts();
        let regular = load_face(&database, Weight::NORMAL)?;
        let bold = load_face(&database, Weight::BOLD);
        debug!(faces = database.len(), "loaded system fonts");
        Some(Self { regular, bold })
    }

    /// Face for a label, falling back to regular when bold is missing.
    fn face(&self, bold: bool) -> &Font<'static> {
        match (&self.bold, bold) {
            (Some(font), true) => font,
            _ => &self.regular,
        }
    }
}

/// First sans-serif face of the given weight.
fn load_face(database: &Database, weight: Weight) -> Option<Font<'static>> {
    let query = Query {
        families: &[Family::SansSerif],
        weight,
        stretch: Stretch::Normal,
        style: Style::Normal,
    };
    let id = database.query(&query)?;
    database
        .with_face_data(id, |data, index| {
            Font::try_from_vec_and_index(data.to_vec(), index)
        })
        .flatten()
}

/// Collects rusttype glyph outlines into a tiny-skia path.
struct GlyphPath {
    /// Path under construction.
    builder: PathBuilder,
}

impl OutlineBuilder for GlyphPath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        self.builder.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        self.builder.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.builder.close();
    }
}

/// Surface backed by a tiny-skia pixmap.
pub struct RasterSurface {
    /// Target pixels.
    pixmap: Pixmap,
    /// Label fonts, `None` when no system font was found.
    fonts: Option<Fonts>,
}

impl RasterSurface {
    /// White canvas of the given size.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidCanvas`] when either dimension is zero or the
    /// pixmap cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, RenderError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RenderError::InvalidCanvas { width, height })?;
        pixmap.fill(to_skia(Color::WHITE));
        let fonts = Fonts::load();
        if fonts.is_none() {
            warn!("no sans-serif system font found; labels will be omitted from the image");
        }
        Ok(Self { pixmap, fonts })
    }

    /// Hand over the painted pixmap.
    #[must_use]
    pub fn into_pixmap(self) -> Pixmap {
        self.pixmap
    }
}

/// Convert to a tiny-skia colour.
fn to_skia(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Anti-aliased solid paint.
fn paint_for(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

/// Round-capped tiny-skia stroke, dashed when requested.
fn skia_stroke(stroke: &Stroke) -> tiny_skia::Stroke {
    let width = stroke.width.max(0.1) as f32;
    let dash = if stroke.dashed {
        StrokeDash::new(vec![width * 4.0, width * 3.0], 0.0)
    } else {
        None
    };
    tiny_skia::Stroke {
        width,
        line_cap: tiny_skia::LineCap::Round,
        dash,
        ..Default::default()
    }
}

impl Surface for RasterSurface {
    fn size(&self) -> (f64, f64) {
        (f64::from(self.pixmap.width()), f64::from(self.pixmap.height()))
    }

    fn stroke_path(&mut self, points: &[Pixel], stroke: &Stroke) {
        let Some(((x0, y0), rest)) = points.split_first() else {
            return;
        };
        let mut builder = PathBuilder::new();
        builder.move_to(*x0 as f32, *y0 as f32);
        for (x, y) in rest {
            builder.line_to(*x as f32, *y as f32);
        }
        if let Some(path) = builder.finish() {
            self.pixmap.stroke_path(
                &path,
                &paint_for(stroke.color),
                &skia_stroke(stroke),
                Transform::identity(),
                None,
            );
        }
    }

    fn stroke_circle(&mut self, center: Pixel, radius: f64, stroke: &Stroke) {
        if let Some(path) = PathBuilder::from_circle(center.0 as f32, center.1 as f32, radius as f32)
        {
            self.pixmap.stroke_path(
                &path,
                &paint_for(stroke.color),
                &skia_stroke(stroke),
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_circle(&mut self, center: Pixel, radius: f64, color: Color) {
        if let Some(path) = PathBuilder::from_circle(center.0 as f32, center.1 as f32, radius as f32)
        {
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn fill_square(&mut self, center: Pixel, side: f64, color: Color) {
        let rect = Rect::from_xywh(
            (center.0 - side / 2.0) as f32,
            (center.1 - side / 2.0) as f32,
            side as f32,
            side as f32,
        );
        if let Some(rect) = rect {
            let path = PathBuilder::from_rect(rect);
            self.pixmap.fill_path(
                &path,
                &paint_for(color),
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }

    fn text(&mut self, at: Pixel, text: &str, style: &TextStyle) {
        let Some(fonts) = &self.fonts else {
            return;
        };
        let font = fonts.face(style.bold);
        let scale = Scale::uniform(style.size as f32);
        let metrics = font.v_metrics(scale);

        let mut glyphs = GlyphPath {
            builder: PathBuilder::new(),
        };
        let mut advance = 0.0_f32;
        for glyph in font.layout(text, scale, rt_point(0.0, 0.0)) {
            advance = glyph.position().x + glyph.unpositioned().h_metrics().advance_width;
            glyph.build_outline(&mut glyphs);
        }
        let Some(path) = glyphs.builder.finish() else {
            return;
        };

        let shift_x = match style.anchor {
            Anchor::Start => 0.0,
            Anchor::Middle => -advance / 2.0,
            Anchor::End => -advance,
        };
        // Baseline sits half the glyph height below the anchor.
        let shift_y = (metrics.ascent + metrics.descent) / 2.0;
        let mut transform = Transform::from_rotate(-style.rotation as f32)
            .pre_translate(shift_x, shift_y)
            .post_translate(at.0 as f32, at.1 as f32);
        if style.italic {
            transform = transform.pre_concat(Transform::from_skew(-0.2, 0.0));
        }
        self.pixmap.fill_path(
            &path,
            &paint_for(style.color),
            FillRule::Winding,
            transform,
            None,
        );
    }
}

/// Paint `sheet` into a new pixmap.
///
/// # Errors
///
/// Returns [`RenderError::InvalidCanvas`] when the size is unusable.
pub fn render_png(sheet: &Sheet, width: u32, height: u32) -> Result<Pixmap, RenderError> {
    let mut surface = RasterSurface::new(width, height)?;
    paint_sheet(sheet, &mut surface);
    Ok(surface.into_pixmap())
}

/// Paint `sheet` and write it to `path` as PNG.
///
/// # Errors
///
/// Returns [`RenderError`] when the canvas cannot be created or the file cannot be
/// encoded and written.
pub fn save_png(
    sheet: &Sheet,
    width: u32,
    height: u32,
    path: impl AsRef<Path>,
) -> Result<(), RenderError> {
    let path = path.as_ref();
    let pixmap = render_png(sheet, width, height)?;
    let encoded = pixmap
        .encode_png()
        .map_err(|error| RenderError::Encode(error.to_string()))?;
    std::fs::write(path, encoded)?;
    info!(path = %path.display(), width, height, "wrote PNG");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Bounds, Grid, Panel, Primitive};
    use crate::geometry::point;

    fn line_sheet() -> Sheet {
        Sheet {
            title: String::new(),
            panels: vec![Panel {
                title: String::new(),
                bounds: Bounds::new(0.0, 10.0, 0.0, 10.0),
                grid: Grid {
                    major: 5.0,
                    minor: 1.0,
                },
                primitives: vec![Primitive::Line {
                    from: point(0.0, 5.0),
                    to: point(10.0, 5.0),
                    stroke: Stroke::solid(Color::BLACK, 8.0),
                }],
            }],
        }
    }

    #[test]
    fn zero_sized_canvas_is_rejected() {
        let error = render_png(&line_sheet(), 0, 100).expect_err("empty canvas");
        assert!(matches!(
            error,
            RenderError::InvalidCanvas {
                width: 0,
                height: 100
            }
        ));
    }

    #[test]
    fn structure_lines_darken_pixels() {
        let pixmap = render_png(&line_sheet(), 440, 400).expect("canvas allocated");
        let dark = pixmap
            .pixels()
            .iter()
            .filter(|pixel| pixel.red() < 64 && pixel.alpha() == 255)
            .count();
        assert!(dark > 0);
        let corner = pixmap.pixel(0, pixmap.height() - 1).expect("in bounds");
        assert_eq!(corner.red(), 255);
    }

    #[test]
    fn png_is_written_to_disk() {
        let directory = tempfile::tempdir().expect("temporary directory");
        let path = directory.path().join("sheet.png");
        save_png(&line_sheet(), 220, 100, &path).expect("png written");
        let bytes = std::fs::read(&path).expect("png readable");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
