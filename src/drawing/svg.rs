//! Vector output as a standalone SVG document.

use std::fmt::Write;

use super::surface::{paint_sheet, Pixel, Surface};
use super::{Anchor, Color, Sheet, Stroke, TextStyle};

/// Surface that accumulates SVG elements.
#[derive(Debug)]
pub struct SvgSurface {
    /// Document width in pixels.
    width: f64,
    /// Document height in pixels.
    height: f64,
    /// Elements written so far.
    body: String,
}

impl SvgSurface {
    /// Empty document of the given size with a white background.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self {
            width: f64::from(width),
            height: f64::from(height),
            body: String::new(),
        };
        writeln!(
            &mut surface.body,
            r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{}"/>"#,
            Color::WHITE.hex()
        )
        .expect("writing to string cannot fail");
        surface
    }

    /// Finish the document.
    #[must_use]
    pub fn finish(self) -> String {
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n\
             {body}</svg>\n",
            w = self.width,
            h = self.height,
            body = self.body
        )
    }
}

/// `stroke` attributes shared by every outlined element.
fn stroke_attributes(stroke: &Stroke) -> String {
    let mut attributes = format!(
        r#"fill="none" stroke="{}" stroke-width="{:.2}" stroke-linecap="round" stroke-linejoin="round""#,
        stroke.color.hex(),
        stroke.width
    );
    if stroke.color.a < 255 {
        write!(attributes, r#" stroke-opacity="{:.3}""#, stroke.color.opacity())
            .expect("writing to string cannot fail");
    }
    if stroke.dashed {
        write!(
            attributes,
            r#" stroke-dasharray="{:.1} {:.1}""#,
            stroke.width * 4.0,
            stroke.width * 3.0
        )
        .expect("writing to string cannot fail");
    }
    attributes
}

/// Escape the characters XML reserves in text content.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

impl Surface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn stroke_path(&mut self, points: &[Pixel], stroke: &Stroke) {
        if points.len() < 2 {
            return;
        }
        let coordinates: Vec<String> = points
            .iter()
            .map(|(x, y)| format!("{x:.2},{y:.2}"))
            .collect();
        writeln!(
            self.body,
            r#"<polyline points="{}" {}/>"#,
            coordinates.join(" "),
            stroke_attributes(stroke)
        )
        .expect("writing to string cannot fail");
    }

    fn stroke_circle(&mut self, center: Pixel, radius: f64, stroke: &Stroke) {
        writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" {}/>"#,
            center.0,
            center.1,
            radius,
            stroke_attributes(stroke)
        )
        .expect("writing to string cannot fail");
    }

    fn fill_circle(&mut self, center: Pixel, radius: f64, color: Color) {
        writeln!(
            self.body,
            r#"<circle cx="{:.2}" cy="{:.2}" r="{:.2}" fill="{}"/>"#,
            center.0,
            center.1,
            radius,
            color.hex()
        )
        .expect("writing to string cannot fail");
    }

    fn fill_square(&mut self, center: Pixel, side: f64, color: Color) {
        writeln!(
            self.body,
            r#"<rect x="{:.2}" y="{:.2}" width="{side:.2}" height="{side:.2}" fill="{}"/>"#,
            center.0 - side / 2.0,
            center.1 - side / 2.0,
            color.hex()
        )
        .expect("writing to string cannot fail");
    }

    fn text(&mut self, at: Pixel, text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            Anchor::Start => "start",
            Anchor::Middle => "middle",
            Anchor::End => "end",
        };
        let weight = if style.bold { "bold" } else { "normal" };
        let font_style = if style.italic { "italic" } else { "normal" };
        let (x, y) = at;
        let rotation = if style.rotation == 0.0 {
            String::new()
        } else {
            format!(
                r#" transform="rotate({:.2} {x:.2} {y:.2})""#,
                -style.rotation
            )
        };
        writeln!(
            self.body,
            r#"<text x="{x:.2}" y="{y:.2}" font-family="sans-serif" font-size="{:.1}" font-weight="{weight}" font-style="{font_style}" text-anchor="{anchor}" dominant-baseline="middle" fill="{}"{rotation}>{}</text>"#,
            style.size,
            style.color.hex(),
            escape(text)
        )
        .expect("writing to string cannot fail");
    }
}

/// Paint `sheet` into a complete SVG document.
#[must_use]
pub fn render_svg(sheet: &Sheet, width: u32, height: u32) -> String {
    let mut surface = SvgSurface::new(width, height);
    paint_sheet(sheet, &mut surface);
    surface.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawing::{Bounds, Grid, Panel, Primitive};
    use crate::geometry::point;

    fn sample_sheet() -> Sheet {
        Sheet {
            title: "Roof <check> & more".to_string(),
            panels: vec![Panel {
                title: "Side".to_string(),
                bounds: Bounds::new(0.0, 10.0, 0.0, 10.0),
                grid: Grid {
                    major: 5.0,
                    minor: 1.0,
                },
                primitives: vec![
                    Primitive::Line {
                        from: point(0.0, 0.0),
                        to: point(10.0, 10.0),
                        stroke: Stroke::dashed(Color::RED, 2.0),
                    },
                    Primitive::Label {
                        at: point(5.0, 5.0),
                        text: "20'".to_string(),
                        style: TextStyle::new(20.0, Color::BLACK).rotated(-20.0),
                    },
                ],
            }],
        }
    }

    #[test]
    fn document_is_well_formed() {
        let svg = render_svg(&sample_sheet(), 800, 400);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 800 400""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn text_is_escaped_and_rotated() {
        let svg = render_svg(&sample_sheet(), 800, 400);
        assert!(svg.contains("Roof &lt;check&gt; &amp; more"));
        assert!(svg.contains("20&#39;"));
        assert!(svg.contains("rotate(20.00"));
    }

    #[test]
    fn dashed_lines_carry_dash_array() {
        let svg = render_svg(&sample_sheet(), 800, 400);
        assert!(svg.contains("stroke-dasharray"));
        assert!(svg.contains("#ff0000"));
    }

    #[test]
    fn faint_dashed_stroke_writes_every_attribute() {
        let attributes = stroke_attributes(&Stroke::dashed(Color::BLACK.with_opacity(0.5), 2.0));
        assert!(attributes.contains(r#"stroke-opacity="0.502""#));
        assert!(attributes.contains(r#"stroke-dasharray="8.0 6.0""#));
        assert!(attributes.starts_with(r##"fill="none" stroke="#000000""##));
    }
}
