//! Backend-neutral painting of a [`Sheet`].

use super::viewport::{PixelRect, Viewport};
use super::{Anchor, Color, Grid, MarkerKind, Panel, Primitive, Sheet, Stroke, TextStyle};
use crate::geometry::point;

/// Pixel position measured from the top-left corner, y pointing down.
pub type Pixel = (f64, f64);

/// Sheet width that style sizes are expressed against.
const REFERENCE_WIDTH: f64 = 2200.0;
/// Font size of the sheet title.
const SHEET_TITLE_SIZE: f64 = 26.0;
/// Font size of each panel title.
const PANEL_TITLE_SIZE: f64 = 24.0;
/// Font size of grid tick labels.
const TICK_SIZE: f64 = 15.0;
/// Fraction of a panel kept clear around the plot.
const PLOT_PADDING: f64 = 0.07;
/// Length of a dimension arrowhead.
const ARROW_LENGTH: f64 = 12.0;
/// Half-angle of a dimension arrowhead in degrees.
const ARROW_SPREAD: f64 = 25.0;

/// Drawing target for [`paint_sheet`].
///
/// All coordinates are in output pixels and all sizes have already been scaled to the
/// output width.
pub trait Surface {
    /// Output size in pixels.
    fn size(&self) -> (f64, f64);

    /// Height of one output pixel divided by its width.
    fn pixel_aspect(&self) -> f64 {
        1.0
    }

    /// Whether grid lines, tick labels and axis captions are worth drawing.
    fn draws_grid(&self) -> bool {
        true
    }

    /// Vertical space a line of text of `size` occupies.
    fn line_height(&self, size: f64) -> f64 {
        size * 1.8
    }

    /// Stroke an open path through `points`.
    fn stroke_path(&mut self, points: &[Pixel], stroke: &Stroke);

    /// Stroke a circle outline.
    fn stroke_circle(&mut self, center: Pixel, radius: f64, stroke: &Stroke);

    /// Fill a disc.
    fn fill_circle(&mut self, center: Pixel, radius: f64, color: Color);

    /// Fill an axis-aligned square centred on `center`.
    fn fill_square(&mut self, center: Pixel, side: f64, color: Color);

    /// Draw a single line of text anchored at `at`, vertically centred.
    fn text(&mut self, at: Pixel, text: &str, style: &TextStyle);
}

/// Paint `sheet` onto `surface`: the title across the top, then each panel side by
/// side with its grid and primitives.
pub fn paint_sheet(sheet: &Sheet, surface: &mut impl Surface) {
    let (width, height) = surface.size();
    let unit = width / REFERENCE_WIDTH;

    let title_band = surface.line_height(SHEET_TITLE_SIZE * unit);
    surface.text(
        (width / 2.0, title_band / 2.0),
        &sheet.title,
        &TextStyle::new(SHEET_TITLE_SIZE * unit, Color::BLACK).bold(),
    );

    if sheet.panels.is_empty() {
        return;
    }
    let panel_width = width / sheet.panels.len() as f64;
    for (index, panel) in sheet.panels.iter().enumerate() {
        let rect = PixelRect::new(
            index as f64 * panel_width,
            title_band,
            panel_width,
            height - title_band,
        );
        paint_panel(panel, rect, unit, surface);
    }
}

/// Paint one panel into `rect`.
fn paint_panel(panel: &Panel, rect: PixelRect, unit: f64, surface: &mut impl Surface) {
    let title_band = surface.line_height(PANEL_TITLE_SIZE * unit);
    surface.text(
        (rect.x + rect.width / 2.0, rect.y + title_band / 2.0),
        &panel.title,
        &TextStyle::new(PANEL_TITLE_SIZE * unit, Color::BLACK).bold(),
    );

    let plot = PixelRect::new(
        rect.x,
        rect.y + title_band,
        rect.width,
        rect.height - title_band,
    );
    let padding = if surface.draws_grid() { PLOT_PADDING } else { 0.0 };
    let viewport = Viewport::fit(panel.bounds, plot, padding, surface.pixel_aspect());

    if surface.draws_grid() {
        paint_grid(panel.grid, &viewport, unit, surface);
    }
    for primitive in &panel.primitives {
        paint_primitive(primitive, &viewport, unit, surface);
    }
}

/// Multiples of `step` inside `min..=max`.
fn grid_values(min: f64, max: f64, step: f64) -> impl Iterator<Item = f64> {
    let first = (min / step - 1.0e-9).ceil() as i64;
    let last = (max / step + 1.0e-9).floor() as i64;
    (first..=last).map(move |k| k as f64 * step)
}

/// Minor and major grid lines, tick labels on the major lines, and axis captions.
fn paint_grid(grid: Grid, viewport: &Viewport, unit: f64, surface: &mut impl Surface) {
    let bounds = viewport.bounds();
    let minor = Stroke::solid(Color::GRID_MINOR.with_opacity(0.4), 0.6 * unit);
    let major = Stroke::solid(Color::GRID_MAJOR.with_opacity(0.6), 1.0 * unit);

    for (step, stroke) in [(grid.minor, minor), (grid.major, major)] {
        for x in grid_values(bounds.min_x, bounds.max_x, step) {
            let path = [
                viewport.to_pixel(point(x, bounds.min_y)),
                viewport.to_pixel(point(x, bounds.max_y)),
            ];
            surface.stroke_path(&path, &stroke);
        }
        for y in grid_values(bounds.min_y, bounds.max_y, step) {
            let path = [
                viewport.to_pixel(point(bounds.min_x, y)),
                viewport.to_pixel(point(bounds.max_x, y)),
            ];
            surface.stroke_path(&path, &stroke);
        }
    }

    let area = viewport.plot_area();
    let tick = TextStyle::new(TICK_SIZE * unit, Color::MUTED);
    for x in grid_values(bounds.min_x, bounds.max_x, grid.major) {
        let (px, _) = viewport.to_pixel(point(x, bounds.min_y));
        let at = (px, area.y + area.height + TICK_SIZE * unit);
        surface.text(at, &format!("{x:.0}"), &tick);
    }
    for y in grid_values(bounds.min_y, bounds.max_y, grid.major) {
        let (_, py) = viewport.to_pixel(point(bounds.min_x, y));
        let at = (area.x - 0.5 * TICK_SIZE * unit, py);
        surface.text(at, &format!("{y:.0}"), &tick.anchored(Anchor::End));
    }

    let caption = TextStyle::new(TICK_SIZE * unit, Color::BLACK);
    surface.text(
        (area.x + area.width / 2.0, area.y + area.height + 2.6 * TICK_SIZE * unit),
        "Feet",
        &caption,
    );
    surface.text(
        (area.x - 3.2 * TICK_SIZE * unit, area.y + area.height / 2.0),
        "Feet",
        &caption.rotated(90.0),
    );
}

/// Scale style sizes from the reference sheet width to the output.
fn scaled(stroke: &Stroke, unit: f64) -> Stroke {
    Stroke {
        width: stroke.width * unit,
        ..*stroke
    }
}

/// Map one primitive to pixels and draw it.
fn paint_primitive(
    primitive: &Primitive,
    viewport: &Viewport,
    unit: f64,
    surface: &mut impl Surface,
) {
    match primitive {
        Primitive::Line { from, to, stroke } => {
            let path = [viewport.to_pixel(*from), viewport.to_pixel(*to)];
            surface.stroke_path(&path, &scaled(stroke, unit));
        }
        Primitive::Polyline { points, stroke } => {
            let path: Vec<Pixel> = points.iter().map(|p| viewport.to_pixel(*p)).collect();
            surface.stroke_path(&path, &scaled(stroke, unit));
        }
        Primitive::Circle {
            center,
            radius,
            stroke,
        } => {
            surface.stroke_circle(
                viewport.to_pixel(*center),
                radius * viewport.scale(),
                &scaled(stroke, unit),
            );
        }
        Primitive::Marker {
            at,
            kind,
            size,
            color,
        } => {
            let center = viewport.to_pixel(*at);
            let size = size * unit;
            match kind {
                MarkerKind::Dot => surface.fill_circle(center, size / 2.0, *color),
                MarkerKind::Square => surface.fill_square(center, size, *color),
                MarkerKind::Cross => {
                    let half = size / 2.0;
                    let (x, y) = center;
                    let stroke = Stroke::solid(*color, 2.0 * unit);
                    surface.stroke_path(&[(x - half, y - half), (x + half, y + half)], &stroke);
                    surface.stroke_path(&[(x - half, y + half), (x + half, y - half)], &stroke);
                }
            }
        }
        Primitive::Label { at, text, style } => {
            let style = TextStyle {
                size: style.size * unit,
                ..*style
            };
            surface.text(viewport.to_pixel(*at), text, &style);
        }
        Primitive::Dimension { from, to, stroke } => {
            let stroke = scaled(stroke, unit);
            let start = viewport.to_pixel(*from);
            let end = viewport.to_pixel(*to);
            surface.stroke_path(&[start, end], &stroke);
            if let Some(head) = arrowhead(start, end, ARROW_LENGTH * unit) {
                surface.stroke_path(&head, &stroke);
            }
            if let Some(head) = arrowhead(end, start, ARROW_LENGTH * unit) {
                surface.stroke_path(&head, &stroke);
            }
        }
    }
}

/// Open arrowhead at `tip` for a shaft coming from `tail`.
fn arrowhead(tail: Pixel, tip: Pixel, length: f64) -> Option<[Pixel; 3]> {
    let (dx, dy) = (tail.0 - tip.0, tail.1 - tip.1);
    let shaft = dx.hypot(dy);
    if shaft < f64::EPSILON {
        return None;
    }
    let (ux, uy) = (dx / shaft, dy / shaft);
    let (sin, cos) = ARROW_SPREAD.to_radians().sin_cos();
    let barb = |sin: f64| {
        (
            tip.0 + length * (ux * cos - uy * sin),
            tip.1 + length * (ux * sin + uy * cos),
        )
    };
    Some([barb(sin), tip, barb(-sin)])
}
