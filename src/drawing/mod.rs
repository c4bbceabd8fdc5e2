//! Technical drawings of the solved structure.
//!
//! A [`Sheet`] holds panels of primitives in world units (feet). The sheet is built
//! from a solved [`StructureGeometry`](crate::StructureGeometry) by
//! [`build_sheet`] and painted onto any [`Surface`] by [`paint_sheet`]; the SVG,
//! PNG and terminal outputs are three surfaces over the same traversal. Nothing in
//! this module feeds back into the solver.

mod raster;
mod scene;
mod surface;
mod svg;
mod terminal;
mod viewport;

pub use raster::{render_png, save_png, RasterSurface};
pub use scene::{build_sheet, sheet_title, REFERENCE_PITCH_DEGREES};
pub use surface::{paint_sheet, Pixel, Surface};
pub use svg::{render_svg, SvgSurface};
pub use terminal::CharCanvas;
pub use viewport::{PixelRect, Viewport};

use crate::geometry::Point2D;

/// Opaque RGB colour with an alpha channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Solid black, used for structure lines.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Solid white, used for backgrounds.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Dark grey used for dimension text.
    pub const INK: Color = Color::rgb(0x33, 0x33, 0x33);
    /// Mid grey used for secondary notes.
    pub const MUTED: Color = Color::rgb(0x66, 0x66, 0x66);
    /// Grey used for the wing room label.
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    /// Major grid lines.
    pub const GRID_MAJOR: Color = Color::rgb(0xaa, 0xaa, 0xaa);
    /// Minor grid lines.
    pub const GRID_MINOR: Color = Color::rgb(0xcc, 0xcc, 0xcc);
    /// Height dimensions.
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    /// Pitch arc and angle label.
    pub const RED: Color = Color::rgb(255, 0, 0);
    /// Horizontal span dimension.
    pub const DARK_GREEN: Color = Color::rgb(0, 100, 0);
    /// Post extension dimension.
    pub const PURPLE: Color = Color::rgb(128, 0, 128);
    /// Rafter label.
    pub const BROWN: Color = Color::rgb(165, 42, 42);

    /// Create an opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Scale the alpha channel by `opacity` in `0.0..=1.0`.
    #[must_use]
    pub fn with_opacity(self, opacity: f64) -> Self {
        let alpha = (f64::from(self.a) * opacity.clamp(0.0, 1.0)).round() as u8;
        Self { a: alpha, ..self }
    }

    /// CSS hex notation without the alpha channel.
    #[must_use]
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// How a line is stroked. Widths are in pixels on a 2200 pixel wide sheet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Line colour.
    pub color: Color,
    /// Line width.
    pub width: f64,
    /// Draw with a dash pattern.
    pub dashed: bool,
}

impl Stroke {
    /// Solid stroke.
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    /// Dashed stroke.
    #[must_use]
    pub const fn dashed(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

/// Horizontal alignment of a label relative to its anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    /// Text starts at the anchor.
    Start,
    /// Text is centred on the anchor.
    Middle,
    /// Text ends at the anchor.
    End,
}

impl Anchor {
    /// Alignment after reflecting the drawing left to right.
    #[must_use]
    pub fn mirrored(self) -> Self {
        match self {
            Anchor::Start => Anchor::End,
            Anchor::Middle => Anchor::Middle,
            Anchor::End => Anchor::Start,
        }
    }
}

/// Appearance of a label.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels on a 2200 pixel wide sheet.
    pub size: f64,
    /// Counter-clockwise rotation in degrees.
    pub rotation: f64,
    /// Horizontal alignment.
    pub anchor: Anchor,
    /// Fill colour.
    pub color: Color,
    /// Bold weight.
    pub bold: bool,
    /// Italic style.
    pub italic: bool,
}

impl TextStyle {
    /// Regular centred text.
    #[must_use]
    pub const fn new(size: f64, color: Color) -> Self {
        Self {
            size,
            rotation: 0.0,
            anchor: Anchor::Middle,
            color,
            bold: false,
            italic: false,
        }
    }

    /// Bold variant.
    #[must_use]
    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Italic variant.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Rotated variant.
    #[must_use]
    pub const fn rotated(mut self, degrees: f64) -> Self {
        self.rotation = degrees;
        self
    }

    /// Re-anchored variant.
    #[must_use]
    pub const fn anchored(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Shape drawn at a single point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkerKind {
    /// Filled circle, used at wall junctions.
    Dot,
    /// Filled square, used at posts.
    Square,
    /// Diagonal cross, used at cross-section joints.
    Cross,
}

/// One drawable element in world coordinates.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Straight segment.
    Line {
        /// Start point.
        from: Point2D,
        /// End point.
        to: Point2D,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Open polyline, used for sampled arcs.
    Polyline {
        /// Vertices in order.
        points: Vec<Point2D>,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Circle outline.
    Circle {
        /// Centre point.
        center: Point2D,
        /// Radius in feet.
        radius: f64,
        /// Stroke style.
        stroke: Stroke,
    },
    /// Point marker with a fixed pixel size.
    Marker {
        /// Marker position.
        at: Point2D,
        /// Marker shape.
        kind: MarkerKind,
        /// Marker size in pixels on a 2200 pixel wide sheet.
        size: f64,
        /// Marker colour.
        color: Color,
    },
    /// Text annotation.
    Label {
        /// Anchor point.
        at: Point2D,
        /// Text to draw.
        text: String,
        /// Appearance.
        style: TextStyle,
    },
    /// Double-headed dimension arrow.
    Dimension {
        /// First end.
        from: Point2D,
        /// Second end.
        to: Point2D,
        /// Stroke style.
        stroke: Stroke,
    },
}

impl Primitive {
    /// Reflect the primitive across the vertical axis.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        match self {
            Primitive::Line { from, to, stroke } => Primitive::Line {
                from: from.mirrored(),
                to: to.mirrored(),
                stroke: *stroke,
            },
            Primitive::Polyline { points, stroke } => Primitive::Polyline {
                points: points.iter().map(|p| p.mirrored()).collect(),
                stroke: *stroke,
            },
            Primitive::Circle {
                center,
                radius,
                stroke,
            } => Primitive::Circle {
                center: center.mirrored(),
                radius: *radius,
                stroke: *stroke,
            },
            Primitive::Marker {
                at,
                kind,
                size,
                color,
            } => Primitive::Marker {
                at: at.mirrored(),
                kind: *kind,
                size: *size,
                color: *color,
            },
            Primitive::Label { at, text, style } => Primitive::Label {
                at: at.mirrored(),
                text: text.clone(),
                style: TextStyle {
                    rotation: -style.rotation,
                    anchor: style.anchor.mirrored(),
                    ..*style
                },
            },
            Primitive::Dimension { from, to, stroke } => Primitive::Dimension {
                from: from.mirrored(),
                to: to.mirrored(),
                stroke: *stroke,
            },
        }
    }
}

/// Axis-aligned world rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Left edge.
    pub min_x: f64,
    /// Right edge.
    pub max_x: f64,
    /// Bottom edge.
    pub min_y: f64,
    /// Top edge.
    pub max_y: f64,
}

impl Bounds {
    /// Bounds from explicit edges.
    #[must_use]
    pub const fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Smallest bounds containing every point, or `None` for an empty slice.
    #[must_use]
    pub fn enclosing(points: &[Point2D]) -> Option<Self> {
        let first = points.first()?;
        let start = Self::new(first.x, first.x, first.y, first.y);
        Some(points.iter().fold(start, |bounds, p| bounds.including(*p)))
    }

    /// Grow to contain `point`.
    #[must_use]
    pub fn including(self, point: Point2D) -> Self {
        Self::new(
            self.min_x.min(point.x),
            self.max_x.max(point.x),
            self.min_y.min(point.y),
            self.max_y.max(point.y),
        )
    }

    /// Grow by `margin` on every side and snap the edges outward to multiples of
    /// `step`.
    #[must_use]
    pub fn padded(self, margin: f64, step: f64) -> Self {
        let snap_down = |v: f64| ((v - margin) / step).floor() * step;
        let snap_up = |v: f64| ((v + margin) / step).ceil() * step;
        Self::new(
            snap_down(self.min_x),
            snap_up(self.max_x),
            snap_down(self.min_y),
            snap_up(self.max_y),
        )
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Grid spacing in feet.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    /// Spacing of labelled grid lines.
    pub major: f64,
    /// Spacing of faint grid lines.
    pub minor: f64,
}

/// One titled view of the structure.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    /// Heading drawn above the plot.
    pub title: String,
    /// World rectangle shown in the plot.
    pub bounds: Bounds,
    /// Background grid.
    pub grid: Grid,
    /// Elements in painting order.
    pub primitives: Vec<Primitive>,
}

/// Side-by-side panels under a common title.
#[derive(Clone, Debug, PartialEq)]
pub struct Sheet {
    /// Heading drawn across the top.
    pub title: String,
    /// Panels from left to right.
    pub panels: Vec<Panel>,
}
