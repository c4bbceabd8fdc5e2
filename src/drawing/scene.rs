//! Annotated cross-section and floor-plan panels for a solved structure.

use super::{Anchor, Bounds, Color, Grid, MarkerKind, Panel, Primitive, Sheet, Stroke, TextStyle};
use crate::cross_section::CrossSectionGeometry;
use crate::floor_plan::FloorPlan;
use crate::geometry::{point, Point2D};
use crate::parameters::StructureParameters;
use crate::structure::StructureGeometry;
use crate::wing::WingGeometry;

/// Shallowest pitch offered interactively. The side view is framed for the span at
/// this pitch so the drawing does not jump while the pitch changes.
pub const REFERENCE_PITCH_DEGREES: f64 = 20.0;

/// Outer walls, roof and ground of the side view.
const WALL: Stroke = Stroke::solid(Color::BLACK, 5.0);
/// Interior wall of the side view.
const INTERIOR: Stroke = Stroke::solid(Color::BLACK, 4.0);
/// Walls on the floor plan.
const PLAN_WALL: Stroke = Stroke::solid(Color::BLACK, 4.0);
/// Dimension label size.
const LABEL_SIZE: f64 = 22.0;
/// Secondary note size.
const NOTE_SIZE: f64 = 18.0;
/// Segments in an angle arc.
const ARC_SAMPLES: usize = 50;
/// Grid shared by both panels.
const GRID: Grid = Grid {
    major: 5.0,
    minor: 1.0,
};

/// Format a length in feet, dropping the decimal for whole numbers.
fn feet(value: f64) -> String {
    if (value - value.round()).abs() < 1.0e-9 {
        format!("{value:.0}'")
    } else {
        format!("{value:.1}'")
    }
}

/// Format an angle in degrees, dropping the decimal for whole numbers.
fn degrees(value: f64) -> String {
    if (value - value.round()).abs() < 1.0e-9 {
        format!("{value:.0}°")
    } else {
        format!("{value:.1}°")
    }
}

/// Straight segment.
fn line(from: Point2D, to: Point2D, stroke: Stroke) -> Primitive {
    Primitive::Line { from, to, stroke }
}

/// Text annotation.
fn label(at: Point2D, text: impl Into<String>, style: TextStyle) -> Primitive {
    Primitive::Label {
        at,
        text: text.into(),
        style,
    }
}

/// Black point marker.
fn marker(at: Point2D, kind: MarkerKind, size: f64) -> Primitive {
    Primitive::Marker {
        at,
        kind,
        size,
        color: Color::BLACK,
    }
}

/// Double-headed dimension arrow in `color`.
fn dimension(from: Point2D, to: Point2D, color: Color) -> Primitive {
    Primitive::Dimension {
        from,
        to,
        stroke: Stroke::solid(color, 2.4),
    }
}

/// Points on a circular arc from `start` to `end` degrees around `center`.
fn arc_points(center: Point2D, radius: f64, start: f64, end: f64) -> Vec<Point2D> {
    (0..=ARC_SAMPLES)
        .map(|step| {
            let angle = start + (end - start) * step as f64 / ARC_SAMPLES as f64;
            center.offset(angle, radius)
        })
        .collect()
}

/// Unit normal on the outer side of a wall heading `angle` degrees.
fn outward(angle: f64) -> (f64, f64) {
    let (sin, cos) = angle.to_radians().sin_cos();
    (sin, -cos)
}

/// Rotation that keeps text running along `angle` without turning it upside down.
fn upright(angle: f64) -> f64 {
    let folded = (angle + 180.0).rem_euclid(360.0) - 180.0;
    if folded > 90.0 {
        folded - 180.0
    } else if folded <= -90.0 {
        folded + 180.0
    } else {
        folded
    }
}

/// Label placed `distance` feet off the middle of a wall, rotated along it.
fn wall_label(from: Point2D, to: Point2D, angle: f64, distance: f64, text: String) -> Primitive {
    let (nx, ny) = outward(angle);
    let middle = from.midpoint(to);
    label(
        point(middle.x + distance * nx, middle.y + distance * ny),
        text,
        TextStyle::new(LABEL_SIZE, Color::INK).bold().rotated(upright(angle)),
    )
}

/// Title summarising the pitch and the dimensions it drives.
#[must_use]
pub fn sheet_title(section: &CrossSectionGeometry) -> String {
    format!(
        "Dome Shed - Roof Pitch {}    |    Wing room: {:.1}'    Post extension: {:.1}'    Total span: {:.1}'",
        degrees(section.pitch_degrees),
        section.interior_wall_x,
        section.post_extension,
        section.horizontal_span
    )
}

/// Build the dual-view sheet: cross-section on the left, floor plan on the right.
#[must_use]
pub fn build_sheet(geometry: &StructureGeometry) -> Sheet {
    Sheet {
        title: sheet_title(&geometry.cross_section),
        panels: vec![
            cross_section_panel(&geometry.parameters, &geometry.cross_section),
            floor_plan_panel(&geometry.parameters, &geometry.cross_section, &geometry.floor_plan),
        ],
    }
}

/// Side view with heights, pitch, span and extension annotated.
fn cross_section_panel(parameters: &StructureParameters, section: &CrossSectionGeometry) -> Panel {
    let left = parameters.left_wall_height;
    let post = parameters.right_post_height;
    let interior = parameters.interior_wall_height;
    let span = section.horizontal_span;
    let wall_x = section.interior_wall_x;
    let pitch = section.pitch_degrees;
    let slope = -section.roof_drop.atan2(span).to_degrees();

    let mut primitives = vec![
        line(point(0.0, 0.0), point(span, 0.0), WALL),
        line(point(0.0, 0.0), point(0.0, left), WALL),
        line(point(span, 0.0), point(span, post), WALL),
        line(point(0.0, left), point(span, post), WALL),
        line(point(wall_x, 0.0), point(wall_x, interior), INTERIOR),
    ];

    for joint in [
        point(0.0, 0.0),
        point(0.0, left),
        point(span, 0.0),
        point(span, post),
        point(wall_x, 0.0),
        point(wall_x, interior),
    ] {
        primitives.push(marker(joint, MarkerKind::Cross, 16.0));
    }

    let height_label = TextStyle::new(LABEL_SIZE, Color::BLACK).bold();
    primitives.extend([
        dimension(point(-0.6, 0.0), point(-0.6, left), Color::BLUE),
        label(point(-1.2, left / 2.0), feet(left), height_label),
        dimension(point(span + 0.6, 0.0), point(span + 0.6, post), Color::BLUE),
        label(point(span + 1.8, post / 2.0), feet(post), height_label),
        dimension(point(wall_x + 0.6, 0.0), point(wall_x + 0.6, interior), Color::BLUE),
        label(point(wall_x + 1.2, interior / 2.0), feet(interior), height_label),
    ]);

    let arc_radius = 3.0;
    primitives.extend([
        Primitive::Polyline {
            points: arc_points(point(0.0, left), arc_radius, -pitch, 0.0),
            stroke: Stroke::solid(Color::RED, 2.4),
        },
        line(
            point(0.0, left),
            point(arc_radius + 1.0, left),
            Stroke::dashed(Color::RED.with_opacity(0.5), 1.6),
        ),
        label(
            point(arc_radius + 0.5, left - 1.0),
            degrees(pitch),
            TextStyle::new(LABEL_SIZE, Color::RED)
                .bold()
                .anchored(Anchor::Start),
        ),
    ]);

    let roof_label_x = span * 0.35;
    primitives.extend([
        label(
            point(roof_label_x, section.roof_height_at(left, roof_label_x) + 1.2),
            "Roof",
            TextStyle::new(20.0, Color::BLACK).italic().rotated(slope),
        ),
        label(
            point(span * 0.55, post + 1.5),
            format!("Rafter: {:.1}'", section.rafter_length),
            TextStyle::new(NOTE_SIZE, Color::BROWN).rotated(slope),
        ),
        dimension(point(0.0, -1.3), point(span, -1.3), Color::DARK_GREEN),
        label(
            point(span / 2.0, -1.8),
            format!("{span:.1}'"),
            TextStyle::new(LABEL_SIZE, Color::DARK_GREEN).bold(),
        ),
        label(
            point(wall_x / 2.0, 4.0),
            format!("Wing: {wall_x:.1}'"),
            TextStyle::new(20.0, Color::GRAY),
        ),
        dimension(point(wall_x, -2.8), point(span, -2.8), Color::PURPLE),
        label(
            point(wall_x + section.post_extension / 2.0, -3.2),
            format!("{:.1}'", section.post_extension),
            TextStyle::new(20.0, Color::PURPLE),
        ),
        label(
            point(wall_x + 0.8, interior + 0.5),
            "WALL",
            TextStyle::new(NOTE_SIZE, Color::BLACK)
                .bold()
                .anchored(Anchor::Start),
        ),
    ]);

    let reference_span = section.roof_drop / REFERENCE_PITCH_DEGREES.to_radians().tan();
    Panel {
        title: "Cross-Section (Side View)".to_string(),
        bounds: Bounds::new(-3.0, reference_span.max(span) + 4.0, -4.5, left + 2.0),
        grid: GRID,
        primitives,
    }
}

/// Walls, markers and annotations of the canonical (right) wing.
fn wing_primitives(
    parameters: &StructureParameters,
    section: &CrossSectionGeometry,
    wing: &WingGeometry,
) -> Vec<Primitive> {
    let wall_angle = parameters.wall_angle_degrees;
    let side_angle = wall_angle - 90.0;
    let closing_angle = wall_angle - 180.0;
    let note = TextStyle::new(NOTE_SIZE, Color::MUTED).anchored(Anchor::Start);

    let mut primitives = vec![
        line(wing.connection, wing.back_wall_end, PLAN_WALL),
        line(wing.back_wall_end, wing.side_wall_end, PLAN_WALL),
        line(wing.side_wall_end, wing.post, PLAN_WALL),
        marker(wing.connection, MarkerKind::Dot, 12.0),
        marker(wing.back_wall_end, MarkerKind::Dot, 10.0),
        marker(wing.side_wall_end, MarkerKind::Dot, 10.0),
        marker(wing.post, MarkerKind::Square, 16.0),
        wall_label(
            wing.connection,
            wing.back_wall_end,
            wall_angle,
            1.5,
            feet(parameters.back_wall_length),
        ),
        wall_label(
            wing.back_wall_end,
            wing.side_wall_end,
            side_angle,
            1.5,
            format!("{:.1}'", section.interior_wall_x),
        ),
        wall_label(
            wing.side_wall_end,
            wing.post,
            side_angle,
            1.5,
            format!("{:.1}'", section.post_extension),
        ),
        label(
            point(wing.back_wall_end.x + 1.5, wing.back_wall_end.y + 1.5),
            format!("{} high", feet(parameters.left_wall_height)),
            note,
        ),
        label(
            point(wing.side_wall_end.x + 1.5, wing.side_wall_end.y + 1.5),
            format!("{} high", feet(parameters.interior_wall_height)),
            note,
        ),
        label(
            point(wing.post.x - 1.5, wing.post.y - 1.5),
            format!("Post ({})", feet(parameters.right_post_height)),
            TextStyle::new(NOTE_SIZE, Color::INK).bold(),
        ),
    ];

    // Where the back wall leaves the dome, relative to horizontal.
    let reference_radius = 6.0;
    primitives.extend([
        line(
            wing.connection,
            wing.connection.offset(0.0, reference_radius + 4.0),
            Stroke::dashed(Color::BLACK.with_opacity(0.4), 1.6),
        ),
        Primitive::Polyline {
            points: arc_points(wing.connection, reference_radius, 0.0, wall_angle),
            stroke: Stroke::solid(Color::BLACK, 2.0),
        },
        label(
            point(wing.connection.x + reference_radius + 2.0, wing.connection.y - 2.0),
            degrees(wall_angle.abs()),
            TextStyle::new(NOTE_SIZE, Color::INK)
                .bold()
                .anchored(Anchor::Start),
        ),
    ]);

    if let Some(closing) = wing.closing {
        primitives.extend([
            line(wing.side_wall_end, closing.end, PLAN_WALL),
            marker(closing.end, MarkerKind::Dot, 10.0),
            wall_label(
                wing.side_wall_end,
                closing.end,
                closing_angle,
                -2.0,
                format!("{:.1}'", closing.length),
            ),
        ]);
    }
    primitives
}

/// Top-down view: dome, both wings, entry and front arc.
fn floor_plan_panel(
    parameters: &StructureParameters,
    section: &CrossSectionGeometry,
    plan: &FloorPlan,
) -> Panel {
    let radius = plan.dome_radius;
    let mut primitives = vec![
        Primitive::Circle {
            center: point(0.0, 0.0),
            radius,
            stroke: PLAN_WALL,
        },
        label(
            point(0.0, 0.0),
            "B",
            TextStyle::new(28.0, Color::INK).bold(),
        ),
        label(
            point(plan.right_wing.connection.x + 1.0, plan.right_wing.connection.y + 2.5),
            format!("{} above center line", degrees(parameters.connection_angle_degrees)),
            TextStyle::new(15.0, Color::MUTED).anchored(Anchor::Start),
        ),
    ];

    // One wing is drawn from geometry; the other is its reflection.
    let right = wing_primitives(parameters, section, &plan.right_wing);
    let left: Vec<Primitive> = right.iter().map(Primitive::mirrored).collect();
    primitives.extend(right);
    primitives.extend(left);

    let entry = &plan.entry;
    primitives.extend([
        line(entry.left_top, entry.right_top, PLAN_WALL),
        line(entry.left_top, entry.left_bottom, PLAN_WALL),
        line(entry.right_top, entry.right_bottom, PLAN_WALL),
        line(entry.left_bottom, entry.right_bottom, PLAN_WALL),
        marker(entry.left_top, MarkerKind::Dot, 12.0),
        marker(entry.right_top, MarkerKind::Dot, 12.0),
    ]);

    let mut extent = vec![
        point(-radius, -radius),
        point(radius, radius),
        entry.left_bottom,
    ];
    extent.extend(plan.right_wing.outline());
    extent.extend(plan.left_wing.outline());

    if let Some(arc) = plan.front_arc {
        let points = arc.sample(200);
        extent.extend(points.iter().copied());
        primitives.extend([
            Primitive::Polyline {
                points,
                stroke: Stroke::solid(Color::BLACK.with_opacity(0.5), 3.0),
            },
            label(
                point(0.0, (plan.right_wing.post.y + entry.baseline_y()) / 2.0),
                format!("Arc diameter {:.1}'", 2.0 * arc.radius),
                TextStyle::new(20.0, Color::INK).bold(),
            ),
        ]);
    }

    let bounds = Bounds::enclosing(&extent)
        .unwrap_or(Bounds::new(-radius, radius, -radius, radius))
        .padded(4.0, GRID.major);
    Panel {
        title: "Floor Plan (Top Down)".to_string(),
        bounds,
        grid: GRID,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structure::solve;

    fn labels(panel: &Panel) -> Vec<&str> {
        panel
            .primitives
            .iter()
            .filter_map(|primitive| match primitive {
                Primitive::Label { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn formatting_drops_trailing_zero() {
        assert_eq!(feet(20.0), "20'");
        assert_eq!(feet(21.98), "22.0'");
        assert_eq!(degrees(22.5), "22.5°");
        assert_eq!(degrees(20.0), "20°");
    }

    #[test]
    fn wall_labels_stay_upright() {
        assert_eq!(upright(-25.0), -25.0);
        assert_eq!(upright(-115.0), 65.0);
        assert_eq!(upright(155.0), -25.0);
        assert_eq!(upright(90.0), 90.0);
    }

    #[test]
    fn title_reports_pitch_driven_lengths() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let title = sheet_title(&geometry.cross_section);
        assert!(title.contains("Roof Pitch 20°"));
        assert!(title.contains("Wing room: 22.0'"));
        assert!(title.contains("Total span: 33.0'"));
    }

    #[test]
    fn cross_section_is_annotated() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let sheet = build_sheet(&geometry);
        assert_eq!(sheet.panels.len(), 2);
        let side = labels(&sheet.panels[0]);
        for expected in ["20'", "8'", "12'", "20°", "Roof", "Rafter: 35.1'", "33.0'", "WALL"] {
            assert!(side.contains(&expected), "missing {expected}: {side:?}");
        }
    }

    #[test]
    fn side_view_frame_is_stable_across_pitches() {
        let shallow = solve(&StructureParameters::default()).expect("valid");
        let steep = solve(&StructureParameters::default().with_roof_pitch(35.0)).expect("valid");
        assert_eq!(
            build_sheet(&shallow).panels[0].bounds,
            build_sheet(&steep).panels[0].bounds
        );
    }

    #[test]
    fn floor_plan_wings_are_mirror_images() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let sheet = build_sheet(&geometry);
        let plan = &sheet.panels[1];
        let right = wing_primitives(
            &geometry.parameters,
            &geometry.cross_section,
            &geometry.floor_plan.right_wing,
        );
        for primitive in &right {
            assert!(plan.primitives.contains(&primitive.mirrored()));
        }
        let texts = labels(plan);
        assert_eq!(texts.iter().filter(|t| **t == "30'").count(), 2);
        assert!(texts.iter().any(|t| t.starts_with("Arc diameter")));
    }

    #[test]
    fn floor_plan_frame_contains_posts() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let plan = &build_sheet(&geometry).panels[1];
        let post = geometry.floor_plan.right_wing.post;
        assert!(plan.bounds.min_x < -post.x && plan.bounds.max_x > post.x);
        assert!(plan.bounds.min_y < post.y);
    }
}
