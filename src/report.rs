//! Plain-text summary printed after solving.

use std::fmt::Write;

use domeshed::{Point2D, StructureGeometry};

/// Point as `(x, y)` to two decimals.
fn coordinates(point: Point2D) -> String {
    format!("({:.2}, {:.2})", point.x, point.y)
}

/// Render a textual summary of the solved structure.
///
/// The geometry check restates the roof triangle so the numbers can be verified by
/// hand: the span times the tangent of the pitch must give back the roof drop.
#[must_use]
pub fn render_report(geometry: &StructureGeometry) -> String {
    let parameters = &geometry.parameters;
    let section = &geometry.cross_section;
    let plan = &geometry.floor_plan;
    let tangent = section.pitch_degrees.to_radians().tan();
    let mut output = String::new();

    writeln!(&mut output, "Geometry check").expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Roof pitch: {:.1}°",
        section.pitch_degrees
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Walls: left {:.1}', post {:.1}', interior {:.1}'",
        parameters.left_wall_height, parameters.right_post_height, parameters.interior_wall_height
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Roof drop: {:.2}'  Horizontal span: {:.2}'  Interior wall at x = {:.2}'",
        section.roof_drop, section.horizontal_span, section.interior_wall_x
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Rafter length: {:.2}'  Post extension: {:.2}'",
        section.rafter_length, section.post_extension
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  tan(pitch) = {tangent:.4}; span x tan = {:.2}' (drop {:.2}')",
        section.horizontal_span * tangent,
        section.roof_drop
    )
    .expect("writing to string cannot fail");

    let wing = &plan.right_wing;
    writeln!(&mut output, "Floor plan (right wing, left is mirrored)")
        .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Connection: {}  Back wall end: {}",
        coordinates(wing.connection),
        coordinates(wing.back_wall_end)
    )
    .expect("writing to string cannot fail");
    writeln!(
        &mut output,
        "  Side wall end: {}  Post: {}",
        coordinates(wing.side_wall_end),
        coordinates(wing.post)
    )
    .expect("writing to string cannot fail");
    match wing.closing {
        Some(closing) => writeln!(
            &mut output,
            "  Closing wall: meets the dome at {}, length {:.2}'",
            coordinates(closing.end),
            closing.length
        )
        .expect("writing to string cannot fail"),
        None => output.push_str("  Closing wall: does not reach the dome\n"),
    }
    match plan.front_arc {
        Some(arc) => writeln!(
            &mut output,
            "  Front arc: centre {}, radius {:.2}', diameter {:.2}'",
            coordinates(arc.center),
            arc.radius,
            2.0 * arc.radius
        )
        .expect("writing to string cannot fail"),
        None => output.push_str("  Front arc: undefined for these posts\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use domeshed::{solve, StructureParameters};

    #[test]
    fn report_restates_roof_triangle() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let report = render_report(&geometry);
        assert!(report.contains("Roof pitch: 20.0°"));
        assert!(report.contains("Horizontal span: 32.97'"));
        assert!(report.contains("Interior wall at x = 21.98'"));
        assert!(report.contains("Rafter length: 35.09'"));
        assert!(report.contains("span x tan = 12.00' (drop 12.00')"));
    }

    #[test]
    fn report_describes_floor_plan() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let report = render_report(&geometry);
        assert!(report.contains("Closing wall: meets the dome at"));
        assert!(report.contains("Front arc: centre (0.00,"));
    }

    #[test]
    fn missing_closing_wall_is_reported() {
        let mut geometry = solve(&StructureParameters::default()).expect("valid");
        geometry.floor_plan.right_wing.closing = None;
        geometry.floor_plan.front_arc = None;
        let report = render_report(&geometry);
        assert!(report.contains("does not reach the dome"));
        assert!(report.contains("undefined for these posts"));
    }
}
