//! Top-down layout: dome, both wings, front entry and the front arc.

use serde::Serialize;
use tracing::{debug, warn};

use crate::cross_section::CrossSectionGeometry;
use crate::errors::GeometryError;
use crate::geometry::{point, Point2D};
use crate::parameters::StructureParameters;
use crate::wing::{compute_wing, WingGeometry};

/// Rectangular entry projecting out of the front of the dome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrontEntry {
    /// Left corner where the entry meets the dome.
    pub left_top: Point2D,
    /// Right corner where the entry meets the dome.
    pub right_top: Point2D,
    /// Outer left corner.
    pub left_bottom: Point2D,
    /// Outer right corner.
    pub right_bottom: Point2D,
}

impl FrontEntry {
    /// Height of the entry's outer edge, which doubles as the front arc baseline.
    #[must_use]
    pub fn baseline_y(&self) -> f64 {
        self.left_bottom.y
    }
}

/// Circular arc sweeping across the front between the two posts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FrontArc {
    /// Centre of the arc, always on the symmetry axis.
    pub center: Point2D,
    /// Radius in feet.
    pub radius: f64,
    /// Angle of the right post seen from the centre, in radians.
    pub start_angle: f64,
    /// Angle of the left post seen from the centre, in radians.
    pub end_angle: f64,
}

impl FrontArc {
    /// Point on the arc at `angle` radians.
    #[must_use]
    pub fn point_at(&self, angle: f64) -> Point2D {
        let (sin, cos) = angle.sin_cos();
        point(
            self.center.x + self.radius * cos,
            self.center.y + self.radius * sin,
        )
    }

    /// Sample `segments + 1` evenly spaced points from the right post to the left post.
    #[must_use]
    pub fn sample(&self, segments: usize) -> Vec<Point2D> {
        let segments = segments.max(1);
        let sweep = self.end_angle - self.start_angle;
        (0..=segments)
            .map(|step| {
                let fraction = step as f64 / segments as f64;
                self.point_at(self.start_angle + sweep * fraction)
            })
            .collect()
    }
}

/// Complete floor plan derived from one roof pitch.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct FloorPlan {
    /// Radius of the central dome.
    pub dome_radius: f64,
    /// Canonical wing, on the +x side.
    pub right_wing: WingGeometry,
    /// Mirror image of the right wing.
    pub left_wing: WingGeometry,
    /// Front entry rectangle.
    pub entry: FrontEntry,
    /// Arc through both posts, absent when a post sits on the baseline.
    pub front_arc: Option<FrontArc>,
}

/// Locate the front entry where a rectangle of `half_width` meets the dome front.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidParameter`] when the entry is at least as wide as
/// the dome, so its sides never meet the circle.
pub fn front_entry(
    dome_radius: f64,
    half_width: f64,
    depth: f64,
) -> Result<FrontEntry, GeometryError> {
    let squared = dome_radius * dome_radius - half_width * half_width;
    if squared <= 0.0 {
        return Err(GeometryError::InvalidParameter {
            name: "entry_half_width",
            value: half_width,
            reason: "must be narrower than the dome radius",
        });
    }
    let top = -squared.sqrt();
    let bottom = top - depth;
    Ok(FrontEntry {
        left_top: point(-half_width, top),
        right_top: point(half_width, top),
        left_bottom: point(-half_width, bottom),
        right_bottom: point(half_width, bottom),
    })
}

/// Find the arc through both posts whose centre lies on the symmetry axis and whose
/// lowest or highest point touches the baseline.
///
/// Equating the distance from `(0, cy)` to the right post `(x, y)` with the distance
/// to the baseline gives `cy = (x² + y² − b²) / (2·(y − b))`.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateBaseline`] when the right post lies on the
/// baseline.
///
/// # Examples
/// ```
/// use domeshed::{front_arc, point};
///
/// let arc = front_arc(point(3.0, -4.0), point(-3.0, -4.0), 0.0).expect("arc exists");
/// assert!((arc.center.y + 3.125).abs() < 1.0e-12);
/// assert!((arc.radius - 3.125).abs() < 1.0e-12);
/// ```
pub fn front_arc(
    post_right: Point2D,
    post_left: Point2D,
    baseline_y: f64,
) -> Result<FrontArc, GeometryError> {
    let Point2D { x, y } = post_right;
    let rise = y - baseline_y;
    if rise == 0.0 {
        return Err(GeometryError::DegenerateBaseline { y });
    }
    let center_y = (x * x + y * y - baseline_y * baseline_y) / (2.0 * rise);
    let radius = (center_y - baseline_y).abs();
    Ok(FrontArc {
        center: point(0.0, center_y),
        radius,
        start_angle: (post_right.y - center_y).atan2(post_right.x),
        end_angle: (post_left.y - center_y).atan2(post_left.x),
    })
}

/// Assemble the floor plan for the pitch behind `cross_section`.
///
/// The wing width is the interior wall position and the post extension is the run
/// beyond it, so the plan always agrees with the side view.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidParameter`] when a dome, wing or entry dimension
/// is unusable, including an entry that cannot meet the dome.
pub fn compute_floor_plan(
    parameters: &StructureParameters,
    cross_section: &CrossSectionGeometry,
) -> Result<FloorPlan, GeometryError> {
    parameters.validate_plan()?;
    let right_wing = compute_wing(
        parameters.connection_angle_degrees,
        parameters.wall_angle_degrees,
        parameters.dome_radius,
        parameters.back_wall_length,
        cross_section.interior_wall_x,
        cross_section.post_extension,
    );
    let left_wing = right_wing.mirrored();
    let entry = front_entry(
        parameters.dome_radius,
        parameters.entry_half_width,
        parameters.entry_depth,
    )?;

    let front_arc = match front_arc(right_wing.post, left_wing.post, entry.baseline_y()) {
        Ok(arc) => Some(arc),
        Err(error) => {
            warn!(%error, "omitting front arc");
            None
        }
    };

    debug!(
        post_x = right_wing.post.x,
        post_y = right_wing.post.y,
        closing = right_wing.closing.is_some(),
        "laid out floor plan"
    );

    Ok(FloorPlan {
        dome_radius: parameters.dome_radius,
        right_wing,
        left_wing,
        entry,
        front_arc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_section::compute_cross_section;

    #[test]
    fn entry_meets_dome() {
        let entry = front_entry(16.5, 4.0, 5.0).expect("entry fits");
        let on_circle = entry.right_top.to_vector().norm();
        assert!((on_circle - 16.5).abs() < 1.0e-9);
        assert!((entry.right_top.y - entry.baseline_y() - 5.0).abs() < 1.0e-12);
        assert_eq!(entry.left_top, entry.right_top.mirrored());
    }

    #[test]
    fn entry_wider_than_dome_is_rejected() {
        assert!(front_entry(3.0, 4.0, 5.0).is_err());
    }

    #[test]
    fn arc_passes_through_both_posts_and_touches_baseline() {
        let right = point(28.0, -36.0);
        let arc = front_arc(right, right.mirrored(), -21.0).expect("arc exists");
        let to_right = (right.to_vector() - arc.center.to_vector()).norm();
        let to_left = (right.mirrored().to_vector() - arc.center.to_vector()).norm();
        assert!((to_right - arc.radius).abs() < 1.0e-9);
        assert!((to_left - arc.radius).abs() < 1.0e-9);
        assert!((arc.center.y + arc.radius - (-21.0)).abs() < 1.0e-9);
        assert_eq!(arc.center.x, 0.0);
    }

    #[test]
    fn arc_samples_start_and_end_on_posts() {
        let right = point(28.0, -36.0);
        let arc = front_arc(right, right.mirrored(), -21.0).expect("arc exists");
        let samples = arc.sample(50);
        assert_eq!(samples.len(), 51);
        assert!((samples[0].distance(right)) < 1.0e-9);
        assert!((samples[50].distance(right.mirrored())) < 1.0e-9);
    }

    #[test]
    fn post_on_baseline_is_degenerate() {
        let error = front_arc(point(5.0, -10.0), point(-5.0, -10.0), -10.0)
            .expect_err("degenerate arc");
        assert_eq!(error, GeometryError::DegenerateBaseline { y: -10.0 });
    }

    #[test]
    fn floor_plan_is_symmetric_and_pitch_driven() {
        let parameters = StructureParameters::default();
        let section = compute_cross_section(&parameters).expect("valid");
        let plan = compute_floor_plan(&parameters, &section).expect("valid");
        assert_eq!(plan.left_wing, plan.right_wing.mirrored());
        let width = plan
            .right_wing
            .back_wall_end
            .distance(plan.right_wing.side_wall_end);
        let extension = plan.right_wing.side_wall_end.distance(plan.right_wing.post);
        assert!((width - section.interior_wall_x).abs() < 1.0e-9);
        assert!((extension - section.post_extension).abs() < 1.0e-9);
        assert!(plan.right_wing.closing.is_some());
        assert!(plan.front_arc.is_some());
    }

    #[test]
    fn plan_dimensions_are_checked_with_the_plan() {
        let parameters = StructureParameters::default().with_dome_radius(4.0);
        let section = compute_cross_section(&parameters).expect("side view is independent");
        let error = compute_floor_plan(&parameters, &section).expect_err("entry too wide");
        assert!(matches!(
            error,
            GeometryError::InvalidParameter {
                name: "entry_half_width",
                ..
            }
        ));
        let narrower = parameters.with_entry(2.0, 3.0);
        assert!(compute_floor_plan(&narrower, &section).is_ok());
    }
}
