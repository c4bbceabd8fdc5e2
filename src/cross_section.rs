//! Side-view derivation of the roof slope.

use serde::Serialize;
use tracing::debug;

use crate::errors::GeometryError;
use crate::parameters::StructureParameters;

/// Lengths derived from the roof pitch, all in feet.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CrossSectionGeometry {
    /// Pitch the geometry was derived for, in degrees.
    pub pitch_degrees: f64,
    /// Height lost between the dome wall and the post.
    pub roof_drop: f64,
    /// Horizontal run from the dome wall to the post.
    pub horizontal_span: f64,
    /// Horizontal position where the roof crosses the interior wall height.
    pub interior_wall_x: f64,
    /// Length of the sloped roof beam.
    pub rafter_length: f64,
    /// Remaining run between the interior wall and the post.
    pub post_extension: f64,
}

impl CrossSectionGeometry {
    /// Height of the roof line at horizontal position `x`.
    #[must_use]
    pub fn roof_height_at(&self, left_wall_height: f64, x: f64) -> f64 {
        left_wall_height - x * self.pitch_degrees.to_radians().tan()
    }
}

/// Derive the cross-section for the pitch stored in `parameters`.
///
/// The roof falls from the top of the dome wall to the top of the post, so the drop
/// and the pitch fix the run (`drop / tan`) and the rafter (`drop / sin`). The interior
/// wall sits where the roof has fallen to its height. See
/// <https://en.wikipedia.org/wiki/Right_triangle>.
///
/// # Errors
///
/// Returns [`GeometryError::DegeneratePitch`] when the pitch is outside (0°, 90°) and
/// [`GeometryError::InvalidParameter`] when the heights are inconsistent.
///
/// # Examples
/// ```
/// use domeshed::{compute_cross_section, StructureParameters};
///
/// let section = compute_cross_section(&StructureParameters::default()).expect("valid");
/// assert!((section.horizontal_span - 32.97).abs() < 0.01);
/// assert!((section.rafter_length - 35.09).abs() < 0.01);
/// ```
pub fn compute_cross_section(
    parameters: &StructureParameters,
) -> Result<CrossSectionGeometry, GeometryError> {
    parameters.validate_section()?;

    let pitch = parameters.roof_pitch_degrees.to_radians();
    let (sin, cos) = pitch.sin_cos();
    let tan = sin / cos;

    let roof_drop = parameters.roof_drop();
    let horizontal_span = roof_drop / tan;
    let interior_wall_x = (parameters.left_wall_height - parameters.interior_wall_height) / tan;
    let rafter_length = roof_drop / sin;
    let post_extension = horizontal_span - interior_wall_x;

    debug!(
        pitch = parameters.roof_pitch_degrees,
        horizontal_span, interior_wall_x, rafter_length, post_extension, "derived cross-section"
    );

    Ok(CrossSectionGeometry {
        pitch_degrees: parameters.roof_pitch_degrees,
        roof_drop,
        horizontal_span,
        interior_wall_x,
        rafter_length,
        post_extension,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section_at(pitch: f64) -> CrossSectionGeometry {
        compute_cross_section(&StructureParameters::default().with_roof_pitch(pitch))
            .expect("valid pitch")
    }

    #[test]
    fn matches_hand_calculation_at_twenty_degrees() {
        let section = section_at(20.0);
        assert!((section.roof_drop - 12.0).abs() < f64::EPSILON);
        assert!((section.horizontal_span - 32.97).abs() < 0.01);
        assert!((section.interior_wall_x - 21.98).abs() < 0.01);
        assert!((section.rafter_length - 35.09).abs() < 0.01);
        assert!((section.post_extension - 10.99).abs() < 0.01);
    }

    #[test]
    fn post_extension_is_remaining_run() {
        let section = section_at(27.5);
        assert_eq!(
            section.post_extension,
            section.horizontal_span - section.interior_wall_x
        );
    }

    #[test]
    fn roof_reaches_post_and_interior_wall() {
        let parameters = StructureParameters::default().with_roof_pitch(25.0);
        let section = compute_cross_section(&parameters).expect("valid pitch");
        let at_post = section.roof_height_at(parameters.left_wall_height, section.horizontal_span);
        let at_wall = section.roof_height_at(parameters.left_wall_height, section.interior_wall_x);
        assert!((at_post - parameters.right_post_height).abs() < 1.0e-9);
        assert!((at_wall - parameters.interior_wall_height).abs() < 1.0e-9);
    }

    #[test]
    fn rafter_is_hypotenuse_of_slope_triangle() {
        let section = section_at(33.0);
        let hypotenuse = section.horizontal_span.hypot(section.roof_drop);
        assert!((section.rafter_length - hypotenuse).abs() < 1.0e-9);
    }

    #[test]
    fn flat_roof_is_degenerate() {
        let error = compute_cross_section(&StructureParameters::default().with_roof_pitch(0.0))
            .expect_err("flat roof rejected");
        assert_eq!(error, GeometryError::DegeneratePitch { pitch_degrees: 0.0 });
    }

    #[test]
    fn vertical_and_reversed_roofs_are_degenerate() {
        for pitch in [90.0, 180.0, -20.0] {
            let result = compute_cross_section(&StructureParameters::default().with_roof_pitch(pitch));
            assert!(matches!(result, Err(GeometryError::DegeneratePitch { .. })));
        }
    }

    #[test]
    fn interior_wall_below_post_is_rejected() {
        let parameters = StructureParameters::default().with_heights(20.0, 8.0, 5.0);
        let error = compute_cross_section(&parameters).expect_err("wall would stand past the post");
        assert!(matches!(
            error,
            GeometryError::InvalidParameter {
                name: "interior_wall_height",
                ..
            }
        ));
    }

    #[test]
    fn small_dome_does_not_affect_side_view() {
        let parameters = StructureParameters::default().with_dome_radius(4.0);
        let section = compute_cross_section(&parameters).expect("side view ignores the dome");
        assert!((section.horizontal_span - 32.97).abs() < 0.01);
    }
}
