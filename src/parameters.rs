//! Measured dimensions of the structure.

use serde::Serialize;

use crate::errors::GeometryError;

/// Hand-measured dimensions of the dome shed.
///
/// Lengths are in feet and angles in degrees. The defaults describe the reference
/// structure: a 20' dome wall, an 8' post, a 12' interior wall under a 20° roof, and
/// 30' back walls leaving a 16.5' radius dome 20° above its centre line.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StructureParameters {
    /// Height of the dome wall where the roof starts.
    pub left_wall_height: f64,
    /// Height of the post at the low end of the roof.
    pub right_post_height: f64,
    /// Height of the interior wall under the roof.
    pub interior_wall_height: f64,
    /// Roof slope measured from horizontal.
    pub roof_pitch_degrees: f64,
    /// Length of each wing's back wall.
    pub back_wall_length: f64,
    /// Radius of the central dome.
    pub dome_radius: f64,
    /// Angle above the dome centre line where each wing attaches.
    pub connection_angle_degrees: f64,
    /// Heading of the back wall, negative when it runs below horizontal.
    pub wall_angle_degrees: f64,
    /// Half width of the front entry.
    pub entry_half_width: f64,
    /// Distance the front entry projects out of the dome.
    pub entry_depth: f64,
}

impl Default for StructureParameters {
    fn default() -> Self {
        Self {
            left_wall_height: 20.0,
            right_post_height: 8.0,
            interior_wall_height: 12.0,
            roof_pitch_degrees: 20.0,
            back_wall_length: 30.0,
            dome_radius: 16.5,
            connection_angle_degrees: 20.0,
            wall_angle_degrees: -25.0,
            entry_half_width: 4.0,
            entry_depth: 5.0,
        }
    }
}

impl StructureParameters {
    /// Return a copy with a different roof pitch.
    ///
    /// # Examples
    /// ```
    /// use domeshed::StructureParameters;
    ///
    /// let steeper = StructureParameters::default().with_roof_pitch(30.0);
    /// assert_eq!(steeper.roof_pitch_degrees, 30.0);
    /// assert_eq!(steeper.left_wall_height, 20.0);
    /// ```
    #[must_use]
    pub fn with_roof_pitch(mut self, degrees: f64) -> Self {
        self.roof_pitch_degrees = degrees;
        self
    }

    /// Return a copy with different wall and post heights.
    #[must_use]
    pub fn with_heights(mut self, left_wall: f64, right_post: f64, interior_wall: f64) -> Self {
        self.left_wall_height = left_wall;
        self.right_post_height = right_post;
        self.interior_wall_height = interior_wall;
        self
    }

    /// Return a copy with a different back wall length.
    #[must_use]
    pub fn with_back_wall_length(mut self, length: f64) -> Self {
        self.back_wall_length = length;
        self
    }

    /// Return a copy with a different dome radius.
    #[must_use]
    pub fn with_dome_radius(mut self, radius: f64) -> Self {
        self.dome_radius = radius;
        self
    }

    /// Return a copy with different wing attachment and back wall headings.
    #[must_use]
    pub fn with_wing_angles(mut self, connection_degrees: f64, wall_degrees: f64) -> Self {
        self.connection_angle_degrees = connection_degrees;
        self.wall_angle_degrees = wall_degrees;
        self
    }

    /// Return a copy with a different front entry half width and depth.
    #[must_use]
    pub fn with_entry(mut self, half_width: f64, depth: f64) -> Self {
        self.entry_half_width = half_width;
        self.entry_depth = depth;
        self
    }

    /// Total height the roof loses between the dome wall and the post.
    #[must_use]
    pub fn roof_drop(&self) -> f64 {
        self.left_wall_height - self.right_post_height
    }

    /// Check the roof pitch on its own.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePitch`] when the pitch is not finite or lies
    /// outside the open interval (0°, 90°).
    pub fn validate_pitch(&self) -> Result<(), GeometryError> {
        validate_pitch(self.roof_pitch_degrees)
    }

    /// Check every invariant the solver relies on.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePitch`] for an unusable pitch and
    /// [`GeometryError::InvalidParameter`] naming the first other dimension that
    /// breaks its constraint.
    pub fn validate(&self) -> Result<(), GeometryError> {
        self.validate_section()?;
        self.validate_plan()
    }

    /// Check the pitch and the three heights the side view is built from.
    ///
    /// The interior wall must stand between the post and the left wall so the roof
    /// crosses it inside the span.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::DegeneratePitch`] for an unusable pitch and
    /// [`GeometryError::InvalidParameter`] for inconsistent heights.
    pub fn validate_section(&self) -> Result<(), GeometryError> {
        self.validate_pitch()?;
        require(
            "left_wall_height",
            self.left_wall_height,
            self.left_wall_height > 0.0,
            "must be positive",
        )?;
        require(
            "right_post_height",
            self.right_post_height,
            self.right_post_height > 0.0 && self.right_post_height < self.left_wall_height,
            "must be positive and lower than the left wall",
        )?;
        require(
            "interior_wall_height",
            self.interior_wall_height,
            self.interior_wall_height >= self.right_post_height
                && self.interior_wall_height < self.left_wall_height,
            "must be at least the post height and lower than the left wall",
        )
    }

    /// Check the dome, wing and entry dimensions the floor plan is built from.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidParameter`] naming the first dimension that
    /// breaks its constraint.
    pub fn validate_plan(&self) -> Result<(), GeometryError> {
        require(
            "back_wall_length",
            self.back_wall_length,
            self.back_wall_length > 0.0,
            "must be positive",
        )?;
        require(
            "dome_radius",
            self.dome_radius,
            self.dome_radius > 0.0,
            "must be positive",
        )?;
        require(
            "connection_angle_degrees",
            self.connection_angle_degrees,
            self.connection_angle_degrees.is_finite(),
            "must be finite",
        )?;
        require(
            "wall_angle_degrees",
            self.wall_angle_degrees,
            self.wall_angle_degrees.is_finite(),
            "must be finite",
        )?;
        require(
            "entry_half_width",
            self.entry_half_width,
            self.entry_half_width > 0.0 && self.entry_half_width < self.dome_radius,
            "must be positive and narrower than the dome radius",
        )?;
        require(
            "entry_depth",
            self.entry_depth,
            self.entry_depth > 0.0,
            "must be positive",
        )
    }
}

/// Check that a roof pitch lies strictly between 0° and 90°.
///
/// # Errors
///
/// Returns [`GeometryError::DegeneratePitch`] for any other value, including NaN.
pub fn validate_pitch(pitch_degrees: f64) -> Result<(), GeometryError> {
    if pitch_degrees > 0.0 && pitch_degrees < 90.0 {
        Ok(())
    } else {
        Err(GeometryError::DegeneratePitch { pitch_degrees })
    }
}

/// Turn a failed constraint into an [`GeometryError::InvalidParameter`].
///
/// `holds` is false for NaN inputs because every comparison with NaN is false.
fn require(
    name: &'static str,
    value: f64,
    holds: bool,
    reason: &'static str,
) -> Result<(), GeometryError> {
    if holds && value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::InvalidParameter {
            name,
            value,
            reason,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        StructureParameters::default()
            .validate()
            .expect("reference structure is consistent");
        assert!((StructureParameters::default().roof_drop() - 12.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_pitch_outside_open_interval() {
        for pitch in [0.0, 90.0, -5.0, 180.0, f64::NAN] {
            let error = validate_pitch(pitch).expect_err("pitch rejected");
            assert!(matches!(error, GeometryError::DegeneratePitch { .. }));
        }
        assert!(validate_pitch(0.5).is_ok());
        assert!(validate_pitch(89.5).is_ok());
    }

    #[test]
    fn rejects_post_taller_than_wall() {
        let parameters = StructureParameters::default().with_heights(20.0, 20.0, 12.0);
        let error = parameters.validate().expect_err("post too tall");
        assert!(matches!(
            error,
            GeometryError::InvalidParameter {
                name: "right_post_height",
                ..
            }
        ));
    }

    #[test]
    fn rejects_interior_wall_above_roof_start() {
        let parameters = StructureParameters::default().with_heights(20.0, 8.0, 21.0);
        let error = parameters.validate().expect_err("interior wall too tall");
        assert!(matches!(
            error,
            GeometryError::InvalidParameter {
                name: "interior_wall_height",
                ..
            }
        ));
    }

    #[test]
    fn rejects_entry_wider_than_dome() {
        let parameters = StructureParameters::default().with_dome_radius(3.0);
        let error = parameters.validate().expect_err("entry too wide");
        assert!(matches!(
            error,
            GeometryError::InvalidParameter {
                name: "entry_half_width",
                ..
            }
        ));
    }

    #[test]
    fn rejects_interior_wall_below_post() {
        let parameters = StructureParameters::default().with_heights(20.0, 8.0, 5.0);
        let error = parameters.validate_section().expect_err("interior wall below post");
        assert_eq!(
            error,
            GeometryError::InvalidParameter {
                name: "interior_wall_height",
                value: 5.0,
                reason: "must be at least the post height and lower than the left wall",
            }
        );
        assert!(StructureParameters::default()
            .with_heights(20.0, 8.0, 8.0)
            .validate_section()
            .is_ok());
    }

    #[test]
    fn side_view_ignores_plan_dimensions() {
        let parameters = StructureParameters::default().with_dome_radius(4.0);
        parameters.validate_section().expect("heights and pitch are fine");
        assert!(parameters.validate_plan().is_err());
        assert!(parameters.with_entry(3.0, 5.0).validate().is_ok());
    }
}
