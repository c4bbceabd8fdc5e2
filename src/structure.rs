//! End-to-end solve from measurements to every derived coordinate.

use serde::Serialize;
use tracing::info;

use crate::cross_section::{compute_cross_section, CrossSectionGeometry};
use crate::errors::GeometryError;
use crate::floor_plan::{compute_floor_plan, FloorPlan};
use crate::parameters::StructureParameters;

/// Everything derived from one set of measurements.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StructureGeometry {
    /// Measurements the geometry was derived from.
    pub parameters: StructureParameters,
    /// Side view of the roof.
    pub cross_section: CrossSectionGeometry,
    /// Top-down layout.
    pub floor_plan: FloorPlan,
}

impl StructureGeometry {
    /// Serialise the geometry as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`serde_json::Error`] if serialisation fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Derive the cross-section and the floor plan for `parameters`.
///
/// # Errors
///
/// Returns [`GeometryError`] when the measurements are inconsistent. A closing wall or
/// front arc that cannot be built is not an error; it is simply absent from the plan.
///
/// # Examples
/// ```
/// use domeshed::{solve, StructureParameters};
///
/// let geometry = solve(&StructureParameters::default().with_roof_pitch(25.0)).expect("valid");
/// assert_eq!(geometry.floor_plan.left_wing, geometry.floor_plan.right_wing.mirrored());
/// ```
pub fn solve(parameters: &StructureParameters) -> Result<StructureGeometry, GeometryError> {
    let cross_section = compute_cross_section(parameters)?;
    let floor_plan = compute_floor_plan(parameters, &cross_section)?;
    info!(
        pitch = parameters.roof_pitch_degrees,
        span = cross_section.horizontal_span,
        wing = cross_section.interior_wall_x,
        "solved structure"
    );
    Ok(StructureGeometry {
        parameters: *parameters,
        cross_section,
        floor_plan,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn solve_is_idempotent() {
        let parameters = StructureParameters::default().with_roof_pitch(22.5);
        let first = solve(&parameters).expect("valid");
        let second = solve(&parameters).expect("valid");
        assert_eq!(first, second);
    }

    #[test]
    fn json_names_every_section() {
        let geometry = solve(&StructureParameters::default()).expect("valid");
        let json = geometry.to_json().expect("serialisable");
        assert!(json.contains("\"cross_section\""));
        assert!(json.contains("\"horizontal_span\""));
        assert!(json.contains("\"right_wing\""));
        assert!(json.contains("\"front_arc\""));
    }

    #[test]
    fn invalid_pitch_stops_the_solve() {
        let result = solve(&StructureParameters::default().with_roof_pitch(95.0));
        assert!(matches!(result, Err(GeometryError::DegeneratePitch { .. })));
    }
}
