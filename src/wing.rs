//! Floor-plan outline of a single wing and its mirror image.

use serde::Serialize;
use tracing::warn;

use crate::errors::GeometryError;
use crate::geometry::{heading, point, Point2D};

/// Wall running from the side wall back to the dome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ClosingWall {
    /// Point where the wall meets the dome circle.
    pub end: Point2D,
    /// Length of the wall in feet.
    pub length: f64,
}

/// Outline of one wing in floor-plan coordinates.
///
/// The walls are visited in order: dome connection, back wall, side wall, post
/// extension, and finally the closing wall from the side wall end back to the dome.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WingGeometry {
    /// Point on the dome circle where the back wall starts.
    pub connection: Point2D,
    /// Far end of the back wall.
    pub back_wall_end: Point2D,
    /// End of the side wall, perpendicular to the back wall.
    pub side_wall_end: Point2D,
    /// Post at the end of the extension past the side wall.
    pub post: Point2D,
    /// Closing wall back to the dome, absent when it would miss the circle.
    pub closing: Option<ClosingWall>,
}

impl WingGeometry {
    /// Reflect the whole wing across the vertical axis.
    ///
    /// The opposite wing is the same outline with every x coordinate negated; no part
    /// of it is recomputed.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        Self {
            connection: self.connection.mirrored(),
            back_wall_end: self.back_wall_end.mirrored(),
            side_wall_end: self.side_wall_end.mirrored(),
            post: self.post.mirrored(),
            closing: self.closing.map(|closing| ClosingWall {
                end: closing.end.mirrored(),
                length: closing.length,
            }),
        }
    }

    /// Corner points in drawing order, ending on the dome when the closing wall exists.
    #[must_use]
    pub fn outline(&self) -> Vec<Point2D> {
        let mut points = vec![
            self.connection,
            self.back_wall_end,
            self.side_wall_end,
            self.post,
        ];
        if let Some(closing) = self.closing {
            points.push(closing.end);
        }
        points
    }
}

/// Lay out one wing against the dome.
///
/// Angles are in degrees measured counter-clockwise from +x; lengths in feet. The
/// side wall and the post extension run at `wall_angle − 90°`, and the closing wall
/// turns another quarter to `wall_angle − 180°` until it meets the dome. A closing wall
/// that misses the dome is logged and left out rather than failing the whole wing.
///
/// # Examples
/// ```
/// use domeshed::compute_wing;
///
/// let wing = compute_wing(0.0, -90.0, 10.0, 20.0, 4.0, 2.0);
/// let closing = wing.closing.expect("closing wall reaches the dome");
/// assert!((closing.end.x - 6.0).abs() < 1.0e-9);
/// assert!((closing.end.y + 8.0).abs() < 1.0e-9);
/// ```
#[must_use]
pub fn compute_wing(
    connection_angle: f64,
    wall_angle: f64,
    dome_radius: f64,
    back_wall_length: f64,
    wing_width: f64,
    extension_length: f64,
) -> WingGeometry {
    let connection: Point2D = (heading(connection_angle) * dome_radius).into();
    let back_wall_end = connection.offset(wall_angle, back_wall_length);
    let side_wall_end = back_wall_end.offset(wall_angle - 90.0, wing_width);
    let post = side_wall_end.offset(wall_angle - 90.0, extension_length);

    let closing = match closing_wall(side_wall_end, wall_angle - 180.0, dome_radius) {
        Ok(closing) => Some(closing),
        Err(error) => {
            warn!(%error, "omitting closing wall");
            None
        }
    };

    WingGeometry {
        connection,
        back_wall_end,
        side_wall_end,
        post,
        closing,
    }
}

/// Walk from `start` along `angle_degrees` until the path meets a circle of
/// `radius` centred on the origin.
///
/// Solves `|start + t·d|² = r²`, i.e. `t² + b·t + c = 0` with `b = 2·(start·d)` and
/// `c = |start|² − r²`. The nearer crossing `(−b − √Δ)/2` is used; when the walk starts
/// inside the circle that root lies behind `start`, and the far crossing ahead of it is
/// taken instead.
///
/// # Errors
///
/// Returns [`GeometryError::NoIntersection`] when the discriminant is negative or the
/// circle lies entirely behind `start`.
pub fn closing_wall(
    start: Point2D,
    angle_degrees: f64,
    radius: f64,
) -> Result<ClosingWall, GeometryError> {
    let origin = start.to_vector();
    let direction = heading(angle_degrees);
    let b = 2.0 * origin.dot(&direction);
    let c = origin.dot(&origin) - radius * radius;
    let discriminant = b * b - 4.0 * c;
    if discriminant < 0.0 || !discriminant.is_finite() {
        return Err(GeometryError::NoIntersection { discriminant });
    }

    let root = discriminant.sqrt();
    let near = (-b - root) / 2.0;
    let far = (-b + root) / 2.0;
    let length = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return Err(GeometryError::NoIntersection { discriminant });
    };

    let end = origin + direction * length;
    Ok(ClosingWall {
        end: point(end.x, end.y),
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wing_corners_follow_wall_headings() {
        let wing = compute_wing(0.0, -90.0, 10.0, 20.0, 4.0, 2.0);
        assert!((wing.connection.x - 10.0).abs() < 1.0e-12);
        assert!(wing.connection.y.abs() < 1.0e-12);
        assert!((wing.back_wall_end.x - 10.0).abs() < 1.0e-9);
        assert!((wing.back_wall_end.y + 20.0).abs() < 1.0e-9);
        assert!((wing.side_wall_end.x - 6.0).abs() < 1.0e-9);
        assert!((wing.side_wall_end.y + 20.0).abs() < 1.0e-9);
        assert!((wing.post.x - 4.0).abs() < 1.0e-9);
        assert!((wing.post.y + 20.0).abs() < 1.0e-9);
    }

    #[test]
    fn closing_wall_lands_on_dome() {
        let wing = compute_wing(0.0, -90.0, 10.0, 20.0, 4.0, 2.0);
        let closing = wing.closing.expect("closing wall present");
        let radius = closing.end.to_vector().norm();
        assert!((radius - 10.0).abs() < 1.0e-6);
        assert!((closing.length - 12.0).abs() < 1.0e-9);
    }

    #[test]
    fn closing_wall_missing_the_dome_is_omitted() {
        // The closing wall runs straight up at x = -30, well outside a 10' dome.
        let wing = compute_wing(0.0, -90.0, 10.0, 20.0, 40.0, 2.0);
        assert!(wing.closing.is_none());
        assert!(matches!(
            closing_wall(wing.side_wall_end, 90.0, 10.0),
            Err(GeometryError::NoIntersection { .. })
        ));
    }

    #[test]
    fn closing_wall_from_inside_walks_forward() {
        let closing = closing_wall(point(0.0, 0.0), 0.0, 5.0).expect("crosses ahead");
        assert!((closing.length - 5.0).abs() < 1.0e-12);
        assert!((closing.end.x - 5.0).abs() < 1.0e-12);
    }

    #[test]
    fn circle_behind_start_is_rejected() {
        let result = closing_wall(point(20.0, 0.0), 0.0, 5.0);
        assert!(matches!(result, Err(GeometryError::NoIntersection { .. })));
    }

    #[test]
    fn mirrored_wing_negates_x() {
        let wing = compute_wing(20.0, -25.0, 16.5, 30.0, 21.98, 10.99);
        let mirror = wing.mirrored();
        for (original, reflected) in wing.outline().iter().zip(mirror.outline().iter()) {
            assert_eq!(reflected.x, -original.x);
            assert_eq!(reflected.y, original.y);
        }
        assert_eq!(
            mirror.closing.map(|c| c.length),
            wing.closing.map(|c| c.length)
        );
    }
}
