//! Fundamental planar types shared by the solver and the drawings.

use nalgebra::Vector2;
use serde::Serialize;

/// Position in the plane measured in feet.
///
/// The cross-section uses x for horizontal distance from the dome wall and y for
/// height. The floor plan places the dome centre at the origin with y pointing away
/// from the front entry.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point2D {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point2D {
    /// Create a [`Point2D`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic vector.
    #[must_use]
    pub fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    /// Reflect the point across the vertical symmetry axis.
    ///
    /// # Examples
    /// ```
    /// use domeshed::point;
    ///
    /// assert_eq!(point(3.0, -2.0).mirrored(), point(-3.0, -2.0));
    /// ```
    #[must_use]
    pub fn mirrored(self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Move the point `distance` feet along the heading `angle_degrees`.
    #[must_use]
    pub fn offset(self, angle_degrees: f64, distance: f64) -> Self {
        (self.to_vector() + heading(angle_degrees) * distance).into()
    }

    /// Midpoint between two points.
    #[must_use]
    pub fn midpoint(self, other: Self) -> Self {
        ((self.to_vector() + other.to_vector()) / 2.0).into()
    }

    /// Straight-line distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other.to_vector() - self.to_vector()).norm()
    }
}

impl From<Vector2<f64>> for Point2D {
    fn from(value: Vector2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point2D> for Vector2<f64> {
    fn from(value: Point2D) -> Self {
        value.to_vector()
    }
}

/// Unit vector pointing along `angle_degrees`, measured counter-clockwise from +x.
#[must_use]
pub fn heading(angle_degrees: f64) -> Vector2<f64> {
    let (sin, cos) = angle_degrees.to_radians().sin_cos();
    Vector2::new(cos, sin)
}

/// Convenience helper for creating [`Point2D`] instances.
///
/// # Examples
/// ```
/// use domeshed::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point2D {
    Point2D::new(x, y)
}
