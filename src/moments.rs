//! Spatial moments of closed outlines.

use crate::Point2D;
use num_traits::ToPrimitive as _;

/// Outlines whose doubled area is below this threshold have no moments.
const AREA_EPSILON: f64 = f32::EPSILON as f64;

/// Area (`m00`) and first moments (`m10`, `m01`) of a shape.
///
/// The centroid of a shape is `(m10 / m00, m01 / m00)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    /// Compute the moments of the polygon delimited by `points`.
    ///
    /// Moments are computed with Green's theorem over the edges of the
    /// polygon, the last point being linked back to the first.  The result
    /// does not depend on the orientation of the outline.  Polygons with a
    /// null area (less than three points, all points aligned...) have all
    /// their moments set to zero.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grille::Moments;
    /// use grille::Point2D;
    ///
    /// let triangle = [Point2D::new(0, 0), Point2D::new(3, 0), Point2D::new(0, 3)];
    /// let moments = Moments::of_polygon(&triangle);
    ///
    /// assert_eq!(moments.m00, 4.5);
    /// assert_eq!(moments.centroid(), Some(Point2D::new(1, 1)));
    /// ```
    pub fn of_polygon(points: &[Point2D]) -> Moments {
        let mut prev = match points.last() {
            Some(p) => p,
            None => return Moments::default(),
        };

        let mut a00 = 0.0;
        let mut a10 = 0.0;
        let mut a01 = 0.0;
        for p in points {
            let (x0, y0) = (f64::from(prev.x), f64::from(prev.y));
            let (x1, y1) = (f64::from(p.x), f64::from(p.y));
            let cross = x0 * y1 - x1 * y0;
            a00 += cross;
            a10 += cross * (x0 + x1);
            a01 += cross * (y0 + y1);
            prev = p;
        }

        if f64::abs(a00) <= AREA_EPSILON {
            return Moments::default();
        }

        // Clockwise outlines have a negative signed area.
        let sign = f64::signum(a00);
        Moments {
            m00: sign * a00 / 2.0,
            m10: sign * a10 / 6.0,
            m01: sign * a01 / 6.0,
        }
    }

    /// Whether the shape has a null area, in which case it has no centroid.
    pub fn is_degenerate(&self) -> bool {
        self.m00 == 0.0
    }

    /// The centroid of the shape, truncated toward zero to integer
    /// coordinates.
    ///
    /// Returns `None` when the shape is degenerate or when the centroid
    /// does not fit in a [`Point2D`].
    pub fn centroid(&self) -> Option<Point2D> {
        if self.is_degenerate() {
            return None;
        }
        let cx = (self.m10 / self.m00).to_i32()?;
        let cy = (self.m01 / self.m00).to_i32()?;
        Some(Point2D::new(cx, cy))
    }
}
