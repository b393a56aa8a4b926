//! Point and shape types.

use crate::Moments;

/// Integer pixel coordinates.
pub type Point2D = nalgebra::Point2<i32>;

/// A closed outline of a region.
///
/// Grille never mutates shapes; it only needs their [`Moments`] to derive a
/// centroid.  The outline is implicitly closed: the last point is connected
/// back to the first one.
///
/// Implement this trait to plug a different moment source, for example
/// moments computed from a raster mask instead of an outline.
pub trait Shape {
    fn moments(&self) -> Moments;
}

impl Shape for [Point2D] {
    fn moments(&self) -> Moments {
        Moments::of_polygon(self)
    }
}

impl Shape for Vec<Point2D> {
    fn moments(&self) -> Moments {
        Moments::of_polygon(self)
    }
}

impl<const N: usize> Shape for [Point2D; N] {
    fn moments(&self) -> Moments {
        Moments::of_polygon(self)
    }
}

impl<S> Shape for &S
where
    S: Shape + ?Sized,
{
    fn moments(&self) -> Moments {
        S::moments(self)
    }
}

impl Shape for Moments {
    fn moments(&self) -> Moments {
        *self
    }
}
