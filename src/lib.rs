//! A shape grouping library that bins shape outlines into the cells of an
//! axis-aligned grid.
//!
//! # Crate Layout
//!
//! Grille exposes [`GridCluster`], which splits the image plane into rows and
//! columns, computes the centroid of every given shape and groups the shapes
//! that fall into the same cell.  The algorithm is built from two smaller
//! pieces that can be used on their own:
//!
//! - [`Breaks`], the partition of one axis and its [`digitize`][Breaks::digitize]
//!   quantization function,
//! - [`Moments`], the area and first moments of a closed outline, from which
//!   centroids are derived.
//!
//! Shapes are anything that implements the [`Shape`] trait.  Slices and
//! vectors of [`Point2D`] implement it using the polygon moments.
//!
//! # Example
//!
//! ```rust
//! # fn main() -> Result<(), grille::Error> {
//! use grille::Point2D;
//! use std::num::NonZeroUsize;
//!
//! let square = |x: i32, y: i32| {
//!     vec![
//!         Point2D::new(x, y),
//!         Point2D::new(x + 2, y),
//!         Point2D::new(x + 2, y + 2),
//!         Point2D::new(x, y + 2),
//!     ]
//! };
//! let shapes = [square(0, 0), square(6, 0), square(0, 6), square(6, 6)];
//! let side = NonZeroUsize::new(10).unwrap();
//!
//! let clusters = grille::GridCluster { row_count: 2, col_count: 2, ..Default::default() }
//!     .cluster(&shapes, side, side)?;
//!
//! assert_eq!(clusters.into_indices(), vec![vec![0], vec![1], vec![2], vec![3]]);
//! # Ok(())
//! # }
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    rust_2018_idioms
)]

mod breaks;
mod geometry;
mod grid;
mod moments;

pub use crate::breaks::BinError;
pub use crate::breaks::Breaks;
pub use crate::geometry::Point2D;
pub use crate::geometry::Shape;
pub use crate::grid::Assignment;
pub use crate::grid::Axis;
pub use crate::grid::Cell;
pub use crate::grid::Clusters;
pub use crate::grid::Error;
pub use crate::grid::GridCluster;
pub use crate::grid::Group;
pub use crate::grid::GroupOrder;
pub use crate::moments::Moments;

pub use nalgebra;
