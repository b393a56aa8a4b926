//! Grouping of shapes by the grid cell their centroid falls in.

use crate::BinError;
use crate::Breaks;
use crate::Point2D;
use crate::Shape;
use itertools::Itertools as _;
use std::fmt;
use std::num::NonZeroUsize;

/// One of the two axes of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    Row,
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Errors thrown by [`GridCluster`].
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The number of rows or columns is zero.
    InvalidBinCount { axis: Axis, count: usize },

    /// The axis is too short to be split in the given number of bins.
    EmptyStep {
        axis: Axis,
        length: usize,
        count: usize,
    },

    /// The centroid of a shape could not be represented in pixel
    /// coordinates.
    InvalidCentroid { shape: usize },

    /// The centroid of a shape lies outside of the partition.
    UnresolvedBin {
        axis: Axis,
        shape: usize,
        source: BinError,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBinCount { axis, count } => {
                write!(f, "invalid {axis} count {count}, expected at least 1")
            }
            Error::EmptyStep {
                axis,
                length,
                count,
            } => write!(
                f,
                "cannot split a {axis} axis of length {length} into {count} bins",
            ),
            Error::InvalidCentroid { shape } => {
                write!(f, "centroid of shape #{shape} is out of range")
            }
            Error::UnresolvedBin {
                axis,
                shape,
                source,
            } => write!(f, "no {axis} bin for shape #{shape}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::UnresolvedBin { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A grid cell, given by its 1-based row and column bin indices.
///
/// Cells are displayed as their label `"row,col"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// The order in which groups are emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum GroupOrder {
    /// Lexicographic order of the cell labels, meaning the cell `10,1` comes
    /// before the cell `2,1`.  This is the default.
    #[default]
    Label,

    /// Numeric order of cells, rows first.
    RowMajor,
}

/// Where a shape was binned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Assignment {
    pub centroid: Point2D,
    pub cell: Cell,

    /// Index of the shape in the input.
    pub index: usize,
}

/// The shapes that share a grid cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Group {
    pub cell: Cell,

    /// Indices of the shapes in the input, in increasing order.
    pub indices: Vec<usize>,
}

/// Result of [`GridCluster::cluster`].
#[derive(Debug)]
pub struct Clusters<'a, S> {
    groups: Vec<Group>,
    shapes: &'a [S],
    dropped: Vec<usize>,
    assignments: Vec<Assignment>,
    row_breaks: Breaks,
    col_breaks: Breaks,
}

impl<'a, S> Clusters<'a, S> {
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// All input shapes, including those that do not appear in any group.
    pub fn shapes(&self) -> &'a [S] {
        self.shapes
    }

    /// Indices of the shapes with a null area, which have been left out of
    /// the groups.
    pub fn dropped(&self) -> &[usize] {
        &self.dropped
    }

    /// Bin assignments of the shapes that have a centroid, sorted by column
    /// then by row.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn row_breaks(&self) -> &Breaks {
        &self.row_breaks
    }

    pub fn col_breaks(&self) -> &Breaks {
        &self.col_breaks
    }

    /// The group index of each shape, `None` for dropped shapes.
    pub fn group_ids(&self) -> Vec<Option<usize>> {
        let mut ids = vec![None; self.shapes.len()];
        for (group_id, group) in self.groups.iter().enumerate() {
            for &index in &group.indices {
                ids[index] = Some(group_id);
            }
        }
        ids
    }

    /// The grouped shape indices, without their cells.
    pub fn into_indices(self) -> Vec<Vec<usize>> {
        self.groups.into_iter().map(|group| group.indices).collect()
    }
}

/// # Grid clustering
///
/// Splits the image plane into `row_count` rows and `col_count` columns of
/// equal size and groups shapes according to the cell that contains their
/// centroid.
///
/// Shapes with a null area have no centroid.  They are left out of the
/// groups and reported by [`Clusters::dropped`].
///
/// # Example
///
/// ```rust
/// # fn main() -> Result<(), grille::Error> {
/// use grille::Point2D;
/// use std::num::NonZeroUsize;
///
/// let shapes = [
///     vec![Point2D::new(1, 1), Point2D::new(3, 1), Point2D::new(3, 3)],
///     vec![Point2D::new(14, 2), Point2D::new(17, 2), Point2D::new(17, 5)],
///     vec![Point2D::new(2, 2), Point2D::new(5, 5)],
///     vec![Point2D::new(0, 1), Point2D::new(3, 1), Point2D::new(3, 4)],
/// ];
/// let width = NonZeroUsize::new(20).unwrap();
/// let height = NonZeroUsize::new(10).unwrap();
///
/// let clusters = grille::GridCluster { col_count: 2, ..Default::default() }
///     .cluster(&shapes, width, height)?;
///
/// assert_eq!(clusters.dropped(), &[2]);
/// assert_eq!(clusters.into_indices(), vec![vec![0, 3], vec![1]]);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug)]
pub struct GridCluster {
    pub row_count: usize,
    pub col_count: usize,
    pub order: GroupOrder,
}

impl Default for GridCluster {
    fn default() -> Self {
        Self {
            row_count: 1,
            col_count: 1,
            order: GroupOrder::default(),
        }
    }
}

fn axis_breaks(axis: Axis, length: NonZeroUsize, count: usize) -> Result<Breaks, Error> {
    let count = NonZeroUsize::new(count).ok_or(Error::InvalidBinCount { axis, count })?;
    Breaks::uniform(length, count).ok_or(Error::EmptyStep {
        axis,
        length: usize::from(length),
        count: usize::from(count),
    })
}

fn group_assignments(assignments: &[Assignment], order: GroupOrder) -> Vec<Group> {
    let mut groups: Vec<Group> = assignments
        .iter()
        .map(|a| (a.cell, a.index))
        .into_group_map()
        .into_iter()
        .map(|(cell, indices)| Group { cell, indices })
        .collect();
    match order {
        GroupOrder::Label => groups.sort_by_cached_key(|group| group.cell.to_string()),
        GroupOrder::RowMajor => groups.sort_unstable_by_key(|group| group.cell),
    }
    groups
}

impl GridCluster {
    /// The row and column breaks of the grid for an image of the given size.
    pub fn breaks(
        &self,
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) -> Result<(Breaks, Breaks), Error> {
        let row_breaks = axis_breaks(Axis::Row, height, self.row_count)?;
        let col_breaks = axis_breaks(Axis::Column, width, self.col_count)?;
        Ok((row_breaks, col_breaks))
    }

    /// Group `shapes` by the grid cell of their centroid.
    pub fn cluster<'a, S>(
        &self,
        shapes: &'a [S],
        width: NonZeroUsize,
        height: NonZeroUsize,
    ) -> Result<Clusters<'a, S>, Error>
    where
        S: Shape,
    {
        let span = tracing::info_span!(
            "grid_cluster",
            rows = self.row_count,
            cols = self.col_count,
            shapes = shapes.len()
        );
        let _enter = span.enter();

        let (row_breaks, col_breaks) = self.breaks(width, height)?;

        let mut dropped = Vec::new();
        let mut assignments = Vec::with_capacity(shapes.len());
        for (index, shape) in shapes.iter().enumerate() {
            let moments = shape.moments();
            if moments.is_degenerate() {
                tracing::debug!(index, "dropping shape with null area");
                dropped.push(index);
                continue;
            }
            let centroid = moments
                .centroid()
                .ok_or(Error::InvalidCentroid { shape: index })?;
            let col = col_breaks
                .digitize(i64::from(centroid.x))
                .map_err(|source| Error::UnresolvedBin {
                    axis: Axis::Column,
                    shape: index,
                    source,
                })?;
            let row = row_breaks
                .digitize(i64::from(centroid.y))
                .map_err(|source| Error::UnresolvedBin {
                    axis: Axis::Row,
                    shape: index,
                    source,
                })?;
            assignments.push(Assignment {
                centroid,
                cell: Cell { row, col },
                index,
            });
        }

        // Stable, so that shapes of a cell keep their input order.
        assignments.sort_by_key(|a| (a.cell.col, a.cell.row));

        let groups = group_assignments(&assignments, self.order);

        if !dropped.is_empty() {
            tracing::info!(count = dropped.len(), "dropped shapes with null area");
        }
        tracing::info!(groups = groups.len(), "clustering done");

        Ok(Clusters {
            groups,
            shapes,
            dropped,
            assignments,
            row_breaks,
            col_breaks,
        })
    }
}
