//! Partition of an axis into bins, and the associated quantization function.

use std::fmt;
use std::num::NonZeroUsize;

/// Boundaries that split one axis into consecutive bins.
///
/// Bins are numbered from 1.  Given breaks `b[0], b[1], ..., b[n-1]`, bin `k`
/// covers `b[k-1] <= v < b[k]` and bin `n` catches every value greater than
/// or equal to `b[n-1]`.  Values below `b[0]` do not belong to any bin.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Breaks(Vec<i64>);

impl Breaks {
    /// Build a partition from the given boundaries.
    ///
    /// Returns `None` if `breaks` is empty or not sorted.
    pub fn new(breaks: Vec<i64>) -> Option<Breaks> {
        if breaks.is_empty() || breaks.windows(2).any(|w| w[1] < w[0]) {
            return None;
        }
        Some(Breaks(breaks))
    }

    /// Split an axis of the given length into `count` bins of equal width.
    ///
    /// A single bin spans the whole axis: the breaks are `[0, length]`.
    /// Otherwise the breaks are the `count` first multiples of the step
    /// `length / count`, rounded half to even.  Because of this rounding the
    /// last bin may be wider or narrower than the others.
    ///
    /// Returns `None` when the rounded step is zero, i.e. when `count` is too
    /// large for the axis, or when `length` or `count` do not fit in an `i64`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use grille::Breaks;
    /// use std::num::NonZeroUsize;
    ///
    /// let length = NonZeroUsize::new(10).unwrap();
    /// let count = NonZeroUsize::new(3).unwrap();
    /// let breaks = Breaks::uniform(length, count).unwrap();
    ///
    /// assert_eq!(breaks.as_slice(), &[0, 3, 6]);
    /// assert_eq!(breaks.digitize(7), Ok(3));
    /// ```
    pub fn uniform(length: NonZeroUsize, count: NonZeroUsize) -> Option<Breaks> {
        let length = i64::try_from(usize::from(length)).ok()?;
        let count = i64::try_from(usize::from(count)).ok()?;
        if count == 1 {
            return Some(Breaks(vec![0, length]));
        }
        let step = f64::round_ties_even(length as f64 / count as f64) as i64;
        if step == 0 {
            return None;
        }
        let breaks = (0..count).map(|i| i * step).collect();
        Some(Breaks(breaks))
    }

    /// The unit partition `0, 1, ..., count - 1`.
    ///
    /// Returns `None` if `count` is zero or does not fit in an `i64`.
    pub fn from_count(count: usize) -> Option<Breaks> {
        let count = i64::try_from(count).ok()?;
        if count == 0 {
            return None;
        }
        Some(Breaks((0..count).collect()))
    }

    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    /// Map `value` to the index of the bin it falls in.
    ///
    /// Lower bounds are inclusive and upper bounds exclusive, so that a value
    /// lying on a boundary belongs to the bin that starts there.
    pub fn digitize(&self, value: i64) -> Result<usize, BinError> {
        // Breaks are never empty.
        let last = self.0[self.0.len() - 1];
        if last <= value {
            return Ok(self.0.len());
        }
        match self.0.partition_point(|b| *b <= value) {
            0 => Err(BinError {
                value,
                breaks: self.clone(),
            }),
            bin => Ok(bin),
        }
    }
}

impl AsRef<[i64]> for Breaks {
    fn as_ref(&self) -> &[i64] {
        &self.0
    }
}

/// A value that does not fall in any bin of a partition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BinError {
    pub value: i64,
    pub breaks: Breaks,
}

impl fmt::Display for BinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "value {} is not covered by breaks {:?}",
            self.value,
            self.breaks.as_slice(),
        )
    }
}

impl std::error::Error for BinError {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn uniform(length: usize, count: usize) -> Option<Breaks> {
        Breaks::uniform(
            NonZeroUsize::new(length).unwrap(),
            NonZeroUsize::new(count).unwrap(),
        )
    }

    #[test]
    fn test_uniform() {
        assert_eq!(uniform(10, 1).unwrap().as_slice(), &[0, 10]);
        assert_eq!(uniform(10, 2).unwrap().as_slice(), &[0, 5]);
        assert_eq!(uniform(10, 3).unwrap().as_slice(), &[0, 3, 6]);
        assert_eq!(uniform(10, 6).unwrap().as_slice(), &[0, 2, 4, 6, 8, 10]);

        // Half steps round to even.
        assert_eq!(uniform(5, 2).unwrap().as_slice(), &[0, 2]);
        assert_eq!(uniform(7, 2).unwrap().as_slice(), &[0, 4]);
        assert_eq!(uniform(10, 4).unwrap().as_slice(), &[0, 2, 4, 6]);

        assert_eq!(uniform(1, 2), None);
        assert_eq!(uniform(10, 30), None);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_uniform_huge_count() {
        let length = i64::MAX as usize;

        // The rounded step is 1, but the count itself overflows.
        assert_eq!(uniform(length, length + 1), None);
        assert_eq!(uniform(length, usize::MAX), None);
        assert_eq!(Breaks::from_count(length + 1), None);
    }

    #[test]
    fn test_new() {
        assert_eq!(Breaks::new(Vec::new()), None);
        assert_eq!(Breaks::new(vec![0, 5, 3]), None);
        assert!(Breaks::new(vec![0, 5, 5, 8]).is_some());
        assert_eq!(Breaks::from_count(0), None);
        assert_eq!(Breaks::from_count(3).unwrap().as_slice(), &[0, 1, 2]);
    }

    #[test]
    fn test_digitize() {
        let breaks = Breaks::new(vec![0, 5]).unwrap();

        assert_eq!(breaks.digitize(0), Ok(1));
        assert_eq!(breaks.digitize(4), Ok(1));
        assert_eq!(breaks.digitize(5), Ok(2));
        assert_eq!(breaks.digitize(9), Ok(2));
        assert_eq!(breaks.digitize(1000), Ok(2));
        assert_eq!(
            breaks.digitize(-1),
            Err(BinError {
                value: -1,
                breaks: breaks.clone()
            }),
        );
    }

    #[test]
    fn test_digitize_single_bin() {
        let breaks = uniform(8, 1).unwrap();

        assert_eq!(breaks.digitize(0), Ok(1));
        assert_eq!(breaks.digitize(7), Ok(1));
        assert_eq!(breaks.digitize(8), Ok(2));
    }

    #[test]
    fn test_digitize_boundaries() {
        let breaks = Breaks::new(vec![0, 3, 6, 9]).unwrap();
        for (bin, start) in breaks.as_slice().iter().enumerate() {
            assert_eq!(breaks.digitize(*start), Ok(bin + 1));
        }
        assert_eq!(breaks.digitize(2), Ok(1));
        assert_eq!(breaks.digitize(8), Ok(3));
    }

    #[test]
    fn test_digitize_empty_bins() {
        let breaks = Breaks::new(vec![0, 5, 5, 8]).unwrap();
        assert_eq!(breaks.digitize(4), Ok(1));
        assert_eq!(breaks.digitize(5), Ok(3));
        assert_eq!(breaks.digitize(8), Ok(4));
    }

    #[test]
    fn test_digitize_offset() {
        let breaks = Breaks::new(vec![10, 20]).unwrap();
        assert!(breaks.digitize(0).is_err());
        assert!(breaks.digitize(9).is_err());
        assert_eq!(breaks.digitize(10), Ok(1));
        assert_eq!(breaks.digitize(20), Ok(2));
    }

    #[test]
    fn test_from_count() {
        let breaks = Breaks::from_count(4).unwrap();
        assert_eq!(breaks.digitize(0), Ok(1));
        assert_eq!(breaks.digitize(2), Ok(3));
        assert_eq!(breaks.digitize(3), Ok(4));
        assert_eq!(breaks.digitize(12), Ok(4));
    }

    proptest!(
        #[test]
        fn test_digitize_uniform(
            (length, count, value) in (1..5_000_usize, 1..50_usize)
                .prop_filter("step must not be zero", |(length, count)| 2 * length > *count)
                .prop_flat_map(|(length, count)| (Just(length), Just(count), 0..length as i64))
        ) {
            let breaks = uniform(length, count).unwrap();
            let bin = breaks.digitize(value).unwrap();

            prop_assert!(1 <= bin && bin <= count.max(2));
            let b = breaks.as_slice();
            prop_assert!(b[bin - 1] <= value);
            if bin < b.len() {
                prop_assert!(value < b[bin]);
            }
        }
    );
}
