use std::cmp::Ordering;

use series::{Lookback, Result, SeriesError};

/// Swing direction of a pivot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pivot {
    High,
    Low,
}

impl Pivot {
    /// Ordering the pivot bar must have against every neighbour.
    fn dominates(self) -> Ordering {
        match self {
            Pivot::High => Ordering::Greater,
            Pivot::Low => Ordering::Less,
        }
    }
}

/// Is bar `p` a swing of kind `pivot` in `s`?
///
/// `p` must be strictly above (high) or strictly below (low) each of the
/// `right` newer bars `p - right..p` and the `left` older bars
/// `p + 1..=p + left`. Ties and unordered values (NaN) disqualify the bar.
///
/// # Arguments
/// * `s` - Series in present-first indexing
/// * `p` - Candidate bar, 1 = present
/// * `left` - Older bars to compare against
/// * `right` - Newer bars to compare against; a pivot is only confirmed
///   once this many bars have printed after it
///
/// # Returns
/// `IndexOutOfRange` unless `p > right` and `p + left <= s.len()`.
pub fn is_pivot<S>(s: &S, pivot: Pivot, p: usize, left: usize, right: usize) -> Result<bool>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    let len = s.len();
    if p <= right || p.saturating_add(left) > len {
        return Err(SeriesError::IndexOutOfRange { index: p, len });
    }

    let centre = s.back(p)?;
    let wanted = pivot.dominates();
    for q in (p - right)..=(p + left) {
        if q == p {
            continue;
        }
        if centre.partial_cmp(s.back(q)?) != Some(wanted) {
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn is_pivot_high<S>(s: &S, p: usize, left: usize, right: usize) -> Result<bool>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    is_pivot(s, Pivot::High, p, left, right)
}

pub fn is_pivot_low<S>(s: &S, p: usize, left: usize, right: usize) -> Result<bool>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    is_pivot(s, Pivot::Low, p, left, right)
}

/// Every confirmed pivot of kind `pivot` in `s`, nearest to the present first.
pub fn pivots<S>(s: &S, pivot: Pivot, left: usize, right: usize) -> Vec<usize>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    let last = s.len().saturating_sub(left);
    (right.saturating_add(1)..=last)
        .filter(|&p| is_pivot(s, pivot, p, left, right).unwrap_or(false))
        .collect()
}

pub fn pivot_highs<S>(s: &S, left: usize, right: usize) -> Vec<usize>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    pivots(s, Pivot::High, left, right)
}

pub fn pivot_lows<S>(s: &S, left: usize, right: usize) -> Vec<usize>
where
    S: Lookback + ?Sized,
    S::Item: PartialOrd,
{
    pivots(s, Pivot::Low, left, right)
}
