use std::cmp::Ordering;

use series::{Lookback, Result, SeriesError};

/// Direction of a crossing between two series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cross {
    /// `a` moved from at-or-below `b` to strictly above it.
    Up,
    /// `a` moved from at-or-above `b` to strictly below it.
    Down,
}

/// Which crossing, if any, happened between bar `i + 1` and bar `i`.
///
/// Equality at bar `i` is never a cross. Equality at bar `i + 1` counts as
/// "not yet above/below", so a run of equal values fires once, on the first
/// bar of strict inequality. Unordered values (NaN) never cross.
///
/// # Arguments
/// * `a` - Series tested for crossing
/// * `b` - Reference series
/// * `i` - Bar at which the cross completes, 1 = present
///
/// # Returns
/// `IndexOutOfRange` unless `1 <= i` and `i + 1 <= min(a.len(), b.len())`.
pub fn cross_at<A, B>(a: &A, b: &B, i: usize) -> Result<Option<Cross>>
where
    A: Lookback + ?Sized,
    B: Lookback + ?Sized,
    A::Item: PartialOrd<B::Item>,
{
    check_lookback(i, a.len().min(b.len()))?;
    Ok(classify(a.back(i)?, b.back(i)?, a.back(i + 1)?, b.back(i + 1)?))
}

/// Did series `a` become greater than series `b` at index `i`?
pub fn crossed_up<A, B>(a: &A, b: &B, i: usize) -> Result<bool>
where
    A: Lookback + ?Sized,
    B: Lookback + ?Sized,
    A::Item: PartialOrd<B::Item>,
{
    Ok(cross_at(a, b, i)? == Some(Cross::Up))
}

/// Did series `a` become less than series `b` at index `i`?
pub fn crossed_down<A, B>(a: &A, b: &B, i: usize) -> Result<bool>
where
    A: Lookback + ?Sized,
    B: Lookback + ?Sized,
    A::Item: PartialOrd<B::Item>,
{
    Ok(cross_at(a, b, i)? == Some(Cross::Down))
}

/// Did `a` cross above `b` on the present bar?
pub fn crossed_up_now<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: Lookback + ?Sized,
    B: Lookback + ?Sized,
    A::Item: PartialOrd<B::Item>,
{
    crossed_up(a, b, 1)
}

/// Did `a` cross below `b` on the present bar?
pub fn crossed_down_now<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: Lookback + ?Sized,
    B: Lookback + ?Sized,
    A::Item: PartialOrd<B::Item>,
{
    crossed_down(a, b, 1)
}

/// Crossing of a fixed `level` (e.g. an oscillator crossing 70).
///
/// Same tie-break as [`cross_at`]; requires `1 <= i` and `i + 1 <= a.len()`.
pub fn cross_value_at<A, T>(a: &A, level: &T, i: usize) -> Result<Option<Cross>>
where
    A: Lookback + ?Sized,
    A::Item: PartialOrd<T>,
{
    check_lookback(i, a.len())?;
    Ok(classify(a.back(i)?, level, a.back(i + 1)?, level))
}

pub fn crossed_above_value<A, T>(a: &A, level: &T, i: usize) -> Result<bool>
where
    A: Lookback + ?Sized,
    A::Item: PartialOrd<T>,
{
    Ok(cross_value_at(a, level, i)? == Some(Cross::Up))
}

pub fn crossed_below_value<A, T>(a: &A, level: &T, i: usize) -> Result<bool>
where
    A: Lookback + ?Sized,
    A::Item: PartialOrd<T>,
{
    Ok(cross_value_at(a, level, i)? == Some(Cross::Down))
}

/// `i` and its lookback bar `i + 1` must both lie in `1..=len`.
fn check_lookback(i: usize, len: usize) -> Result<()> {
    if i == 0 {
        return Err(SeriesError::IndexOutOfRange { index: i, len });
    }
    if i >= len {
        return Err(SeriesError::IndexOutOfRange { index: i.saturating_add(1), len });
    }
    Ok(())
}

fn classify<X, Y>(now_a: &X, now_b: &Y, prev_a: &X, prev_b: &Y) -> Option<Cross>
where
    X: PartialOrd<Y> + ?Sized,
    Y: ?Sized,
{
    match now_a.partial_cmp(now_b)? {
        Ordering::Greater if prev_a <= prev_b => Some(Cross::Up),
        Ordering::Less if prev_a >= prev_b => Some(Cross::Down),
        _ => None,
    }
}
