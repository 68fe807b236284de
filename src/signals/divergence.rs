//! Regular and hidden divergence between a price series and an oscillator.
//!
//! Swings are located on the price series with [`is_pivot`]; the oscillator
//! is sampled at the same bars. Evaluated at bar `i`, the pivot under test is
//! the one confirmed at `i`, i.e. bar `i + pivot_right`. It is compared with
//! the nearest older pivot of the same kind, which must lie between
//! `range_min` and `range_max` bars further back.
//!
//! | kind            | pivot | price       | oscillator  |
//! |-----------------|-------|-------------|-------------|
//! | regular bullish | low   | lower low   | higher low  |
//! | hidden bullish  | low   | higher low  | lower low   |
//! | regular bearish | high  | higher high | lower high  |
//! | hidden bearish  | high  | lower high  | higher high |
//!
//! Pass lows as `price` for the bullish kinds and highs for the bearish ones
//! when working from bars; a close series works for both.

use std::cmp::Ordering;

use log::debug;
use serde::{Deserialize, Serialize};
use series::{Lookback, Result, SeriesError};

use crate::config::DivergenceConfig;
use crate::pivot::{Pivot, is_pivot};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Divergence {
    RegularBullish,
    RegularBearish,
    HiddenBullish,
    HiddenBearish,
}

impl Divergence {
    pub const ALL: [Divergence; 4] = [
        Divergence::RegularBullish,
        Divergence::RegularBearish,
        Divergence::HiddenBullish,
        Divergence::HiddenBearish,
    ];

    pub fn is_bullish(self) -> bool {
        matches!(self, Divergence::RegularBullish | Divergence::HiddenBullish)
    }

    pub fn is_hidden(self) -> bool {
        matches!(self, Divergence::HiddenBullish | Divergence::HiddenBearish)
    }

    /// Swing kind the pattern is read from.
    pub fn pivot(self) -> Pivot {
        if self.is_bullish() { Pivot::Low } else { Pivot::High }
    }

    /// Required (price, oscillator) ordering of the recent pivot against the older one.
    fn orderings(self) -> (Ordering, Ordering) {
        match self {
            Divergence::RegularBullish | Divergence::HiddenBearish => {
                (Ordering::Less, Ordering::Greater)
            }
            Divergence::HiddenBullish | Divergence::RegularBearish => {
                (Ordering::Greater, Ordering::Less)
            }
        }
    }
}

/// Does divergence `kind` complete at bar `i`?
///
/// # Arguments
/// * `price` - Price-like series, present-first
/// * `osc` - Secondary series (typically an oscillator), present-first
/// * `kind` - Pattern to test
/// * `config` - Pivot width and pivot distance bounds
/// * `i` - Bar at which the recent pivot is confirmed, 1 = present
///
/// # Returns
/// `IndexOutOfRange` unless `i >= 1` and the recent pivot's full window fits
/// in both series (`i + pivot_right + pivot_left <= min len`). Running out of
/// history while looking for the older pivot just yields `false`.
pub fn divergence_at<P, O>(
    price: &P,
    osc: &O,
    kind: Divergence,
    config: &DivergenceConfig,
    i: usize,
) -> Result<bool>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    let len = price.len().min(osc.len());
    let left = config.pivot_left;
    let right = config.pivot_right;

    if i == 0 {
        return Err(SeriesError::IndexOutOfRange { index: i, len });
    }
    let recent = i.saturating_add(right);
    let window_end = recent.saturating_add(left);
    if window_end > len {
        return Err(SeriesError::IndexOutOfRange { index: window_end, len });
    }

    let pivot = kind.pivot();
    if !is_pivot(price, pivot, recent, left, right)? {
        return Ok(false);
    }
    let Some(older) = previous_pivot(price, pivot, recent, len, config)? else {
        return Ok(false);
    };

    let (price_order, osc_order) = kind.orderings();
    let fired = price.back(recent)?.partial_cmp(price.back(older)?) == Some(price_order)
        && osc.back(recent)?.partial_cmp(osc.back(older)?) == Some(osc_order);

    if fired {
        debug!("{kind:?} divergence at bar {i}: pivots at {recent} and {older}");
    }
    Ok(fired)
}

/// Nearest pivot older than `recent`, if it lies within the configured range.
fn previous_pivot<P>(
    price: &P,
    pivot: Pivot,
    recent: usize,
    len: usize,
    config: &DivergenceConfig,
) -> Result<Option<usize>>
where
    P: Lookback + ?Sized,
    P::Item: PartialOrd,
{
    for gap in 1..=config.range_max {
        let older = recent.saturating_add(gap);
        if older.saturating_add(config.pivot_left) > len {
            break;
        }
        if is_pivot(price, pivot, older, config.pivot_left, config.pivot_right)? {
            return Ok((gap >= config.range_min).then_some(older));
        }
    }
    Ok(None)
}

/// The divergence, if any, completing at bar `i`.
///
/// With strict pivots a bar is never both a swing high and a swing low, and
/// the two kinds sharing a swing direction are mutually exclusive, so at most
/// one kind fires.
pub fn detect_divergence<P, O>(
    price: &P,
    osc: &O,
    config: &DivergenceConfig,
    i: usize,
) -> Result<Option<Divergence>>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    for kind in Divergence::ALL {
        if divergence_at(price, osc, kind, config, i)? {
            return Ok(Some(kind));
        }
    }
    Ok(None)
}

/// Price made a lower low while the oscillator made a higher low.
pub fn regular_bullish<P, O>(price: &P, osc: &O, config: &DivergenceConfig) -> Result<bool>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    divergence_at(price, osc, Divergence::RegularBullish, config, 1)
}

/// Price made a higher high while the oscillator made a lower high.
pub fn regular_bearish<P, O>(price: &P, osc: &O, config: &DivergenceConfig) -> Result<bool>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    divergence_at(price, osc, Divergence::RegularBearish, config, 1)
}

/// Price made a higher low while the oscillator made a lower low.
pub fn hidden_bullish<P, O>(price: &P, osc: &O, config: &DivergenceConfig) -> Result<bool>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    divergence_at(price, osc, Divergence::HiddenBullish, config, 1)
}

/// Price made a lower high while the oscillator made a higher high.
pub fn hidden_bearish<P, O>(price: &P, osc: &O, config: &DivergenceConfig) -> Result<bool>
where
    P: Lookback + ?Sized,
    O: Lookback + ?Sized,
    P::Item: PartialOrd,
    O::Item: PartialOrd,
{
    divergence_at(price, osc, Divergence::HiddenBearish, config, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pivot::pivot_lows;
    use series::ReversedView;

    fn config() -> DivergenceConfig {
        DivergenceConfig {
            pivot_left: 1,
            pivot_right: 1,
            range_min: 2,
            range_max: 10,
        }
    }

    fn negate(v: &[f64]) -> Vec<f64> {
        v.iter().map(|x| -x).collect()
    }

    // oldest -> newest; pivot lows at bars 2 (7.0) and 5 (8.0) from the present
    const LOWER_LOW: [f64; 6] = [10.0, 8.0, 9.0, 10.0, 7.0, 9.0];
    // oscillator at those bars: 35 now vs 30 then
    const HIGHER_LOW: [f64; 6] = [50.0, 30.0, 40.0, 45.0, 35.0, 40.0];

    const HIGHER_LOW_PRICE: [f64; 6] = [10.0, 6.0, 9.0, 10.0, 7.0, 9.0];
    const LOWER_LOW_OSC: [f64; 6] = [50.0, 40.0, 45.0, 45.0, 30.0, 40.0];

    #[test]
    fn test_regular_bullish() {
        let price = ReversedView::wrap(&LOWER_LOW);
        let osc = ReversedView::wrap(&HIGHER_LOW);
        let cfg = config();

        assert!(regular_bullish(&price, &osc, &cfg).unwrap());
        assert!(!hidden_bullish(&price, &osc, &cfg).unwrap());
        assert!(!regular_bearish(&price, &osc, &cfg).unwrap());
        assert!(!hidden_bearish(&price, &osc, &cfg).unwrap());
        assert_eq!(
            detect_divergence(&price, &osc, &cfg, 1).unwrap(),
            Some(Divergence::RegularBullish)
        );
    }

    #[test]
    fn test_hidden_bullish() {
        let price = ReversedView::wrap(&HIGHER_LOW_PRICE);
        let osc = ReversedView::wrap(&LOWER_LOW_OSC);
        let cfg = config();

        assert!(hidden_bullish(&price, &osc, &cfg).unwrap());
        assert!(!regular_bullish(&price, &osc, &cfg).unwrap());
        assert_eq!(
            detect_divergence(&price, &osc, &cfg, 1).unwrap(),
            Some(Divergence::HiddenBullish)
        );
    }

    #[test]
    fn test_bearish_mirrors() {
        let cfg = config();

        let highs = negate(&LOWER_LOW);
        let osc = negate(&HIGHER_LOW);
        let price = ReversedView::wrap(&highs);
        let osc = ReversedView::wrap(&osc);
        assert!(regular_bearish(&price, &osc, &cfg).unwrap());
        assert!(!hidden_bearish(&price, &osc, &cfg).unwrap());
        assert!(!regular_bullish(&price, &osc, &cfg).unwrap());

        let highs = negate(&HIGHER_LOW_PRICE);
        let osc = negate(&LOWER_LOW_OSC);
        let price = ReversedView::wrap(&highs);
        let osc = ReversedView::wrap(&osc);
        assert!(hidden_bearish(&price, &osc, &cfg).unwrap());
        assert!(!regular_bearish(&price, &osc, &cfg).unwrap());
    }

    #[test]
    fn test_no_divergence_when_series_agree() {
        // oscillator makes a lower low along with price
        let price = ReversedView::wrap(&LOWER_LOW);
        let osc = ReversedView::wrap(&LOWER_LOW_OSC);
        let cfg = config();

        assert_eq!(detect_divergence(&price, &osc, &cfg, 1).unwrap(), None);
    }

    #[test]
    fn test_pivot_distance_bounds() {
        let price = ReversedView::wrap(&LOWER_LOW);
        let osc = ReversedView::wrap(&HIGHER_LOW);

        // pivots are 3 bars apart
        let too_close = DivergenceConfig { range_min: 4, ..config() };
        assert!(!regular_bullish(&price, &osc, &too_close).unwrap());

        let too_far = DivergenceConfig { range_max: 2, ..config() };
        assert!(!regular_bullish(&price, &osc, &too_far).unwrap());

        let exact = DivergenceConfig { range_min: 3, range_max: 3, ..config() };
        assert!(regular_bullish(&price, &osc, &exact).unwrap());

        let unbounded = DivergenceConfig { range_max: usize::MAX, ..config() };
        assert!(regular_bullish(&price, &osc, &unbounded).unwrap());
    }

    #[test]
    fn test_nearest_older_pivot_must_be_in_range() {
        // pivot lows 2, 4 and 6 bars back: 7.0, then 8.5, then 8.0
        let lows = [10.0, 8.0, 10.0, 8.5, 10.0, 7.0, 9.0];
        let rsi = [50.0, 30.0, 45.0, 33.0, 45.0, 35.0, 40.0];
        let price = ReversedView::wrap(&lows);
        let osc = ReversedView::wrap(&rsi);
        assert_eq!(pivot_lows(&price, 1, 1), vec![2, 4, 6]);

        // bar 6 alone would qualify, but bar 4 is nearer and too close
        let cfg = DivergenceConfig { range_min: 3, ..config() };
        assert!(price.get(2).unwrap() < price.get(6).unwrap());
        assert!(osc.get(2).unwrap() > osc.get(6).unwrap());
        assert!(!regular_bullish(&price, &osc, &cfg).unwrap());

        let cfg = DivergenceConfig { range_min: 4, range_max: 4, ..config() };
        assert!(!regular_bullish(&price, &osc, &cfg).unwrap());

        // once bar 4 is in range it is the one compared against
        assert!(regular_bullish(&price, &osc, &config()).unwrap());
    }

    #[test]
    fn test_unconfirmed_pivot() {
        let price = ReversedView::wrap(&LOWER_LOW);
        let osc = ReversedView::wrap(&HIGHER_LOW);
        let cfg = config();

        // at bar 2 the candidate pivot is bar 3, which is a swing high
        assert!(!divergence_at(&price, &osc, Divergence::RegularBullish, &cfg, 2).unwrap());
    }

    #[test]
    fn test_out_of_range() {
        let price = ReversedView::wrap(&LOWER_LOW);
        let osc = ReversedView::wrap(&HIGHER_LOW);
        let cfg = config();

        assert_eq!(
            divergence_at(&price, &osc, Divergence::RegularBullish, &cfg, 0),
            Err(SeriesError::IndexOutOfRange { index: 0, len: 6 })
        );
        assert_eq!(
            divergence_at(&price, &osc, Divergence::RegularBullish, &cfg, 5),
            Err(SeriesError::IndexOutOfRange { index: 7, len: 6 })
        );
        assert_eq!(
            divergence_at(&price, &osc, Divergence::RegularBullish, &cfg, usize::MAX),
            Err(SeriesError::IndexOutOfRange { index: usize::MAX, len: 6 })
        );

        let short = [1.0, 2.0];
        let short = ReversedView::wrap(&short);
        assert!(regular_bullish(&short, &osc, &cfg).is_err());
    }

    #[test]
    fn test_kind_properties() {
        assert_eq!(Divergence::RegularBullish.pivot(), Pivot::Low);
        assert_eq!(Divergence::HiddenBearish.pivot(), Pivot::High);
        assert!(Divergence::HiddenBullish.is_hidden());
        assert!(!Divergence::RegularBearish.is_bullish());
    }
}
