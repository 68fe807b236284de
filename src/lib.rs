//! Present-first views over time series, plus crossing and divergence tests.
//!
//! ```
//! use reversed_series::prelude::*;
//!
//! let fast = [4.0, 6.0];
//! let slow = [5.0, 5.0];
//! let a = ReversedView::wrap(&fast);
//! let b = ReversedView::wrap(&slow);
//!
//! assert_eq!(a.get(1), Ok(&6.0));
//! assert!(crossed_up_now(&a, &b).unwrap());
//! assert!(!crossed_down_now(&a, &b).unwrap());
//! ```

pub use series;
pub use signals;

pub use series::{
    Lookback, ReversedTable, ReversedView, Result, SeriesError, Sequence, Table,
};
pub use signals::{
    Cross, Divergence, DivergenceConfig, Pivot, cross_at, cross_value_at, crossed_above_value,
    crossed_below_value, crossed_down, crossed_down_now, crossed_up, crossed_up_now,
    detect_divergence, divergence_at, hidden_bearish, hidden_bullish, is_pivot, is_pivot_high,
    is_pivot_low, pivot_highs, pivot_lows, pivots, regular_bearish, regular_bullish,
};

/// Everything above except `Result`, which would shadow the std prelude's.
pub mod prelude {
    pub use series::{Lookback, ReversedTable, ReversedView, SeriesError, Sequence, Table};
    pub use signals::{
        Cross, Divergence, DivergenceConfig, Pivot, cross_at, cross_value_at, crossed_above_value,
        crossed_below_value, crossed_down, crossed_down_now, crossed_up, crossed_up_now,
        detect_divergence, divergence_at, hidden_bearish, hidden_bullish, is_pivot, is_pivot_high,
        is_pivot_low, pivot_highs, pivot_lows, pivots, regular_bearish, regular_bullish,
    };
}
