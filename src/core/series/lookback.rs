use crate::error::Result;

/// Indexed access counted backwards from the present bar.
///
/// `back(1)` is the most recent observation, `back(len())` the oldest.
/// Anything the crossing and divergence predicates compare implements this.
pub trait Lookback {
    type Item;

    fn len(&self) -> usize;

    /// Value `i` bars back, 1-based at the present.
    ///
    /// Fails with [`SeriesError::IndexOutOfRange`](crate::SeriesError::IndexOutOfRange)
    /// outside `1..=len()`.
    fn back(&self, i: usize) -> Result<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<L: Lookback + ?Sized> Lookback for &L {
    type Item = L::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn back(&self, i: usize) -> Result<&L::Item> {
        (**self).back(i)
    }
}

impl<L: Lookback + ?Sized> Lookback for std::sync::Arc<L> {
    type Item = L::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn back(&self, i: usize) -> Result<&L::Item> {
        (**self).back(i)
    }
}
