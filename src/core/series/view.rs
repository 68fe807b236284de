use std::fmt;
use std::iter::FusedIterator;

use crate::error::{Result, SeriesError};
use crate::lookback::Lookback;
use crate::sequence::Sequence;

/// A reversed, zero-copy view over a [`Sequence`].
///
/// Index 1 is the origin and represents the present (the last element of the
/// base). Higher indices go back in time, so `get(len)` is the first element
/// of the base. This mirrors how series are indexed in charting scripts,
/// except those use a 0-based origin.
///
/// ```
/// use series::ReversedView;
///
/// let a = [1, 2, 3];
/// let r = ReversedView::wrap(&a);
/// assert_eq!(r.get(1), Ok(&3));
/// assert_eq!(r.get(3), Ok(&1));
/// ```
pub struct ReversedView<'a, S: Sequence + ?Sized> {
    base: &'a S,
}

impl<'a, S: Sequence + ?Sized> ReversedView<'a, S> {
    /// Wrap `base` without copying it.
    pub fn wrap(base: &'a S) -> Self {
        Self { base }
    }

    /// Value `i` bars back from the present, 1-based.
    ///
    /// # Arguments
    /// * `i` - Logical index, `1..=len()`
    ///
    /// # Returns
    /// `base[len - i]` in 0-based storage order, or `IndexOutOfRange`.
    pub fn get(&self, i: usize) -> Result<&'a S::Item> {
        let len = self.base.len();
        if i == 0 || i > len {
            return Err(SeriesError::IndexOutOfRange { index: i, len });
        }
        self.base
            .get(len - i)
            .ok_or(SeriesError::IndexOutOfRange { index: i, len })
    }

    pub fn len(&self) -> usize {
        self.base.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty()
    }

    /// The most recent observation.
    pub fn present(&self) -> Result<&'a S::Item> {
        self.get(1)
    }

    /// The oldest observation.
    pub fn oldest(&self) -> Result<&'a S::Item> {
        self.get(self.len())
    }

    pub fn base(&self) -> &'a S {
        self.base
    }

    /// Iterate from the present bar back in time.
    pub fn iter(&self) -> Iter<'a, S> {
        Iter {
            base: self.base,
            front: 1,
            back: self.base.len(),
        }
    }
}

impl<S: Sequence + ?Sized> Clone for ReversedView<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Sequence + ?Sized> Copy for ReversedView<'_, S> {}

impl<S: Sequence + ?Sized> fmt::Debug for ReversedView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversedView")
            .field("len", &self.len())
            .finish()
    }
}

impl<S: Sequence + ?Sized> Lookback for ReversedView<'_, S> {
    type Item = S::Item;

    fn len(&self) -> usize {
        self.base.len()
    }

    fn back(&self, i: usize) -> Result<&S::Item> {
        self.get(i)
    }
}

impl<'a, S: Sequence + ?Sized> IntoIterator for &ReversedView<'a, S> {
    type Item = &'a S::Item;
    type IntoIter = Iter<'a, S>;

    fn into_iter(self) -> Iter<'a, S> {
        self.iter()
    }
}

/// Iterator over a [`ReversedView`], present bar first.
///
/// `front` and `back` are logical indices; the iterator is exhausted once
/// `front > back`.
pub struct Iter<'a, S: Sequence + ?Sized> {
    base: &'a S,
    front: usize,
    back: usize,
}

impl<'a, S: Sequence + ?Sized> Iterator for Iter<'a, S> {
    type Item = &'a S::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        let item = self.base.get(self.base.len() - self.front);
        self.front += 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.back + 1).saturating_sub(self.front);
        (n, Some(n))
    }
}

impl<S: Sequence + ?Sized> DoubleEndedIterator for Iter<'_, S> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front > self.back {
            return None;
        }
        let item = self.base.get(self.base.len() - self.back);
        self.back -= 1;
        item
    }
}

impl<S: Sequence + ?Sized> ExactSizeIterator for Iter<'_, S> {}

impl<S: Sequence + ?Sized> FusedIterator for Iter<'_, S> {}
