use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

/// An ordered collection of observations, oldest first.
///
/// Positions are 0-based in storage order; the last position is the most
/// recent observation. Implementors must not change length or contents while
/// a view borrows them, which the borrow checker already guarantees.
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    /// Value at 0-based storage `position`, `None` past the end.
    fn get(&self, position: usize) -> Option<&Self::Item>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Sequence for [T] {
    type Item = T;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn get(&self, position: usize) -> Option<&T> {
        <[T]>::get(self, position)
    }
}

impl<T, const N: usize> Sequence for [T; N] {
    type Item = T;

    fn len(&self) -> usize {
        N
    }

    fn get(&self, position: usize) -> Option<&T> {
        self.as_slice().get(position)
    }
}

impl<T> Sequence for Vec<T> {
    type Item = T;

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn get(&self, position: usize) -> Option<&T> {
        self.as_slice().get(position)
    }
}

impl<T> Sequence for VecDeque<T> {
    type Item = T;

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn get(&self, position: usize) -> Option<&T> {
        VecDeque::get(self, position)
    }
}

impl<S: Sequence + ?Sized> Sequence for &S {
    type Item = S::Item;

    fn len(&self) -> usize {
        (**self).len()
    }

    fn get(&self, position: usize) -> Option<&S::Item> {
        (**self).get(position)
    }
}

/// A set of uniquely named columns, each a [`Sequence`] of equal length.
pub trait Table {
    type Column: Sequence + ?Sized;

    fn column_names(&self) -> Vec<&str>;

    fn column(&self, name: &str) -> Option<&Self::Column>;
}

impl<K, T, H> Table for HashMap<K, Vec<T>, H>
where
    K: Borrow<str> + Hash + Eq,
    H: BuildHasher,
{
    type Column = Vec<T>;

    fn column_names(&self) -> Vec<&str> {
        self.keys().map(<K as Borrow<str>>::borrow).collect()
    }

    fn column(&self, name: &str) -> Option<&Vec<T>> {
        HashMap::get(self, name)
    }
}

impl<K, T> Table for BTreeMap<K, Vec<T>>
where
    K: Borrow<str> + Ord,
{
    type Column = Vec<T>;

    fn column_names(&self) -> Vec<&str> {
        self.keys().map(<K as Borrow<str>>::borrow).collect()
    }

    fn column(&self, name: &str) -> Option<&Vec<T>> {
        BTreeMap::get(self, name)
    }
}
