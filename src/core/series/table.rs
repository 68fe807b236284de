use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use log::trace;
use rustc_hash::FxHashMap;

use crate::error::{Result, SeriesError};
use crate::sequence::{Sequence, Table};
use crate::view::ReversedView;

/// A reversed view of an entire [`Table`].
///
/// ```
/// use std::collections::HashMap;
/// use series::ReversedTable;
///
/// let mut bars = HashMap::new();
/// bars.insert("o", vec![10.0, 11.0, 12.0]);
/// bars.insert("c", vec![10.5, 11.5, 12.5]);
///
/// let rf = ReversedTable::wrap(&bars).unwrap();
/// assert_eq!(rf.column("o").unwrap().get(1), Ok(&12.0)); // most recent open
/// assert_eq!(rf.value("c", 2), Ok(&11.5)); // the close before that
/// ```
///
/// Column views are created on first access and cached for the life of the
/// table view, so repeated calls with the same name return the same `Arc`.
pub struct ReversedTable<'a, T: Table + ?Sized> {
    base: &'a T,
    len: usize,
    columns: RwLock<FxHashMap<String, Arc<ReversedView<'a, T::Column>>>>,
}

impl<'a, T: Table + ?Sized> ReversedTable<'a, T> {
    /// Wrap `base` without copying it.
    ///
    /// Fails with `TypeMismatch` if the columns are not all the same length.
    pub fn wrap(base: &'a T) -> Result<Self> {
        let len = check_column_lengths(base)?;
        Ok(Self {
            base,
            len,
            columns: RwLock::new(FxHashMap::default()),
        })
    }

    /// Reversed view of column `name`.
    ///
    /// # Returns
    /// The cached view if `name` was requested before, otherwise a freshly
    /// created (and now cached) one. `UnknownColumn` if the base has no such
    /// column.
    pub fn column(&self, name: &str) -> Result<Arc<ReversedView<'a, T::Column>>> {
        {
            let columns = self.columns.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(view) = columns.get(name) {
                return Ok(Arc::clone(view));
            }
        }

        let base: &'a T = self.base;
        let column = base.column(name).ok_or_else(|| SeriesError::UnknownColumn {
            name: name.to_string(),
        })?;

        let mut columns = self.columns.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have filled the slot between the two locks.
        let view = columns.entry(name.to_string()).or_insert_with(|| {
            trace!("caching reversed view for column {name} ({} rows)", column.len());
            Arc::new(ReversedView::wrap(column))
        });
        Ok(Arc::clone(view))
    }

    /// Value of column `name`, `i` bars back from the present.
    pub fn value(&self, name: &str, i: usize) -> Result<&'a <T::Column as Sequence>::Item> {
        self.column(name)?.get(i)
    }

    /// Common length of every column.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn column_names(&self) -> Vec<&'a str> {
        let base: &'a T = self.base;
        base.column_names()
    }

    /// Number of column views created so far.
    pub fn cached_columns(&self) -> usize {
        self.columns.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn base(&self) -> &'a T {
        self.base
    }
}

impl<T: Table + ?Sized> fmt::Debug for ReversedTable<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReversedTable")
            .field("len", &self.len)
            .field("cached_columns", &self.cached_columns())
            .finish()
    }
}

fn check_column_lengths<T: Table + ?Sized>(base: &T) -> Result<usize> {
    let mut expected: Option<usize> = None;

    for name in base.column_names() {
        let Some(column) = base.column(name) else {
            return Err(SeriesError::TypeMismatch {
                column: name.to_string(),
                reason: "listed but not resolvable".to_string(),
            });
        };
        let found = column.len();
        match expected {
            None => expected = Some(found),
            Some(expected) if expected != found => {
                return Err(SeriesError::TypeMismatch {
                    column: name.to_string(),
                    reason: format!("length {found}, expected {expected}"),
                });
            }
            Some(_) => {}
        }
    }

    Ok(expected.unwrap_or(0))
}
