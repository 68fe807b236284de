use thiserror::Error;

/// Errors raised by reversed views and tables.
///
/// All of them are contract violations on the caller's side (a bad index, a
/// bad column name, a malformed table); none are transient.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeriesError {
    /// Logical index outside `1..=len`.
    #[error("index {index} is out of range for a series of length {len} (valid: 1..={len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown column: {name}")]
    UnknownColumn { name: String },

    /// The base does not satisfy the table contract: every listed column must
    /// resolve, and all columns must have the same length.
    #[error("column {column} breaks the table contract: {reason}")]
    TypeMismatch { column: String, reason: String },
}

pub type Result<T> = std::result::Result<T, SeriesError>;
