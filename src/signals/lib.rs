//! Crossing and divergence predicates over present-first series.

mod config;
mod cross;
mod divergence;
mod pivot;

pub use config::*;
pub use cross::*;
pub use divergence::*;
pub use pivot::*;
