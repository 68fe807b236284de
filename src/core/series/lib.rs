//! Reversed, present-first views over chronologically ordered data.
//!
//! Index 1 is the present bar; higher indices go back in time.

mod error;
mod lookback;
mod sequence;
mod table;
mod view;

pub use error::*;
pub use lookback::*;
pub use sequence::*;
pub use table::*;
pub use view::*;
