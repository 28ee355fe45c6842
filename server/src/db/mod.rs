//! Database module for PostgreSQL persistence.

mod pool;
mod rooms;

pub use pool::*;
pub use rooms::*;
