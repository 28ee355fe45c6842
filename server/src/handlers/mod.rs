//! Request handlers for room and sync operations.

mod rooms;
mod sync;

pub use rooms::*;
pub use sync::*;
