//! Room session handling.

mod middleware;
mod store;

pub use middleware::*;
pub use store::*;
