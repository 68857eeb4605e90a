pub mod cache;
pub mod error;

pub use cache::*;
pub use error::*;
