//! Catalog generation and loading for sticker master data.

pub mod load;
pub mod schema;

pub use load::*;
pub use schema::*;
