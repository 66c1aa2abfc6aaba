//! Core sticker domain logic. Keep this crate free of IO and platform
//! concerns.

pub mod catalog;
pub mod collection;
pub mod gacha;
pub mod points;
pub mod rank;
pub mod rng;
pub mod scout;
pub mod upgrade;

pub use catalog::*;
pub use collection::*;
pub use gacha::*;
pub use points::*;
pub use rank::*;
pub use rng::*;
pub use scout::*;
pub use upgrade::*;
