pub mod keys;
pub mod models;
pub mod results;

pub use keys::TeamKey;
pub use models::*;
pub use results::{ResultKind, TieredResult, sort_chronologically};
