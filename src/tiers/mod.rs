pub mod classifier;
pub mod types;

pub use classifier::{WinnerGate, classify};
pub use types::{Tier, TierSets, Tiers};
