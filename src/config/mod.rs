pub mod roster;
pub mod settings;

pub use roster::default_roster;
pub use settings::{EngineConfig, FamilySettings, StatsSettings, TierWeights};
