pub mod normalizer;
pub mod team;
pub mod threshold;
pub mod types;

pub use normalizer::{dedupe_placements, has_unique_placements, normalize_rounds};
pub use team::build_team_sessions;
pub use threshold::build_threshold_sessions;
pub use types::{Session, completed_results, sessions_on};
