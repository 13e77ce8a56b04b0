pub mod aggregate;
pub mod events;
pub mod halls;
pub mod types;

pub use aggregate::{compute_player_stats, rank_players, ranking_order, win_rate};
pub use events::{losing_streaks, perfect_game, select_banner};
pub use halls::{hall_of_fame, hall_of_shame};
pub use types::{Banner, LosingStreak, PerfectGame, PlayerStats};
