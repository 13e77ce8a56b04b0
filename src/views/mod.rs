pub mod models;

pub use models::{BannerView, Dashboard, LeaderboardRow, SessionView, WinCountEntry, leaderboard_rows};
