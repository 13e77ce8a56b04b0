use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Display;

use crate::domain::GameType;
use crate::sessions::Session;
use crate::stats::{Banner, LosingStreak, PerfectGame, PlayerStats};
use crate::tiers::TierSets;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardRow {
    pub rank: usize,
    pub player: String,
    pub games_played: u32,
    pub wins: u32,
    pub runner_ups: u32,
    pub survivals: u32,
    pub losses: u32,
    pub weighted_score: f64,
    pub win_rate: f64,
    pub win_rate_label: String,
    pub recent: String,
    pub best_streak: u32,
    pub penalty_count: u32,
}

/// Rows numbered in the given order, starting at 1.
pub fn leaderboard_rows(stats: &[PlayerStats]) -> Vec<LeaderboardRow> {
    stats
        .iter()
        .enumerate()
        .map(|(i, s)| LeaderboardRow {
            rank: i + 1,
            player: s.player.clone(),
            games_played: s.games_played,
            wins: s.wins,
            runner_ups: s.runner_ups,
            survivals: s.survivals,
            losses: s.losses,
            weighted_score: (s.weighted_score * 10.0).round() / 10.0,
            win_rate: s.win_rate,
            win_rate_label: s.win_rate_label(),
            recent: s.recent.clone(),
            best_streak: s.best_streak,
            penalty_count: s.penalty_count,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WinCountEntry {
    pub label: String,
    pub wins: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionView {
    pub id: String,
    pub game_type: GameType,
    pub game_date: NaiveDate,
    pub round_ids: Vec<String>,
    pub win_counts: Vec<WinCountEntry>,
    pub tiers: TierSets,
    pub threshold: u32,
    pub is_complete: bool,
    pub summary: String,
}

impl SessionView {
    pub fn from_session<K: Display>(session: &Session<K>) -> Self {
        Self {
            id: session.id().to_string(),
            game_type: session.game_type,
            game_date: session.game_date,
            round_ids: session.rounds.iter().map(|r| r.id.clone()).collect(),
            win_counts: session
                .win_counts
                .iter()
                .map(|(key, &wins)| WinCountEntry {
                    label: key.to_string(),
                    wins,
                })
                .collect(),
            tiers: session.tiers.clone(),
            threshold: session.threshold,
            is_complete: session.is_complete,
            summary: session.summary_label(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerView {
    pub kind: String,
    pub headline: String,
    pub result_id: String,
}

impl From<&Banner> for BannerView {
    fn from(banner: &Banner) -> Self {
        Self {
            kind: banner.kind().to_string(),
            headline: banner.headline(),
            result_id: banner.result_id().to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub leaderboard: Vec<LeaderboardRow>,
    pub hall_of_fame: Vec<LeaderboardRow>,
    pub hall_of_shame: Vec<LeaderboardRow>,
    pub perfect_game: Option<PerfectGame>,
    pub losing_streaks: Vec<LosingStreak>,
    pub banner: Option<BannerView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaderboard_row_serializes_camel_case() {
        let stats = PlayerStats {
            games_played: 3,
            weighted_score: 1.4000000001,
            win_rate: 47.0,
            ..PlayerStats::new("ana".into())
        };
        let rows = leaderboard_rows(&[stats]);
        let json = serde_json::to_value(&rows[0]).unwrap();

        assert_eq!(json["rank"], 1);
        assert_eq!(json["gamesPlayed"], 3);
        assert_eq!(json["weightedScore"], 1.4);
        assert_eq!(json["winRateLabel"], "47%");
    }
}
