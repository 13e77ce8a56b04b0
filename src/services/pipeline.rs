use log::{info, warn};

use crate::config::EngineConfig;
use crate::domain::{FamilyKind, GameType, Outcome, PlayerId, ResultKind, Round, TeamKey, TieredResult};
use crate::sessions::{
    self, Session, build_team_sessions, build_threshold_sessions, completed_results, has_unique_placements,
    normalize_rounds,
};
use crate::stats::{self, PlayerStats};
use crate::views::{BannerView, Dashboard, LeaderboardRow, SessionView, leaderboard_rows};

/// Full recomputation from a round snapshot. Holds no state besides its
/// configuration, so running it again on the same rounds gives the same answer.
pub struct Pipeline {
    config: EngineConfig,
}

impl Pipeline {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn solo_sessions(&self, rounds: &[Round], game_type: GameType) -> Vec<Session<PlayerId>> {
        build_threshold_sessions(rounds, game_type, &self.config.families)
    }

    pub fn team_sessions(&self, rounds: &[Round], game_type: GameType) -> Vec<Session<TeamKey>> {
        build_team_sessions(rounds, game_type, &self.config.families)
    }

    /// Session drill-down for one family, optionally one day. Standalone
    /// families have no sessions.
    pub fn session_views(
        &self,
        rounds: &[Round],
        game_type: GameType,
        date: Option<chrono::NaiveDate>,
    ) -> Vec<SessionView> {
        match self.config.families.kind_of(game_type) {
            FamilyKind::SoloThreshold => {
                let all = self.solo_sessions(rounds, game_type);
                let picked = match date {
                    Some(day) => sessions::sessions_on(&all, day),
                    None => all,
                };
                picked.iter().map(SessionView::from_session).collect()
            }
            FamilyKind::Team => {
                let all = self.team_sessions(rounds, game_type);
                let picked = match date {
                    Some(day) => sessions::sessions_on(&all, day),
                    None => all,
                };
                picked.iter().map(SessionView::from_session).collect()
            }
            FamilyKind::Standalone => Vec::new(),
        }
    }

    /// Completed sessions and standalone rounds, for one family or all of them.
    pub fn results_for(&self, rounds: &[Round], family: Option<GameType>) -> Vec<TieredResult> {
        let families: Vec<GameType> = match family {
            Some(game_type) => vec![game_type],
            None => GameType::ALL.to_vec(),
        };

        let mut results = Vec::new();
        for game_type in families {
            let mut family_results = match self.config.families.kind_of(game_type) {
                FamilyKind::SoloThreshold => {
                    completed_results(&self.solo_sessions(rounds, game_type), ResultKind::SoloSession)
                }
                FamilyKind::Team => {
                    completed_results(&self.team_sessions(rounds, game_type), ResultKind::TeamSession)
                }
                FamilyKind::Standalone => normalize_rounds(rounds, game_type),
            };
            results.append(&mut family_results);
        }

        info!("Resolved {} tiered result(s)", results.len());
        results
    }

    pub fn player_stats(
        &self,
        rounds: &[Round],
        family: Option<GameType>,
        players: Option<&[PlayerId]>,
    ) -> Vec<PlayerStats> {
        let results = self.results_for(rounds, family);
        stats::rank_players(stats::compute_player_stats(&results, players, &self.config))
    }

    pub fn leaderboard(
        &self,
        rounds: &[Round],
        family: Option<GameType>,
        players: Option<&[PlayerId]>,
    ) -> Vec<LeaderboardRow> {
        leaderboard_rows(&self.player_stats(rounds, family, players))
    }

    pub fn run(&self, rounds: &[Round]) -> Dashboard {
        info!("=== Recomputing rankings from {} round(s) ===", rounds.len());

        let results = self.results_for(rounds, None);
        let ranked = stats::rank_players(stats::compute_player_stats(&results, None, &self.config));

        let families = &self.config.families;
        let settings = &self.config.stats;

        let dashboard = Dashboard {
            leaderboard: leaderboard_rows(&ranked),
            hall_of_fame: leaderboard_rows(&stats::hall_of_fame(&ranked, settings)),
            hall_of_shame: leaderboard_rows(&stats::hall_of_shame(&ranked, settings)),
            perfect_game: stats::perfect_game(&results),
            losing_streaks: stats::losing_streaks(
                &results,
                families.shame_family,
                families.shame_tier,
                settings.losing_streak_min,
            ),
            banner: stats::select_banner(&results, families).as_ref().map(BannerView::from),
        };

        info!("=== Recompute complete ===");
        dashboard
    }

    /// Ids of tier-carrying rounds that place someone twice.
    pub fn audit(&self, rounds: &[Round]) -> Vec<String> {
        let flagged: Vec<String> = rounds
            .iter()
            .filter(|r| match &r.outcome {
                Outcome::Tiers(tiers) => !has_unique_placements(tiers),
                Outcome::Declared(_) => false,
            })
            .map(|r| r.id.clone())
            .collect();

        for id in &flagged {
            warn!("Round {} has duplicate placements", id);
        }
        flagged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{DeclaredWinner, Participants};
    use crate::tiers::TierSets;

    fn ids(players: &[&str]) -> Vec<PlayerId> {
        players.iter().map(|p| p.to_string()).collect()
    }

    fn at(minute: u32) -> (NaiveDate, chrono::NaiveDateTime) {
        let date = NaiveDate::from_ymd_opt(2024, 10, 5).unwrap();
        (date, date.and_hms_opt(20, minute, 0).unwrap())
    }

    fn uno(id: &str, minute: u32, winner: &str) -> Round {
        let (game_date, created_at) = at(minute);
        Round {
            id: id.to_string(),
            game_type: GameType::Uno,
            game_date,
            created_at,
            participants: Participants::Solo(ids(&["ana", "bruno", "carla"])),
            outcome: Outcome::Declared(DeclaredWinner::Player(winner.to_string())),
            threshold: None,
        }
    }

    fn palace(id: &str, minute: u32, winners: &[&str], losers: &[&str]) -> Round {
        let (game_date, created_at) = at(minute);
        Round {
            id: id.to_string(),
            game_type: GameType::Palace,
            game_date,
            created_at,
            participants: Participants::Solo(vec![]),
            outcome: Outcome::Tiers(TierSets {
                winners: ids(winners),
                losers: ids(losers),
                ..TierSets::default()
            }),
            threshold: None,
        }
    }

    fn sample_rounds() -> Vec<Round> {
        vec![
            uno("u1", 0, "ana"),
            uno("u2", 5, "ana"),
            uno("u3", 10, "ana"),
            uno("u4", 15, "bruno"),
            palace("p1", 20, &["carla"], &["bruno", "bruno"]),
            palace("p2", 25, &["ana"], &["bruno"]),
        ]
    }

    fn pipeline() -> Pipeline {
        Pipeline::new(EngineConfig {
            roster: ids(&["ana", "bruno", "carla"]),
            ..EngineConfig::new()
        })
    }

    #[test]
    fn test_only_completed_sessions_become_results() {
        let results = pipeline().results_for(&sample_rounds(), Some(GameType::Uno));
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].kind, ResultKind::SoloSession);
        assert_eq!(results[0].tiers.winners, ids(&["ana"]));
    }

    #[test]
    fn test_dashboard() {
        let dashboard = pipeline().run(&sample_rounds());

        assert_eq!(dashboard.leaderboard[0].player, "ana");
        let bruno = dashboard.leaderboard.iter().find(|r| r.player == "bruno").unwrap();
        assert_eq!(bruno.penalty_count, 2);
        assert_eq!(bruno.games_played, 3);

        let banner = dashboard.banner.unwrap();
        assert_eq!(banner.kind, "shameEvent");
        assert_eq!(banner.result_id, "p2");

        // Nobody has five games yet.
        assert!(dashboard.hall_of_fame.is_empty());
        assert!(dashboard.hall_of_shame.is_empty());
    }

    #[test]
    fn test_recompute_is_stable() {
        let rounds = sample_rounds();
        let pipeline = pipeline();
        let first = serde_json::to_string(&pipeline.run(&rounds)).unwrap();
        let second = serde_json::to_string(&pipeline.run(&rounds)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_audit_flags_duplicate_placements() {
        assert_eq!(pipeline().audit(&sample_rounds()), vec!["p1".to_string()]);
    }

    #[test]
    fn test_session_views_by_family() {
        let pipeline = pipeline();
        let rounds = sample_rounds();
        let views = pipeline.session_views(&rounds, GameType::Uno, None);
        assert_eq!(views.len(), 2);
        assert_eq!(views[1].round_ids, ids(&["u1", "u2", "u3"]));
        assert!(pipeline.session_views(&rounds, GameType::Palace, None).is_empty());

        let other_day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(pipeline.session_views(&rounds, GameType::Uno, Some(other_day)).is_empty());
    }
}
