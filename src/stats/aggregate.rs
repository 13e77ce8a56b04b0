use log::info;
use std::cmp::Ordering;

use super::types::PlayerStats;
use crate::config::EngineConfig;
use crate::domain::{PlayerId, TieredResult, sort_chronologically};
use crate::tiers::Tier;

/// One stats record per player, in the order the players are given.
/// `players` defaults to the configured roster.
pub fn compute_player_stats(
    results: &[TieredResult],
    players: Option<&[PlayerId]>,
    config: &EngineConfig,
) -> Vec<PlayerStats> {
    let players = players.unwrap_or(&config.roster);

    let mut chronological: Vec<&TieredResult> = results.iter().collect();
    sort_chronologically(&mut chronological);

    let stats: Vec<PlayerStats> = players
        .iter()
        .map(|player| fold_player(player, &chronological, config))
        .collect();

    info!("Aggregated {} result(s) for {} player(s)", results.len(), stats.len());
    stats
}

fn fold_player(player: &PlayerId, chronological: &[&TieredResult], config: &EngineConfig) -> PlayerStats {
    let mut stats = PlayerStats::new(player.clone());
    let mut trail = Vec::new();
    let mut streak = 0;

    for result in chronological {
        // Skipped rounds leave the running streak alone.
        let Some(tier) = result.placement(player) else {
            continue;
        };

        stats.games_played += 1;
        stats.weighted_score += config.weights.weight(tier);
        match tier {
            Tier::Winner => stats.wins += 1,
            Tier::RunnerUp => stats.runner_ups += 1,
            Tier::Survivor => stats.survivals += 1,
            Tier::Loser => stats.losses += 1,
        }

        if tier == Tier::Winner {
            streak += 1;
            stats.best_streak = stats.best_streak.max(streak);
        } else {
            streak = 0;
        }

        if is_penalty(result, player, config) {
            stats.penalty_count += 1;
        }

        trail.push(tier.symbol());
    }

    let keep_from = trail.len().saturating_sub(config.stats.recent_len);
    stats.recent = trail[keep_from..].iter().collect();
    stats.win_rate = win_rate(stats.weighted_score, stats.games_played);
    stats
}

/// Only explicit membership in the shame tier counts, not an unplaced default.
fn is_penalty(result: &TieredResult, player: &PlayerId, config: &EngineConfig) -> bool {
    result.game_type == config.families.shame_family
        && result.tiers.get(config.families.shame_tier).contains(player)
}

pub fn win_rate(weighted_score: f64, games_played: u32) -> f64 {
    if games_played == 0 {
        return 0.0;
    }
    (weighted_score / games_played as f64 * 100.0).round()
}

/// Win rate descending, then weighted score descending.
pub fn ranking_order(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    b.win_rate
        .total_cmp(&a.win_rate)
        .then_with(|| b.weighted_score.total_cmp(&a.weighted_score))
}

pub fn rank_players(mut stats: Vec<PlayerStats>) -> Vec<PlayerStats> {
    stats.sort_by(ranking_order);
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{GameType, ResultKind};
    use crate::tiers::TierSets;

    fn ids(players: &[&str]) -> Vec<PlayerId> {
        players.iter().map(|p| p.to_string()).collect()
    }

    fn result(id: &str, hour: u32, game_type: GameType, tiers: TierSets) -> TieredResult {
        let date = NaiveDate::from_ymd_opt(2024, 8, 3).unwrap();
        let mut participants = Vec::new();
        for (_, player) in tiers.iter() {
            participants.push(player.clone());
        }
        TieredResult {
            id: id.to_string(),
            game_type,
            game_date: date,
            ended_at: date.and_hms_opt(hour, 0, 0).unwrap(),
            kind: ResultKind::Round,
            participants,
            tiers,
        }
    }

    fn win_lose(id: &str, hour: u32, winner: &str, loser: &str) -> TieredResult {
        result(
            id,
            hour,
            GameType::Poker,
            TierSets {
                winners: ids(&[winner]),
                losers: ids(&[loser]),
                ..TierSets::default()
            },
        )
    }

    fn config() -> EngineConfig {
        EngineConfig {
            roster: ids(&["ana", "bruno", "carla"]),
            ..EngineConfig::new()
        }
    }

    #[test]
    fn test_counts_and_weighted_score() {
        let results = vec![
            result(
                "r1",
                1,
                GameType::Catan,
                TierSets {
                    winners: ids(&["ana"]),
                    runners_up: ids(&["bruno"]),
                    survivors: ids(&["carla"]),
                    losers: ids(&["duarte"]),
                },
            ),
            win_lose("r2", 2, "bruno", "ana"),
        ];
        let stats = compute_player_stats(&results, None, &config());

        let ana = &stats[0];
        assert_eq!(ana.games_played, 2);
        assert_eq!(ana.wins, 1);
        assert_eq!(ana.losses, 1);
        assert_eq!(ana.win_rate, 50.0);
        assert_eq!(ana.recent, "WL");

        let bruno = &stats[1];
        assert!((bruno.weighted_score - 1.4).abs() < 1e-9);
        assert_eq!(bruno.win_rate, 70.0);
        assert_eq!(bruno.recent, "RW");

        let carla = &stats[2];
        assert_eq!(carla.games_played, 1);
        assert_eq!(carla.survivals, 1);
        assert_eq!(carla.win_rate, 10.0);
    }

    #[test]
    fn test_no_games_gives_zero_rate() {
        let stats = compute_player_stats(&[], None, &config());
        assert!(stats.iter().all(|s| s.games_played == 0 && s.win_rate == 0.0));
        assert!(stats.iter().all(|s| s.recent.is_empty()));
    }

    #[test]
    fn test_skipped_rounds_do_not_break_streak() {
        let results = vec![
            win_lose("r1", 1, "ana", "bruno"),
            win_lose("r2", 2, "ana", "bruno"),
            win_lose("r3", 3, "carla", "bruno"),
            win_lose("r4", 4, "ana", "bruno"),
            win_lose("r5", 5, "bruno", "ana"),
        ];
        let stats = compute_player_stats(&results, Some(ids(&["ana"]).as_slice()), &config());
        assert_eq!(stats[0].best_streak, 3);
        assert_eq!(stats[0].games_played, 4);
        assert_eq!(stats[0].recent, "WWWL");
    }

    #[test]
    fn test_results_are_folded_chronologically() {
        let results = vec![
            win_lose("late", 5, "bruno", "ana"),
            win_lose("early", 1, "ana", "bruno"),
        ];
        let stats = compute_player_stats(&results, Some(ids(&["ana"]).as_slice()), &config());
        assert_eq!(stats[0].recent, "WL");
    }

    #[test]
    fn test_recent_trail_is_bounded() {
        let results: Vec<TieredResult> = (0..14)
            .map(|h| {
                if h < 4 {
                    win_lose(&format!("r{h:02}"), h, "bruno", "ana")
                } else {
                    win_lose(&format!("r{h:02}"), h, "ana", "bruno")
                }
            })
            .collect();
        let stats = compute_player_stats(&results, Some(ids(&["ana"]).as_slice()), &config());
        assert_eq!(stats[0].recent, "WWWWWWWWWW");
        assert_eq!(stats[0].best_streak, 10);
        assert_eq!(stats[0].games_played, 14);
    }

    #[test]
    fn test_penalty_only_in_shame_family() {
        let results = vec![
            result(
                "p1",
                1,
                GameType::Palace,
                TierSets {
                    winners: ids(&["ana"]),
                    losers: ids(&["bruno"]),
                    ..TierSets::default()
                },
            ),
            win_lose("k1", 2, "ana", "bruno"),
        ];
        let stats = compute_player_stats(&results, None, &config());
        assert_eq!(stats[1].penalty_count, 1);
        assert_eq!(stats[1].losses, 2);
        assert_eq!(stats[0].penalty_count, 0);
    }

    #[test]
    fn test_unplaced_participant_counts_as_loss() {
        let mut r = win_lose("r", 1, "ana", "bruno");
        r.participants.push("carla".into());
        let stats = compute_player_stats(&[r], None, &config());
        assert_eq!(stats[2].games_played, 1);
        assert_eq!(stats[2].losses, 1);
        assert_eq!(stats[2].recent, "L");
    }

    #[test]
    fn test_ranking_breaks_ties_on_weighted_score() {
        let mut a = PlayerStats::new("a".into());
        a.win_rate = 50.0;
        a.weighted_score = 2.0;
        let mut b = PlayerStats::new("b".into());
        b.win_rate = 50.0;
        b.weighted_score = 4.0;
        let mut c = PlayerStats::new("c".into());
        c.win_rate = 80.0;
        c.weighted_score = 0.8;

        let ranked = rank_players(vec![a, b, c]);
        let order: Vec<&str> = ranked.iter().map(|s| s.player.as_str()).collect();
        assert_eq!(order, vec!["c", "b", "a"]);
    }
}
