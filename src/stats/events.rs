use log::debug;
use std::collections::BTreeMap;

use super::types::{Banner, LosingStreak, PerfectGame};
use crate::config::FamilySettings;
use crate::domain::{GameType, PlayerId, ResultKind, TieredResult, sort_chronologically};
use crate::tiers::{Tier, TierSets};

fn newest_first(results: &[TieredResult]) -> Vec<&TieredResult> {
    let mut ordered: Vec<&TieredResult> = results.iter().collect();
    sort_chronologically(&mut ordered);
    ordered.reverse();
    ordered
}

/// One winner, nobody in second, at least two beaten.
fn is_dominant(tiers: &TierSets) -> bool {
    tiers.winners.len() == 1 && tiers.runners_up.is_empty() && tiers.losers.len() >= 2
}

/// Checks only the most recent non-team result.
pub fn perfect_game(results: &[TieredResult]) -> Option<PerfectGame> {
    let latest = newest_first(results)
        .into_iter()
        .find(|r| r.kind != ResultKind::TeamSession)?;

    if !is_dominant(&latest.tiers) {
        return None;
    }

    Some(PerfectGame {
        result_id: latest.id.clone(),
        game_type: latest.game_type,
        winner: latest.tiers.winners[0].clone(),
        beaten: latest.tiers.losers.clone(),
    })
}

/// Players whose latest appearances in `game_type` were all in `tier`,
/// at least `min_length` in a row. Results the player sat out are skipped;
/// the first appearance outside `tier` ends the run, including an
/// appearance where nobody placed them.
pub fn losing_streaks(
    results: &[TieredResult],
    game_type: GameType,
    tier: Tier,
    min_length: u32,
) -> Vec<LosingStreak> {
    let family: Vec<&TieredResult> = newest_first(results)
        .into_iter()
        .filter(|r| r.game_type == game_type)
        .collect();

    let mut lengths: BTreeMap<&PlayerId, u32> = BTreeMap::new();
    for result in &family {
        for player in &result.participants {
            lengths.entry(player).or_insert_with(|| run_length(&family, player, tier));
        }
    }

    let mut streaks: Vec<LosingStreak> = lengths
        .into_iter()
        .filter(|&(_, length)| length >= min_length)
        .map(|(player, length)| LosingStreak {
            player: player.clone(),
            game_type,
            length,
        })
        .collect();
    streaks.sort_by(|a, b| b.length.cmp(&a.length).then_with(|| a.player.cmp(&b.player)));

    debug!("Found {} {} losing streak(s)", streaks.len(), game_type);
    streaks
}

fn run_length(family: &[&TieredResult], player: &PlayerId, tier: Tier) -> u32 {
    let mut length = 0;
    for result in family {
        if !result.participated(player) {
            continue;
        }
        match result.tiers.tier_of(player) {
            Some(placed) if placed == tier => length += 1,
            _ => break,
        }
    }
    length
}

/// Picks the headline for the newest result that has something to say.
/// A dominant win outranks a shame event, which outranks an ordinary win.
pub fn select_banner(results: &[TieredResult], families: &FamilySettings) -> Option<Banner> {
    newest_first(results)
        .into_iter()
        .find_map(|result| banner_for(result, families))
}

fn banner_for(result: &TieredResult, families: &FamilySettings) -> Option<Banner> {
    let tiers = &result.tiers;

    if is_dominant(tiers) {
        return Some(Banner::DominantWin {
            result_id: result.id.clone(),
            game_type: result.game_type,
            winner: tiers.winners[0].clone(),
            beaten: tiers.losers.clone(),
        });
    }

    let shamed = tiers.get(families.shame_tier);
    if result.game_type == families.shame_family && !shamed.is_empty() {
        return Some(Banner::ShameEvent {
            result_id: result.id.clone(),
            game_type: result.game_type,
            players: shamed.to_vec(),
        });
    }

    if !tiers.winners.is_empty() {
        return Some(Banner::OrdinaryWin {
            result_id: result.id.clone(),
            game_type: result.game_type,
            winners: tiers.winners.clone(),
        });
    }

    None
}
