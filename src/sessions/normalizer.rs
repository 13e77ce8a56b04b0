use log::{debug, warn};
use std::collections::BTreeMap;

use crate::domain::{
    DeclaredWinner, GameType, Outcome, Participants, PlayerId, ResultKind, Round, TieredResult,
};
use crate::tiers::{Tier, TierSets, WinnerGate, classify};

/// Resolves every round of a standalone family into a tiered result,
/// newest first.
pub fn normalize_rounds(rounds: &[Round], game_type: GameType) -> Vec<TieredResult> {
    let mut family: Vec<&Round> = rounds.iter().filter(|r| r.game_type == game_type).collect();
    family.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));

    let results: Vec<TieredResult> = family.into_iter().filter_map(resolve_round).collect();
    debug!("Normalized {} {} rounds", results.len(), game_type);
    results
}

fn resolve_round(round: &Round) -> Option<TieredResult> {
    let tiers = match &round.outcome {
        Outcome::Tiers(tiers) => {
            if !has_unique_placements(tiers) {
                warn!("Round {} places a player in more than one tier; keeping the highest", round.id);
            }
            dedupe_placements(tiers)
        }
        Outcome::Declared(_) => derive_from_declared(round)?,
    };

    Some(TieredResult {
        id: round.id.clone(),
        game_type: round.game_type,
        game_date: round.game_date,
        ended_at: round.created_at,
        kind: ResultKind::Round,
        participants: collect_participants(round, &tiers),
        tiers,
    })
}

/// A bare declared winner: the winner takes the round, everyone else present loses.
fn derive_from_declared(round: &Round) -> Option<TierSets> {
    let mut counts: BTreeMap<PlayerId, u32> = round
        .participants
        .players()
        .into_iter()
        .map(|player| (player, 0))
        .collect();

    match &round.outcome {
        Outcome::Declared(DeclaredWinner::Player(winner)) => {
            counts.insert(winner.clone(), 1);
        }
        Outcome::Declared(DeclaredWinner::Team(team)) => {
            let Participants::Teams(first, second) = &round.participants else {
                warn!("Round {} declares team {} but has no teams", round.id, team);
                return None;
            };
            let winners = match team {
                1 => first,
                2 => second,
                _ => {
                    warn!("Round {} declares unknown team {}", round.id, team);
                    return None;
                }
            };
            for player in winners {
                counts.insert(player.clone(), 1);
            }
        }
        Outcome::Tiers(_) => return None,
    }

    Some(classify(&counts, WinnerGate::AtLeast(1)))
}

fn collect_participants(round: &Round, tiers: &TierSets) -> Vec<PlayerId> {
    let mut players = round.participants.players();
    for (_, player) in tiers.iter() {
        if !players.contains(player) {
            players.push(player.clone());
        }
    }
    players
}

/// Keeps each player only in the highest tier they appear in, and only once.
pub fn dedupe_placements(tiers: &TierSets) -> TierSets {
    let mut seen: Vec<&PlayerId> = Vec::new();
    let mut cleaned = TierSets::default();

    for tier in Tier::PRIORITY {
        for player in tiers.get(tier) {
            if seen.contains(&player) {
                continue;
            }
            seen.push(player);
            cleaned.get_mut(tier).push(player.clone());
        }
    }

    cleaned
}

/// True when no player appears twice across (or within) the tier lists.
pub fn has_unique_placements(tiers: &TierSets) -> bool {
    let mut seen: Vec<&PlayerId> = Vec::with_capacity(tiers.len());
    for (_, player) in tiers.iter() {
        if seen.contains(&player) {
            return false;
        }
        seen.push(player);
    }
    true
}
