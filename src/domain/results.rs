use chrono::{NaiveDate, NaiveDateTime};

use super::models::{GameType, PlayerId};
use crate::tiers::{Tier, TierSets};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Round,
    SoloSession,
    TeamSession,
}

/// A finished, tier-resolved unit that statistics fold over: either a
/// standalone round or a completed session.
#[derive(Debug, Clone, PartialEq)]
pub struct TieredResult {
    pub id: String,
    pub game_type: GameType,
    pub game_date: NaiveDate,
    pub ended_at: NaiveDateTime,
    pub kind: ResultKind,
    pub participants: Vec<PlayerId>,
    pub tiers: TierSets,
}

impl TieredResult {
    pub fn participated(&self, player: &PlayerId) -> bool {
        self.participants.contains(player)
    }

    /// Tier for a participant. Participants nobody placed count as losers;
    /// non-participants get `None`.
    pub fn placement(&self, player: &PlayerId) -> Option<Tier> {
        if !self.participated(player) {
            return None;
        }
        Some(self.tiers.tier_of(player).unwrap_or(Tier::Loser))
    }
}

/// Chronological, oldest first. Ties on the end timestamp fall back to id.
pub fn sort_chronologically(results: &mut [&TieredResult]) {
    results.sort_by(|a, b| a.ended_at.cmp(&b.ended_at).then_with(|| a.id.cmp(&b.id)));
}
