use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeMap;
use std::fmt::Display;

use crate::domain::{GameType, PlayerId, ResultKind, Round, TieredResult};
use crate::tiers::TierSets;

/// A run of same-day rounds that ends when someone reaches the threshold.
/// `K` is what wins are counted against: a player, or a team key.
#[derive(Debug, Clone, PartialEq)]
pub struct Session<K> {
    pub game_type: GameType,
    pub game_date: NaiveDate,
    /// Oldest first.
    pub rounds: Vec<Round>,
    pub win_counts: BTreeMap<K, u32>,
    pub tiers: TierSets,
    pub threshold: u32,
    pub is_complete: bool,
}

impl<K: Display> Session<K> {
    /// Identified by its opening round.
    pub fn id(&self) -> &str {
        self.rounds.first().map(|r| r.id.as_str()).unwrap_or_default()
    }

    pub fn started_at(&self) -> Option<NaiveDateTime> {
        self.rounds.first().map(|r| r.created_at)
    }

    pub fn ended_at(&self) -> Option<NaiveDateTime> {
        self.rounds.last().map(|r| r.created_at)
    }

    pub fn participants(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = Vec::new();
        for round in &self.rounds {
            for player in round.participants.players() {
                if !players.contains(&player) {
                    players.push(player);
                }
            }
        }
        players
    }

    /// Highest count first, e.g. `ana 3 · bruno 1 · carla 0`.
    pub fn summary_label(&self) -> String {
        let mut entries: Vec<(&K, &u32)> = self.win_counts.iter().collect();
        entries.sort_by(|a, b| b.1.cmp(a.1));
        entries
            .iter()
            .map(|(key, count)| format!("{key} {count}"))
            .collect::<Vec<_>>()
            .join(" · ")
    }

    pub fn to_result(&self, kind: ResultKind) -> TieredResult {
        TieredResult {
            id: self.id().to_string(),
            game_type: self.game_type,
            game_date: self.game_date,
            ended_at: self
                .ended_at()
                .unwrap_or_else(|| self.game_date.and_time(chrono::NaiveTime::MIN)),
            kind,
            participants: self.participants(),
            tiers: self.tiers.clone(),
        }
    }
}

/// Most recently ended first; ties keep the later-opened session first.
pub(crate) fn sort_most_recent_first<K: Display>(sessions: &mut [Session<K>]) {
    sessions.sort_by(|a, b| {
        b.ended_at()
            .cmp(&a.ended_at())
            .then_with(|| b.started_at().cmp(&a.started_at()))
            .then_with(|| b.id().cmp(a.id()))
    });
}

/// Sessions played on one calendar day, order preserved.
pub fn sessions_on<K: Clone>(sessions: &[Session<K>], date: NaiveDate) -> Vec<Session<K>> {
    sessions
        .iter()
        .filter(|s| s.game_date == date)
        .cloned()
        .collect()
}

pub fn completed_results<K: Display>(sessions: &[Session<K>], kind: ResultKind) -> Vec<TieredResult> {
    sessions
        .iter()
        .filter(|s| s.is_complete)
        .map(|s| s.to_result(kind))
        .collect()
}
