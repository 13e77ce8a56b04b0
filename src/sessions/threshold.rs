use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

use super::types::{Session, sort_most_recent_first};
use crate::config::FamilySettings;
use crate::domain::{GameType, Participants, PlayerId, Round, TeamKey};
use crate::tiers::{WinnerGate, classify};

/// A round that can take part in a solo session, with its table identity precomputed.
struct Eligible<'a> {
    round: &'a Round,
    table: TeamKey,
    winner: &'a PlayerId,
}

/// Running state for the session currently being scanned.
struct SessionScan<'a> {
    game_date: NaiveDate,
    table: &'a TeamKey,
    threshold: u32,
    rounds: Vec<Round>,
    win_counts: BTreeMap<PlayerId, u32>,
}

impl<'a> SessionScan<'a> {
    fn open(opening: &'a Eligible<'a>, threshold: u32) -> Self {
        Self {
            game_date: opening.round.game_date,
            table: &opening.table,
            threshold,
            rounds: Vec::new(),
            win_counts: opening
                .table
                .members()
                .iter()
                .map(|player| (player.clone(), 0))
                .collect(),
        }
    }

    fn accepts(&self, candidate: &Eligible<'_>) -> bool {
        candidate.round.game_date == self.game_date && &candidate.table == self.table
    }

    /// Returns true once the threshold is reached.
    fn absorb(&mut self, candidate: &Eligible<'_>) -> bool {
        self.rounds.push(candidate.round.clone());
        let wins = self.win_counts.entry(candidate.winner.clone()).or_insert(0);
        *wins += 1;
        *wins >= self.threshold
    }

    fn close(self, game_type: GameType, is_complete: bool) -> Session<PlayerId> {
        let tiers = classify(&self.win_counts, WinnerGate::Plain);
        Session {
            game_type,
            game_date: self.game_date,
            rounds: self.rounds,
            win_counts: self.win_counts,
            tiers,
            threshold: self.threshold,
            is_complete,
        }
    }
}

/// Groups solo rounds of one family into sessions: same day, same table,
/// until one player's wins reach the threshold. Most recently ended first.
pub fn build_threshold_sessions(
    rounds: &[Round],
    game_type: GameType,
    families: &FamilySettings,
) -> Vec<Session<PlayerId>> {
    let eligible = eligible_rounds(rounds, game_type);
    let mut consumed = vec![false; eligible.len()];
    let mut sessions = Vec::new();

    for start in 0..eligible.len() {
        if consumed[start] {
            continue;
        }

        let opening = &eligible[start];
        let mut scan = SessionScan::open(opening, families.threshold_for(opening.round));
        let mut is_complete = false;

        for (idx, candidate) in eligible.iter().enumerate().skip(start) {
            if consumed[idx] || !scan.accepts(candidate) {
                continue;
            }
            consumed[idx] = true;
            if scan.absorb(candidate) {
                is_complete = true;
                break;
            }
        }

        let session = scan.close(game_type, is_complete);
        debug!(
            "{} session {} on {}: {} round(s), {} ({})",
            game_type,
            session.id(),
            session.game_date,
            session.rounds.len(),
            session.summary_label(),
            if is_complete { "complete" } else { "open" }
        );
        sessions.push(session);
    }

    sort_most_recent_first(&mut sessions);
    info!("Built {} {} session(s) from {} round(s)", sessions.len(), game_type, eligible.len());
    sessions
}

fn eligible_rounds(rounds: &[Round], game_type: GameType) -> Vec<Eligible<'_>> {
    let mut eligible: Vec<Eligible<'_>> = rounds
        .iter()
        .filter(|r| r.game_type == game_type)
        .filter_map(|round| {
            let Participants::Solo(players) = &round.participants else {
                debug!("Skipping {} round {}: team layout in a solo family", game_type, round.id);
                return None;
            };
            let winner = round.declared_player()?;
            if players.is_empty() || !players.contains(winner) {
                debug!("Skipping {} round {}: winner not at the table", game_type, round.id);
                return None;
            }
            Some(Eligible {
                round,
                table: TeamKey::new(players),
                winner,
            })
        })
        .collect();

    eligible.sort_by(|a, b| {
        a.round
            .created_at
            .cmp(&b.round.created_at)
            .then_with(|| a.round.id.cmp(&b.round.id))
    });
    eligible
}
