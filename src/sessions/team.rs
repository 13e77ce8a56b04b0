use chrono::NaiveDate;
use log::{debug, info};
use std::collections::BTreeMap;

use super::types::{Session, sort_most_recent_first};
use crate::config::FamilySettings;
use crate::domain::{GameType, Participants, PlayerId, Round, TeamKey};
use crate::tiers::{TierSets, WinnerGate, classify};

struct TeamRound<'a> {
    round: &'a Round,
    teams: [TeamKey; 2],
    /// Index into `teams`.
    winner: usize,
}

/// Per-day running tally. Team keys are kept in the order they were first seen.
struct TeamScan {
    game_date: NaiveDate,
    threshold: u32,
    rounds: Vec<Round>,
    encountered: Vec<TeamKey>,
    win_counts: BTreeMap<TeamKey, u32>,
}

impl TeamScan {
    fn open(game_date: NaiveDate, threshold: u32) -> Self {
        Self {
            game_date,
            threshold,
            rounds: Vec::new(),
            encountered: Vec::new(),
            win_counts: BTreeMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    fn register(&mut self, team: &TeamKey) {
        if !self.win_counts.contains_key(team) {
            self.encountered.push(team.clone());
            self.win_counts.insert(team.clone(), 0);
        }
    }

    /// Returns true when the winning team first reaches the threshold.
    fn absorb(&mut self, entry: &TeamRound<'_>) -> bool {
        self.rounds.push(entry.round.clone());
        for team in &entry.teams {
            self.register(team);
        }
        let wins = self.win_counts.entry(entry.teams[entry.winner].clone()).or_insert(0);
        *wins += 1;
        *wins >= self.threshold
    }

    fn close(self, game_type: GameType, is_complete: bool) -> Session<TeamKey> {
        let tiers = tiers_from_best_teams(&self.encountered, &self.win_counts, self.threshold);
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

/// Groups two-team rounds into per-day sessions. A session ends at the
/// round where any team's running count reaches the threshold; rounds left
/// over at the end of a day form one incomplete session.
pub fn build_team_sessions(
    rounds: &[Round],
    game_type: GameType,
    families: &FamilySettings,
) -> Vec<Session<TeamKey>> {
    let eligible = eligible_rounds(rounds, game_type);

    let mut by_date: BTreeMap<NaiveDate, Vec<&TeamRound<'_>>> = BTreeMap::new();
    for entry in &eligible {
        by_date.entry(entry.round.game_date).or_default().push(entry);
    }

    let mut sessions = Vec::new();
    for (date, day) in by_date {
        let mut scan: Option<TeamScan> = None;

        for entry in day {
            let current = scan
                .get_or_insert_with(|| TeamScan::open(date, families.threshold_for(entry.round)));
            if current.absorb(entry) {
                if let Some(done) = scan.take() {
                    sessions.push(done.close(game_type, true));
                }
            }
        }

        if let Some(trailing) = scan.filter(|s| !s.is_empty()) {
            sessions.push(trailing.close(game_type, false));
        }
    }

    for session in &sessions {
        debug!(
            "{} session {} on {}: {} round(s), {}",
            game_type,
            session.id(),
            session.game_date,
            session.rounds.len(),
            session.summary_label()
        );
    }

    sort_most_recent_first(&mut sessions);
    info!("Built {} {} session(s) from {} round(s)", sessions.len(), game_type, eligible.len());
    sessions
}

/// Each player is credited with the best count among the teams they played
/// in; on ties the team seen first wins. The credited counts are then
/// classified with the session threshold as the winner gate.
fn tiers_from_best_teams(
    encountered: &[TeamKey],
    win_counts: &BTreeMap<TeamKey, u32>,
    threshold: u32,
) -> TierSets {
    let mut best: BTreeMap<PlayerId, u32> = BTreeMap::new();

    for team in encountered {
        let count = win_counts.get(team).copied().unwrap_or(0);
        for player in team.members() {
            match best.get(player) {
                Some(&current) if current >= count => {}
                _ => {
                    best.insert(player.clone(), count);
                }
            }
        }
    }

    classify(&best, WinnerGate::AtLeast(threshold))
}

fn eligible_rounds(rounds: &[Round], game_type: GameType) -> Vec<TeamRound<'_>> {
    let mut eligible: Vec<TeamRound<'_>> = rounds
        .iter()
        .filter(|r| r.game_type == game_type)
        .filter_map(|round| {
            let Participants::Teams(first, second) = &round.participants else {
                debug!("Skipping {} round {}: no team layout", game_type, round.id);
                return None;
            };
            if first.is_empty() || second.is_empty() {
                debug!("Skipping {} round {}: a team is empty", game_type, round.id);
                return None;
            }
            if first.len() != second.len() {
                debug!("Skipping {} round {}: teams differ in size", game_type, round.id);
                return None;
            }
            if first.iter().any(|player| second.contains(player)) {
                debug!("Skipping {} round {}: a player sits on both teams", game_type, round.id);
                return None;
            }
            let winner = match round.declared_team()? {
                1 => 0,
                2 => 1,
                other => {
                    debug!("Skipping {} round {}: unknown team {}", game_type, round.id, other);
                    return None;
                }
            };
            Some(TeamRound {
                round,
                teams: [TeamKey::new(first), TeamKey::new(second)],
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
