use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::tiers::TierSets;

pub type PlayerId = String;

/// How a family turns rounds into outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FamilyKind {
    /// One declared winner per round; rounds group into sessions up to a win threshold.
    SoloThreshold,
    /// Two teams, one declared winning team per round; sessions per day up to a threshold.
    Team,
    /// Each round carries its own complete tier assignment.
    Standalone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Uno,
    Skyjo,
    Sueca,
    Poker,
    Catan,
    Palace,
}

impl GameType {
    pub const ALL: [GameType; 6] = [
        GameType::Uno,
        GameType::Skyjo,
        GameType::Sueca,
        GameType::Poker,
        GameType::Catan,
        GameType::Palace,
    ];

    /// Built-in family kind, used when the configuration does not remap it.
    pub fn default_kind(self) -> FamilyKind {
        match self {
            GameType::Uno | GameType::Skyjo => FamilyKind::SoloThreshold,
            GameType::Sueca => FamilyKind::Team,
            GameType::Poker | GameType::Catan | GameType::Palace => FamilyKind::Standalone,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            GameType::Uno => "uno",
            GameType::Skyjo => "skyjo",
            GameType::Sueca => "sueca",
            GameType::Poker => "poker",
            GameType::Catan => "catan",
            GameType::Palace => "palace",
        }
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let lower = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == lower)
            .ok_or_else(|| format!("unknown game type '{value}'"))
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Participants {
    Solo(Vec<PlayerId>),
    Teams(Vec<PlayerId>, Vec<PlayerId>),
}

impl Participants {
    /// Every player present, first appearance order, no repeats.
    pub fn players(&self) -> Vec<PlayerId> {
        let all: Vec<&PlayerId> = match self {
            Participants::Solo(players) => players.iter().collect(),
            Participants::Teams(first, second) => first.iter().chain(second).collect(),
        };
        let mut seen = Vec::with_capacity(all.len());
        for player in all {
            if !seen.contains(player) {
                seen.push(player.clone());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclaredWinner {
    Player(PlayerId),
    /// 1 or 2.
    Team(u8),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Tiers(TierSets),
    Declared(DeclaredWinner),
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Tiers(TierSets::default())
    }
}

/// One resolved instance of a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub id: String,
    pub game_type: GameType,
    pub game_date: NaiveDate,
    pub created_at: NaiveDateTime,
    pub participants: Participants,
    pub outcome: Outcome,
    pub threshold: Option<u32>,
}

impl Round {
    pub fn declared_player(&self) -> Option<&PlayerId> {
        match &self.outcome {
            Outcome::Declared(DeclaredWinner::Player(player)) => Some(player),
            _ => None,
        }
    }

    pub fn declared_team(&self) -> Option<u8> {
        match &self.outcome {
            Outcome::Declared(DeclaredWinner::Team(team)) => Some(*team),
            _ => None,
        }
    }
}

// --- Stored record shape ---

/// A round as the record store hands it over. Field names are the stable
/// contract with whatever persists them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundRecord {
    pub id: String,
    pub game_type: GameType,
    #[serde(default)]
    pub game_date: Option<NaiveDate>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub players: Vec<PlayerId>,
    #[serde(default)]
    pub team1: Vec<PlayerId>,
    #[serde(default)]
    pub team2: Vec<PlayerId>,
    #[serde(default)]
    pub winner: Option<PlayerId>,
    #[serde(default)]
    pub winning_team: Option<u8>,
    #[serde(default)]
    pub winners: Vec<PlayerId>,
    #[serde(default)]
    pub runners_up: Vec<PlayerId>,
    #[serde(default)]
    pub survivors: Vec<PlayerId>,
    #[serde(default)]
    pub losers: Vec<PlayerId>,
    #[serde(default)]
    pub threshold: Option<u32>,
}

impl RoundRecord {
    /// Converts into a domain round. Only a record with neither a usable
    /// timestamp nor a game date is dropped.
    pub fn into_round(self) -> Option<Round> {
        let created_at = self.created_at.as_deref().and_then(parse_timestamp);
        let (game_date, created_at) = match (self.game_date, created_at) {
            (Some(date), Some(ts)) => (date, ts),
            (None, Some(ts)) => (ts.date(), ts),
            (Some(date), None) => (date, date.and_time(chrono::NaiveTime::MIN)),
            (None, None) => {
                warn!("Dropping round {}: no game date or timestamp", self.id);
                return None;
            }
        };

        let participants = if !self.team1.is_empty() || !self.team2.is_empty() {
            Participants::Teams(self.team1, self.team2)
        } else {
            Participants::Solo(self.players)
        };

        let outcome = match (self.winner, self.winning_team) {
            (_, Some(team)) => Outcome::Declared(DeclaredWinner::Team(team)),
            (Some(player), None) => Outcome::Declared(DeclaredWinner::Player(player)),
            (None, None) => Outcome::Tiers(TierSets {
                winners: self.winners,
                runners_up: self.runners_up,
                survivors: self.survivors,
                losers: self.losers,
            }),
        };

        Some(Round {
            id: self.id,
            game_type: self.game_type,
            game_date,
            created_at,
            participants,
            outcome,
            threshold: self.threshold,
        })
    }
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    use chrono::DateTime;

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }

    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(dt);
    }

    None
}
