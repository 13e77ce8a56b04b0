use serde::Serialize;

use crate::domain::{GameType, PlayerId};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlayerStats {
    pub player: PlayerId,
    pub games_played: u32,
    pub wins: u32,
    pub runner_ups: u32,
    pub survivals: u32,
    pub losses: u32,
    pub weighted_score: f64,
    /// Percentage, rounded to a whole number.
    pub win_rate: f64,
    /// Oldest to newest, at most the configured trail length.
    pub recent: String,
    pub best_streak: u32,
    /// Placements in the shame family's shame tier.
    pub penalty_count: u32,
}

impl PlayerStats {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            ..Self::default()
        }
    }

    pub fn win_rate_label(&self) -> String {
        format!("{:.0}%", self.win_rate)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerfectGame {
    pub result_id: String,
    pub game_type: GameType,
    pub winner: PlayerId,
    pub beaten: Vec<PlayerId>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LosingStreak {
    pub player: PlayerId,
    pub game_type: GameType,
    pub length: u32,
}

/// The single headline event shown for the latest qualifying result.
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    DominantWin {
        result_id: String,
        game_type: GameType,
        winner: PlayerId,
        beaten: Vec<PlayerId>,
    },
    ShameEvent {
        result_id: String,
        game_type: GameType,
        players: Vec<PlayerId>,
    },
    OrdinaryWin {
        result_id: String,
        game_type: GameType,
        winners: Vec<PlayerId>,
    },
}

impl Banner {
    pub fn kind(&self) -> &str {
        match self {
            Banner::DominantWin { .. } => "dominantWin",
            Banner::ShameEvent { .. } => "shameEvent",
            Banner::OrdinaryWin { .. } => "ordinaryWin",
        }
    }

    pub fn result_id(&self) -> &str {
        match self {
            Banner::DominantWin { result_id, .. }
            | Banner::ShameEvent { result_id, .. }
            | Banner::OrdinaryWin { result_id, .. } => result_id,
        }
    }

    pub fn headline(&self) -> String {
        match self {
            Banner::DominantWin { game_type, winner, beaten, .. } => {
                format!("{winner} swept the {game_type} table, beating {}", join_names(beaten))
            }
            Banner::ShameEvent { game_type, players, .. } => {
                format!("{} left holding the pile at {game_type}", join_names(players))
            }
            Banner::OrdinaryWin { game_type, winners, .. } => {
                format!("{} took the last {game_type}", join_names(winners))
            }
        }
    }
}

fn join_names(names: &[PlayerId]) -> String {
    match names {
        [] => String::new(),
        [only] => only.clone(),
        [init @ .., last] => format!("{} and {last}", init.join(", ")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headlines() {
        let banner = Banner::OrdinaryWin {
            result_id: "r".into(),
            game_type: GameType::Catan,
            winners: vec!["ana".into(), "bruno".into(), "eva".into()],
        };
        assert_eq!(banner.headline(), "ana, bruno and eva took the last catan");
        assert_eq!(banner.kind(), "ordinaryWin");
    }

    #[test]
    fn test_win_rate_label() {
        let stats = PlayerStats {
            win_rate: 67.0,
            ..PlayerStats::new("ana".into())
        };
        assert_eq!(stats.win_rate_label(), "67%");
    }
}
