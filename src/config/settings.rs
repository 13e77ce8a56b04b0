use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::roster::default_roster;
use crate::domain::{FamilyKind, GameType, PlayerId, Round};
use crate::tiers::Tier;

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FamilySettings {
    pub solo_threshold: u32,
    pub team_threshold: u32,
    pub shame_family: GameType,
    pub shame_tier: Tier,
    /// Family kind per game type. Game types missing here keep their built-in kind.
    pub kinds: BTreeMap<GameType, FamilyKind>,
}

impl Default for FamilySettings {
    fn default() -> Self {
        Self {
            solo_threshold: 3,
            team_threshold: 5,
            shame_family: GameType::Palace,
            shame_tier: Tier::Loser,
            kinds: GameType::ALL.iter().map(|&g| (g, g.default_kind())).collect(),
        }
    }
}

impl FamilySettings {
    pub fn kind_of(&self, game_type: GameType) -> FamilyKind {
        self.kinds
            .get(&game_type)
            .copied()
            .unwrap_or_else(|| game_type.default_kind())
    }

    pub fn default_threshold(&self, game_type: GameType) -> u32 {
        match self.kind_of(game_type) {
            FamilyKind::Team => self.team_threshold,
            FamilyKind::SoloThreshold | FamilyKind::Standalone => self.solo_threshold,
        }
    }

    /// Round override wins. A zero override is treated as missing.
    pub fn threshold_for(&self, round: &Round) -> u32 {
        round
            .threshold
            .filter(|&t| t > 0)
            .unwrap_or_else(|| self.default_threshold(round.game_type))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TierWeights {
    pub winner: f64,
    pub runner_up: f64,
    pub survivor: f64,
    pub loser: f64,
}

impl Default for TierWeights {
    fn default() -> Self {
        Self {
            winner: 1.0,
            runner_up: 0.4,
            survivor: 0.1,
            loser: 0.0,
        }
    }
}

impl TierWeights {
    pub fn weight(&self, tier: Tier) -> f64 {
        match tier {
            Tier::Winner => self.winner,
            Tier::RunnerUp => self.runner_up,
            Tier::Survivor => self.survivor,
            Tier::Loser => self.loser,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StatsSettings {
    pub recent_len: usize,
    pub hall_size: usize,
    pub hall_min_games: u32,
    pub losing_streak_min: u32,
}

impl Default for StatsSettings {
    fn default() -> Self {
        Self {
            recent_len: 10,
            hall_size: 3,
            hall_min_games: 5,
            losing_streak_min: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub roster: Vec<PlayerId>,
    pub families: FamilySettings,
    pub weights: TierWeights,
    pub stats: StatsSettings,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            roster: default_roster(),
            families: FamilySettings::default(),
            weights: TierWeights::default(),
            stats: StatsSettings::default(),
        }
    }

    /// Load overrides from a JSON file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::domain::{Outcome, Participants};

    fn round(game_type: GameType, threshold: Option<u32>) -> Round {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Round {
            id: "r1".to_string(),
            game_type,
            game_date: date,
            created_at: date.and_hms_opt(20, 0, 0).unwrap(),
            participants: Participants::Solo(vec![]),
            outcome: Outcome::default(),
            threshold,
        }
    }

    #[test]
    fn test_family_default_thresholds() {
        let families = FamilySettings::default();
        assert_eq!(families.threshold_for(&round(GameType::Uno, None)), 3);
        assert_eq!(families.threshold_for(&round(GameType::Sueca, None)), 5);
        assert_eq!(families.threshold_for(&round(GameType::Uno, Some(4))), 4);
        assert_eq!(families.threshold_for(&round(GameType::Uno, Some(0))), 3);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"roster": ["zoe"], "stats": {"hallMinGames": 2}}"#).unwrap();
        assert_eq!(config.roster, vec!["zoe".to_string()]);
        assert_eq!(config.stats.hall_min_games, 2);
        assert_eq!(config.stats.recent_len, 10);
        assert_eq!(config.families.team_threshold, 5);
        assert_eq!(config.weights.runner_up, 0.4);
    }

    #[test]
    fn test_family_kinds_can_be_remapped() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"families": {"kinds": {"uno": "team", "catan": "soloThreshold"}}}"#)
                .unwrap();
        let families = &config.families;
        assert_eq!(families.kind_of(GameType::Uno), FamilyKind::Team);
        assert_eq!(families.kind_of(GameType::Catan), FamilyKind::SoloThreshold);
        assert_eq!(families.kind_of(GameType::Sueca), FamilyKind::Team);
        assert_eq!(families.kind_of(GameType::Palace), FamilyKind::Standalone);
        assert_eq!(families.threshold_for(&round(GameType::Uno, None)), 5);
        assert_eq!(families.shame_family, GameType::Palace);
    }
}
