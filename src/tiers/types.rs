use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Tier {
    Winner,
    RunnerUp,
    Survivor,
    Loser,
}

impl Tier {
    /// Highest priority first. Duplicate placements resolve to the earliest tier here.
    pub const PRIORITY: [Tier; 4] = [Tier::Winner, Tier::RunnerUp, Tier::Survivor, Tier::Loser];

    pub fn symbol(self) -> char {
        match self {
            Tier::Winner => 'W',
            Tier::RunnerUp => 'R',
            Tier::Survivor => 'S',
            Tier::Loser => 'L',
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Tier::Winner => "winner",
            Tier::RunnerUp => "runner-up",
            Tier::Survivor => "survivor",
            Tier::Loser => "loser",
        }
    }
}

/// Four ordered tiers over some key type (players, or team keys).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tiers<K> {
    pub winners: Vec<K>,
    pub runners_up: Vec<K>,
    pub survivors: Vec<K>,
    pub losers: Vec<K>,
}

pub type TierSets = Tiers<PlayerId>;

impl<K> Default for Tiers<K> {
    fn default() -> Self {
        Self {
            winners: Vec::new(),
            runners_up: Vec::new(),
            survivors: Vec::new(),
            losers: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tiers<K> {
    pub fn get(&self, tier: Tier) -> &[K] {
        match tier {
            Tier::Winner => &self.winners,
            Tier::RunnerUp => &self.runners_up,
            Tier::Survivor => &self.survivors,
            Tier::Loser => &self.losers,
        }
    }

    pub fn get_mut(&mut self, tier: Tier) -> &mut Vec<K> {
        match tier {
            Tier::Winner => &mut self.winners,
            Tier::RunnerUp => &mut self.runners_up,
            Tier::Survivor => &mut self.survivors,
            Tier::Loser => &mut self.losers,
        }
    }

    pub fn tier_of(&self, key: &K) -> Option<Tier> {
        Tier::PRIORITY
            .into_iter()
            .find(|&tier| self.get(tier).contains(key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &K)> {
        Tier::PRIORITY
            .into_iter()
            .flat_map(move |tier| self.get(tier).iter().map(move |key| (tier, key)))
    }

    pub fn len(&self) -> usize {
        Tier::PRIORITY.iter().map(|&t| self.get(t).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
