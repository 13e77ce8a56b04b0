use log::debug;
use std::collections::BTreeMap;

use super::types::Tiers;

/// Whether the top count has to clear a bar before anyone is crowned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinnerGate {
    /// Whoever holds the maximum wins.
    Plain,
    /// The maximum only crowns its holders if it is at least this value.
    AtLeast(u32),
}

impl WinnerGate {
    fn crowns(self, top: u32) -> bool {
        match self {
            WinnerGate::Plain => true,
            WinnerGate::AtLeast(threshold) => top >= threshold,
        }
    }
}

/// Partitions every key of `win_counts` into exactly one tier.
///
/// When the remaining (non-winner) counts are all equal they all become
/// losers, so a field with no spread below the top gets no runner-up or
/// survivor. That covers the uncrowned all-tied case as well.
pub fn classify<K: Ord + Clone>(win_counts: &BTreeMap<K, u32>, gate: WinnerGate) -> Tiers<K> {
    let mut tiers = Tiers::default();

    let Some(&top) = win_counts.values().max() else {
        return tiers;
    };
    let crowned = gate.crowns(top);

    let mut rest = Vec::with_capacity(win_counts.len());
    for (key, &count) in win_counts {
        if crowned && count == top {
            tiers.winners.push(key.clone());
        } else {
            rest.push((key, count));
        }
    }

    let (Some(rest_top), Some(rest_bottom)) = (
        rest.iter().map(|&(_, c)| c).max(),
        rest.iter().map(|&(_, c)| c).min(),
    ) else {
        return tiers;
    };

    if rest_top == rest_bottom {
        tiers.losers = rest.into_iter().map(|(key, _)| key.clone()).collect();
        debug!(
            "Flat field below the top: {} winner(s), {} loser(s)",
            tiers.winners.len(),
            tiers.losers.len()
        );
        return tiers;
    }

    for (key, count) in rest {
        if count == rest_top {
            tiers.runners_up.push(key.clone());
        } else if count == rest_bottom {
            tiers.losers.push(key.clone());
        } else {
            tiers.survivors.push(key.clone());
        }
    }

    tiers
}
