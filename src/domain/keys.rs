use std::fmt;

use super::models::PlayerId;

/// Order-independent identity for a group of players: a team, or the full
/// set of players at a solo table.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TeamKey(Vec<PlayerId>);

impl TeamKey {
    pub fn new(members: &[PlayerId]) -> Self {
        let mut members = members.to_vec();
        members.sort_unstable();
        members.dedup();
        Self(members)
    }

    pub fn members(&self) -> &[PlayerId] {
        &self.0
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.0.binary_search(player).is_ok()
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("&"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(members: &[&str]) -> TeamKey {
        let members: Vec<PlayerId> = members.iter().map(|m| m.to_string()).collect();
        TeamKey::new(&members)
    }

    #[test]
    fn test_key_ignores_member_order() {
        assert_eq!(key(&["eva", "ana"]), key(&["ana", "eva"]));
        assert_eq!(key(&["eva", "ana"]).to_string(), "ana&eva");
    }

    #[test]
    fn test_key_collapses_repeats() {
        assert_eq!(key(&["ana", "ana", "eva"]).members().len(), 2);
        assert!(key(&["ana", "eva"]).contains(&"eva".to_string()));
        assert!(!key(&["ana", "eva"]).contains(&"bruno".to_string()));
    }
}
