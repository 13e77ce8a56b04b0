use crate::domain::PlayerId;

/// The regular table. Order here is the display order for ties nobody broke.
pub fn default_roster() -> Vec<PlayerId> {
    ["ana", "bruno", "carla", "duarte", "eva", "filipe"]
        .iter()
        .map(|name| name.to_string())
        .collect()
}
