use anyhow::{Context, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{Round, RoundRecord};

const DEFAULT_ROUNDS_PATH: &str = "rounds.json";

/// Read-only view of the round log as exported by the record store:
/// one JSON array of round records.
pub struct RoundSnapshot {
    path: PathBuf,
}

impl RoundSnapshot {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// `ROUNDS_PATH`, falling back to `rounds.json` in the working directory.
    pub fn from_env() -> Self {
        let path = std::env::var("ROUNDS_PATH").unwrap_or_else(|_| DEFAULT_ROUNDS_PATH.to_string());
        Self::new(path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_records(&self) -> Result<Vec<RoundRecord>> {
        let json = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read round snapshot {}", self.path.display()))?;

        let records: Vec<RoundRecord> = serde_json::from_str(&json).with_context(|| {
            format!(
                "Failed to parse JSON from {:?}. First 200 chars: {}",
                self.path,
                json.chars().take(200).collect::<String>()
            )
        })?;

        info!("Loaded {} round record(s) from {}", records.len(), self.path.display());
        Ok(records)
    }

    /// Records without any usable date are dropped with a warning.
    pub fn load_rounds(&self) -> Result<Vec<Round>> {
        let records = self.load_records()?;
        let total = records.len();
        let rounds: Vec<Round> = records.into_iter().filter_map(RoundRecord::into_round).collect();

        if rounds.len() < total {
            warn!("Dropped {} unusable round record(s)", total - rounds.len());
        }
        Ok(rounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn snapshot_with(contents: &str) -> (NamedTempFile, RoundSnapshot) {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        let snapshot = RoundSnapshot::new(file.path());
        (file, snapshot)
    }

    #[test]
    fn test_load_rounds() {
        let (_file, snapshot) = snapshot_with(
            r#"[
                {"id": "u1", "gameType": "uno", "gameDate": "2024-03-01",
                 "createdAt": "2024-03-01T20:00:00", "players": ["ana", "bruno"], "winner": "ana"},
                {"id": "bad", "gameType": "poker"},
                {"id": "p1", "gameType": "palace", "gameDate": "2024-03-01",
                 "winners": ["bruno"], "losers": ["ana"]}
            ]"#,
        );

        let rounds = snapshot.load_rounds().unwrap();
        let ids: Vec<&str> = rounds.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "p1"]);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let (_file, snapshot) = snapshot_with("{not json");
        let err = snapshot.load_rounds().unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse JSON"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = RoundSnapshot::new(dir.path().join("absent.json"));
        assert!(snapshot.load_records().is_err());
    }
}
