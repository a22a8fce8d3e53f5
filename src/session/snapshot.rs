//! Portable progress snapshots (the export/import data model).

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// A full copy of a player's progress, suitable for backup and transfer.
///
/// Keys and ids are the authored forms, exactly as persisted. Importing a
/// snapshot replaces the session's state wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Unlocked code keys.
    pub unlocked: Vec<String>,
    /// Favorite code keys.
    pub favorites: Vec<String>,
    /// Earned achievement ids.
    pub achievements: Vec<String>,
    /// Unix timestamp (seconds) of the export.
    pub exported_at: u64,
}

impl Snapshot {
    /// Snapshot of the given state, stamped with the current time.
    pub fn now(unlocked: Vec<String>, favorites: Vec<String>, achievements: Vec<String>) -> Self {
        let exported_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            unlocked,
            favorites,
            achievements,
            exported_at,
        }
    }

    /// Serialize to pretty JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize from JSON.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_roundtrip() {
        let snapshot = Snapshot::now(
            vec!["Te Amo".to_string()],
            vec![],
            vec!["first".to_string()],
        );
        let json = snapshot.to_json().unwrap();
        assert_eq!(Snapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Snapshot::from_json("not json").is_err());
        assert!(Snapshot::from_json("{\"unlocked\": 3}").is_err());
    }
}
