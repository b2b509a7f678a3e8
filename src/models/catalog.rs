//! Display records for teams, leagues and patches.
//!
//! Only the presentation layer reads these; the handicap engine works on ids.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LeagueId, PatchId, TeamId};

/// A professional team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,

    /// Short tag shown in tables, e.g. "OG"
    #[serde(default)]
    pub tag: Option<String>,
}

/// A league or tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct League {
    pub id: LeagueId,
    pub name: String,

    /// Tier label from the source, e.g. "premium" or "professional"
    #[serde(default)]
    pub tier: Option<String>,
}

/// A game patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patch {
    pub id: PatchId,

    /// Version string, e.g. "7.35d"
    pub name: String,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub released_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_without_release_date() {
        let patch: Patch = serde_json::from_str(r#"{"id": 53, "name": "7.35"}"#).unwrap();
        assert_eq!(patch.id, PatchId::new(53));
        assert!(patch.released_at.is_none());
    }

    #[test]
    fn test_league_serialization() {
        let league = League {
            id: LeagueId::new(15728),
            name: "The International 2023".to_string(),
            tier: Some("premium".to_string()),
        };
        let json = serde_json::to_string(&league).unwrap();
        let deserialized: League = serde_json::from_str(&json).unwrap();
        assert_eq!(league, deserialized);
    }
}
