//! Match population loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::info;

use crate::models::{LeagueId, MatchRecord, PatchId, TeamId};

use super::{EntityType, JsonlReader, StorageConfig, StorageError};

/// Filter applied while loading matches. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchQuery {
    pub team: Option<TeamId>,
    pub league: Option<LeagueId>,
    pub patch: Option<PatchId>,
    pub year: Option<i32>,
}

impl MatchQuery {
    pub fn for_team(team: TeamId) -> Self {
        Self {
            team: Some(team),
            ..Self::default()
        }
    }

    pub fn with_league(mut self, league: Option<LeagueId>) -> Self {
        self.league = league;
        self
    }

    pub fn with_patch(mut self, patch: Option<PatchId>) -> Self {
        self.patch = patch;
        self
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.year = year;
        self
    }

    /// Whether `record` falls inside this query.
    pub fn matches(&self, record: &MatchRecord) -> bool {
        if let Some(team) = self.team {
            if record.side_of(team).is_none() {
                return false;
            }
        }
        if self.league.is_some_and(|l| record.league_id != l) {
            return false;
        }
        if self.patch.is_some_and(|p| record.patch_id != p) {
            return false;
        }
        if self.year.is_some_and(|y| record.year() != y) {
            return false;
        }
        true
    }
}

/// Load every stored match inside `query`, fully materialized.
pub fn load_matches(
    config: &StorageConfig,
    query: &MatchQuery,
) -> Result<Vec<MatchRecord>, StorageError> {
    let matches = JsonlReader::<MatchRecord>::for_entity(config, EntityType::Match)
        .read_where(|m| query.matches(m))?;
    info!(?query, count = matches.len(), "Loaded matches");
    Ok(matches)
}

/// Read a JSON array of match records, e.g. an export from the upstream API.
pub fn read_match_export(path: &Path) -> Result<Vec<MatchRecord>, StorageError> {
    if !path.exists() {
        return Err(StorageError::PathNotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MatchId;
    use crate::storage::JsonlWriter;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn game(id: u64, league: u64, patch: u64, year: i32, radiant: u64, dire: u64) -> MatchRecord {
        MatchRecord::new(
            MatchId::new(id),
            LeagueId::new(league),
            PatchId::new(patch),
            Utc.with_ymd_and_hms(year, 6, 1, 0, 0, 0).unwrap(),
        )
        .with_teams(Some(TeamId::new(radiant)), Some(TeamId::new(dire)))
        .with_score(20, 10, true)
    }

    fn seeded_store(temp_dir: &TempDir) -> StorageConfig {
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        JsonlWriter::for_entity(&config, EntityType::Match)
            .write_all(&[
                game(1, 10, 50, 2022, 1, 2),
                game(2, 10, 51, 2023, 2, 3),
                game(3, 20, 51, 2023, 3, 1),
                game(4, 20, 52, 2024, 1, 4),
            ])
            .unwrap();
        config
    }

    fn ids(matches: &[MatchRecord]) -> Vec<u64> {
        matches.iter().map(|m| m.match_id.get()).collect()
    }

    #[test]
    fn test_load_all() {
        let temp_dir = TempDir::new().unwrap();
        let config = seeded_store(&temp_dir);
        let all = load_matches(&config, &MatchQuery::default()).unwrap();
        assert_eq!(ids(&all), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_load_by_team() {
        let temp_dir = TempDir::new().unwrap();
        let config = seeded_store(&temp_dir);
        let team = load_matches(&config, &MatchQuery::for_team(TeamId::new(1))).unwrap();
        assert_eq!(ids(&team), vec![1, 3, 4]);
    }

    #[test]
    fn test_load_combined_filters() {
        let temp_dir = TempDir::new().unwrap();
        let config = seeded_store(&temp_dir);

        let query = MatchQuery::default()
            .with_league(Some(LeagueId::new(20)))
            .with_year(Some(2023));
        assert_eq!(ids(&load_matches(&config, &query).unwrap()), vec![3]);

        let query = MatchQuery::for_team(TeamId::new(2)).with_patch(Some(PatchId::new(51)));
        assert_eq!(ids(&load_matches(&config, &query).unwrap()), vec![2]);
    }

    #[test]
    fn test_load_from_empty_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig::new(temp_dir.path().to_path_buf());
        assert!(load_matches(&config, &MatchQuery::default()).unwrap().is_empty());
    }

    #[test]
    fn test_read_match_export() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("export.json");
        let records = vec![game(1, 10, 50, 2022, 1, 2), game(2, 10, 50, 2022, 2, 1)];
        std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();

        assert_eq!(read_match_export(&path).unwrap(), records);
    }

    #[test]
    fn test_read_match_export_missing() {
        let temp_dir = TempDir::new().unwrap();
        let result = read_match_export(&temp_dir.path().join("nope.json"));
        assert!(matches!(result, Err(StorageError::PathNotFound(_))));
    }
}
