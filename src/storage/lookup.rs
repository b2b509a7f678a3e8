//! Display-name lookup for teams, leagues and patches.

use std::collections::HashMap;

use crate::models::{League, LeagueId, Patch, PatchId, Team, TeamId};

use super::{EntityType, JsonlReader, StorageConfig, StorageError};

/// In-memory id -> record maps used when rendering results.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    teams: HashMap<TeamId, Team>,
    leagues: HashMap<LeagueId, League>,
    patches: HashMap<PatchId, Patch>,
}

impl NameLookup {
    pub fn new(teams: Vec<Team>, leagues: Vec<League>, patches: Vec<Patch>) -> Self {
        Self {
            teams: teams.into_iter().map(|t| (t.id, t)).collect(),
            leagues: leagues.into_iter().map(|l| (l.id, l)).collect(),
            patches: patches.into_iter().map(|p| (p.id, p)).collect(),
        }
    }

    /// Load all catalog files. Missing files give empty maps.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        Ok(Self::new(
            JsonlReader::for_entity(config, EntityType::Team).read_all()?,
            JsonlReader::for_entity(config, EntityType::League).read_all()?,
            JsonlReader::for_entity(config, EntityType::Patch).read_all()?,
        ))
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.get(&id)
    }

    pub fn team_name(&self, id: TeamId) -> String {
        self.teams
            .get(&id)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| format!("Team {}", id))
    }

    pub fn league_name(&self, id: LeagueId) -> String {
        self.leagues
            .get(&id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| format!("League {}", id))
    }

    pub fn patch_name(&self, id: PatchId) -> String {
        self.patches
            .get(&id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("Patch {}", id))
    }
}
