//! Match record model - one completed professional match.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::{LeagueId, MatchId, PatchId, TeamId};

/// The two sides of a Dota 2 map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Radiant,
    Dire,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Radiant => Side::Dire,
            Side::Dire => Side::Radiant,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Radiant => write!(f, "radiant"),
            Side::Dire => write!(f, "dire"),
        }
    }
}

/// A completed match as delivered by the data-access layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Unique identifier
    pub match_id: MatchId,

    /// League the match was played in
    pub league_id: LeagueId,

    /// Patch the match was played on
    pub patch_id: PatchId,

    /// Team on the radiant side (absent for unofficial entries)
    #[serde(default)]
    pub radiant_team_id: Option<TeamId>,

    /// Team on the dire side (absent for unofficial entries)
    #[serde(default)]
    pub dire_team_id: Option<TeamId>,

    /// Final radiant kill count
    pub radiant_score: u32,

    /// Final dire kill count
    pub dire_score: u32,

    /// Whether radiant won
    pub radiant_win: bool,

    /// Duration in seconds
    pub duration: u32,

    /// Match start, stored as unix seconds
    #[serde(with = "chrono::serde::ts_seconds")]
    pub start_time: DateTime<Utc>,
}

impl MatchRecord {
    /// Create a record with no teams assigned and a 0-0 radiant win.
    pub fn new(
        match_id: MatchId,
        league_id: LeagueId,
        patch_id: PatchId,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            match_id,
            league_id,
            patch_id,
            radiant_team_id: None,
            dire_team_id: None,
            radiant_score: 0,
            dire_score: 0,
            radiant_win: true,
            duration: 0,
            start_time,
        }
    }

    /// Assign the two teams.
    pub fn with_teams(mut self, radiant: Option<TeamId>, dire: Option<TeamId>) -> Self {
        self.radiant_team_id = radiant;
        self.dire_team_id = dire;
        self
    }

    /// Set final kill counts and the winning side.
    pub fn with_score(mut self, radiant_score: u32, dire_score: u32, radiant_win: bool) -> Self {
        self.radiant_score = radiant_score;
        self.dire_score = dire_score;
        self.radiant_win = radiant_win;
        self
    }

    /// Set the match duration in seconds.
    pub fn with_duration(mut self, seconds: u32) -> Self {
        self.duration = seconds;
        self
    }

    /// The side that won.
    pub fn winner(&self) -> Side {
        if self.radiant_win {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    /// Team assigned to a side, if any.
    pub fn team_on(&self, side: Side) -> Option<TeamId> {
        match side {
            Side::Radiant => self.radiant_team_id,
            Side::Dire => self.dire_team_id,
        }
    }

    /// Final kill count of a side.
    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Radiant => self.radiant_score,
            Side::Dire => self.dire_score,
        }
    }

    /// Side occupied by `team`. Unassigned sides never match.
    pub fn side_of(&self, team: TeamId) -> Option<Side> {
        if self.radiant_team_id == Some(team) {
            Some(Side::Radiant)
        } else if self.dire_team_id == Some(team) {
            Some(Side::Dire)
        } else {
            None
        }
    }

    /// Calendar year of the match start (UTC).
    pub fn year(&self) -> i32 {
        self.start_time.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> MatchRecord {
        MatchRecord::new(
            MatchId::new(7_500_000_001),
            LeagueId::new(15728),
            PatchId::new(53),
            Utc.with_ymd_and_hms(2024, 3, 9, 14, 0, 0).unwrap(),
        )
        .with_teams(Some(TeamId::new(1)), Some(TeamId::new(2)))
        .with_score(31, 18, true)
        .with_duration(2410)
    }

    #[test]
    fn test_side_of() {
        let m = sample();
        assert_eq!(m.side_of(TeamId::new(1)), Some(Side::Radiant));
        assert_eq!(m.side_of(TeamId::new(2)), Some(Side::Dire));
        assert_eq!(m.side_of(TeamId::new(3)), None);
    }

    #[test]
    fn test_unassigned_side_never_matches() {
        let m = sample().with_teams(None, None);
        assert_eq!(m.side_of(TeamId::new(1)), None);
        assert_eq!(m.team_on(Side::Radiant), None);
    }

    #[test]
    fn test_winner_and_scores() {
        let m = sample();
        assert_eq!(m.winner(), Side::Radiant);
        assert_eq!(m.score(Side::Radiant), 31);
        assert_eq!(m.score(Side::Dire), 18);
        assert_eq!(Side::Radiant.opponent(), Side::Dire);
    }

    #[test]
    fn test_year() {
        assert_eq!(sample().year(), 2024);
    }

    #[test]
    fn test_match_record_serialization() {
        let m = sample();
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("\"start_time\":1709992800"));

        let deserialized: MatchRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(m, deserialized);
    }

    #[test]
    fn test_missing_team_fields_default_to_none() {
        let json = r#"{
            "match_id": 1, "league_id": 2, "patch_id": 3,
            "radiant_score": 10, "dire_score": 12, "radiant_win": false,
            "duration": 1800, "start_time": 1700000000
        }"#;
        let m: MatchRecord = serde_json::from_str(json).unwrap();
        assert!(m.radiant_team_id.is_none());
        assert!(m.dire_team_id.is_none());
        assert_eq!(m.winner(), Side::Dire);
    }
}
