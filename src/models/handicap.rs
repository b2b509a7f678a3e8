//! Handicap analysis result models.

use serde::{Deserialize, Serialize};

use super::TeamId;

/// Ordered sequence of handicap values swept over every match.
///
/// Values are never zero and never integral, so `differential + h` is always
/// strictly positive or strictly negative for an integer differential.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HandicapRange {
    values: Vec<f64>,
}

impl HandicapRange {
    /// Wrap an already-validated sequence. Construction goes through
    /// [`crate::calculate::symmetric_range`] or [`crate::calculate::default_range`].
    pub(crate) fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Display labels, one decimal place each.
    pub fn labels(&self) -> Vec<String> {
        self.values.iter().map(|v| format_handicap(*v)).collect()
    }

    /// Position of a handicap value, matched by display label.
    pub fn position(&self, label: &str) -> Option<usize> {
        self.values.iter().position(|v| format_handicap(*v) == label)
    }
}

/// Format a handicap value the way every table renders it.
pub fn format_handicap(value: f64) -> String {
    format!("{:.1}", value)
}

/// Outcome bucket a match is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeCategory {
    Victory,
    Loss,
    /// Every participant match regardless of result
    General,
}

impl OutcomeCategory {
    pub const ALL: [OutcomeCategory; 3] = [
        OutcomeCategory::Victory,
        OutcomeCategory::Loss,
        OutcomeCategory::General,
    ];
}

impl std::fmt::Display for OutcomeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutcomeCategory::Victory => write!(f, "victory"),
            OutcomeCategory::Loss => write!(f, "loss"),
            OutcomeCategory::General => write!(f, "general"),
        }
    }
}

/// Covered counts and percentages for one outcome category.
///
/// `counts` and `percentages` are indexed by position in the [`HandicapRange`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBuckets {
    /// Matches in this category
    pub total: u32,

    /// Matches still won after applying each handicap
    pub counts: Vec<u32>,

    /// `counts / total * 100`, two decimals, 0 when `total` is 0
    pub percentages: Vec<f64>,
}

impl CategoryBuckets {
    pub fn empty(range_len: usize) -> Self {
        Self {
            total: 0,
            counts: vec![0; range_len],
            percentages: vec![0.0; range_len],
        }
    }
}

/// Handicap statistics for one team over one match population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHandicapSummary {
    pub team_id: TeamId,

    /// Matches the team played in the population
    pub total_matches: u32,

    pub wins: u32,

    pub losses: u32,

    /// Mean of (own kills - opponent kills)
    pub avg_kill_differential: f64,

    /// Mean duration in seconds
    pub avg_duration: f64,

    pub victory: CategoryBuckets,

    pub loss: CategoryBuckets,

    pub general: CategoryBuckets,
}

impl TeamHandicapSummary {
    /// Summary for a team with no matches.
    pub fn empty(team_id: TeamId, range_len: usize) -> Self {
        Self {
            team_id,
            total_matches: 0,
            wins: 0,
            losses: 0,
            avg_kill_differential: 0.0,
            avg_duration: 0.0,
            victory: CategoryBuckets::empty(range_len),
            loss: CategoryBuckets::empty(range_len),
            general: CategoryBuckets::empty(range_len),
        }
    }

    pub fn category(&self, category: OutcomeCategory) -> &CategoryBuckets {
        match category {
            OutcomeCategory::Victory => &self.victory,
            OutcomeCategory::Loss => &self.loss,
            OutcomeCategory::General => &self.general,
        }
    }

    /// Win percentage, two decimals.
    pub fn win_rate(&self) -> f64 {
        crate::calculate::percentage(self.wins, self.total_matches)
    }

    /// One row per handicap value, in range order.
    pub fn rows(&self, range: &HandicapRange) -> Vec<HandicapRow> {
        range
            .values()
            .iter()
            .enumerate()
            .map(|(i, &handicap)| HandicapRow {
                handicap,
                label: format_handicap(handicap),
                victory_count: self.victory.counts[i],
                victory_pct: self.victory.percentages[i],
                loss_count: self.loss.counts[i],
                loss_pct: self.loss.percentages[i],
                general_count: self.general.counts[i],
                general_pct: self.general.percentages[i],
            })
            .collect()
    }
}

/// Tabular view of a single handicap value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandicapRow {
    pub handicap: f64,
    pub label: String,
    pub victory_count: u32,
    pub victory_pct: f64,
    pub loss_count: u32,
    pub loss_pct: f64,
    pub general_count: u32,
    pub general_pct: f64,
}

/// Dimension used to partition a match population.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    League,
    Patch,
    Team,
}

impl std::fmt::Display for GroupBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupBy::League => write!(f, "league"),
            GroupBy::Patch => write!(f, "patch"),
            GroupBy::Team => write!(f, "team"),
        }
    }
}

impl std::str::FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "league" => Ok(GroupBy::League),
            "patch" => Ok(GroupBy::Patch),
            "team" => Ok(GroupBy::Team),
            other => Err(format!(
                "unknown grouping '{}', expected league, patch or team",
                other
            )),
        }
    }
}

/// One (group key, team) cell of a grouped view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupEntry {
    /// League id, patch id or team id depending on [`GroupBy`]
    pub key: u64,

    pub team_id: TeamId,

    pub summary: TeamHandicapSummary,
}

/// Handicap summaries per grouping key.
///
/// Entries are ordered by descending match count, then key, then team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupedHandicapSummary {
    pub group_by: GroupBy,
    pub entries: Vec<GroupEntry>,
}

impl GroupedHandicapSummary {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Summary for a (key, team) cell.
    pub fn get(&self, key: u64, team_id: TeamId) -> Option<&TeamHandicapSummary> {
        self.entries
            .iter()
            .find(|e| e.key == key && e.team_id == team_id)
            .map(|e| &e.summary)
    }

    /// First `n` entries in display order.
    pub fn top(&self, n: usize) -> &[GroupEntry] {
        &self.entries[..n.min(self.entries.len())]
    }
}

/// Direct results between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadToHeadTally {
    pub team_a: TeamId,
    pub team_b: TeamId,
    pub total_matches: u32,
    pub team_a_wins: u32,
    pub team_b_wins: u32,
}

impl HeadToHeadTally {
    pub fn new(team_a: TeamId, team_b: TeamId) -> Self {
        Self {
            team_a,
            team_b,
            total_matches: 0,
            team_a_wins: 0,
            team_b_wins: 0,
        }
    }
}
