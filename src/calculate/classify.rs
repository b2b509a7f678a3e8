//! Per-match classification relative to one team.

use crate::models::{MatchRecord, Side, TeamId};

/// How a match looks from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The team played on neither side.
    NotParticipant,
    Participant {
        side: Side,
        is_winner: bool,
        /// Own kills minus opponent kills
        kill_differential: i64,
    },
}

/// Classify `record` for `team`.
///
/// A side with no team assigned never matches, so records missing both teams
/// are `NotParticipant` for every id.
pub fn classify_match(record: &MatchRecord, team: TeamId) -> Classification {
    let Some(side) = record.side_of(team) else {
        return Classification::NotParticipant;
    };

    let own = i64::from(record.score(side));
    let opponent = i64::from(record.score(side.opponent()));

    Classification::Participant {
        side,
        is_winner: record.winner() == side,
        kill_differential: own - opponent,
    }
}
