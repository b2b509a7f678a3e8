//! Single-team handicap aggregation.

use tracing::debug;

use crate::models::{HandicapRange, MatchRecord, TeamHandicapSummary, TeamId};

use super::{average, classify_match, BucketAccumulator, Classification};

/// Aggregate handicap statistics for `team_id` over `matches`.
///
/// `matches` must already be filtered to the scope of interest. Matches the team
/// did not play are skipped; a team with no matches yields a zero-filled summary.
pub fn compute_team_handicap<'m, I>(
    matches: I,
    team_id: TeamId,
    range: &HandicapRange,
) -> TeamHandicapSummary
where
    I: IntoIterator<Item = &'m MatchRecord>,
{
    let mut buckets = BucketAccumulator::new(range);
    let mut total_matches = 0u32;
    let mut wins = 0u32;
    let mut kill_differential_sum = 0i64;
    let mut duration_sum = 0u64;

    for record in matches {
        let Classification::Participant {
            is_winner,
            kill_differential,
            ..
        } = classify_match(record, team_id)
        else {
            continue;
        };

        total_matches += 1;
        if is_winner {
            wins += 1;
        }
        kill_differential_sum += kill_differential;
        duration_sum += u64::from(record.duration);
        buckets.record(is_winner, kill_differential);
    }

    let (victory, loss, general) = buckets.finish();
    debug!(
        team = %team_id,
        matches = total_matches,
        wins,
        "Computed team handicap summary"
    );

    TeamHandicapSummary {
        team_id,
        total_matches,
        wins,
        losses: total_matches - wins,
        avg_kill_differential: average(kill_differential_sum as f64, total_matches),
        avg_duration: average(duration_sum as f64, total_matches),
        victory,
        loss,
        general,
    }
}
