//! Grouped and head-to-head views built on the single-team aggregator.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{
    GroupBy, GroupEntry, GroupedHandicapSummary, HandicapRange, HeadToHeadTally, MatchRecord,
    Side, TeamId,
};

use super::compute_team_handicap;

/// Grouping key of `record` for a team that played in it.
fn scope_key(record: &MatchRecord, group_by: GroupBy, team: TeamId) -> u64 {
    match group_by {
        GroupBy::League => record.league_id.get(),
        GroupBy::Patch => record.patch_id.get(),
        GroupBy::Team => team.get(),
    }
}

/// Run the team aggregator once per (key, team) cell and order the result.
fn summarize_cells(
    cells: BTreeMap<(u64, TeamId), Vec<&MatchRecord>>,
    group_by: GroupBy,
    range: &HandicapRange,
) -> GroupedHandicapSummary {
    let mut entries: Vec<GroupEntry> = cells
        .into_iter()
        .map(|((key, team_id), subset)| GroupEntry {
            key,
            team_id,
            summary: compute_team_handicap(subset, team_id, range),
        })
        .collect();

    // Most matches first, then key, then team.
    entries.sort_by(|a, b| {
        b.summary
            .total_matches
            .cmp(&a.summary.total_matches)
            .then_with(|| a.key.cmp(&b.key))
            .then_with(|| a.team_id.cmp(&b.team_id))
    });

    GroupedHandicapSummary { group_by, entries }
}

/// Handicap statistics for one team, split by league, patch or team.
///
/// Only keys the team actually played under appear in the result.
pub fn compute_grouped_handicap(
    matches: &[MatchRecord],
    team_id: TeamId,
    group_by: GroupBy,
    range: &HandicapRange,
) -> GroupedHandicapSummary {
    let mut cells: BTreeMap<(u64, TeamId), Vec<&MatchRecord>> = BTreeMap::new();
    for record in matches.iter().filter(|m| m.side_of(team_id).is_some()) {
        cells
            .entry((scope_key(record, group_by, team_id), team_id))
            .or_default()
            .push(record);
    }

    debug!(
        team = %team_id,
        %group_by,
        groups = cells.len(),
        "Grouping team matches"
    );
    summarize_cells(cells, group_by, range)
}

/// Handicap statistics for every team in the population, per grouping key.
///
/// With [`GroupBy::Team`] the key is the team itself, which gives the
/// "all teams in this patch/league" table when `matches` is pre-filtered.
pub fn compute_scope_breakdown(
    matches: &[MatchRecord],
    group_by: GroupBy,
    range: &HandicapRange,
) -> GroupedHandicapSummary {
    let mut cells: BTreeMap<(u64, TeamId), Vec<&MatchRecord>> = BTreeMap::new();
    for record in matches {
        for side in [Side::Radiant, Side::Dire] {
            if let Some(team) = record.team_on(side) {
                // A team on both sides is counted once, as radiant.
                if side == Side::Dire && record.team_on(Side::Radiant) == Some(team) {
                    continue;
                }
                cells
                    .entry((scope_key(record, group_by, team), team))
                    .or_default()
                    .push(record);
            }
        }
    }

    debug!(%group_by, cells = cells.len(), "Grouping population");
    summarize_cells(cells, group_by, range)
}

/// Direct results between `team_a` and `team_b`.
///
/// A team paired with itself has no head-to-head record.
pub fn compute_head_to_head(
    matches: &[MatchRecord],
    team_a: TeamId,
    team_b: TeamId,
) -> HeadToHeadTally {
    let mut tally = HeadToHeadTally::new(team_a, team_b);
    if team_a == team_b {
        return tally;
    }

    for record in matches {
        let (Some(side_a), Some(side_b)) = (record.side_of(team_a), record.side_of(team_b)) else {
            continue;
        };
        if side_a == side_b {
            continue;
        }

        tally.total_matches += 1;
        if record.winner() == side_a {
            tally.team_a_wins += 1;
        } else {
            tally.team_b_wins += 1;
        }
    }

    tally
}
