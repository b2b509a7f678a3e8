use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use handicap_stats::calculate::{
    accumulate_covered, compute_grouped_handicap, compute_head_to_head, compute_scope_breakdown,
    compute_team_handicap, default_range,
};
use handicap_stats::models::{
    GroupBy, LeagueId, MatchId, MatchRecord, OutcomeCategory, PatchId, TeamId,
};

const T: TeamId = TeamId::new(39);
const OPP: TeamId = TeamId::new(2163);

fn game(id: u64, radiant: Option<TeamId>, dire: Option<TeamId>, rs: u32, ds: u32, rw: bool) -> MatchRecord {
    MatchRecord::new(
        MatchId::new(id),
        LeagueId::new(100 + id % 3),
        PatchId::new(50 + id % 2),
        Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap() + chrono::Duration::days(id as i64),
    )
    .with_teams(radiant, dire)
    .with_score(rs, ds, rw)
    .with_duration(1500 + (id as u32 % 7) * 120)
}

/// A deterministic spread of wins, losses and margins for `T`.
fn season() -> Vec<MatchRecord> {
    (0..60u64)
        .map(|i| {
            let t_kills = 5 + (i * 7 % 31) as u32;
            let opp_kills = 5 + (i * 11 % 29) as u32;
            let t_won = (i * 13) % 5 < 3;
            let other = TeamId::new(3000 + i % 4);
            match i % 3 {
                0 => game(i, Some(T), Some(OPP), t_kills, opp_kills, t_won),
                1 => game(i, Some(other), Some(T), opp_kills, t_kills, !t_won),
                _ => game(i, Some(OPP), Some(other), t_kills, opp_kills, t_won),
            }
        })
        .collect()
}

#[test]
fn range_is_deterministic() {
    let range = default_range();
    assert_eq!(range.len(), 18);
    assert!(range.values().iter().all(|v| *v != 0.0 && v.abs().fract() == 0.5));
    assert_eq!(range.values(), default_range().values());
}

#[test]
fn coverage_is_monotonic_in_handicap() {
    let range = default_range();
    for differential in -25..=25i64 {
        let mut counts = vec![0u32; range.len()];
        accumulate_covered(differential, range.values(), &mut counts);
        assert!(
            counts.windows(2).all(|w| w[0] <= w[1]),
            "coverage not monotonic for differential {}",
            differential
        );
    }
}

#[test]
fn categories_partition_every_match() {
    let range = default_range();
    let summary = compute_team_handicap(&season(), T, range);

    assert_eq!(summary.total_matches, 40);
    assert_eq!(summary.victory.total + summary.loss.total, summary.general.total);
    for i in 0..range.len() {
        let victory = summary.category(OutcomeCategory::Victory).counts[i];
        let loss = summary.category(OutcomeCategory::Loss).counts[i];
        let general = summary.category(OutcomeCategory::General).counts[i];
        assert_eq!(general, victory + loss);
        assert!(general >= victory.max(loss));
    }
}

#[test]
fn empty_population_yields_zero_percentages() {
    let summary = compute_team_handicap(&Vec::<MatchRecord>::new(), T, default_range());
    for category in OutcomeCategory::ALL {
        assert!(summary
            .category(category)
            .percentages
            .iter()
            .all(|p| *p == 0.0 && !p.is_nan()));
    }
    assert_eq!(summary.avg_kill_differential, 0.0);
    assert_eq!(summary.avg_duration, 0.0);
}

#[test]
fn head_to_head_is_symmetric() {
    let matches = season();
    let forward = compute_head_to_head(&matches, T, OPP);
    let reverse = compute_head_to_head(&matches, OPP, T);

    assert_eq!(forward.total_matches, 20);
    assert_eq!(forward.total_matches, reverse.total_matches);
    assert_eq!(forward.team_a_wins + forward.team_b_wins, forward.total_matches);
    assert_eq!(forward.team_a_wins, reverse.team_b_wins);
}

#[test]
fn scenario_radiant_blowout_win() {
    let range = default_range();
    let summary = compute_team_handicap(&[game(1, Some(T), Some(OPP), 30, 10, true)], T, range);

    let min = range.position("-16.5").unwrap();
    let half = range.position("0.5").unwrap();
    assert_eq!(summary.victory.counts[min], 1);
    assert_eq!(summary.general.counts[min], 1);
    assert_eq!(summary.victory.counts[half], 1);
    assert!(summary.loss.counts.iter().all(|c| *c == 0));
}

#[test]
fn scenario_dire_blowout_loss_is_never_covered() {
    let range = default_range();
    let summary = compute_team_handicap(&[game(1, Some(OPP), Some(T), 30, 10, true)], T, range);

    let max = range.position("16.5").unwrap();
    assert_eq!(summary.loss.counts[max], 0);
    assert!(summary.loss.percentages.iter().all(|p| *p == 0.0));
}

#[test]
fn scenario_one_win_one_loss_splits_general() {
    let range = default_range();
    let matches = vec![
        game(1, Some(T), Some(OPP), 20, 15, true),
        game(2, Some(T), Some(OPP), 15, 20, false),
    ];
    let summary = compute_team_handicap(&matches, T, range);
    let half = range.position("0.5").unwrap();
    assert_eq!(summary.general.percentages[half], 50.0);
}

#[test]
fn scenario_head_to_head_without_shared_matches() {
    let tally = compute_head_to_head(&season(), T, TeamId::new(777));
    assert_eq!(
        (tally.total_matches, tally.team_a_wins, tally.team_b_wins),
        (0, 0, 0)
    );
}

#[test]
fn malformed_records_never_contribute() {
    let mut matches = season();
    let before = compute_team_handicap(&matches, T, default_range());
    matches.push(game(999, None, None, 50, 0, true));
    let after = compute_team_handicap(&matches, T, default_range());
    assert_eq!(before, after);
}

#[test]
fn every_scope_uses_the_same_aggregation() {
    let matches = season();
    let range = default_range();

    let per_league = compute_grouped_handicap(&matches, T, GroupBy::League, range);
    let per_team = compute_scope_breakdown(&matches, GroupBy::League, range);

    for entry in &per_league.entries {
        let subset: Vec<MatchRecord> = matches
            .iter()
            .filter(|m| m.league_id.get() == entry.key)
            .cloned()
            .collect();
        let direct = compute_team_handicap(&subset, T, range);
        assert_eq!(entry.summary, direct);
        assert_eq!(per_team.get(entry.key, T), Some(&direct));
    }

    let total: u32 = per_league.entries.iter().map(|e| e.summary.total_matches).sum();
    assert_eq!(total, 40);
    assert!(per_league
        .entries
        .windows(2)
        .all(|w| w[0].summary.total_matches >= w[1].summary.total_matches));
}
