use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::{ApiPath, ApiQuery};
use crate::api::state::AppState;
use crate::api::{run_blocking, ApiError};
use crate::calculate::{compute_grouped_handicap, compute_scope_breakdown, compute_team_handicap};
use crate::models::{
    GroupBy, HandicapRange, HandicapRow, LeagueId, PatchId, TeamHandicapSummary, TeamId,
};
use crate::storage::{load_matches, MatchQuery, NameLookup};

// ── Shared views ────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct HandicapTable {
    pub team: NamedRef,
    pub total_matches: u32,
    pub wins: u32,
    pub losses: u32,
    pub win_rate: f64,
    pub avg_kill_differential: f64,
    pub avg_duration: f64,
    pub handicaps: Vec<HandicapRow>,
}

impl HandicapTable {
    fn new(summary: &TeamHandicapSummary, range: &HandicapRange, lookup: &NameLookup) -> Self {
        Self {
            team: NamedRef {
                id: summary.team_id.get(),
                name: lookup.team_name(summary.team_id),
            },
            total_matches: summary.total_matches,
            wins: summary.wins,
            losses: summary.losses,
            win_rate: summary.win_rate(),
            avg_kill_differential: crate::calculate::round2(summary.avg_kill_differential),
            avg_duration: crate::calculate::round2(summary.avg_duration),
            handicaps: summary.rows(range),
        }
    }
}

/// Scope filters shared by the team endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ScopeParams {
    pub league: Option<u64>,
    pub patch: Option<u64>,
    pub year: Option<i32>,
}

impl ScopeParams {
    fn query(&self) -> MatchQuery {
        MatchQuery::default()
            .with_league(self.league.map(LeagueId::new))
            .with_patch(self.patch.map(PatchId::new))
            .with_year(self.year)
    }
}

// ── Health / Range ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[derive(Debug, Serialize)]
pub struct RangeResponse {
    pub values: Vec<f64>,
    pub labels: Vec<String>,
}

pub async fn handicap_range(State(state): State<AppState>) -> Json<RangeResponse> {
    Json(RangeResponse {
        values: state.range.values().to_vec(),
        labels: state.range.labels(),
    })
}

// ── Team Endpoint ───────────────────────────────────────────────

pub async fn team_handicap(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<u64>,
    ApiQuery(params): ApiQuery<ScopeParams>,
) -> Result<Json<HandicapTable>, ApiError> {
    let team = TeamId::new(team_id);
    let query = MatchQuery {
        team: Some(team),
        ..params.query()
    };

    let table = run_blocking(move || {
        let matches = load_matches(&state.storage, &query)?;
        let lookup = NameLookup::load(&state.storage)?;
        let summary = compute_team_handicap(&matches, team, &state.range);
        Ok(HandicapTable::new(&summary, &state.range, &lookup))
    })
    .await?;

    Ok(Json(table))
}

// ── Grouped Endpoint ────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GroupedParams {
    pub by: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct GroupView {
    pub key: u64,
    pub name: String,
    #[serde(flatten)]
    pub table: HandicapTable,
}

#[derive(Debug, Serialize)]
pub struct GroupedResponse {
    pub team: NamedRef,
    pub group_by: GroupBy,
    pub groups: Vec<GroupView>,
}

pub async fn grouped_handicap(
    State(state): State<AppState>,
    ApiPath(team_id): ApiPath<u64>,
    ApiQuery(params): ApiQuery<GroupedParams>,
) -> Result<Json<GroupedResponse>, ApiError> {
    let group_by = match params.by.as_deref().unwrap_or("league").parse::<GroupBy>() {
        Ok(g @ (GroupBy::League | GroupBy::Patch)) => g,
        Ok(GroupBy::Team) => {
            return Err(ApiError::BadRequest(
                "by must be league or patch".to_string(),
            ))
        }
        Err(e) => return Err(ApiError::BadRequest(e)),
    };
    let team = TeamId::new(team_id);
    let query = MatchQuery::for_team(team).with_year(params.year);

    let response = run_blocking(move || {
        let matches = load_matches(&state.storage, &query)?;
        let lookup = NameLookup::load(&state.storage)?;
        let grouped = compute_grouped_handicap(&matches, team, group_by, &state.range);

        let groups = grouped
            .entries
            .iter()
            .map(|entry| GroupView {
                key: entry.key,
                name: match group_by {
                    GroupBy::Patch => lookup.patch_name(PatchId::new(entry.key)),
                    _ => lookup.league_name(LeagueId::new(entry.key)),
                },
                table: HandicapTable::new(&entry.summary, &state.range, &lookup),
            })
            .collect();

        Ok(GroupedResponse {
            team: NamedRef {
                id: team.get(),
                name: lookup.team_name(team),
            },
            group_by,
            groups,
        })
    })
    .await?;

    Ok(Json(response))
}

// ── Patch Endpoint ──────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PatchParams {
    pub limit: Option<usize>,
    pub league: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct PatchResponse {
    pub patch: NamedRef,
    pub total_matches: usize,
    pub teams: Vec<HandicapTable>,
}

pub async fn patch_handicap(
    State(state): State<AppState>,
    ApiPath(patch_id): ApiPath<u64>,
    ApiQuery(params): ApiQuery<PatchParams>,
) -> Result<Json<PatchResponse>, ApiError> {
    if params.limit == Some(0) {
        return Err(ApiError::BadRequest(
            "limit must be greater than 0".to_string(),
        ));
    }
    let patch = PatchId::new(patch_id);
    let query = MatchQuery::default()
        .with_patch(Some(patch))
        .with_league(params.league.map(LeagueId::new));

    let response = run_blocking(move || {
        let matches = load_matches(&state.storage, &query)?;
        let lookup = NameLookup::load(&state.storage)?;
        let grouped = compute_scope_breakdown(&matches, GroupBy::Team, &state.range);
        let limit = params.limit.unwrap_or(grouped.len());

        Ok(PatchResponse {
            patch: NamedRef {
                id: patch.get(),
                name: lookup.patch_name(patch),
            },
            total_matches: matches.len(),
            teams: grouped
                .top(limit)
                .iter()
                .map(|entry| HandicapTable::new(&entry.summary, &state.range, &lookup))
                .collect(),
        })
    })
    .await?;

    Ok(Json(response))
}
