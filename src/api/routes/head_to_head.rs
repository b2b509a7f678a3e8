use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::extract::ApiQuery;
use crate::api::state::AppState;
use crate::api::{run_blocking, ApiError};
use crate::calculate::{compute_head_to_head, percentage};
use crate::models::{LeagueId, PatchId, TeamId};
use crate::storage::{load_matches, MatchQuery, NameLookup};

use super::handicap::NamedRef;

#[derive(Debug, Deserialize)]
pub struct HeadToHeadParams {
    pub team_a: Option<u64>,
    pub team_b: Option<u64>,
    pub league: Option<u64>,
    pub patch: Option<u64>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadSide {
    #[serde(flatten)]
    pub team: NamedRef,
    pub wins: u32,
    pub win_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct HeadToHeadResponse {
    pub total_matches: u32,
    pub team_a: HeadToHeadSide,
    pub team_b: HeadToHeadSide,
}

pub async fn head_to_head(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HeadToHeadParams>,
) -> Result<Json<HeadToHeadResponse>, ApiError> {
    let (Some(a), Some(b)) = (params.team_a, params.team_b) else {
        return Err(ApiError::BadRequest(
            "team_a and team_b are required".to_string(),
        ));
    };
    if a == b {
        return Err(ApiError::BadRequest(
            "team_a and team_b must be different teams".to_string(),
        ));
    }

    let (team_a, team_b) = (TeamId::new(a), TeamId::new(b));
    let query = MatchQuery::for_team(team_a)
        .with_league(params.league.map(LeagueId::new))
        .with_patch(params.patch.map(PatchId::new))
        .with_year(params.year);

    let response = run_blocking(move || {
        let matches = load_matches(&state.storage, &query)?;
        let lookup = NameLookup::load(&state.storage)?;
        let tally = compute_head_to_head(&matches, team_a, team_b);

        let side = |team: TeamId, wins: u32| HeadToHeadSide {
            team: NamedRef {
                id: team.get(),
                name: lookup.team_name(team),
            },
            wins,
            win_rate: percentage(wins, tally.total_matches),
        };

        Ok(HeadToHeadResponse {
            total_matches: tally.total_matches,
            team_a: side(team_a, tally.team_a_wins),
            team_b: side(team_b, tally.team_b_wins),
        })
    })
    .await?;

    Ok(Json(response))
}
