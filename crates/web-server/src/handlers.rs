use crate::{error::AppError, AppState};
use axum::{
    async_trait,
    extract::{FromRequest, Request, State},
    http::header::CONTENT_TYPE,
    Form, Json, RequestExt,
};
use chrono::{DateTime, Utc};
use core_types::Candidate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing;

/// How many votes the index page shows.
const RECENT_VOTE_LIMIT: i64 = 5;

/// The body of a `POST /votes` request. The front-end proxy sends JSON,
/// the plain HTML form sends urlencoded form data; both carry one field.
#[derive(Debug, Deserialize)]
pub struct VotePayload {
    pub team: String,
}

/// Extracts a `VotePayload` from either encoding, dispatching on the
/// request's Content-Type.
pub struct VoteInput(pub VotePayload);

#[async_trait]
impl<S> FromRequest<S> for VoteInput
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/json") {
            let Json(payload) = req
                .extract::<Json<VotePayload>, _>()
                .await
                .map_err(|e| AppError::MalformedPayload(e.to_string()))?;
            Ok(VoteInput(payload))
        } else {
            let Form(payload) = req
                .extract::<Form<VotePayload>, _>()
                .await
                .map_err(|e| AppError::MalformedPayload(e.to_string()))?;
            Ok(VoteInput(payload))
        }
    }
}

/// One entry of the index page's recent-votes list.
#[derive(Debug, Serialize)]
pub struct RecentVote {
    pub candidate: Candidate,
    pub time_cast: DateTime<Utc>,
}

/// Everything the front-end needs to render the index page.
#[derive(Debug, Serialize)]
pub struct IndexContext {
    pub recent_votes: Vec<RecentVote>,
    pub tab_count: i64,
    pub space_count: i64,
}

/// # GET /
/// Assembles the index payload: the five most recent votes plus the fresh
/// per-candidate tallies, in one logical read pass. There is no partial
/// mode; if any sub-query fails the whole request fails.
pub async fn render_index(
    State(state): State<Arc<AppState>>,
) -> Result<Json<IndexContext>, AppError> {
    tracing::info!("Received request for the index page");

    let recent = state.store.recent_votes(RECENT_VOTE_LIMIT).await?;
    let tally = state.store.tally().await?;

    Ok(Json(IndexContext {
        recent_votes: recent
            .into_iter()
            .map(|vote| RecentVote {
                candidate: vote.candidate,
                time_cast: vote.time_cast,
            })
            .collect(),
        tab_count: tally.tab_count,
        space_count: tally.space_count,
    }))
}

/// # POST /votes
/// Validates the submitted team, stamps the vote with the current UTC time,
/// and records it. Validation happens before any database access; a vote
/// that fails to persist is reported as a server error and never retried.
pub async fn cast_vote(
    State(state): State<Arc<AppState>>,
    VoteInput(payload): VoteInput,
) -> Result<String, AppError> {
    tracing::info!(team = %payload.team, "Received vote from the frontend");

    let candidate = Candidate::parse(&payload.team)
        .map_err(|_| AppError::InvalidCandidate(payload.team.clone()))?;

    let time_cast = Utc::now();
    let vote = state
        .store
        .insert_vote(candidate, time_cast)
        .await
        .map_err(AppError::VoteFailed)?;

    Ok(format!(
        "Vote successfully cast for '{}' at time {}!",
        vote.candidate, vote.time_cast
    ))
}
