use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use tracing::{info, warn};

use pitchboard_ledger::ranking::rank;
use pitchboard_types::api::{CastVoteRequest, CreateIdeaRequest, VoteResponse};

use crate::error::{ApiError, FailureContext};
use crate::state::AppState;

/// Run blocking DB work off the async runtime.
async fn run_blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> pitchboard_ledger::Result<T> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

/// GET /api/ideas: every idea, ranked for display.
pub async fn list_ideas(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let ideas = run_blocking(move || state.ledger.list_all())
        .await
        .failure("Failed to fetch ideas")?;

    Ok(Json(rank(ideas)))
}

/// GET /api/ideas/{id}
pub async fn get_idea(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let idea = run_blocking(move || state.ledger.get_by_id(&id))
        .await
        .failure("Failed to fetch idea")?;

    Ok(Json(idea))
}

/// POST /api/ideas: validate and store a new idea.
pub async fn create_idea(
    State(state): State<AppState>,
    payload: Result<Json<CreateIdeaRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let idea = run_blocking(move || {
        state.ledger.create(
            req.title.as_deref().unwrap_or_default(),
            req.description.as_deref().unwrap_or_default(),
            req.tag.as_deref().unwrap_or_default(),
        )
    })
    .await
    .inspect_err(|e| {
        if let Some(msg) = e.validation_message() {
            warn!("Rejected idea: {}", msg);
        }
    })
    .failure("Failed to create idea")?;

    Ok((StatusCode::CREATED, Json(idea)))
}

/// POST /api/ideas/{id}/vote
pub async fn cast_vote(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<CastVoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(req) = payload?;

    let receipt = run_blocking(move || {
        state.votes.cast_vote(
            &id,
            req.vote_type.as_deref().unwrap_or_default(),
            req.user_id,
        )
    })
    .await
    .failure("Failed to process vote")?;

    info!(
        "Vote {} recorded on idea {} (tally {})",
        receipt.vote.id, receipt.idea.id, receipt.idea.votes
    );

    Ok(Json(VoteResponse {
        success: true,
        message: "Vote recorded successfully".to_string(),
    }))
}
