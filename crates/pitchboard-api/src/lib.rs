pub mod error;
pub mod ideas;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Idea and vote routes, mounted under `/api`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/ideas", get(ideas::list_ideas).post(ideas::create_idea))
        .route("/api/ideas/{id}", get(ideas::get_idea))
        .route("/api/ideas/{id}/vote", post(ideas::cast_vote))
        .with_state(state)
}
