use serde::{Deserialize, Serialize};

// -- Ideas --

/// Absent and `null` fields both come through as `None`, so they fail
/// validation with a 400 instead of an extractor rejection. Unknown fields are
/// ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateIdeaRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tag: Option<String>,
}

// -- Votes --

/// `vote_type` stays a string here; the coordinator decides whether it is valid.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CastVoteRequest {
    #[serde(alias = "voteType")]
    pub vote_type: Option<String>,
    #[serde(alias = "userId")]
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub message: String,
}

// -- Errors --

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
