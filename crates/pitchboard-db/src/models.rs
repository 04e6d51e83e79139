//! Database row types: these map directly to SQLite rows.
//! Distinct from pitchboard-types models to keep the DB layer independent.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRow {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tag: String,
    pub votes: i64,
    pub comments: i64,
    pub created_at: String,
    pub blockchain_hash: Option<String>,
    pub block_number: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteRow {
    pub id: String,
    pub idea_id: String,
    pub vote_type: String,
    pub user_id: Option<String>,
    pub created_at: String,
}
