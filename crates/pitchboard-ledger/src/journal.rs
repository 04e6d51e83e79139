use std::sync::Arc;

use anyhow::anyhow;
use uuid::Uuid;

use pitchboard_db::Database;
use pitchboard_db::models::VoteRow;
use pitchboard_types::models::{Vote, VoteType};

use crate::error::Result;
use crate::time::{now_stamp, parse_stamp};

/// Append-only history of cast votes. Never reads or writes idea fields.
#[derive(Clone)]
pub struct VoteJournal {
    db: Arc<Database>,
}

impl VoteJournal {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Record one vote. The caller must have checked that `idea_id` exists.
    pub fn append(&self, idea_id: &str, vote_type: VoteType, user_id: Option<String>) -> Result<Vote> {
        let row = VoteRow {
            id: Uuid::new_v4().to_string(),
            idea_id: idea_id.to_string(),
            vote_type: vote_type.as_str().to_string(),
            user_id,
            created_at: now_stamp(),
        };
        self.db.insert_vote(&row)?;

        vote_from_row(row)
    }

    /// Audit read: every vote on one idea, oldest first.
    pub fn entries_for(&self, idea_id: &str) -> Result<Vec<Vote>> {
        self.db
            .get_votes_for_idea(idea_id)?
            .into_iter()
            .map(vote_from_row)
            .collect()
    }
}

fn vote_from_row(row: VoteRow) -> Result<Vote> {
    let vote_type = row
        .vote_type
        .parse::<VoteType>()
        .map_err(|e| anyhow!("corrupt vote {}: {}", row.id, e))?;
    let created_at = parse_stamp(&row.created_at)?;

    Ok(Vote {
        id: row.id,
        idea_id: row.idea_id,
        vote_type,
        user_id: row.user_id,
        created_at,
    })
}
