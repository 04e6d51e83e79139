use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use pitchboard_db::Database;
use pitchboard_db::models::IdeaRow;
use pitchboard_types::models::{Idea, MAX_DESCRIPTION_CHARS};

use crate::error::{LedgerError, Result};
use crate::time::{now_stamp, parse_stamp};

/// Store of ideas and the only writer of their `votes` tally.
#[derive(Clone)]
pub struct IdeaLedger {
    db: Arc<Database>,
}

impl IdeaLedger {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create an idea with zeroed counters.
    pub fn create(&self, title: &str, description: &str, tag: &str) -> Result<Idea> {
        self.create_seeded(title, description, tag, 0, 0)
    }

    /// Create an idea starting from the given counters.
    pub fn create_seeded(
        &self,
        title: &str,
        description: &str,
        tag: &str,
        votes: i64,
        comments: i64,
    ) -> Result<Idea> {
        validate_new_idea(title, description, tag)?;

        let row = IdeaRow {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: description.to_string(),
            tag: tag.to_string(),
            votes,
            comments,
            created_at: now_stamp(),
            blockchain_hash: None,
            block_number: None,
        };
        self.db.insert_idea(&row)?;

        info!("Idea {} created under '{}'", row.id, row.tag);
        idea_from_row(row)
    }

    pub fn get_by_id(&self, id: &str) -> Result<Idea> {
        let row = self.db.get_idea(id)?.ok_or_else(LedgerError::idea_not_found)?;
        idea_from_row(row)
    }

    /// Every stored idea in creation order. Use [`crate::ranking::rank`] for display order.
    pub fn list_all(&self) -> Result<Vec<Idea>> {
        self.db
            .list_ideas()?
            .into_iter()
            .map(idea_from_row)
            .collect()
    }

    /// Apply `delta` to the tally atomically. No floor or ceiling.
    pub fn adjust_votes(&self, id: &str, delta: i64) -> Result<Idea> {
        let row = self
            .db
            .adjust_idea_votes(id, delta)?
            .ok_or_else(LedgerError::idea_not_found)?;
        idea_from_row(row)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.db.count_ideas()? == 0)
    }
}

fn validate_new_idea(title: &str, description: &str, tag: &str) -> Result<()> {
    if title.is_empty() || description.is_empty() || tag.is_empty() {
        return Err(LedgerError::Validation(
            "Title, description, and tag are required".to_string(),
        ));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(LedgerError::Validation(format!(
            "Description must be {} characters or less",
            MAX_DESCRIPTION_CHARS
        )));
    }
    Ok(())
}

fn idea_from_row(row: IdeaRow) -> Result<Idea> {
    let created_at = parse_stamp(&row.created_at)?;
    Ok(Idea {
        id: row.id,
        title: row.title,
        description: row.description,
        tag: row.tag,
        votes: row.votes,
        comments: row.comments,
        created_at,
        blockchain_hash: row.blockchain_hash,
        block_number: row.block_number,
    })
}
