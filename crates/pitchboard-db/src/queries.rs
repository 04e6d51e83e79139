use crate::Database;
use crate::models::{IdeaRow, VoteRow};
use anyhow::Result;
use rusqlite::{Connection, Row};

const IDEA_COLUMNS: &str =
    "id, title, description, tag, votes, comments, created_at, blockchain_hash, block_number";

impl Database {
    // -- Ideas --

    pub fn insert_idea(&self, idea: &IdeaRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO ideas (id, title, description, tag, votes, comments, created_at, blockchain_hash, block_number)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                rusqlite::params![
                    idea.id,
                    idea.title,
                    idea.description,
                    idea.tag,
                    idea.votes,
                    idea.comments,
                    idea.created_at,
                    idea.blockchain_hash,
                    idea.block_number,
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_idea(&self, id: &str) -> Result<Option<IdeaRow>> {
        self.with_conn(|conn| query_idea_by_id(conn, id))
    }

    /// All ideas in insertion order.
    pub fn list_ideas(&self) -> Result<Vec<IdeaRow>> {
        self.with_conn(query_ideas)
    }

    pub fn count_ideas(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let count = conn.query_row("SELECT COUNT(*) FROM ideas", [], |row| row.get(0))?;
            Ok(count)
        })
    }

    /// Add `delta` to an idea's tally in a single statement and return the
    /// updated row, or `None` if the idea does not exist.
    pub fn adjust_idea_votes(&self, id: &str, delta: i64) -> Result<Option<IdeaRow>> {
        self.with_conn(|conn| {
            let sql = format!(
                "UPDATE ideas SET votes = votes + ?1 WHERE id = ?2 RETURNING {}",
                IDEA_COLUMNS
            );
            let row = conn
                .query_row(&sql, rusqlite::params![delta, id], idea_from_row)
                .optional()?;
            Ok(row)
        })
    }

    // -- Votes --

    pub fn insert_vote(&self, vote: &VoteRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO votes (id, idea_id, vote_type, user_id, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![vote.id, vote.idea_id, vote.vote_type, vote.user_id, vote.created_at],
            )?;
            Ok(())
        })
    }

    /// Votes cast on one idea, oldest first.
    pub fn get_votes_for_idea(&self, idea_id: &str) -> Result<Vec<VoteRow>> {
        self.with_conn(|conn| query_votes_for_idea(conn, idea_id))
    }
}

fn idea_from_row(row: &Row<'_>) -> rusqlite::Result<IdeaRow> {
    Ok(IdeaRow {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        tag: row.get(3)?,
        votes: row.get(4)?,
        comments: row.get(5)?,
        created_at: row.get(6)?,
        blockchain_hash: row.get(7)?,
        block_number: row.get(8)?,
    })
}

fn query_idea_by_id(conn: &Connection, id: &str) -> Result<Option<IdeaRow>> {
    let sql = format!("SELECT {} FROM ideas WHERE id = ?1", IDEA_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let row = stmt.query_row([id], idea_from_row).optional()?;

    Ok(row)
}

fn query_ideas(conn: &Connection) -> Result<Vec<IdeaRow>> {
    let sql = format!("SELECT {} FROM ideas ORDER BY seq", IDEA_COLUMNS);
    let mut stmt = conn.prepare(&sql)?;

    let rows = stmt
        .query_map([], idea_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

fn query_votes_for_idea(conn: &Connection, idea_id: &str) -> Result<Vec<VoteRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, idea_id, vote_type, user_id, created_at
         FROM votes
         WHERE idea_id = ?1
         ORDER BY rowid",
    )?;

    let rows = stmt
        .query_map([idea_id], |row| {
            Ok(VoteRow {
                id: row.get(0)?,
                idea_id: row.get(1)?,
                vote_type: row.get(2)?,
                user_id: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
