use anyhow::Result;
use rusqlite::Connection;
use tracing::info;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch("CREATE TABLE IF NOT EXISTS schema_version (version INTEGER NOT NULL);")?;

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |r| r.get(0),
    )?;

    if version < 1 {
        info!("Running migration v1 (ideas + votes)");
        conn.execute_batch(
            "
            CREATE TABLE ideas (
                seq             INTEGER PRIMARY KEY AUTOINCREMENT,
                id              TEXT NOT NULL UNIQUE,
                title           TEXT NOT NULL,
                description     TEXT NOT NULL,
                tag             TEXT NOT NULL,
                votes           INTEGER NOT NULL DEFAULT 0,
                comments        INTEGER NOT NULL DEFAULT 0,
                created_at      TEXT NOT NULL,
                blockchain_hash TEXT,
                block_number    INTEGER
            );

            CREATE TABLE votes (
                id          TEXT PRIMARY KEY,
                idea_id     TEXT NOT NULL REFERENCES ideas(id),
                vote_type   TEXT NOT NULL CHECK (vote_type IN ('up', 'down')),
                user_id     TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX idx_votes_idea ON votes(idea_id);

            INSERT INTO schema_version (version) VALUES (1);
            ",
        )?;
    }

    info!("Database migrations complete");
    Ok(())
}
