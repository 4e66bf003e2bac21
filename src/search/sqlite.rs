//! Ranked backend on SQLite FTS5.
//!
//! Messages live in a regular table; `messages_fts` is an external-content
//! FTS5 index over `message` and `user_name` kept in sync by triggers. The
//! porter tokenizer gives stemmed matching, results are ordered by `bm25`
//! then by newest timestamp.

use super::engine::SearchBackend;
use super::error::SearchError;
use super::pagination::PageRequest;
use super::types::{BackendStatus, MatchPage, Message};

use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS messages (
        seq INTEGER PRIMARY KEY AUTOINCREMENT,
        id TEXT NOT NULL UNIQUE,
        user_id TEXT NOT NULL,
        user_name TEXT NOT NULL,
        timestamp TEXT NOT NULL,
        message TEXT NOT NULL
    );

    CREATE VIRTUAL TABLE IF NOT EXISTS messages_fts USING fts5(
        message,
        user_name,
        content='messages',
        content_rowid='seq',
        tokenize='porter unicode61'
    );

    CREATE TRIGGER IF NOT EXISTS messages_ai AFTER INSERT ON messages BEGIN
        INSERT INTO messages_fts(rowid, message, user_name)
        VALUES (new.seq, new.message, new.user_name);
    END;

    CREATE TRIGGER IF NOT EXISTS messages_ad AFTER DELETE ON messages BEGIN
        INSERT INTO messages_fts(messages_fts, rowid, message, user_name)
        VALUES ('delete', old.seq, old.message, old.user_name);
    END;

    CREATE TRIGGER IF NOT EXISTS messages_au AFTER UPDATE ON messages BEGIN
        INSERT INTO messages_fts(messages_fts, rowid, message, user_name)
        VALUES ('delete', old.seq, old.message, old.user_name);
        INSERT INTO messages_fts(rowid, message, user_name)
        VALUES (new.seq, new.message, new.user_name);
    END;
";

pub struct RankedSearch {
    conn: Arc<Mutex<Connection>>,
}

impl RankedSearch {
    pub fn open(path: &Path) -> Result<Self, SearchError> {
        let conn = Connection::open(path)?;
        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!("Opened {} (journal_mode={})", path.display(), mode);
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, SearchError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, SearchError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Upserts `messages` in a single transaction. Returns the number written.
    pub async fn import(&self, messages: Vec<Message>) -> Result<usize, SearchError> {
        self.with_conn(move |conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(
                    "INSERT INTO messages (id, user_id, user_name, timestamp, message)
                     VALUES (?1, ?2, ?3, ?4, ?5)
                     ON CONFLICT(id) DO UPDATE SET
                        user_id = excluded.user_id,
                        user_name = excluded.user_name,
                        timestamp = excluded.timestamp,
                        message = excluded.message",
                )?;
                for m in &messages {
                    stmt.execute(params![m.id, m.user_id, m.user_name, m.timestamp, m.message])?;
                }
            }
            tx.commit()?;
            Ok(messages.len())
        })
        .await
    }

    pub async fn count(&self) -> Result<usize, SearchError> {
        self.with_conn(|conn| {
            let n: i64 = conn.query_row("SELECT COUNT(*) FROM messages", [], |row| row.get(0))?;
            Ok(n as usize)
        })
        .await
    }

    async fn with_conn<F, T>(&self, f: F) -> Result<T, SearchError>
    where
        F: FnOnce(&mut Connection) -> Result<T, SearchError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| SearchError::Backend("connection lock poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await
        .map_err(|e| SearchError::Backend(format!("blocking task failed: {}", e)))?
    }
}

#[async_trait]
impl SearchBackend for RankedSearch {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    async fn status(&self) -> Result<BackendStatus, SearchError> {
        Ok(BackendStatus {
            ready: true,
            messages: self.count().await?,
        })
    }

    async fn find(&self, query: &str, page: PageRequest) -> Result<MatchPage, SearchError> {
        let Some(fts) = fts5_query(query) else {
            return Ok(MatchPage {
                total: 0,
                items: Vec::new(),
            });
        };

        self.with_conn(move |conn| {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM messages_fts WHERE messages_fts MATCH ?1",
                params![fts],
                |row| row.get(0),
            )?;
            let total = total as usize;
            page.check_in_range(total)?;
            if total == 0 {
                return Ok(MatchPage {
                    total,
                    items: Vec::new(),
                });
            }

            let mut stmt = conn.prepare(
                "SELECT m.id, m.user_id, m.user_name, m.timestamp, m.message
                 FROM messages_fts
                 JOIN messages m ON m.seq = messages_fts.rowid
                 WHERE messages_fts MATCH ?1
                 ORDER BY bm25(messages_fts) ASC, m.timestamp DESC
                 LIMIT ?2 OFFSET ?3",
            )?;
            let rows = stmt.query_map(
                params![fts, page.page_size() as i64, page.offset() as i64],
                |row| {
                    Ok(Message {
                        id: row.get(0)?,
                        user_id: row.get(1)?,
                        user_name: row.get(2)?,
                        timestamp: row.get(3)?,
                        message: row.get(4)?,
                    })
                },
            )?;
            let items = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(MatchPage { total, items })
        })
        .await
    }
}

/// Turns free text into an FTS5 query requiring every term.
///
/// Each whitespace-separated term is quoted so user input can never be read
/// as FTS5 syntax. Terms without any alphanumeric character are dropped.
pub fn fts5_query(query: &str) -> Option<String> {
    let terms: Vec<String> = query
        .split_whitespace()
        .map(|t| t.replace('"', ""))
        .filter(|t| t.chars().any(char::is_alphanumeric))
        .map(|t| format!("\"{}\"", t))
        .collect();

    if terms.is_empty() {
        None
    } else {
        Some(terms.join(" "))
    }
}
