use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use rusqlite::{Connection, ErrorCode, Transaction, TransactionBehavior, params};

use super::lifecycle;
use super::models::*;
use super::views;
use crate::errors::{StatusError, StatusResult};

/// Async-safe handle to the roadmap database.
///
/// Wraps `RoadmapDb` behind `Arc<Mutex>` and runs all access on tokio's
/// blocking thread pool via `spawn_blocking`, preventing synchronous SQLite
/// I/O from tying up async worker threads. The mutex also serializes every
/// operation of this process against the single connection.
#[derive(Clone)]
pub struct DbHandle {
    inner: Arc<std::sync::Mutex<RoadmapDb>>,
}

impl DbHandle {
    pub fn new(db: RoadmapDb) -> Self {
        Self {
            inner: Arc::new(std::sync::Mutex::new(db)),
        }
    }

    /// Run a closure with access to the database on a blocking thread.
    /// All data passed into `f` must be owned (`'static`).
    pub async fn call<F, R>(&self, f: F) -> StatusResult<R>
    where
        F: FnOnce(&RoadmapDb) -> StatusResult<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|e| {
                StatusError::Database(anyhow::anyhow!("DB lock poisoned: {}", e))
            })?;
            f(&guard)
        })
        .await
        .map_err(|e| StatusError::Database(anyhow::Error::new(e).context("DB task panicked")))?
    }
}

pub struct RoadmapDb {
    conn: Connection,
}

const STATUS_COLUMNS: &str =
    "id, org_id, key, name, color, position, is_system, show_on_roadmap, created_at, updated_at";

impl RoadmapDb {
    /// Open (or create) a SQLite database at the given path and run migrations.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Create an in-memory SQLite database (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        self.run_migrations().context("Failed to run migrations")?;
        Ok(())
    }

    /// Begin a transaction that holds SQLite's write lock from the start, so
    /// every check made inside it stays true until commit, even against other
    /// connections to the same file.
    fn write_tx(&self) -> rusqlite::Result<Transaction<'_>> {
        Transaction::new_unchecked(&self.conn, TransactionBehavior::Immediate)
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS organizations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                );

                CREATE TABLE IF NOT EXISTS boards (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    org_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    name TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                );

                CREATE TABLE IF NOT EXISTS statuses (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    org_id INTEGER NOT NULL REFERENCES organizations(id) ON DELETE CASCADE,
                    key TEXT NOT NULL,
                    name TEXT NOT NULL,
                    color TEXT NOT NULL DEFAULT 'gray',
                    position INTEGER NOT NULL DEFAULT 0,
                    is_system INTEGER NOT NULL DEFAULT 0,
                    show_on_roadmap INTEGER NOT NULL DEFAULT 1,
                    created_at TEXT NOT NULL DEFAULT (datetime('now')),
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                );

                CREATE TABLE IF NOT EXISTS posts (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    board_id INTEGER NOT NULL REFERENCES boards(id) ON DELETE CASCADE,
                    title TEXT NOT NULL,
                    status TEXT NOT NULL,
                    created_at TEXT NOT NULL DEFAULT (datetime('now')),
                    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
                );

                CREATE INDEX IF NOT EXISTS idx_boards_org ON boards(org_id);
                CREATE UNIQUE INDEX IF NOT EXISTS idx_statuses_org_key ON statuses(org_id, key);
                CREATE INDEX IF NOT EXISTS idx_statuses_org_position ON statuses(org_id, position);
                CREATE INDEX IF NOT EXISTS idx_posts_board_status ON posts(board_id, status);
                ",
            )
            .context("Failed to create tables")?;
        Ok(())
    }

    // ── Organizations ─────────────────────────────────────────────────

    /// Create an organization and seed its system statuses in one transaction.
    pub fn create_organization(&self, name: &str) -> StatusResult<Organization> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StatusError::Validation(
                "Organization name must not be empty".to_string(),
            ));
        }

        // unchecked_transaction: the DbHandle mutex already guarantees
        // single-threaded access to the connection.
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("INSERT INTO organizations (name) VALUES (?1)", params![name])?;
        let org_id = tx.last_insert_rowid();
        for (position, (key, status_name, color)) in SYSTEM_STATUSES.iter().enumerate() {
            tx.execute(
                "INSERT INTO statuses (org_id, key, name, color, position, is_system, show_on_roadmap)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1, 1)",
                params![org_id, key, status_name, color.as_str(), position as i32],
            )?;
        }
        tx.commit()?;

        tracing::info!(org_id, name, "organization created");
        self.require_organization(org_id)
    }

    pub fn get_organization(&self, id: i64) -> StatusResult<Option<Organization>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM organizations WHERE id = ?1")?;
        let mut rows = stmt.query_map(params![id], |row| {
            Ok(Organization {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    pub fn require_organization(&self, id: i64) -> StatusResult<Organization> {
        self.get_organization(id)?
            .ok_or(StatusError::OrganizationNotFound { id })
    }

    pub fn list_organizations(&self) -> StatusResult<Vec<Organization>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, created_at FROM organizations ORDER BY id")?;
        let rows = stmt.query_map([], |row| {
            Ok(Organization {
                id: row.get(0)?,
                name: row.get(1)?,
                created_at: row.get(2)?,
            })
        })?;
        let mut orgs = Vec::new();
        for row in rows {
            orgs.push(row?);
        }
        Ok(orgs)
    }

    // ── Boards ────────────────────────────────────────────────────────

    pub fn create_board(&self, org_id: i64, name: &str) -> StatusResult<Board> {
        self.require_organization(org_id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(StatusError::Validation(
                "Board name must not be empty".to_string(),
            ));
        }
        self.conn.execute(
            "INSERT INTO boards (org_id, name) VALUES (?1, ?2)",
            params![org_id, name],
        )?;
        let id = self.conn.last_insert_rowid();
        self.get_board(org_id, id)?
            .ok_or_else(|| StatusError::board_not_found(id, org_id))
    }

    pub fn get_board(&self, org_id: i64, id: i64) -> StatusResult<Option<Board>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, org_id, name, created_at FROM boards WHERE id = ?1 AND org_id = ?2",
        )?;
        let mut rows = stmt.query_map(params![id, org_id], |row| {
            Ok(Board {
                id: row.get(0)?,
                org_id: row.get(1)?,
                name: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    // ── Statuses ──────────────────────────────────────────────────────

    /// All statuses of an organization, ordered by rank.
    pub fn list_statuses(&self, org_id: i64) -> StatusResult<Vec<Status>> {
        self.require_organization(org_id)?;
        Ok(query_statuses(&self.conn, org_id)?)
    }

    pub fn get_status(&self, org_id: i64, id: i64) -> StatusResult<Option<Status>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {STATUS_COLUMNS} FROM statuses WHERE id = ?1 AND org_id = ?2"
        ))?;
        let mut rows = stmt.query_map(params![id, org_id], StatusRow::from_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?.into_status())),
            None => Ok(None),
        }
    }

    fn require_status(&self, org_id: i64, id: i64) -> StatusResult<Status> {
        self.require_organization(org_id)?;
        self.get_status(org_id, id)?
            .ok_or_else(|| StatusError::status_not_found(id, org_id))
    }

    pub fn create_status(
        &self,
        org_id: i64,
        name: &str,
        color: &str,
        show_on_roadmap: bool,
    ) -> StatusResult<Status> {
        self.require_organization(org_id)?;
        let name = lifecycle::normalize_name(name)?;
        let key = lifecycle::derive_key(&name)?;
        let color = StatusColor::parse_lenient(color);

        let tx = self.write_tx()?;
        let existing = query_statuses(&tx, org_id)?;
        if existing.iter().any(|s| s.key == key) {
            return Err(StatusError::DuplicateKey { key, org_id });
        }
        let position = existing.iter().map(|s| s.order).max().map_or(0, |max| max + 1);

        let inserted = tx.execute(
            "INSERT INTO statuses (org_id, key, name, color, position, is_system, show_on_roadmap)
             VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
            params![org_id, key, name, color.as_str(), position, show_on_roadmap],
        );
        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                return Err(StatusError::DuplicateKey { key, org_id });
            }
            Err(e) => return Err(e.into()),
        }
        let id = tx.last_insert_rowid();
        tx.commit()?;

        tracing::info!(org_id, status_id = id, key = %key, position, "status created");
        self.require_status(org_id, id)
    }

    /// Apply a partial update to a status's display fields.
    pub fn update_status(&self, org_id: i64, id: i64, patch: &StatusPatch) -> StatusResult<Status> {
        self.require_status(org_id, id)?;
        let name = patch
            .name
            .as_deref()
            .map(lifecycle::normalize_name)
            .transpose()?;

        let tx = self.conn.unchecked_transaction()?;
        if let Some(n) = &name {
            tx.execute(
                "UPDATE statuses SET name = ?1, updated_at = datetime('now') WHERE id = ?2 AND org_id = ?3",
                params![n, id, org_id],
            )?;
        }
        if let Some(c) = &patch.color {
            let color = StatusColor::parse_lenient(c);
            tx.execute(
                "UPDATE statuses SET color = ?1, updated_at = datetime('now') WHERE id = ?2 AND org_id = ?3",
                params![color.as_str(), id, org_id],
            )?;
        }
        if let Some(visible) = patch.show_on_roadmap {
            tx.execute(
                "UPDATE statuses SET show_on_roadmap = ?1, updated_at = datetime('now') WHERE id = ?2 AND org_id = ?3",
                params![visible, id, org_id],
            )?;
        }
        tx.commit()?;

        tracing::info!(org_id, status_id = id, "status updated");
        self.require_status(org_id, id)
    }

    /// Rank statuses by their position in `ordered_ids`, all or nothing.
    pub fn reorder_statuses(&self, org_id: i64, ordered_ids: &[i64]) -> StatusResult<()> {
        self.require_organization(org_id)?;
        let tx = self.write_tx()?;
        let current = query_statuses(&tx, org_id)?;
        lifecycle::validate_reorder(&current, ordered_ids)?;

        for (position, id) in ordered_ids.iter().enumerate() {
            tx.execute(
                "UPDATE statuses SET position = ?1, updated_at = datetime('now') WHERE id = ?2 AND org_id = ?3",
                params![position as i32, id, org_id],
            )?;
        }
        tx.commit()?;

        tracing::info!(org_id, count = ordered_ids.len(), "statuses reordered");
        Ok(())
    }

    /// Number of posts in the organization that sit in `key`.
    pub fn count_posts_with_status(&self, org_id: i64, key: &str) -> StatusResult<i64> {
        Ok(count_posts(&self.conn, org_id, key)?)
    }

    /// Statuses a caller may offer as replacements for `id`.
    pub fn reassignment_targets(&self, org_id: i64, id: i64) -> StatusResult<Vec<Status>> {
        let deleting = self.require_status(org_id, id)?;
        let statuses = self.list_statuses(org_id)?;
        Ok(lifecycle::reassignment_candidates(&statuses, &deleting)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Delete a status using the probe/confirm protocol.
    ///
    /// Without `reassign_to` this is the probe: an unused status is deleted,
    /// a used one is left untouched and the blocking post count is returned.
    /// With `reassign_to` the posts are moved and the status removed inside a
    /// single transaction.
    ///
    /// All guards (existence, last status, post count, target) are evaluated
    /// inside the write transaction that performs the delete.
    pub fn delete_status(
        &self,
        org_id: i64,
        id: i64,
        reassign_to: Option<&str>,
    ) -> StatusResult<DeleteOutcome> {
        self.require_organization(org_id)?;
        let tx = self.write_tx()?;
        let statuses = query_statuses(&tx, org_id)?;
        let status = statuses
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| StatusError::status_not_found(id, org_id))?;
        if statuses.len() <= 1 {
            tracing::warn!(org_id, status_id = id, key = %status.key, "refused to delete last status");
            return Err(StatusError::LastStatus {
                key: status.key,
                org_id,
            });
        }

        match reassign_to {
            None => {
                let post_count = count_posts(&tx, org_id, &status.key)?;
                if post_count > 0 {
                    tracing::info!(org_id, status_id = id, post_count, "status delete requires reassignment");
                    return Ok(DeleteOutcome::requires_reassignment(post_count));
                }
                remove_unused_status(tx, &status).map_err(|e| {
                    tracing::warn!(org_id, status_id = id, error = %e, "status delete rolled back");
                    StatusError::TransactionFailure(e)
                })?;
                tracing::info!(org_id, status_id = id, key = %status.key, "status deleted");
                Ok(DeleteOutcome::deleted(None))
            }
            Some(target) => {
                let target = lifecycle::resolve_target(&statuses, &status, target)?.clone();
                let moved = reassign_and_delete(tx, &status, &target).map_err(|e| {
                    tracing::warn!(org_id, status_id = id, error = %e, "reassignment rolled back");
                    StatusError::TransactionFailure(e)
                })?;
                tracing::info!(
                    org_id,
                    status_id = id,
                    key = %status.key,
                    target = %target.key,
                    moved,
                    "status deleted with reassignment"
                );
                Ok(DeleteOutcome::deleted(Some(moved)))
            }
        }
    }

    // ── Posts ─────────────────────────────────────────────────────────

    pub fn create_post(
        &self,
        org_id: i64,
        board_id: i64,
        title: &str,
        status: Option<&str>,
    ) -> StatusResult<Post> {
        self.get_board(org_id, board_id)?
            .ok_or_else(|| StatusError::board_not_found(board_id, org_id))?;
        let title = title.trim();
        if title.is_empty() {
            return Err(StatusError::Validation(
                "Post title must not be empty".to_string(),
            ));
        }
        let statuses = self.list_statuses(org_id)?;
        let key = match status {
            Some(key) => require_status_key(&statuses, org_id, key)?,
            // An organization always has at least one status.
            None => statuses
                .first()
                .map(|s| s.key.clone())
                .ok_or_else(|| StatusError::InvalidTarget("organization has no statuses".into()))?,
        };

        self.conn.execute(
            "INSERT INTO posts (board_id, title, status) VALUES (?1, ?2, ?3)",
            params![board_id, title, key],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(org_id, board_id, post_id = id, status = %key, "post created");
        self.get_post(org_id, id)?
            .ok_or_else(|| StatusError::post_not_found(id, org_id))
    }

    pub fn get_post(&self, org_id: i64, id: i64) -> StatusResult<Option<Post>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.board_id, p.title, p.status, p.created_at, p.updated_at
             FROM posts p JOIN boards b ON b.id = p.board_id
             WHERE p.id = ?1 AND b.org_id = ?2",
        )?;
        let mut rows = stmt.query_map(params![id, org_id], post_from_row)?;
        match rows.next() {
            Some(row) => Ok(Some(row?)),
            None => Ok(None),
        }
    }

    /// All posts of an organization across its boards, oldest first.
    pub fn list_posts(&self, org_id: i64) -> StatusResult<Vec<Post>> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.board_id, p.title, p.status, p.created_at, p.updated_at
             FROM posts p JOIN boards b ON b.id = p.board_id
             WHERE b.org_id = ?1 ORDER BY p.id",
        )?;
        let rows = stmt.query_map(params![org_id], post_from_row)?;
        let mut posts = Vec::new();
        for row in rows {
            posts.push(row?);
        }
        Ok(posts)
    }

    /// Move a single post to another status of its organization.
    pub fn set_post_status(&self, org_id: i64, post_id: i64, key: &str) -> StatusResult<Post> {
        self.get_post(org_id, post_id)?
            .ok_or_else(|| StatusError::post_not_found(post_id, org_id))?;
        let statuses = self.list_statuses(org_id)?;
        let key = require_status_key(&statuses, org_id, key)?;
        self.conn.execute(
            "UPDATE posts SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![key, post_id],
        )?;
        tracing::info!(org_id, post_id, status = %key, "post status changed");
        self.get_post(org_id, post_id)?
            .ok_or_else(|| StatusError::post_not_found(post_id, org_id))
    }

    // ── Board views ───────────────────────────────────────────────────

    pub fn kanban(&self, org_id: i64) -> StatusResult<KanbanView> {
        let organization = self.require_organization(org_id)?;
        let statuses = self.list_statuses(org_id)?;
        let posts = self.list_posts(org_id)?;
        Ok(KanbanView {
            organization,
            columns: views::kanban_columns(&statuses, posts),
        })
    }

    pub fn roadmap(&self, org_id: i64) -> StatusResult<RoadmapView> {
        let organization = self.require_organization(org_id)?;
        let statuses = self.list_statuses(org_id)?;
        let posts = self.list_posts(org_id)?;
        Ok(RoadmapView {
            organization,
            columns: views::roadmap_columns(&statuses, posts),
        })
    }
}

fn require_status_key(statuses: &[Status], org_id: i64, key: &str) -> StatusResult<String> {
    let key = key.trim();
    statuses
        .iter()
        .find(|s| s.key == key)
        .map(|s| s.key.clone())
        .ok_or_else(|| {
            StatusError::InvalidTarget(format!(
                "'{}' is not a status of organization {}",
                key, org_id
            ))
        })
}

fn query_statuses(conn: &Connection, org_id: i64) -> rusqlite::Result<Vec<Status>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {STATUS_COLUMNS} FROM statuses WHERE org_id = ?1 ORDER BY position, id"
    ))?;
    let rows = stmt.query_map(params![org_id], StatusRow::from_row)?;
    let mut statuses = Vec::new();
    for row in rows {
        statuses.push(row?.into_status());
    }
    Ok(statuses)
}

fn count_posts(conn: &Connection, org_id: i64, key: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM posts p JOIN boards b ON b.id = p.board_id
         WHERE b.org_id = ?1 AND p.status = ?2",
        params![org_id, key],
        |row| row.get(0),
    )
}

fn remove_unused_status(tx: Transaction<'_>, status: &Status) -> Result<()> {
    delete_status_row(&tx, status)?;
    compact_positions(&tx, status.org_id)?;
    tx.commit().context("Failed to commit status delete")?;
    Ok(())
}

fn reassign_and_delete(tx: Transaction<'_>, status: &Status, target: &Status) -> Result<i64> {
    let moved = tx
        .execute(
            "UPDATE posts SET status = ?1, updated_at = datetime('now')
             WHERE status = ?2 AND board_id IN (SELECT id FROM boards WHERE org_id = ?3)",
            params![target.key, status.key, status.org_id],
        )
        .context("Failed to reassign posts")?;
    let target_present: bool = tx
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM statuses WHERE id = ?1 AND org_id = ?2 AND key = ?3)",
            params![target.id, target.org_id, target.key],
            |row| row.get(0),
        )
        .context("Failed to verify reassignment target")?;
    if !target_present {
        anyhow::bail!(
            "Reassignment target '{}' no longer exists in organization {}",
            target.key,
            target.org_id
        );
    }
    delete_status_row(&tx, status)?;
    compact_positions(&tx, status.org_id)?;
    tx.commit().context("Failed to commit reassignment")?;
    Ok(moved as i64)
}

fn delete_status_row(tx: &Transaction<'_>, status: &Status) -> Result<()> {
    let removed = tx
        .execute(
            "DELETE FROM statuses WHERE id = ?1 AND org_id = ?2",
            params![status.id, status.org_id],
        )
        .context("Failed to delete status")?;
    if removed != 1 {
        anyhow::bail!("Status {} disappeared before it could be deleted", status.id);
    }
    Ok(())
}

/// Renumber an organization's statuses 0..n keeping their relative order.
fn compact_positions(tx: &Transaction<'_>, org_id: i64) -> Result<()> {
    let ids: Vec<i64> = {
        let mut stmt = tx
            .prepare("SELECT id FROM statuses WHERE org_id = ?1 ORDER BY position, id")
            .context("Failed to prepare compact_positions")?;
        let rows = stmt
            .query_map(params![org_id], |row| row.get(0))
            .context("Failed to query status positions")?;
        rows.collect::<rusqlite::Result<_>>()
            .context("Failed to read status position row")?
    };
    for (position, id) in ids.iter().enumerate() {
        tx.execute(
            "UPDATE statuses SET position = ?1 WHERE id = ?2",
            params![position as i32, id],
        )
        .context("Failed to compact status positions")?;
    }
    Ok(())
}

fn post_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        board_id: row.get(1)?,
        title: row.get(2)?,
        status: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

/// Intermediate row struct for statuses.
struct StatusRow {
    id: i64,
    org_id: i64,
    key: String,
    name: String,
    color: String,
    position: i32,
    is_system: i64,
    show_on_roadmap: i64,
    created_at: String,
    updated_at: String,
}

impl StatusRow {
    fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            org_id: row.get(1)?,
            key: row.get(2)?,
            name: row.get(3)?,
            color: row.get(4)?,
            position: row.get(5)?,
            is_system: row.get(6)?,
            show_on_roadmap: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn into_status(self) -> Status {
        Status {
            id: self.id,
            org_id: self.org_id,
            key: self.key,
            name: self.name,
            color: StatusColor::parse_lenient(&self.color),
            order: self.position,
            is_system: self.is_system != 0,
            show_on_roadmap: self.show_on_roadmap != 0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────
