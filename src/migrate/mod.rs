use std::path::Path;

use chrono::Utc;
use rusqlite::Connection;

use crate::db::{chat_repo, contact_repo, schema, snapshot_repo};
use crate::error::ChatGraphResult;
use crate::model::{Snapshot, SnapshotDocument};
use crate::source::ReadyHandle;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub contacts: usize,
    pub chats: usize,
    pub participants: usize,
    /// Whether the stored snapshot is now the one sources serve. An import
    /// with an older `capturedAt` than what the store holds is kept but not served.
    pub latest: bool,
}

/// Imports a snapshot JSON document into the SQLite store at `db_path`.
/// Snapshots are served by capture time, so an older document is stored but
/// does not replace the current one; see [`ImportStats::latest`].
pub fn import_snapshot(json_path: &Path, db_path: &Path) -> ChatGraphResult<ImportStats> {
    let json_str = std::fs::read_to_string(json_path)?;
    let document: SnapshotDocument = serde_json::from_str(&json_str)?;

    let mut conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    store_snapshot(&mut conn, &document)
}

/// Copies everything a connected source serves into the store at `db_path`.
pub fn capture_snapshot(handle: &ReadyHandle, db_path: &Path) -> ChatGraphResult<ImportStats> {
    let document = SnapshotDocument {
        account: handle.account().clone(),
        captured_at: Some(Utc::now()),
        contacts: handle.source().list_contacts()?,
        chats: handle.source().list_chats()?,
    };

    let mut conn = Connection::open(db_path)?;
    schema::initialize(&conn)?;

    store_snapshot(&mut conn, &document)
}

/// Writes one document as a new snapshot inside a single transaction.
pub fn store_snapshot(
    conn: &mut Connection,
    document: &SnapshotDocument,
) -> ChatGraphResult<ImportStats> {
    let snapshot = Snapshot::create(
        document.account.clone(),
        document.captured_at.unwrap_or_else(Utc::now),
    );

    let tx = conn.transaction()?;
    snapshot_repo::insert(&tx, &snapshot)?;
    let contacts = contact_repo::insert_all(&tx, snapshot.id, &document.contacts)?;
    let chat_counts = chat_repo::insert_all(&tx, snapshot.id, &document.chats)?;
    tx.commit()?;

    let latest = snapshot_repo::find_latest(conn)?.map(|s| s.id) == Some(snapshot.id);
    let stats = ImportStats {
        contacts,
        chats: chat_counts.chats,
        participants: chat_counts.participants,
        latest,
    };
    if !latest {
        tracing::warn!(
            snapshot = %snapshot.id,
            captured_at = %snapshot.captured_at,
            "stored snapshot is older than the latest one and will not be served"
        );
    }
    tracing::info!(
        snapshot = %snapshot.id,
        contacts = stats.contacts,
        chats = stats.chats,
        participants = stats.participants,
        "stored snapshot"
    );
    Ok(stats)
}
