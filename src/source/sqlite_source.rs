use std::path::Path;

use rusqlite::Connection;
use uuid::Uuid;

use super::{MessagingSource, ReadyHandle};
use crate::db::{chat_repo, contact_repo, schema, snapshot_repo};
use crate::error::{ChatGraphError, ChatGraphResult};
use crate::model::{RawChat, RawContact, Snapshot, Wid};

/// Serves the latest snapshot stored in a SQLite database.
pub struct SqliteSource {
    conn: Connection,
    snapshot_id: Uuid,
}

impl SqliteSource {
    /// Opens the database at `db_path` and binds to its latest snapshot.
    pub fn connect(db_path: &Path) -> ChatGraphResult<ReadyHandle> {
        let conn = Connection::open(db_path)?;
        schema::initialize(&conn)?;
        Self::from_connection(conn)
    }

    /// Binds an already open connection to its latest snapshot.
    pub fn from_connection(conn: Connection) -> ChatGraphResult<ReadyHandle> {
        let snapshot: Snapshot =
            snapshot_repo::find_latest(&conn)?.ok_or(ChatGraphError::SnapshotNotFound)?;
        tracing::info!(
            snapshot = %snapshot.id,
            captured_at = %snapshot.captured_at,
            "using stored snapshot"
        );
        let source = Self {
            conn,
            snapshot_id: snapshot.id,
        };
        Ok(ReadyHandle::new(snapshot.account, Box::new(source)))
    }
}

impl MessagingSource for SqliteSource {
    fn list_contacts(&self) -> ChatGraphResult<Vec<RawContact>> {
        contact_repo::find_by_snapshot(&self.conn, self.snapshot_id)
    }

    fn list_chats(&self) -> ChatGraphResult<Vec<RawChat>> {
        chat_repo::find_by_snapshot(&self.conn, self.snapshot_id)
    }

    fn lookup_contact(&self, id: &Wid) -> ChatGraphResult<RawContact> {
        contact_repo::find_by_id(&self.conn, self.snapshot_id, id)?.ok_or_else(|| {
            ChatGraphError::ContactNotFound {
                id: id.to_string(),
            }
        })
    }

    fn profile_pic_url(&self, id: &Wid) -> ChatGraphResult<Option<String>> {
        Ok(self.lookup_contact(id)?.profile_pic_url)
    }
}
