use rusqlite::Connection;

use crate::error::ChatGraphResult;

/// Initialize the snapshot schema. Creates all tables if they don't exist.
pub fn initialize(conn: &Connection) -> ChatGraphResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS snapshots (
            id TEXT PRIMARY KEY NOT NULL,
            self_id TEXT NOT NULL,
            self_name TEXT,
            captured_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS contacts (
            snapshot_id TEXT NOT NULL REFERENCES snapshots(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            phone_number TEXT,
            address_book_name TEXT,
            profile_nickname TEXT,
            is_owned INTEGER NOT NULL DEFAULT 0,
            profile_pic_url TEXT,
            position INTEGER NOT NULL,
            PRIMARY KEY (snapshot_id, id)
        );

        CREATE TABLE IF NOT EXISTS chats (
            snapshot_id TEXT NOT NULL REFERENCES snapshots(id) ON DELETE CASCADE,
            id TEXT NOT NULL,
            display_name TEXT,
            is_group INTEGER NOT NULL DEFAULT 0,
            position INTEGER NOT NULL,
            PRIMARY KEY (snapshot_id, id)
        );

        -- No uniqueness: source participant lists may repeat an id.
        CREATE TABLE IF NOT EXISTS participants (
            snapshot_id TEXT NOT NULL,
            chat_id TEXT NOT NULL,
            participant_id TEXT NOT NULL,
            position INTEGER NOT NULL,
            FOREIGN KEY (snapshot_id, chat_id) REFERENCES chats(snapshot_id, id) ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_participants_chat ON participants(snapshot_id, chat_id);

        PRAGMA foreign_keys = ON;
        ",
    )?;
    Ok(())
}

/// Create an in-memory connection for testing. Available in test builds.
pub fn test_connection() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    initialize(&conn).unwrap();
    conn
}
