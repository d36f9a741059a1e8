use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::{ChatGraphError, ChatGraphResult};
use crate::model::{Account, Snapshot, Wid};

pub fn insert(conn: &Connection, snapshot: &Snapshot) -> ChatGraphResult<()> {
    conn.execute(
        "INSERT INTO snapshots (id, self_id, self_name, captured_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            snapshot.id.to_string(),
            snapshot.account.id.as_str(),
            snapshot.account.display_name,
            snapshot.captured_at.to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// The most recently captured snapshot, if any.
pub fn find_latest(conn: &Connection) -> ChatGraphResult<Option<Snapshot>> {
    let mut stmt = conn.prepare(
        "SELECT id, self_id, self_name, captured_at FROM snapshots ORDER BY captured_at DESC LIMIT 1",
    )?;

    let result = stmt.query_row([], |row| {
        let id_str: String = row.get(0)?;
        let self_id: String = row.get(1)?;
        let self_name: Option<String> = row.get(2)?;
        let captured_at: String = row.get(3)?;
        Ok((id_str, self_id, self_name, captured_at))
    });

    match result {
        Ok((id_str, self_id, self_name, captured_at)) => Ok(Some(Snapshot {
            id: Uuid::parse_str(&id_str)
                .map_err(|e| ChatGraphError::Other(format!("Invalid UUID: {}", e)))?,
            account: Account::new(
                Wid::parse(&self_id)
                    .ok_or_else(|| ChatGraphError::Other("Snapshot has a blank self id".into()))?,
                self_name,
            ),
            captured_at: parse_timestamp(&captured_at)?,
        })),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn count(conn: &Connection) -> ChatGraphResult<usize> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM snapshots", [], |row| row.get(0))?;
    Ok(n as usize)
}

fn parse_timestamp(s: &str) -> ChatGraphResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| ChatGraphError::Other(format!("Invalid timestamp '{}': {}", s, e)))
}
