use rusqlite::{params, Connection};
use uuid::Uuid;

use crate::error::ChatGraphResult;
use crate::model::{RawChat, RawParticipant, Wid};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChatInsertCounts {
    pub chats: usize,
    pub participants: usize,
}

/// Stores chats and their participant lists in source order. Chats without an
/// id are skipped, as are participants without one; a repeated chat id keeps
/// its first record. Duplicate participant entries are stored as delivered.
pub fn insert_all(
    conn: &Connection,
    snapshot_id: Uuid,
    chats: &[RawChat],
) -> ChatGraphResult<ChatInsertCounts> {
    let snapshot = snapshot_id.to_string();
    let mut counts = ChatInsertCounts::default();

    for (position, chat) in chats.iter().enumerate() {
        let Some(chat_id) = &chat.id else {
            tracing::debug!(position, "skipping chat without id");
            continue;
        };
        let inserted = conn.execute(
            "INSERT OR IGNORE INTO chats (snapshot_id, id, display_name, is_group, position)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                snapshot,
                chat_id.as_str(),
                chat.display_name,
                chat.is_group as i32,
                position as i64,
            ],
        )?;
        if inserted == 0 {
            tracing::debug!(chat = %chat_id, "duplicate chat id, keeping first record");
            continue;
        }
        counts.chats += 1;

        for (slot, participant) in chat.participants.iter().enumerate() {
            let Some(pid) = &participant.id else {
                continue;
            };
            conn.execute(
                "INSERT INTO participants (snapshot_id, chat_id, participant_id, position)
                 VALUES (?1, ?2, ?3, ?4)",
                params![snapshot, chat_id.as_str(), pid.as_str(), slot as i64],
            )?;
            counts.participants += 1;
        }
    }

    Ok(counts)
}

pub fn find_by_snapshot(conn: &Connection, snapshot_id: Uuid) -> ChatGraphResult<Vec<RawChat>> {
    let snapshot = snapshot_id.to_string();
    let mut stmt = conn.prepare(
        "SELECT id, display_name, is_group FROM chats WHERE snapshot_id = ?1 ORDER BY position",
    )?;

    let rows: Vec<(String, Option<String>, i32)> = stmt
        .query_map(params![snapshot], |row| {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?))
        })?
        .collect::<Result<Vec<_>, _>>()?;

    let mut chats = Vec::with_capacity(rows.len());
    for (id_str, display_name, is_group) in rows {
        let participants = if is_group != 0 {
            find_participants(conn, &snapshot, &id_str)?
        } else {
            Vec::new()
        };
        chats.push(RawChat {
            id: Wid::parse(&id_str),
            display_name,
            is_group: is_group != 0,
            participants,
        });
    }

    Ok(chats)
}

fn find_participants(
    conn: &Connection,
    snapshot: &str,
    chat_id: &str,
) -> ChatGraphResult<Vec<RawParticipant>> {
    let mut stmt = conn.prepare(
        "SELECT participant_id FROM participants
         WHERE snapshot_id = ?1 AND chat_id = ?2 ORDER BY position",
    )?;

    let participants = stmt
        .query_map(params![snapshot, chat_id], |row| {
            let id_str: String = row.get(0)?;
            Ok(RawParticipant {
                id: Wid::parse(&id_str),
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(participants)
}
