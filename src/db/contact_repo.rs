use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use crate::error::ChatGraphResult;
use crate::model::{RawContact, Wid};

/// Stores contacts of a snapshot in list order. Records without an id are
/// skipped; a repeated id keeps its first record. Returns the number stored.
pub fn insert_all(
    conn: &Connection,
    snapshot_id: Uuid,
    contacts: &[RawContact],
) -> ChatGraphResult<usize> {
    let mut stored = 0;
    for (position, contact) in contacts.iter().enumerate() {
        let Some(id) = &contact.id else {
            tracing::debug!(position, "skipping contact without id");
            continue;
        };
        stored += conn.execute(
            "INSERT OR IGNORE INTO contacts
                (snapshot_id, id, phone_number, address_book_name, profile_nickname, is_owned, profile_pic_url, position)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                snapshot_id.to_string(),
                id.as_str(),
                contact.phone_number,
                contact.address_book_name,
                contact.profile_nickname,
                contact.is_owned_contact as i32,
                contact.profile_pic_url,
                position as i64,
            ],
        )?;
    }
    Ok(stored)
}

pub fn find_by_snapshot(conn: &Connection, snapshot_id: Uuid) -> ChatGraphResult<Vec<RawContact>> {
    let mut stmt = conn.prepare(
        "SELECT id, phone_number, address_book_name, profile_nickname, is_owned, profile_pic_url
         FROM contacts WHERE snapshot_id = ?1 ORDER BY position",
    )?;

    let contacts = stmt
        .query_map(params![snapshot_id.to_string()], map_contact)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(contacts)
}

pub fn find_by_id(
    conn: &Connection,
    snapshot_id: Uuid,
    id: &Wid,
) -> ChatGraphResult<Option<RawContact>> {
    let mut stmt = conn.prepare(
        "SELECT id, phone_number, address_book_name, profile_nickname, is_owned, profile_pic_url
         FROM contacts WHERE snapshot_id = ?1 AND id = ?2",
    )?;

    match stmt.query_row(params![snapshot_id.to_string(), id.as_str()], map_contact) {
        Ok(contact) => Ok(Some(contact)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn map_contact(row: &Row<'_>) -> rusqlite::Result<RawContact> {
    let id_str: String = row.get(0)?;
    let is_owned: i32 = row.get(4)?;
    Ok(RawContact {
        id: Wid::parse(&id_str),
        phone_number: row.get(1)?,
        address_book_name: row.get(2)?,
        profile_nickname: row.get(3)?,
        is_owned_contact: is_owned != 0,
        profile_pic_url: row.get(5)?,
    })
}
