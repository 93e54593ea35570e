//! Database queries for the guest book API
use anyhow::{Error, Result};
use rusqlite::Row;
use tokio_rusqlite::Connection;

use super::public::GuestBookEntry;

fn entry_from_row(i: &Row<'_>) -> rusqlite::Result<GuestBookEntry> {
    Ok(GuestBookEntry {
        id: i.get(0)?,
        wedding_id: i.get(1)?,
        guest_name: i.get(2)?,
        message: i.get(3)?,
        created_at: i.get(4)?,
    })
}

/// Newest entries first
pub async fn list_entries(db: &Connection, wedding_id: i64) -> Result<Vec<GuestBookEntry>, Error> {
    let entries = db
        .call(move |conn| {
            let mut stmt = conn.prepare(
                r"
                SELECT id, wedding_id, guest_name, message, created_at
                FROM guest_book_entries
                WHERE wedding_id = ?1
                ORDER BY id DESC
                ",
            )?;
            let entries = stmt
                .query_map([wedding_id], entry_from_row)?
                .collect::<Result<Vec<GuestBookEntry>, _>>()?;
            Ok(entries)
        })
        .await?;
    Ok(entries)
}

pub async fn insert_entry(
    db: &Connection,
    wedding_id: i64,
    guest_name: String,
    message: String,
) -> Result<GuestBookEntry, Error> {
    let entry = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO guest_book_entries (wedding_id, guest_name, message) VALUES (?1, ?2, ?3)",
                tokio_rusqlite::params![wedding_id, &guest_name, &message],
            )?;
            let entry = conn.query_row(
                "SELECT id, wedding_id, guest_name, message, created_at FROM guest_book_entries WHERE id = ?1",
                [conn.last_insert_rowid()],
                entry_from_row,
            )?;
            Ok(entry)
        })
        .await?;
    Ok(entry)
}

/// Returns the number of entries removed
pub async fn delete_entry(db: &Connection, wedding_id: i64, entry_id: i64) -> Result<usize, Error> {
    let removed = db
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM guest_book_entries WHERE wedding_id = ?1 AND id = ?2",
                [wedding_id, entry_id],
            )?;
            Ok(removed)
        })
        .await?;
    Ok(removed)
}
