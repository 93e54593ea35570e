//! Database queries for the weddings API
use anyhow::{Error, Result};
use rusqlite::{OptionalExtension, Row};
use tokio_rusqlite::Connection;

use super::public::{UpdateWeddingRequest, Wedding};

const WEDDING_COLUMNS: &str = r"
    id,
    user_id,
    unique_url,
    bride,
    groom,
    wedding_date,
    wedding_time,
    timezone,
    venue,
    is_public
";

fn wedding_from_row(i: &Row<'_>) -> rusqlite::Result<Wedding> {
    Ok(Wedding {
        id: i.get(0)?,
        user_id: i.get(1)?,
        unique_url: i.get(2)?,
        bride: i.get(3)?,
        groom: i.get(4)?,
        wedding_date: i.get(5)?,
        wedding_time: i.get(6)?,
        timezone: i.get(7)?,
        venue: i.get(8)?,
        is_public: i.get(9)?,
    })
}

pub async fn get_wedding_by_id(db: &Connection, id: i64) -> Result<Option<Wedding>, Error> {
    let wedding = db
        .call(move |conn| {
            let sql = format!("SELECT {} FROM weddings WHERE id = ?1", WEDDING_COLUMNS);
            let wedding = conn.query_row(&sql, [id], wedding_from_row).optional()?;
            Ok(wedding)
        })
        .await?;
    Ok(wedding)
}

pub async fn get_wedding_by_url(
    db: &Connection,
    unique_url: String,
) -> Result<Option<Wedding>, Error> {
    let wedding = db
        .call(move |conn| {
            let sql = format!(
                "SELECT {} FROM weddings WHERE unique_url = ?1",
                WEDDING_COLUMNS
            );
            let wedding = conn
                .query_row(&sql, [unique_url], wedding_from_row)
                .optional()?;
            Ok(wedding)
        })
        .await?;
    Ok(wedding)
}

/// Insert a wedding with `id` ignored and return it as stored
pub async fn insert_wedding(db: &Connection, wedding: Wedding) -> Result<Wedding, Error> {
    let wedding = db
        .call(move |conn| {
            conn.execute(
                r"
                INSERT INTO weddings
                  (user_id, unique_url, bride, groom, wedding_date, wedding_time, timezone, venue, is_public)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                ",
                tokio_rusqlite::params![
                    wedding.user_id,
                    &wedding.unique_url,
                    &wedding.bride,
                    &wedding.groom,
                    &wedding.wedding_date,
                    &wedding.wedding_time,
                    &wedding.timezone,
                    &wedding.venue,
                    wedding.is_public,
                ],
            )?;
            Ok(Wedding {
                id: conn.last_insert_rowid(),
                ..wedding
            })
        })
        .await?;
    Ok(wedding)
}

pub async fn update_wedding(
    db: &Connection,
    id: i64,
    changes: UpdateWeddingRequest,
) -> Result<Option<Wedding>, Error> {
    db.call(move |conn| {
        conn.execute(
            r"
            UPDATE weddings SET
              bride = COALESCE(?2, bride),
              groom = COALESCE(?3, groom),
              wedding_date = COALESCE(?4, wedding_date),
              wedding_time = COALESCE(?5, wedding_time),
              timezone = COALESCE(?6, timezone),
              venue = COALESCE(?7, venue),
              is_public = COALESCE(?8, is_public)
            WHERE id = ?1
            ",
            tokio_rusqlite::params![
                id,
                changes.bride,
                changes.groom,
                changes.wedding_date,
                changes.wedding_time,
                changes.timezone,
                changes.venue,
                changes.is_public,
            ],
        )?;
        Ok(())
    })
    .await?;

    get_wedding_by_id(db, id).await
}
