//! Database queries for the photos API
use anyhow::{Error, Result};
use rusqlite::Row;
use tokio_rusqlite::Connection;

use super::public::{Photo, PhotoType};

const PHOTO_COLUMNS: &str = "id, wedding_id, url, caption, photo_type, uploaded_at";

fn photo_from_row(i: &Row<'_>) -> rusqlite::Result<Photo> {
    Ok(Photo {
        id: i.get(0)?,
        wedding_id: i.get(1)?,
        url: i.get(2)?,
        caption: i.get(3)?,
        photo_type: i.get(4)?,
        uploaded_at: i.get(5)?,
    })
}

/// Hero photos first, then in upload order
pub async fn list_photos(db: &Connection, wedding_id: i64) -> Result<Vec<Photo>, Error> {
    let photos = db
        .call(move |conn| {
            let sql = format!(
                "SELECT {} FROM photos WHERE wedding_id = ?1 ORDER BY photo_type = 'hero' DESC, id",
                PHOTO_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let photos = stmt
                .query_map([wedding_id], photo_from_row)?
                .collect::<Result<Vec<Photo>, _>>()?;
            Ok(photos)
        })
        .await?;
    Ok(photos)
}

pub async fn insert_photo(
    db: &Connection,
    wedding_id: i64,
    url: String,
    caption: Option<String>,
    photo_type: PhotoType,
) -> Result<Photo, Error> {
    let photo = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO photos (wedding_id, url, caption, photo_type) VALUES (?1, ?2, ?3, ?4)",
                tokio_rusqlite::params![wedding_id, &url, &caption, photo_type],
            )?;
            let sql = format!("SELECT {} FROM photos WHERE id = ?1", PHOTO_COLUMNS);
            let photo = conn.query_row(&sql, [conn.last_insert_rowid()], photo_from_row)?;
            Ok(photo)
        })
        .await?;
    Ok(photo)
}

/// Returns the number of photos removed
pub async fn delete_photo(db: &Connection, wedding_id: i64, photo_id: i64) -> Result<usize, Error> {
    let removed = db
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM photos WHERE wedding_id = ?1 AND id = ?2",
                [wedding_id, photo_id],
            )?;
            Ok(removed)
        })
        .await?;
    Ok(removed)
}
