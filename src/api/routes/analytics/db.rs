//! Database queries for the analytics API
use anyhow::{Error, Result};
use tokio_rusqlite::Connection;

use super::public::WeddingAnalytics;

pub async fn wedding_analytics(db: &Connection, wedding_id: i64) -> Result<WeddingAnalytics, Error> {
    let analytics = db
        .call(move |conn| {
            let analytics = conn.query_row(
                r"
                SELECT
                  COUNT(*),
                  COALESCE(SUM(rsvp_status = 'confirmed'), 0),
                  COALESCE(SUM(rsvp_status = 'declined'), 0),
                  COALESCE(SUM(rsvp_status = 'maybe'), 0),
                  COALESCE(SUM(rsvp_status = 'pending'), 0),
                  COALESCE(SUM(CASE WHEN rsvp_status = 'confirmed'
                                    THEN 1 + plus_one + additional_guests
                                    ELSE 0 END), 0),
                  (SELECT COUNT(*) FROM guest_book_entries WHERE wedding_id = ?1),
                  (SELECT COUNT(*) FROM photos WHERE wedding_id = ?1)
                FROM guests
                WHERE wedding_id = ?1
                ",
                [wedding_id],
                |i| {
                    Ok(WeddingAnalytics {
                        total_guests: i.get(0)?,
                        confirmed: i.get(1)?,
                        declined: i.get(2)?,
                        maybe: i.get(3)?,
                        pending: i.get(4)?,
                        expected_attendance: i.get(5)?,
                        guest_book_entries: i.get(6)?,
                        photos: i.get(7)?,
                    })
                },
            )?;
            Ok(analytics)
        })
        .await?;
    Ok(analytics)
}
