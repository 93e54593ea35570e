//! Database queries for the guests API
use anyhow::{Error, Result};
use rusqlite::{OptionalExtension, Row};
use tokio_rusqlite::Connection;

use super::public::{CreateGuestRequest, Guest, RsvpRequest, RsvpStatus, UpdateGuestRequest};

const GUEST_COLUMNS: &str = r"
    id,
    wedding_id,
    name,
    email,
    phone,
    rsvp_status,
    plus_one,
    plus_one_name,
    additional_guests,
    message,
    side,
    category,
    dietary_restrictions,
    created_at,
    responded_at
";

fn guest_from_row(i: &Row<'_>) -> rusqlite::Result<Guest> {
    Ok(Guest {
        id: i.get(0)?,
        wedding_id: i.get(1)?,
        name: i.get(2)?,
        email: i.get(3)?,
        phone: i.get(4)?,
        rsvp_status: i.get(5)?,
        plus_one: i.get(6)?,
        plus_one_name: i.get(7)?,
        additional_guests: i.get(8)?,
        message: i.get(9)?,
        side: i.get(10)?,
        category: i.get(11)?,
        dietary_restrictions: i.get(12)?,
        created_at: i.get(13)?,
        responded_at: i.get(14)?,
    })
}

fn select_guest(conn: &rusqlite::Connection, id: i64) -> rusqlite::Result<Option<Guest>> {
    let sql = format!("SELECT {} FROM guests WHERE id = ?1", GUEST_COLUMNS);
    conn.query_row(&sql, [id], guest_from_row).optional()
}

pub async fn list_guests(db: &Connection, wedding_id: i64) -> Result<Vec<Guest>, Error> {
    let guests = db
        .call(move |conn| {
            let sql = format!(
                "SELECT {} FROM guests WHERE wedding_id = ?1 ORDER BY id",
                GUEST_COLUMNS
            );
            let mut stmt = conn.prepare(&sql)?;
            let guests = stmt
                .query_map([wedding_id], guest_from_row)?
                .collect::<Result<Vec<Guest>, _>>()?;
            Ok(guests)
        })
        .await?;
    Ok(guests)
}

pub async fn insert_guest(
    db: &Connection,
    wedding_id: i64,
    guest: CreateGuestRequest,
) -> Result<Guest, Error> {
    let guest = db
        .call(move |conn| {
            let status = guest.rsvp_status.unwrap_or_default();
            conn.execute(
                r"
                INSERT INTO guests
                  (wedding_id, name, email, phone, rsvp_status, plus_one, plus_one_name,
                   additional_guests, side, category, dietary_restrictions, responded_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                        CASE WHEN ?5 = 'pending' THEN NULL ELSE CURRENT_TIMESTAMP END)
                ",
                tokio_rusqlite::params![
                    wedding_id,
                    guest.name,
                    guest.email,
                    guest.phone,
                    status,
                    guest.plus_one.unwrap_or(false),
                    guest.plus_one_name,
                    guest.additional_guests.unwrap_or(0),
                    guest.side.unwrap_or_default(),
                    guest.category.unwrap_or_else(|| String::from("family")),
                    guest.dietary_restrictions,
                ],
            )?;
            let guest = select_guest(conn, conn.last_insert_rowid())?
                .ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            Ok(guest)
        })
        .await?;
    Ok(guest)
}

/// Update a guest of the wedding. Moving back to pending clears the
/// response time, any other status change stamps it.
pub async fn update_guest(
    db: &Connection,
    wedding_id: i64,
    guest_id: i64,
    update: UpdateGuestRequest,
) -> Result<Option<Guest>, Error> {
    let guest = db
        .call(move |conn| {
            let changed = conn.execute(
                r"
                UPDATE guests SET
                  name = COALESCE(?3, name),
                  email = COALESCE(?4, email),
                  phone = COALESCE(?5, phone),
                  responded_at = CASE
                    WHEN ?6 IS NULL OR ?6 = rsvp_status THEN responded_at
                    WHEN ?6 = 'pending' THEN NULL
                    ELSE CURRENT_TIMESTAMP
                  END,
                  rsvp_status = COALESCE(?6, rsvp_status),
                  plus_one = COALESCE(?7, plus_one),
                  plus_one_name = COALESCE(?8, plus_one_name),
                  additional_guests = COALESCE(?9, additional_guests),
                  side = COALESCE(?10, side),
                  category = COALESCE(?11, category),
                  dietary_restrictions = COALESCE(?12, dietary_restrictions)
                WHERE wedding_id = ?1 AND id = ?2
                ",
                tokio_rusqlite::params![
                    wedding_id,
                    guest_id,
                    update.name,
                    update.email,
                    update.phone,
                    update.rsvp_status,
                    update.plus_one,
                    update.plus_one_name,
                    update.additional_guests,
                    update.side,
                    update.category,
                    update.dietary_restrictions,
                ],
            )?;
            if changed == 0 {
                return Ok(None);
            }
            Ok(select_guest(conn, guest_id)?)
        })
        .await?;
    Ok(guest)
}

/// Returns the number of guests removed
pub async fn delete_guest(db: &Connection, wedding_id: i64, guest_id: i64) -> Result<usize, Error> {
    let removed = db
        .call(move |conn| {
            let removed = conn.execute(
                "DELETE FROM guests WHERE wedding_id = ?1 AND id = ?2",
                [wedding_id, guest_id],
            )?;
            Ok(removed)
        })
        .await?;
    Ok(removed)
}

/// Record an answer from the invitation page. The guest is matched on
/// email when one is given, otherwise on name ignoring case. Someone not
/// on the list is added with the answer they gave.
pub async fn record_rsvp(db: &Connection, wedding_id: i64, rsvp: RsvpRequest) -> Result<Guest, Error> {
    let guest = db
        .call(move |conn| {
            let tx = conn.transaction()?;
            let existing: Option<i64> = tx
                .query_row(
                    r"
                    SELECT id FROM guests
                    WHERE wedding_id = ?1
                      AND ((?2 IS NOT NULL AND lower(email) = lower(?2))
                           OR lower(name) = lower(?3))
                    ORDER BY (lower(email) = lower(?2)) DESC, id
                    LIMIT 1
                    ",
                    tokio_rusqlite::params![wedding_id, rsvp.email, rsvp.name],
                    |row| row.get(0),
                )
                .optional()?;

            let status = RsvpStatus::from(rsvp.rsvp_status);
            let guest_id = match existing {
                Some(id) => {
                    tx.execute(
                        r"
                        UPDATE guests SET
                          rsvp_status = ?2,
                          email = COALESCE(?3, email),
                          plus_one = COALESCE(?4, plus_one),
                          plus_one_name = COALESCE(?5, plus_one_name),
                          additional_guests = COALESCE(?6, additional_guests),
                          message = COALESCE(?7, message),
                          dietary_restrictions = COALESCE(?8, dietary_restrictions),
                          responded_at = CURRENT_TIMESTAMP
                        WHERE id = ?1
                        ",
                        tokio_rusqlite::params![
                            id,
                            status,
                            rsvp.email,
                            rsvp.plus_one,
                            rsvp.plus_one_name,
                            rsvp.additional_guests,
                            rsvp.message,
                            rsvp.dietary_restrictions,
                        ],
                    )?;
                    id
                }
                None => {
                    tx.execute(
                        r"
                        INSERT INTO guests
                          (wedding_id, name, email, rsvp_status, plus_one, plus_one_name,
                           additional_guests, message, dietary_restrictions, responded_at)
                        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, CURRENT_TIMESTAMP)
                        ",
                        tokio_rusqlite::params![
                            wedding_id,
                            rsvp.name,
                            rsvp.email,
                            status,
                            rsvp.plus_one.unwrap_or(false),
                            rsvp.plus_one_name,
                            rsvp.additional_guests.unwrap_or(0),
                            rsvp.message,
                            rsvp.dietary_restrictions,
                        ],
                    )?;
                    tx.last_insert_rowid()
                }
            };

            let guest = select_guest(&tx, guest_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?;
            tx.commit()?;
            Ok(guest)
        })
        .await?;
    Ok(guest)
}
