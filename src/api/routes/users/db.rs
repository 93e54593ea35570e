//! Database queries for the users API
use anyhow::{Error, Result};
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;

use super::public::User;

pub async fn find_user_by_id(db: &Connection, id: i64) -> Result<Option<User>, Error> {
    let user = db
        .call(move |conn| {
            let user = conn
                .query_row(
                    "SELECT id, email, name, is_admin FROM users WHERE id = ?1",
                    [id],
                    |i| {
                        Ok(User {
                            id: i.get(0)?,
                            email: i.get(1)?,
                            name: i.get(2)?,
                            is_admin: i.get(3)?,
                        })
                    },
                )
                .optional()?;
            Ok(user)
        })
        .await?;
    Ok(user)
}

pub async fn email_exists(db: &Connection, email: String) -> Result<bool, Error> {
    let exists = db
        .call(move |conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)",
                [email],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
        .await?;
    Ok(exists)
}

pub async fn insert_user(
    db: &Connection,
    email: String,
    name: String,
    is_admin: bool,
) -> Result<User, Error> {
    let user = db
        .call(move |conn| {
            conn.execute(
                "INSERT INTO users (email, name, is_admin) VALUES (?1, ?2, ?3)",
                tokio_rusqlite::params![&email, &name, is_admin],
            )?;
            Ok(User {
                id: conn.last_insert_rowid(),
                email,
                name,
                is_admin,
            })
        })
        .await?;
    Ok(user)
}

/// Returns the number of users changed
pub async fn set_admin(db: &Connection, id: i64, is_admin: bool) -> Result<usize, Error> {
    let changed = db
        .call(move |conn| {
            let changed = conn.execute(
                "UPDATE users SET is_admin = ?2 WHERE id = ?1",
                tokio_rusqlite::params![id, is_admin],
            )?;
            Ok(changed)
        })
        .await?;
    Ok(changed)
}

/// Admins may manage sharing on any wedding
pub async fn is_admin(db: &Connection, id: i64) -> Result<bool, Error> {
    Ok(find_user_by_id(db, id)
        .await?
        .is_some_and(|user| user.is_admin))
}
