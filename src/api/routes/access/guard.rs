//! Request gating shared by every wedding scoped route
use tokio_rusqlite::Connection;

use super::db as access_db;
use crate::access::{self, Capability};
use crate::api::public::ApiError;
use crate::api::routes::users::db as users_db;
use crate::api::routes::weddings::{db as weddings_db, public::Wedding};

pub async fn find_wedding(db: &Connection, id: i64) -> Result<Wedding, ApiError> {
    weddings_db::get_wedding_by_id(db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Wedding {} not found", id)))
}

/// The wedding for a guest facing route. Private weddings look the same
/// as missing ones to guests.
pub async fn find_invite(db: &Connection, unique_url: &str) -> Result<Wedding, ApiError> {
    weddings_db::get_wedding_by_url(db, unique_url.to_string())
        .await?
        .filter(|w| w.is_public)
        .ok_or_else(|| ApiError::not_found(format!("Invitation {} not found", unique_url)))
}

/// The wedding if the user has any grant on it or is an admin. Anyone
/// else gets a 404 so private weddings can't be found by
/// walking ids.
pub async fn require_visible(db: &Connection, id: i64, user_id: i64) -> Result<Wedding, ApiError> {
    let wedding = find_wedding(db, id).await?;
    let grants = access_db::load_grants(db, &wedding).await?;
    if access::has_grant(&grants, user_id, wedding.id) || users_db::is_admin(db, user_id).await? {
        return Ok(wedding);
    }
    Err(ApiError::not_found(format!("Wedding {} not found", id)))
}

/// The wedding if the user holds `capability` on it
pub async fn require_capability(
    db: &Connection,
    id: i64,
    user_id: i64,
    capability: Capability,
) -> Result<Wedding, ApiError> {
    let wedding = find_wedding(db, id).await?;
    let grants = access_db::load_grants(db, &wedding).await?;
    if !access::allows(&grants, user_id, wedding.id, capability) {
        return Err(ApiError::forbidden(format!(
            "User {} lacks {} on wedding {}",
            user_id, capability, wedding.id
        )));
    }
    Ok(wedding)
}
