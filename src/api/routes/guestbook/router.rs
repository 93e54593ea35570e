//! Router for the guest book. Guests write to it from the invitation
//! page and anyone with the guest book capability moderates it.

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use super::{db as guestbook_db, public};
use crate::access::Capability;
use crate::api::Subject;
use crate::api::public::{ApiError, require_text};
use crate::api::routes::access::guard;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_entries(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<Vec<public::GuestBookEntry>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::EditGuestBook).await?;
    Ok(Json(guestbook_db::list_entries(&db, wedding.id).await?))
}

async fn remove_entry(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, entry_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::EditGuestBook).await?;

    if guestbook_db::delete_entry(&db, wedding.id, entry_id).await? == 0 {
        return Err(ApiError::not_found(format!(
            "Guest book entry {} not found on wedding {}",
            entry_id, wedding.id
        )));
    }
    tracing::info!(
        "User {} removed guest book entry {} from wedding {}",
        user_id,
        entry_id,
        wedding.id
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn invite_entries(
    State(state): State<SharedState>,
    Path(unique_url): Path<String>,
) -> Result<Json<Vec<public::GuestBookEntry>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::find_invite(&db, &unique_url).await?;
    Ok(Json(guestbook_db::list_entries(&db, wedding.id).await?))
}

async fn sign_guest_book(
    State(state): State<SharedState>,
    Path(unique_url): Path<String>,
    Json(payload): Json<public::CreateEntryRequest>,
) -> Result<(StatusCode, Json<public::GuestBookEntry>), ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::find_invite(&db, &unique_url).await?;

    let guest_name = require_text("guest_name", &payload.guest_name)?;
    let message = require_text("message", &payload.message)?;
    let entry = guestbook_db::insert_entry(&db, wedding.id, guest_name, message).await?;
    tracing::info!("Guest book entry {} added to wedding {}", entry.id, wedding.id);

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Create the moderation router, mounted under `/weddings`
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/{id}/guestbook", get(list_entries))
        .route("/{id}/guestbook/{entry_id}", delete(remove_entry))
}

/// Create the guest facing router, mounted under `/invite`
pub fn invite_router() -> Router<SharedState> {
    Router::new().route(
        "/{unique_url}/guestbook",
        get(invite_entries).post(sign_guest_book),
    )
}
