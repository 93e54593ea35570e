//! Router for the guest list and RSVPs

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};

use super::{db as guests_db, public};
use crate::access::Capability;
use crate::api::Subject;
use crate::api::public::{ApiError, require_optional_text, require_text};
use crate::api::routes::access::guard;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_guests(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<Vec<public::Guest>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManageGuests).await?;
    Ok(Json(guests_db::list_guests(&db, wedding.id).await?))
}

async fn add_guest(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(mut payload): Json<public::CreateGuestRequest>,
) -> Result<(StatusCode, Json<public::Guest>), ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManageGuests).await?;

    payload.name = require_text("name", &payload.name)?;
    let guest = guests_db::insert_guest(&db, wedding.id, payload).await?;
    tracing::info!(
        "User {} added guest {} to wedding {}",
        user_id,
        guest.id,
        wedding.id
    );

    Ok((StatusCode::CREATED, Json(guest)))
}

async fn update_guest(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, guest_id)): Path<(i64, i64)>,
    Json(mut payload): Json<public::UpdateGuestRequest>,
) -> Result<Json<public::Guest>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManageGuests).await?;

    payload.name = require_optional_text("name", payload.name.take())?;
    let guest = guests_db::update_guest(&db, wedding.id, guest_id, payload)
        .await?
        .ok_or_else(|| {
            ApiError::not_found(format!(
                "Guest {} not found on wedding {}",
                guest_id, wedding.id
            ))
        })?;
    tracing::info!(
        "User {} updated guest {} on wedding {}",
        user_id,
        guest.id,
        wedding.id
    );

    Ok(Json(guest))
}

async fn remove_guest(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, guest_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManageGuests).await?;

    if guests_db::delete_guest(&db, wedding.id, guest_id).await? == 0 {
        return Err(ApiError::not_found(format!(
            "Guest {} not found on wedding {}",
            guest_id, wedding.id
        )));
    }
    tracing::info!(
        "User {} removed guest {} from wedding {}",
        user_id,
        guest_id,
        wedding.id
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn rsvp(
    State(state): State<SharedState>,
    Path(unique_url): Path<String>,
    Json(mut payload): Json<public::RsvpRequest>,
) -> Result<Json<public::RsvpResponse>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::find_invite(&db, &unique_url).await?;

    payload.name = require_text("name", &payload.name)?;
    payload.email = payload
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    let guest = guests_db::record_rsvp(&db, wedding.id, payload).await?;
    tracing::info!(
        "Guest {} answered {} for wedding {}",
        guest.id,
        guest.rsvp_status.as_str(),
        wedding.id
    );

    Ok(Json(public::RsvpResponse::from(&guest)))
}

/// Create the guest list router, mounted under `/weddings`
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/{id}/guests", get(list_guests).post(add_guest))
        .route(
            "/{id}/guests/{guest_id}",
            put(update_guest).delete(remove_guest),
        )
}

/// Create the RSVP router, mounted under `/invite`
pub fn invite_router() -> Router<SharedState> {
    Router::new().route("/{unique_url}/rsvp", post(rsvp))
}
