//! Router for wedding photo metadata

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get},
};

use super::{db as photos_db, public};
use crate::access::Capability;
use crate::api::Subject;
use crate::api::public::{ApiError, require_text};
use crate::api::routes::access::guard;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn list_photos(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<Vec<public::Photo>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_visible(&db, id, user_id).await?;
    Ok(Json(photos_db::list_photos(&db, wedding.id).await?))
}

async fn add_photo(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(payload): Json<public::CreatePhotoRequest>,
) -> Result<(StatusCode, Json<public::Photo>), ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManagePhotos).await?;

    let url = require_text("url", &payload.url)?;
    let photo = photos_db::insert_photo(
        &db,
        wedding.id,
        url,
        payload.caption,
        payload.photo_type.unwrap_or_default(),
    )
    .await?;
    tracing::info!(
        "User {} added photo {} to wedding {}",
        user_id,
        photo.id,
        wedding.id
    );

    Ok((StatusCode::CREATED, Json(photo)))
}

async fn remove_photo(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, photo_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ManagePhotos).await?;

    if photos_db::delete_photo(&db, wedding.id, photo_id).await? == 0 {
        return Err(ApiError::not_found(format!(
            "Photo {} not found on wedding {}",
            photo_id, wedding.id
        )));
    }
    tracing::info!(
        "User {} removed photo {} from wedding {}",
        user_id,
        photo_id,
        wedding.id
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn invite_photos(
    State(state): State<SharedState>,
    Path(unique_url): Path<String>,
) -> Result<Json<Vec<public::Photo>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::find_invite(&db, &unique_url).await?;
    Ok(Json(photos_db::list_photos(&db, wedding.id).await?))
}

/// Create the photos router, mounted under `/weddings`
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/{id}/photos", get(list_photos).post(add_photo))
        .route("/{id}/photos/{photo_id}", delete(remove_photo))
}

/// Create the guest facing router, mounted under `/invite`
pub fn invite_router() -> Router<SharedState> {
    Router::new().route("/{unique_url}/photos", get(invite_photos))
}
