//! Router for the users API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{post, put},
};

use super::{db as users_db, public};
use crate::api::Subject;
use crate::api::public::ApiError;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn create_user(
    State(state): State<SharedState>,
    Json(payload): Json<public::CreateUserRequest>,
) -> Result<(StatusCode, Json<public::User>), ApiError> {
    let db = state.read().unwrap().db.clone();

    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.name.trim().is_empty() {
        return Err(ApiError::with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            "Email and name are required",
        ));
    }
    if users_db::email_exists(&db, email.clone()).await? {
        return Err(ApiError::conflict(format!("User {} already exists", email)));
    }

    let user = users_db::insert_user(&db, email, payload.name.trim().to_string(), false).await?;
    tracing::info!("Created user {}", user.id);

    Ok((StatusCode::CREATED, Json(user)))
}

async fn set_admin(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(payload): Json<public::SetAdminRequest>,
) -> Result<Json<public::User>, ApiError> {
    let db = state.read().unwrap().db.clone();
    if !users_db::is_admin(&db, user_id).await? {
        return Err(ApiError::forbidden(format!(
            "User {} can't change admin rights",
            user_id
        )));
    }

    if users_db::set_admin(&db, id, payload.is_admin).await? == 0 {
        return Err(ApiError::not_found(format!("User {} not found", id)));
    }
    tracing::info!(
        "User {} set admin={} on user {}",
        user_id,
        payload.is_admin,
        id
    );

    let user = users_db::find_user_by_id(&db, id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} not found", id)))?;
    Ok(Json(user))
}

/// Create the users router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(create_user))
        .route("/{id}/admin", put(set_admin))
}
