//! Router for sharing a wedding and checking permissions

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
};
use tokio_rusqlite::Connection;

use super::guard::find_wedding;
use super::{db as access_db, public};
use crate::access::{self, AccessGrant, Role};
use crate::api::Subject;
use crate::api::public::ApiError;
use crate::api::routes::users::db as users_db;
use crate::api::routes::weddings::public::Wedding;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Sharing can only be changed by an owner of the wedding or an admin.
/// Returns the wedding's current grants.
async fn require_sharing_rights(
    db: &Connection,
    wedding: &Wedding,
    user_id: i64,
) -> Result<Vec<AccessGrant>, ApiError> {
    let grants = access_db::load_grants(db, wedding).await?;
    if access::is_owner(&grants, user_id, wedding.id) || users_db::is_admin(db, user_id).await? {
        return Ok(grants);
    }
    Err(ApiError::forbidden(format!(
        "User {} can't manage sharing for wedding {}",
        user_id, wedding.id
    )))
}

async fn list_grants(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<Vec<public::GrantResponse>>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = find_wedding(&db, id).await?;
    let grants = require_sharing_rights(&db, &wedding, user_id).await?;
    Ok(Json(grants.iter().map(public::GrantResponse::from).collect()))
}

async fn share_wedding(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(payload): Json<public::ShareRequest>,
) -> Result<(StatusCode, Json<public::GrantResponse>), ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = find_wedding(&db, id).await?;
    let grants = require_sharing_rights(&db, &wedding, user_id).await?;

    if users_db::find_user_by_id(&db, payload.user_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "User {} not found",
            payload.user_id
        )));
    }
    if grants.iter().any(|g| g.subject_id == payload.user_id) {
        return Err(ApiError::conflict(format!(
            "User {} already has access to wedding {}",
            payload.user_id, wedding.id
        )));
    }

    let role = Role::from_stored(payload.role, payload.permissions.unwrap_or_default());
    access_db::insert_grant(&db, wedding.id, payload.user_id, &role).await?;
    tracing::info!(
        "User {} shared wedding {} with user {} as {}",
        user_id,
        wedding.id,
        payload.user_id,
        role.kind().as_str()
    );

    let grant = AccessGrant::new(payload.user_id, wedding.id, role);
    Ok((StatusCode::CREATED, Json(public::GrantResponse::from(&grant))))
}

async fn update_grant(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, grantee_id)): Path<(i64, i64)>,
    Json(payload): Json<public::UpdateGrantRequest>,
) -> Result<Json<public::GrantResponse>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = find_wedding(&db, id).await?;
    require_sharing_rights(&db, &wedding, user_id).await?;

    let role = Role::from_stored(payload.role, payload.permissions.unwrap_or_default());
    if access_db::update_grant(&db, wedding.id, grantee_id, &role).await? == 0 {
        return Err(ApiError::not_found(format!(
            "User {} has no grant on wedding {}",
            grantee_id, wedding.id
        )));
    }
    tracing::info!(
        "User {} updated grant for user {} on wedding {}",
        user_id,
        grantee_id,
        wedding.id
    );

    let grant = AccessGrant::new(grantee_id, wedding.id, role);
    Ok(Json(public::GrantResponse::from(&grant)))
}

async fn revoke_grant(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path((id, grantee_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = find_wedding(&db, id).await?;
    require_sharing_rights(&db, &wedding, user_id).await?;

    if access_db::delete_grant(&db, wedding.id, grantee_id).await? == 0 {
        return Err(ApiError::not_found(format!(
            "User {} has no grant on wedding {}",
            grantee_id, wedding.id
        )));
    }
    tracing::info!(
        "User {} revoked access for user {} on wedding {}",
        user_id,
        grantee_id,
        wedding.id
    );

    Ok(StatusCode::NO_CONTENT)
}

async fn check_capability(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(payload): Json<public::CheckRequest>,
) -> Result<Json<public::CheckResponse>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = find_wedding(&db, id).await?;
    let grants = access_db::load_grants(&db, &wedding).await?;
    let allowed = access::can_perform(&grants, user_id, wedding.id, &payload.capability)?;
    Ok(Json(public::CheckResponse { allowed }))
}

/// Create the access router, mounted under `/weddings`
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/{id}/access", get(list_grants).post(share_wedding))
        .route("/{id}/access/check", post(check_capability))
        .route(
            "/{id}/access/{user_id}",
            put(update_grant).delete(revoke_grant),
        )
}
