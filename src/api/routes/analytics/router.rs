//! Router for wedding analytics

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};

use super::{db as analytics_db, public};
use crate::access::Capability;
use crate::api::Subject;
use crate::api::public::ApiError;
use crate::api::routes::access::guard;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

async fn wedding_analytics(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<public::WeddingAnalytics>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::ViewAnalytics).await?;
    Ok(Json(analytics_db::wedding_analytics(&db, wedding.id).await?))
}

/// Create the analytics router, mounted under `/weddings`
pub fn router() -> Router<SharedState> {
    Router::new().route("/{id}/analytics", get(wedding_analytics))
}
