//! Router for the weddings API

use std::sync::{Arc, RwLock};

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use axum_extra::extract::Query;
use chrono::Utc;
use uuid::Uuid;

use super::{db as weddings_db, public};
use crate::access::Capability;
use crate::api::Subject;
use crate::api::public::{ApiError, require_optional_text, require_text};
use crate::api::routes::access::guard;
use crate::api::routes::users::db as users_db;
use crate::api::state::AppState;
use crate::countdown::{parse_date, parse_time_of_day, parse_timezone};

type SharedState = Arc<RwLock<AppState>>;

fn new_unique_url() -> String {
    Uuid::new_v4().simple().to_string()[..12].to_string()
}

async fn create_wedding(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Json(payload): Json<public::CreateWeddingRequest>,
) -> Result<(StatusCode, Json<public::Wedding>), ApiError> {
    let (db, config) = {
        let shared_state = state.read().unwrap();
        (shared_state.db.clone(), shared_state.config.clone())
    };

    // The id comes from a trusted header but may name a deleted user
    if users_db::find_user_by_id(&db, user_id).await?.is_none() {
        return Err(ApiError::with_status(
            StatusCode::UNAUTHORIZED,
            format!("User {} not found", user_id),
        ));
    }

    // Only the date is hard validated, time and zone degrade at render time
    let wedding_date = parse_date(&payload.wedding_date)?.format("%Y-%m-%d").to_string();

    let wedding = public::Wedding {
        id: 0,
        user_id,
        unique_url: new_unique_url(),
        bride: require_text("bride", &payload.bride)?,
        groom: require_text("groom", &payload.groom)?,
        wedding_date,
        wedding_time: payload.wedding_time.unwrap_or(config.default_wedding_time),
        timezone: payload.timezone.unwrap_or(config.default_timezone),
        venue: require_text("venue", &payload.venue)?,
        is_public: payload.is_public.unwrap_or(true),
    };
    let wedding = weddings_db::insert_wedding(&db, wedding).await?;
    tracing::info!("User {} created wedding {}", user_id, wedding.id);

    Ok((StatusCode::CREATED, Json(wedding)))
}

async fn get_wedding(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
) -> Result<Json<public::Wedding>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_visible(&db, id, user_id).await?;
    Ok(Json(wedding))
}

async fn update_wedding(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Json(mut payload): Json<public::UpdateWeddingRequest>,
) -> Result<Json<public::Wedding>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_capability(&db, id, user_id, Capability::EditDetails).await?;

    payload.bride = require_optional_text("bride", payload.bride.take())?;
    payload.groom = require_optional_text("groom", payload.groom.take())?;
    payload.venue = require_optional_text("venue", payload.venue.take())?;
    if let Some(date) = payload.wedding_date.take() {
        payload.wedding_date = Some(parse_date(&date)?.format("%Y-%m-%d").to_string());
    }

    let updated = weddings_db::update_wedding(&db, wedding.id, payload)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Wedding {} not found", id)))?;
    tracing::info!("User {} updated wedding {}", user_id, wedding.id);

    Ok(Json(updated))
}

fn countdown_response(
    state: &SharedState,
    wedding: &public::Wedding,
    query: public::CountdownQuery,
) -> Result<public::CountdownResponse, ApiError> {
    let (calculator, refresh_interval_ms) = {
        let shared_state = state.read().unwrap();
        (
            shared_state.calculator,
            shared_state.config.countdown_refresh_ms,
        )
    };

    if parse_time_of_day(&wedding.wedding_time).is_none() {
        tracing::warn!(
            "Wedding {} has unreadable time {:?}, using {}",
            wedding.id,
            wedding.wedding_time,
            calculator.fallback_time
        );
    }
    let zone = parse_timezone(&wedding.timezone).unwrap_or_else(|| {
        tracing::warn!(
            "Wedding {} has unknown timezone {:?}, using {}",
            wedding.id,
            wedding.timezone,
            calculator.fallback_zone
        );
        calculator.fallback_zone
    });

    let now = query.at.unwrap_or_else(Utc::now);
    let target = calculator.target_instant(
        &wedding.wedding_date,
        &wedding.wedding_time,
        &wedding.timezone,
    )?;
    let remaining = calculator.compute(
        &wedding.wedding_date,
        &wedding.wedding_time,
        &wedding.timezone,
        now,
    )?;

    Ok(public::CountdownResponse {
        remaining,
        target: target.to_rfc3339(),
        timezone: zone.name().to_string(),
        refresh_interval_ms,
    })
}

async fn wedding_countdown(
    State(state): State<SharedState>,
    Subject(user_id): Subject,
    Path(id): Path<i64>,
    Query(query): Query<public::CountdownQuery>,
) -> Result<Json<public::CountdownResponse>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::require_visible(&db, id, user_id).await?;
    Ok(Json(countdown_response(&state, &wedding, query)?))
}

async fn invite_countdown(
    State(state): State<SharedState>,
    Path(unique_url): Path<String>,
    Query(query): Query<public::CountdownQuery>,
) -> Result<Json<public::CountdownResponse>, ApiError> {
    let db = state.read().unwrap().db.clone();
    let wedding = guard::find_invite(&db, &unique_url).await?;
    Ok(Json(countdown_response(&state, &wedding, query)?))
}

/// Create the weddings router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", axum::routing::post(create_wedding))
        .route("/{id}", get(get_wedding).put(update_wedding))
        .route("/{id}/countdown", get(wedding_countdown))
}

/// Create the guest facing router
pub fn invite_router() -> Router<SharedState> {
    Router::new().route("/{unique_url}/countdown", get(invite_countdown))
}
