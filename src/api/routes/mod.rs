//! API routes module

pub mod access;
pub mod analytics;
pub mod guestbook;
pub mod guests;
pub mod photos;
pub mod users;
pub mod weddings;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    let wedding_routes = weddings::router()
        .merge(access::router())
        .merge(guests::router())
        .merge(guestbook::router())
        .merge(photos::router())
        .merge(analytics::router());
    let invite_routes = weddings::invite_router()
        .merge(guests::invite_router())
        .merge(guestbook::invite_router())
        .merge(photos::invite_router());

    Router::new()
        // User routes
        .nest("/users", users::router())
        // Wedding details, sharing and everything the couple manages
        .nest("/weddings", wedding_routes)
        // Guest facing routes keyed by the wedding's unique url
        .nest("/invite", invite_routes)
}
