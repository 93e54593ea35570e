//! Identity of the user making a request
use axum::extract::FromRequestParts;
use http::{StatusCode, request::Parts};

use super::public::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";

/// The authenticated user id taken from the `X-User-Id` header. Login
/// and sessions are handled in front of this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subject(pub i64);

impl<S> FromRequestParts<S> for Subject
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                ApiError::with_status(StatusCode::UNAUTHORIZED, "Missing or invalid X-User-Id")
            })?;
        Ok(Subject(user_id))
    }
}
