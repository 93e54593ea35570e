//! Public API types

use std::fmt::Display;

use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::access::AccessError;
use crate::countdown::CountdownError;

// Errors

pub struct ApiError {
    status: StatusCode,
    error: anyhow::Error,
}

impl ApiError {
    pub fn with_status(status: StatusCode, message: impl Display) -> Self {
        Self {
            status,
            error: anyhow::anyhow!("{}", message),
        }
    }

    pub fn not_found(message: impl Display) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, message)
    }

    pub fn forbidden(message: impl Display) -> Self {
        Self::with_status(StatusCode::FORBIDDEN, message)
    }

    pub fn conflict(message: impl Display) -> Self {
        Self::with_status(StatusCode::CONFLICT, message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

/// Trimmed `value`, or a 422 naming `field` when it's blank
pub fn require_text(field: &str, value: &str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::with_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("{} is required", field),
        ));
    }
    Ok(value.to_string())
}

/// Like [`require_text`] for fields that may be left out of an update
pub fn require_optional_text(
    field: &str,
    value: Option<String>,
) -> Result<Option<String>, ApiError> {
    value.map(|v| require_text(field, &v)).transpose()
}

/// Convert `ApiError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            // Always log the error
            tracing::error!("{}", self.error);
            return (
                self.status,
                format!("Something went wrong: {}", self.error),
            )
                .into_response();
        }

        tracing::debug!("Request rejected ({}): {}", self.status, self.error);
        (self.status, self.error.to_string()).into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, ApiError>`. Bad input
/// from the domain modules maps to a client error, everything else is
/// a 500.
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let error = err.into();
        let status = if error.downcast_ref::<CountdownError>().is_some() {
            StatusCode::UNPROCESSABLE_ENTITY
        } else if error.downcast_ref::<AccessError>().is_some() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        Self { status, error }
    }
}

// Re-export public types from each route

pub mod access {
    pub use crate::api::routes::access::public::*;
}

pub mod analytics {
    pub use crate::api::routes::analytics::public::*;
}

pub mod guestbook {
    pub use crate::api::routes::guestbook::public::*;
}

pub mod guests {
    pub use crate::api::routes::guests::public::*;
}

pub mod photos {
    pub use crate::api::routes::photos::public::*;
}

pub mod users {
    pub use crate::api::routes::users::public::*;
}

pub mod weddings {
    pub use crate::api::routes::weddings::public::*;
}
