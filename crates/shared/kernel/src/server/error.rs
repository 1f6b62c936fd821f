use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::borrow::Cow;
use tracing::warn;
use utoipa::ToSchema;

/// Body of every failed API response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Generic, caller-safe description of the failure
    pub error: String,
}

/// Errors returned by HTTP handlers.
///
/// The message is sent to the caller as is, so it must never carry the
/// underlying cause; handlers log the cause before converting.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: Cow<'static, str> },
    #[error("{message}")]
    Internal { message: Cow<'static, str> },
}

impl ApiError {
    pub fn bad_request(message: impl Into<Cow<'static, str>>) -> Self {
        Self::BadRequest { message: message.into() }
    }

    pub fn internal(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Internal { message: message.into() }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(status = %rejection.status(), reason = %rejection.body_text(), "Rejected request body");
        Self::bad_request("Invalid request body")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (Self::BadRequest { message } | Self::Internal { message }) = self;

        (status, Json(ErrorBody { error: message.into_owned() })).into_response()
    }
}
