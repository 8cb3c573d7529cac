//! HTTP error surface.
//!
//! Every failure is answered with a short plain-text message. Messages name
//! the failure class only; file paths and parser details stay in the logs.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use labradorite_core::CoreError;

#[derive(Debug, Error)]
pub enum ApiError {
    // ── Routing ──────────────────────────────────────────────────────
    #[error("Specs machine doesn't have that endpoint. Try requesting /help.")]
    UnknownEndpoint,

    #[error("Specs machine doesn't allow that method.")]
    MethodNotAllowed,

    // ── Request ──────────────────────────────────────────────────────
    #[error("Specs machine didn't understand that request.")]
    BadRequest,

    #[error("Specs machine couldn't find that device.")]
    DeviceNotFound,

    #[error("Specs machine couldn't find that property.")]
    KeyNotFound,

    #[error("Specs machine wasn't able to fine-tune. Try broadening your search.")]
    NestedParsing,

    // ── Server ───────────────────────────────────────────────────────
    #[error("Specs machine couldn't find the file it was looking for.")]
    PathMissing,

    #[error("Specs machine encountered some bad data while trying to read files.")]
    DataUnreadable,

    #[error("Specs machine encountered some bad data while trying to write files.")]
    SerializationFailed,

    #[error("Specs machine couldn't supply the proper response.")]
    Internal,
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownEndpoint | Self::DeviceNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::BadRequest | Self::KeyNotFound | Self::NestedParsing => StatusCode::BAD_REQUEST,
            Self::PathMissing
            | Self::DataUnreadable
            | Self::SerializationFailed
            | Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(format!("{self}\n"))
    }
}

// ── CoreError → ApiError mapping ─────────────────────────────────────

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        if err.is_request_error() {
            tracing::debug!(error = %err, "lookup rejected");
        } else {
            tracing::warn!(error = %err, "lookup failed on server data");
        }

        match err {
            CoreError::BadRequest { .. } => Self::BadRequest,
            CoreError::DeviceNotFound { .. } => Self::DeviceNotFound,
            CoreError::KeyNotFound { .. } => Self::KeyNotFound,
            CoreError::NestedParsingFailed { .. } => Self::NestedParsing,
            CoreError::PathMissing { .. } => Self::PathMissing,
            CoreError::DataUnreadable { .. } => Self::DataUnreadable,
            CoreError::SerializationFailed { .. } => Self::SerializationFailed,
            // Startup-only failures never reach a request.
            _ => Self::Internal,
        }
    }
}

impl From<actix_web::error::BlockingError> for ApiError {
    fn from(err: actix_web::error::BlockingError) -> Self {
        tracing::error!(error = %err, "blocking lookup task failed");
        Self::Internal
    }
}
