//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while rendering every
//! failure through one encoder. [`encode_error`] backs both
//! [`ResponseError`] (the generic path for handlers returning
//! `Result<_, Error>`) and the item route, whose success and error bodies
//! differ in shape.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::codec::encode_json;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable failure message.
    #[schema(example = "not found")]
    pub error: String,
    /// Numeric HTTP status.
    #[schema(example = 404)]
    pub status_code: u16,
    /// Canonical reason phrase for `status_code`.
    #[schema(example = "Not Found")]
    pub status_text: String,
}

/// HTTP status for a domain error code: `NotFound` is 404, everything else 500.
#[must_use]
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render `error` as an HTTP response, logging it on the way out.
///
/// Breaker rejections are logged at `warn` so they stand apart from genuine
/// failures.
pub fn encode_error(err: &Error) -> HttpResponse {
    let status = status_for(err.code());
    let trace_id = err.trace_id().map(|id| id.to_string());
    match err.code() {
        ErrorCode::NotFound => {}
        ErrorCode::BreakerOpen => {
            warn!(error = %err, status = status.as_u16(), ?trace_id, "request short-circuited");
        }
        _ => {
            error!(error = %err, status = status.as_u16(), ?trace_id, "request failed");
        }
    }
    let body = ErrorBody {
        error: err.message().to_owned(),
        status_code: status.as_u16(),
        status_text: status.canonical_reason().unwrap_or("Unknown").to_owned(),
    };
    encode_json(status, &body)
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        encode_error(self)
    }
}
