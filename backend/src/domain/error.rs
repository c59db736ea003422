//! Domain-level error types.
//!
//! These errors are transport agnostic. The HTTP adapter maps them to status
//! codes and JSON bodies in `inbound::http::error`.

use crate::domain::TraceId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorCode {
    /// The requested catalogue item does not exist.
    NotFound,
    /// The storage collaborator (or another dependency) failed.
    UpstreamFailure,
    /// A circuit breaker short-circuited the call before it reached the
    /// business logic.
    BreakerOpen,
    /// An unexpected error occurred inside the service itself.
    InternalError,
}

impl ErrorCode {
    /// Whether a call that failed with this code should count against a
    /// route's circuit breaker.
    ///
    /// Every endpoint failure counts, `NotFound` included. Only breaker
    /// rejections are excluded since they never reach the endpoint.
    ///
    /// # Examples
    /// ```
    /// use catalogue::domain::ErrorCode;
    ///
    /// assert!(ErrorCode::UpstreamFailure.is_fault());
    /// assert!(ErrorCode::NotFound.is_fault());
    /// assert!(!ErrorCode::BreakerOpen.is_fault());
    /// ```
    #[must_use]
    pub fn is_fault(self) -> bool {
        !matches!(self, Self::BreakerOpen)
    }
}

/// Domain error payload.
///
/// ## Invariants
/// - `message` is never empty; blank messages are replaced by a generic one.
/// - `trace_id` captures the identifier in scope when the error was built.
///
/// # Examples
/// ```
/// use catalogue::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("not found");
/// assert_eq!(err.code(), ErrorCode::NotFound);
/// assert_eq!(err.to_string(), "not found");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    code: ErrorCode,
    message: String,
    trace_id: Option<TraceId>,
}

const FALLBACK_MESSAGE: &str = "unknown error";

impl Error {
    /// Create a new error, capturing the current [`TraceId`] if one is in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            FALLBACK_MESSAGE.to_owned()
        } else {
            message
        };
        Self {
            code,
            message,
            trace_id: TraceId::current(),
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable message returned to adapters.
    #[must_use]
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Trace identifier captured at construction, if any.
    #[must_use]
    pub fn trace_id(&self) -> Option<TraceId> {
        self.trace_id
    }

    /// Convenience constructor for [`ErrorCode::NotFound`].
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Convenience constructor for [`ErrorCode::UpstreamFailure`].
    pub fn upstream(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::UpstreamFailure, message)
    }

    /// Convenience constructor for [`ErrorCode::BreakerOpen`].
    pub fn breaker_open(route: &str) -> Self {
        Self::new(
            ErrorCode::BreakerOpen,
            format!("circuit breaker open for {route}"),
        )
    }

    /// Convenience constructor for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ErrorCode::NotFound, true)]
    #[case(ErrorCode::UpstreamFailure, true)]
    #[case(ErrorCode::BreakerOpen, false)]
    #[case(ErrorCode::InternalError, true)]
    fn fault_classification(#[case] code: ErrorCode, #[case] expected: bool) {
        assert_eq!(code.is_fault(), expected);
    }

    #[rstest]
    fn blank_messages_fall_back() {
        let err = Error::upstream("   ");
        assert_eq!(err.message(), FALLBACK_MESSAGE);
    }

    #[rstest]
    fn breaker_open_names_the_route() {
        let err = Error::breaker_open("GET /tags");
        assert_eq!(err.code(), ErrorCode::BreakerOpen);
        assert_eq!(err.message(), "circuit breaker open for GET /tags");
    }

    #[rstest]
    fn trace_id_is_none_out_of_scope() {
        assert!(Error::internal("boom").trace_id().is_none());
    }

    #[tokio::test]
    async fn trace_id_is_captured_in_scope() {
        let trace_id: TraceId = "00000000-0000-0000-0000-000000000001"
            .parse()
            .expect("valid UUID");
        let err = TraceId::scope(trace_id, async { Error::not_found("not found") }).await;
        assert_eq!(err.trace_id(), Some(trace_id));
    }
}
