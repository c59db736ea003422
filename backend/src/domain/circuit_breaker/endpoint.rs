//! Endpoint wrapper that routes every call through a [`CircuitBreaker`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::CircuitBreaker;
use crate::domain::Error;
use crate::domain::endpoints::Endpoint;

/// Wraps an endpoint with its route's breaker.
///
/// Rejected calls fail with [`crate::domain::ErrorCode::BreakerOpen`] and
/// never reach the wrapped endpoint. Every error the wrapped endpoint returns
/// counts as a failure, see [`is_fault`](crate::domain::ErrorCode::is_fault).
#[derive(Clone)]
pub struct BreakerEndpoint<E> {
    inner: E,
    breaker: Arc<CircuitBreaker>,
}

impl<E> BreakerEndpoint<E> {
    pub fn new(inner: E, breaker: Arc<CircuitBreaker>) -> Self {
        Self { inner, breaker }
    }

    /// Breaker guarding this endpoint.
    #[must_use]
    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}

#[async_trait]
impl<Req, E> Endpoint<Req> for BreakerEndpoint<E>
where
    Req: Send + 'static,
    E: Endpoint<Req>,
{
    type Response = E::Response;

    async fn call(&self, request: Req) -> Result<E::Response, Error> {
        let Some(permit) = self.breaker.try_acquire() else {
            debug!(breaker = %self.breaker.name(), "call short-circuited");
            return Err(Error::breaker_open(self.breaker.name()));
        };
        let result = self.inner.call(request).await;
        match &result {
            Err(error) if error.code().is_fault() => permit.record_failure(),
            _ => permit.record_success(),
        }
        result
    }
}
