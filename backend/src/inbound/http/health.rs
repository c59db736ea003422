//! Health endpoint.
//!
//! ```text
//! GET /health
//! ```
//!
//! Always answers 200; component status travels in the body.

use actix_web::{HttpResponse, get, web};
use tracing::warn;

use crate::domain::endpoints::{Endpoint, HealthRequest, HealthResponse};
use crate::inbound::http::codec::{HealthBody, encode_health};
use crate::inbound::http::state::HttpState;

/// Report service and storage health.
#[utoipa::path(
    get,
    path = "/health",
    description = "Health of the service and its store. Always 200; degraded components carry status \"err\".",
    responses(
        (status = 200, description = "Health records", body = HealthBody)
    ),
    tags = ["health"],
    operation_id = "health"
)]
#[get("/health")]
pub async fn health(state: web::Data<HttpState>) -> HttpResponse {
    match state.health.call(HealthRequest).await {
        Ok(response) => encode_health(response),
        Err(error) => {
            warn!(%error, "health endpoint rejected; reporting no records");
            encode_health(HealthResponse { health: Vec::new() })
        }
    }
}
