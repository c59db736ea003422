//! Catalogue service entry-point: loads settings, selects the store and runs
//! the HTTP server.

mod server;

use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use server::{ServerConfig, ServerSettings, build_http_state, build_store, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load().map_err(std::io::Error::other)?;
    let store = build_store(&settings).await?;
    let http_state = build_http_state(store, server::open_images(&settings.images()));

    let config = ServerConfig::new(settings.bind_addr()?);
    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::catalogue_metrics()?));

    create_server(http_state, config)?.await
}
