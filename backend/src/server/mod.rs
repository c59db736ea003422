//! Server construction: store selection, pipeline wiring and middleware.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;

pub use config::ServerConfig;
#[cfg(feature = "metrics")]
pub(crate) use metrics::catalogue_metrics;
pub use settings::ServerSettings;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use std::path::Path;
use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use cap_std::{ambient_authority, fs::Dir};
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use catalogue::Trace;
#[cfg(debug_assertions)]
use catalogue::doc::ApiDoc;
use catalogue::domain::CatalogueServiceImpl;
use catalogue::domain::circuit_breaker::CircuitBreakerConfig;
use catalogue::domain::decorators::{decorate, logging};
use catalogue::domain::endpoints::Endpoints;
use catalogue::domain::ports::CatalogueStore;
use catalogue::inbound::http::configure;
use catalogue::inbound::http::state::HttpState;
use catalogue::outbound::memory::InMemoryCatalogueStore;
use catalogue::outbound::persistence::{DbPool, DieselCatalogueStore, PoolConfig};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Select the catalogue store from `settings`.
///
/// A configured database URL selects PostgreSQL; otherwise the JSON fixture
/// seeds an in-memory store.
///
/// # Errors
///
/// Returns an error when the pool cannot be built or the fixture cannot be
/// loaded.
pub async fn build_store(settings: &ServerSettings) -> std::io::Result<Arc<dyn CatalogueStore>> {
    if let Some(url) = settings.database_url() {
        let pool = DbPool::new(PoolConfig::new(url))
            .await
            .map_err(std::io::Error::other)?;
        info!("using PostgreSQL catalogue store");
        return Ok(Arc::new(DieselCatalogueStore::new(pool)));
    }
    let store = InMemoryCatalogueStore::from_json_file(&settings.fixture_path())
        .map_err(std::io::Error::other)?;
    info!(items = store.len(), "using in-memory catalogue store");
    Ok(Arc::new(store))
}

/// Open the image directory, or serve every image as 404 when it is absent.
pub fn open_images(path: &Path) -> Option<Dir> {
    match Dir::open_ambient_dir(path, ambient_authority()) {
        Ok(dir) => Some(dir),
        Err(error) => {
            warn!(path = %path.display(), %error, "image directory unavailable");
            None
        }
    }
}

/// Wire store, logging decorator, endpoints and per-route breakers.
pub fn build_http_state(store: Arc<dyn CatalogueStore>, images: Option<Dir>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let base = Arc::new(CatalogueServiceImpl::new(store, clock.clone()));
    let service = decorate(base, [logging()]);
    let state = HttpState::new(
        Endpoints::new(service),
        CircuitBreakerConfig::default(),
        clock,
    );
    match images {
        Some(dir) => state.with_images(dir),
        None => state,
    }
}

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(http_state: HttpState, config: ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "catalogue service listening");
    Ok(server)
}
