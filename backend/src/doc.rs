//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every catalogue route together with the schema
//! wrappers from [`crate::inbound::http::schemas`], so domain types stay free
//! of utoipa derives. The document backs Swagger UI in debug builds and is
//! exported by `cargo run --bin openapi-dump`.

use crate::inbound::http::codec::{HealthBody, SizeBody, TagsBody};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::{CatalogueItemSchema, HealthRecordSchema, HealthStatusSchema};
use utoipa::OpenApi;

/// OpenAPI document for the catalogue API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalogue service API",
        description = "Read-only product catalogue with tag filtering, paging and health reporting.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::catalogue::list_catalogue,
        crate::inbound::http::catalogue::count_catalogue,
        crate::inbound::http::catalogue::get_catalogue_item,
        crate::inbound::http::catalogue::list_tags,
        crate::inbound::http::images::get_image,
        crate::inbound::http::health::health,
    ),
    components(schemas(
        CatalogueItemSchema,
        HealthRecordSchema,
        HealthStatusSchema,
        ErrorBody,
        SizeBody,
        TagsBody,
        HealthBody,
    )),
    tags(
        (name = "catalogue", description = "Catalogue listing, lookup and tags"),
        (name = "images", description = "Product images"),
        (name = "health", description = "Service and store health")
    )
)]
pub struct ApiDoc;
