//! Catalogue read endpoints.
//!
//! ```text
//! GET /catalogue?tags=a,b&sort=price&page=1&size=10
//! GET /catalogue/size?tags=a,b
//! GET /catalogue/{id}
//! GET /tags
//! ```
//!
//! Each handler decodes its request, calls the route's breaker-wrapped
//! endpoint and encodes the typed response.

use actix_web::{HttpRequest, HttpResponse, get, web};

use crate::domain::endpoints::{Endpoint, TagsRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::codec::{
    SizeBody, TagsBody, decode_count, decode_get, decode_list, encode_count, encode_get,
    encode_list, encode_tags,
};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::schemas::CatalogueItemSchema;
use crate::inbound::http::state::HttpState;

/// List one page of catalogue items.
#[utoipa::path(
    get,
    path = "/catalogue",
    description = "Filter items by tag (any match), sort and page them. Malformed paging parameters fall back to their defaults.",
    params(
        ("tags" = Option<String>, Query, description = "Comma-separated tags; an item matches when it carries any of them", example = "red,blue"),
        ("sort" = Option<String>, Query, description = "Sort key: id, name, price or count (default id)", example = "price"),
        ("page" = Option<u32>, Query, description = "1-based page number (default 1)"),
        ("size" = Option<u32>, Query, description = "Page size (default 10)")
    ),
    responses(
        (status = 200, description = "Items on the requested page", body = Vec<CatalogueItemSchema>),
        (status = 500, description = "Storage failure or open circuit breaker", body = ErrorBody)
    ),
    tags = ["catalogue"],
    operation_id = "listCatalogue"
)]
#[get("/catalogue")]
pub async fn list_catalogue(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let response = state.list.call(decode_list(req.query_string())).await?;
    Ok(encode_list(&response))
}

/// Count catalogue items matching a tag filter.
#[utoipa::path(
    get,
    path = "/catalogue/size",
    params(
        ("tags" = Option<String>, Query, description = "Comma-separated tags", example = "red,blue")
    ),
    responses(
        (status = 200, description = "Number of matching items", body = SizeBody),
        (status = 500, description = "Storage failure or open circuit breaker", body = ErrorBody)
    ),
    tags = ["catalogue"],
    operation_id = "countCatalogue"
)]
#[get("/catalogue/size")]
pub async fn count_catalogue(
    state: web::Data<HttpState>,
    req: HttpRequest,
) -> ApiResult<HttpResponse> {
    let response = state.count.call(decode_count(req.query_string())).await?;
    Ok(encode_count(&response))
}

/// Fetch one catalogue item.
#[utoipa::path(
    get,
    path = "/catalogue/{id}",
    params(("id" = String, Path, description = "Item identifier")),
    responses(
        (status = 200, description = "The item", body = CatalogueItemSchema),
        (status = 404, description = "No item has this identifier", body = ErrorBody),
        (status = 500, description = "Storage failure or open circuit breaker", body = ErrorBody)
    ),
    tags = ["catalogue"],
    operation_id = "getCatalogueItem"
)]
#[get("/catalogue/{id}")]
pub async fn get_catalogue_item(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> HttpResponse {
    let result = state.get.call(decode_get(id.into_inner())).await;
    encode_get(&result)
}

/// List every distinct tag.
#[utoipa::path(
    get,
    path = "/tags",
    responses(
        (status = 200, description = "Distinct tags, sorted", body = TagsBody),
        (status = 500, description = "Storage failure or open circuit breaker", body = ErrorBody)
    ),
    tags = ["catalogue"],
    operation_id = "listTags"
)]
#[get("/tags")]
pub async fn list_tags(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let response = state.tags.call(TagsRequest).await?;
    Ok(encode_tags(response))
}
