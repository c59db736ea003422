//! Per-route request decoders and response encoders.
//!
//! Decoders never fail: missing or malformed optional parameters fall back
//! to their defaults. Encoders always emit
//! `application/json; charset=utf-8`.

use std::collections::BTreeSet;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use tracing::error;
use url::form_urlencoded;
use utoipa::ToSchema;

use crate::domain::endpoints::{
    CountRequest, CountResponse, GetRequest, GetResponse, HealthResponse, ListRequest,
    ListResponse, TagsResponse,
};
use crate::domain::{DEFAULT_PAGE_NUM, DEFAULT_PAGE_SIZE, Error, HealthRecord, SortKey};
use crate::inbound::http::error::encode_error;
use crate::inbound::http::schemas::HealthRecordSchema;

/// Content type of every JSON response.
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `GET /catalogue/size` body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SizeBody {
    /// Number of items matching the tag filter.
    #[schema(example = 9)]
    pub size: usize,
}

/// `GET /tags` body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TagsBody {
    /// Distinct tags, sorted ascending.
    #[schema(example = json!(["blue", "brown", "red"]))]
    pub tags: Vec<String>,
}

/// `GET /health` body.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HealthBody {
    /// One record per checked component.
    #[schema(value_type = Vec<HealthRecordSchema>)]
    pub health: Vec<HealthRecord>,
}

fn first_param(query: &str, name: &str) -> Option<String> {
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Split a comma-separated tag list, trimming entries and dropping blanks.
///
/// # Examples
/// ```
/// use catalogue::inbound::http::codec::parse_tags;
///
/// let tags = parse_tags("red, blue,,red");
/// assert_eq!(tags.into_iter().collect::<Vec<_>>(), ["blue", "red"]);
/// ```
#[must_use]
pub fn parse_tags(raw: &str) -> BTreeSet<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_owned)
        .collect()
}

fn positive_or(raw: Option<String>, default: u32) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

/// Decode `GET /catalogue` query parameters.
#[must_use]
pub fn decode_list(query: &str) -> ListRequest {
    ListRequest {
        tags: first_param(query, "tags")
            .map(|raw| parse_tags(&raw))
            .unwrap_or_default(),
        order: first_param(query, "sort")
            .map(|raw| SortKey::parse_lossy(&raw))
            .unwrap_or_default(),
        page_num: positive_or(first_param(query, "page"), DEFAULT_PAGE_NUM),
        page_size: positive_or(first_param(query, "size"), DEFAULT_PAGE_SIZE),
    }
}

/// Decode `GET /catalogue/size` query parameters.
#[must_use]
pub fn decode_count(query: &str) -> CountRequest {
    CountRequest {
        tags: first_param(query, "tags")
            .map(|raw| parse_tags(&raw))
            .unwrap_or_default(),
    }
}

/// Decode the `{id}` path segment of `GET /catalogue/{id}`.
#[must_use]
pub fn decode_get(id: String) -> GetRequest {
    GetRequest { id }
}

/// Serialise `value` as a JSON response with `status`.
pub fn encode_json<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    match serde_json::to_vec(value) {
        Ok(body) => HttpResponse::build(status)
            .insert_header((CONTENT_TYPE, JSON_CONTENT_TYPE))
            .body(body),
        Err(err) => {
            error!(error = %err, "failed to serialise response body");
            HttpResponse::InternalServerError().finish()
        }
    }
}

/// The bare array of items.
#[must_use]
pub fn encode_list(response: &ListResponse) -> HttpResponse {
    encode_json(StatusCode::OK, &response.items)
}

#[must_use]
pub fn encode_count(response: &CountResponse) -> HttpResponse {
    encode_json(StatusCode::OK, &SizeBody {
        size: response.size,
    })
}

/// The bare item, or the error body when the call failed.
#[must_use]
pub fn encode_get(result: &Result<GetResponse, Error>) -> HttpResponse {
    match result {
        Err(err) => encode_error(err),
        Ok(response) => encode_json(StatusCode::OK, &response.item),
    }
}

#[must_use]
pub fn encode_tags(response: TagsResponse) -> HttpResponse {
    encode_json(StatusCode::OK, &TagsBody {
        tags: response.tags,
    })
}

#[must_use]
pub fn encode_health(response: HealthResponse) -> HttpResponse {
    encode_json(StatusCode::OK, &HealthBody {
        health: response.health,
    })
}
