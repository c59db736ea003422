//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror their serialised shape and live in the inbound layer
//! where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::CatalogueItem`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CatalogueItem)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct CatalogueItemSchema {
    /// Stable item identifier.
    #[schema(example = "808a2de1-1aaa-4c25-a9b9-6612e8f29a38")]
    id: String,
    #[schema(example = "Crossed")]
    name: String,
    #[schema(example = "A mature sock, crossed, with an air of nonchalance.")]
    description: String,
    /// Image paths under `/catalogue/images/`.
    #[schema(rename = "imageUrl", example = json!(["/catalogue/images/cross_1.jpeg"]))]
    image_url: Vec<String>,
    /// Unit price.
    #[schema(example = 17.32)]
    price: f64,
    /// Units in stock.
    #[schema(example = 738)]
    count: u32,
    /// Tags attached to the item, sorted.
    #[schema(example = json!(["blue", "action"]))]
    tag: Vec<String>,
}

/// OpenAPI schema for [`crate::domain::HealthStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthStatus)]
pub enum HealthStatusSchema {
    /// The component is healthy.
    #[schema(rename = "OK")]
    Ok,
    /// The component failed its check.
    #[schema(rename = "err")]
    Err,
}

/// OpenAPI schema for [`crate::domain::HealthRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::HealthRecord)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct HealthRecordSchema {
    /// Component name.
    #[schema(example = "catalogue-db")]
    service: String,
    status: HealthStatusSchema,
    /// Failure detail, present only for unhealthy components.
    #[schema(example = "catalogue store connection failed: connection refused")]
    detail: Option<String>,
    /// Time the check ran.
    #[schema(value_type = String, format = DateTime, example = "2026-03-01T12:00:00Z")]
    time: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use utoipa::PartialSchema;

    fn schema_to_json<T: PartialSchema>() -> String {
        serde_json::to_string(&T::schema()).expect("schema serialises to JSON")
    }

    #[test]
    fn item_schema_uses_wire_field_names() {
        let schema_json = schema_to_json::<CatalogueItemSchema>();
        assert_eq!(CatalogueItemSchema::name(), "crate.domain.CatalogueItem");
        assert!(schema_json.contains("imageUrl"), "missing imageUrl");
        assert!(schema_json.contains("\"tag\""), "missing tag");
    }

    #[test]
    fn health_status_schema_lists_wire_values() {
        let schema_json = schema_to_json::<HealthStatusSchema>();
        assert!(schema_json.contains("\"OK\""), "missing OK");
        assert!(schema_json.contains("\"err\""), "missing err");
    }

    #[test]
    fn health_record_schema_has_expected_name() {
        assert_eq!(HealthRecordSchema::name(), "crate.domain.HealthRecord");
    }
}
