//! Diesel table definitions for the catalogue schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate
//! with `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Sock catalogue, one row per item.
    catalogue_items (id) {
        /// Opaque item identifier.
        id -> Text,
        name -> Text,
        description -> Text,
        /// Image paths relative to the service root.
        image_urls -> Array<Text>,
        price -> Float8,
        /// Units in stock; never negative.
        count -> Int4,
        tags -> Array<Text>,
    }
}
