//! Core data models used throughout Shopline.
//!
//! These types represent the catalog rows and recommendation results that flow
//! through the loader, the similarity engine, and the HTTP layer.

use serde::Serialize;

/// A catalog product. The `tags` field is the free-text basis for similarity.
///
/// Catalog rows are immutable for the process lifetime; `name` is the catalog
/// key used to select a query product.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub name: String,
    pub tags: String,
    pub review_count: i64,
    pub brand: String,
    pub image_url: String,
    pub rating: f64,
}

/// A row of the trending-products listing. Same shape as [`Product`] minus
/// the tag text (the trending dataset carries none).
#[derive(Debug, Clone, Serialize)]
pub struct TrendingProduct {
    pub name: String,
    pub review_count: i64,
    pub brand: String,
    pub image_url: String,
    pub rating: f64,
}

/// A single ranked entry returned by the similarity engine.
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    #[serde(flatten)]
    pub product: Product,
    /// Cosine similarity to the query product, in `[0.0, 1.0]`.
    pub score: f64,
}
