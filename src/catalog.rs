//! Catalog loading: two CSV datasets parsed into an immutable in-memory
//! snapshot at process start.
//!
//! The snapshot owns the trending listing and a fitted [`Recommender`], and
//! is handed to the server and CLI commands behind an `Arc`. It is read-only
//! for the process lifetime; a restart is the only reload.
//!
//! A missing file, a missing required column, or an unparseable row is a
//! fatal startup error; the process must not serve with a partial catalog.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

use shopline_core::models::{Product, Recommendation, TrendingProduct};
use shopline_core::recommend::Recommender;

use crate::config::Config;

/// CSV row of the full product catalog. Headers match the source dataset.
#[derive(Debug, Deserialize)]
struct ProductRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Tags")]
    tags: String,
    #[serde(rename = "ReviewCount")]
    review_count: i64,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "ImageURL")]
    image_url: String,
    #[serde(rename = "Rating")]
    rating: f64,
}

/// CSV row of the trending dataset (no Tags column).
#[derive(Debug, Deserialize)]
struct TrendingRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "ReviewCount")]
    review_count: i64,
    #[serde(rename = "Brand")]
    brand: String,
    #[serde(rename = "ImageURL")]
    image_url: String,
    #[serde(rename = "Rating")]
    rating: f64,
}

/// Parse the full product catalog from `path`.
pub fn load_products(path: &Path) -> Result<Vec<Product>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open products file: {}", path.display()))?;

    let mut products = Vec::new();
    for row in reader.deserialize() {
        let row: ProductRow =
            row.with_context(|| format!("Malformed product row in {}", path.display()))?;
        products.push(Product {
            name: row.name,
            tags: row.tags,
            review_count: row.review_count,
            brand: row.brand,
            image_url: row.image_url,
            rating: row.rating,
        });
    }

    if products.is_empty() {
        bail!("Products file contains no rows: {}", path.display());
    }

    Ok(products)
}

/// Parse the trending listing from `path`.
pub fn load_trending(path: &Path) -> Result<Vec<TrendingProduct>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open trending file: {}", path.display()))?;

    let mut trending = Vec::new();
    for row in reader.deserialize() {
        let row: TrendingRow =
            row.with_context(|| format!("Malformed trending row in {}", path.display()))?;
        trending.push(TrendingProduct {
            name: row.name,
            review_count: row.review_count,
            brand: row.brand,
            image_url: row.image_url,
            rating: row.rating,
        });
    }

    if trending.is_empty() {
        bail!("Trending file contains no rows: {}", path.display());
    }

    Ok(trending)
}

/// Immutable catalog snapshot: trending rows plus the fitted similarity engine.
pub struct Catalog {
    trending: Vec<TrendingProduct>,
    recommender: Recommender,
}

impl Catalog {
    /// Load both datasets and fit the tag vectorizer. Called once at startup.
    pub fn load(config: &Config) -> Result<Catalog> {
        let products = load_products(&config.catalog.products_path)?;
        let trending = load_trending(&config.catalog.trending_path)?;

        Ok(Catalog {
            trending,
            recommender: Recommender::new(products),
        })
    }

    /// Build a snapshot from already-loaded rows (used by tests).
    pub fn from_rows(products: Vec<Product>, trending: Vec<TrendingProduct>) -> Catalog {
        Catalog {
            trending,
            recommender: Recommender::new(products),
        }
    }

    pub fn product_count(&self) -> usize {
        self.recommender.len()
    }

    /// The first `n` trending rows.
    pub fn trending_head(&self, n: usize) -> &[TrendingProduct] {
        &self.trending[..self.trending.len().min(n)]
    }

    /// Run the similarity engine against the cached vectorization.
    pub fn recommend(&self, query_name: &str, top_n: usize) -> Vec<Recommendation> {
        self.recommender.recommend(query_name, top_n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PRODUCTS_CSV: &str = "\
Name,ReviewCount,Brand,ImageURL,Rating,Tags
Red Shirt,12,Acme,http://img/1.png,4.5,red cotton shirt casual
Blue Shirt,8,Acme,http://img/2.png,4.0,blue cotton shirt casual
Laptop,30,Bolt,http://img/3.png,4.8,electronics computer
";

    const TRENDING_CSV: &str = "\
Name,ReviewCount,Brand,ImageURL,Rating
Red Shirt,12,Acme,http://img/1.png,4.5
Laptop,30,Bolt,http://img/3.png,4.8
";

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_load_products() {
        let f = write_csv(PRODUCTS_CSV);
        let products = load_products(f.path()).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].name, "Red Shirt");
        assert_eq!(products[2].tags, "electronics computer");
    }

    #[test]
    fn test_load_trending() {
        let f = write_csv(TRENDING_CSV);
        let trending = load_trending(f.path()).unwrap();
        assert_eq!(trending.len(), 2);
        assert_eq!(trending[1].brand, "Bolt");
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(load_products(Path::new("/nonexistent/products.csv")).is_err());
    }

    #[test]
    fn test_missing_required_column_is_error() {
        // No Tags column in the products schema.
        let f = write_csv(TRENDING_CSV);
        assert!(load_products(f.path()).is_err());
    }

    #[test]
    fn test_unparseable_field_is_error() {
        let f = write_csv(
            "Name,ReviewCount,Brand,ImageURL,Rating,Tags\nRed Shirt,many,Acme,u,4.5,red\n",
        );
        assert!(load_products(f.path()).is_err());
    }

    #[test]
    fn test_empty_file_is_error() {
        let f = write_csv("Name,ReviewCount,Brand,ImageURL,Rating,Tags\n");
        assert!(load_products(f.path()).is_err());
    }

    #[test]
    fn test_trending_head_clamps() {
        let products = write_csv(PRODUCTS_CSV);
        let trending = write_csv(TRENDING_CSV);
        let catalog = Catalog::from_rows(
            load_products(products.path()).unwrap(),
            load_trending(trending.path()).unwrap(),
        );
        assert_eq!(catalog.trending_head(8).len(), 2);
        assert_eq!(catalog.trending_head(1).len(), 1);
    }

    #[test]
    fn test_snapshot_recommends() {
        let f = write_csv(PRODUCTS_CSV);
        let catalog = Catalog::from_rows(load_products(f.path()).unwrap(), Vec::new());
        let recs = catalog.recommend("Red Shirt", 1);
        assert_eq!(recs[0].product.name, "Blue Shirt");
    }
}
