//! Content-based "similar items" ranking.
//!
//! A [`Recommender`] is fitted once per catalog snapshot and answers
//! `recommend(name, top_n)` queries against the cached vectorization.
//!
//! # Ranking
//!
//! 1. Resolve the query name to its first matching catalog row (exact match;
//!    no row means no recommendation, not an error).
//! 2. Score every product against the query by TF-IDF cosine similarity.
//! 3. Sort descending with a stable sort, so ties keep catalog order.
//! 4. Drop the first-ranked entry (the query row, trivially self-similar)
//!    and return the next `top_n` records.

use std::collections::HashMap;

use crate::models::{Product, Recommendation};
use crate::tfidf::TagVectorizer;

/// Similarity engine over an immutable catalog snapshot.
///
/// Owns the catalog rows and the vectorizer fitted over their tag text.
/// Queries are pure and deterministic; results are recomputed per call from
/// the cached vectors.
#[derive(Debug, Clone)]
pub struct Recommender {
    products: Vec<Product>,
    vectorizer: TagVectorizer,
    /// Name -> first catalog row carrying it.
    index: HashMap<String, usize>,
}

impl Recommender {
    /// Fit a recommender over `products`, vectorizing every row's tags.
    pub fn new(products: Vec<Product>) -> Self {
        let tags: Vec<&str> = products.iter().map(|p| p.tags.as_str()).collect();
        let vectorizer = TagVectorizer::fit(&tags);

        let mut index = HashMap::new();
        for (i, p) in products.iter().enumerate() {
            index.entry(p.name.clone()).or_insert(i);
        }

        Self {
            products,
            vectorizer,
            index,
        }
    }

    /// Number of catalog rows the engine was fitted over.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Return up to `top_n` products most similar to `query_name`.
    ///
    /// An unknown `query_name` yields an empty vec; callers treat that as
    /// "no recommendation available" and degrade gracefully.
    pub fn recommend(&self, query_name: &str, top_n: usize) -> Vec<Recommendation> {
        let query = match self.index.get(query_name) {
            Some(&i) => i,
            None => return Vec::new(),
        };

        let mut ranked: Vec<(usize, f64)> = (0..self.products.len())
            .map(|i| (i, self.vectorizer.similarity(query, i)))
            .collect();

        // Stable descending sort: equal scores keep catalog order.
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        ranked
            .into_iter()
            .skip(1)
            .take(top_n)
            .map(|(i, score)| Recommendation {
                product: self.products[i].clone(),
                score,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, tags: &str) -> Product {
        Product {
            name: name.to_string(),
            tags: tags.to_string(),
            review_count: 10,
            brand: "Acme".to_string(),
            image_url: "http://example.com/p.png".to_string(),
            rating: 4.0,
        }
    }

    fn shirt_catalog() -> Vec<Product> {
        vec![
            product("Red Shirt", "red cotton shirt casual"),
            product("Blue Shirt", "blue cotton shirt casual"),
            product("Laptop", "electronics computer"),
        ]
    }

    #[test]
    fn test_worked_example_red_shirt() {
        let rec = Recommender::new(shirt_catalog());
        let results = rec.recommend("Red Shirt", 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].product.name, "Blue Shirt");
    }

    #[test]
    fn test_unknown_name_is_empty() {
        let rec = Recommender::new(shirt_catalog());
        assert!(rec.recommend("Green Shirt", 5).is_empty());
        assert!(rec.recommend("Green Shirt", 0).is_empty());
    }

    #[test]
    fn test_exact_count_when_name_exists() {
        let rec = Recommender::new(shirt_catalog());
        for top_n in 0..=2 {
            let results = rec.recommend("Red Shirt", top_n);
            assert_eq!(results.len(), top_n);
            for r in &results {
                assert_ne!(r.product.name, "Red Shirt");
            }
        }
    }

    #[test]
    fn test_top_n_larger_than_catalog() {
        let rec = Recommender::new(shirt_catalog());
        let results = rec.recommend("Red Shirt", 50);
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn test_deterministic_across_calls() {
        let rec = Recommender::new(shirt_catalog());
        let a: Vec<String> = rec
            .recommend("Red Shirt", 2)
            .into_iter()
            .map(|r| r.product.name)
            .collect();
        let b: Vec<String> = rec
            .recommend("Red Shirt", 2)
            .into_iter()
            .map(|r| r.product.name)
            .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_identical_tags_tie_break_by_catalog_order() {
        let rec = Recommender::new(vec![
            product("Query", "wool winter scarf"),
            product("Twin B", "red cotton shirt"),
            product("Twin A", "red cotton shirt"),
            product("Partial", "wool hat"),
        ]);
        let results = rec.recommend("Query", 3);
        assert_eq!(results[0].product.name, "Partial");
        // The twins score identically against the query; catalog order holds.
        assert_eq!(results[1].product.name, "Twin B");
        assert_eq!(results[2].product.name, "Twin A");
        assert_eq!(results[1].score, results[2].score);
    }

    #[test]
    fn test_scores_descend() {
        let rec = Recommender::new(vec![
            product("Query", "red cotton shirt casual summer"),
            product("Close", "red cotton shirt casual"),
            product("Far", "red scarf"),
            product("Unrelated", "electronics computer"),
        ]);
        let results = rec.recommend("Query", 3);
        assert_eq!(results.len(), 3);
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(results[0].product.name, "Close");
    }

    #[test]
    fn test_duplicate_name_uses_first_row() {
        let rec = Recommender::new(vec![
            product("Shirt", "red cotton"),
            product("Shirt", "electronics computer"),
            product("Red Scarf", "red wool"),
        ]);
        // Query resolves to row 0 ("red cotton"), so the scarf must outrank
        // the electronics twin.
        let results = rec.recommend("Shirt", 2);
        assert_eq!(results[0].product.name, "Red Scarf");
    }

    #[test]
    fn test_empty_tags_query_scores_zero_everywhere() {
        let rec = Recommender::new(vec![
            product("Blank", "of the"),
            product("A", "red shirt"),
            product("B", "blue shirt"),
        ]);
        let results = rec.recommend("Blank", 2);
        assert_eq!(results.len(), 2);
        for r in &results {
            assert_eq!(r.score, 0.0);
        }
        // All scores tie at zero; catalog order is preserved.
        assert_eq!(results[0].product.name, "A");
        assert_eq!(results[1].product.name, "B");
    }
}
