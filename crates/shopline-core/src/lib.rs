//! # Shopline Core
//!
//! Pure, I/O-free logic for Shopline: catalog data models, tag-text
//! vectorization (TF-IDF), and the content-based similar-items ranking.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other native-only
//! dependencies; the application crate owns all loading, storage, and serving.

pub mod models;
pub mod recommend;
pub mod tfidf;
