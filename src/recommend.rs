//! Similar-items CLI output.
//!
//! Thin printer over [`Catalog::recommend`]; the ranking itself lives in
//! `shopline_core::recommend`.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;

/// Run the similarity engine and print ranked results.
///
/// An unknown product prints the no-recommendations notice, mirroring the
/// HTTP surface; it is not an error.
pub fn run_recommend(
    config: &Config,
    catalog: &Catalog,
    product: &str,
    count: Option<usize>,
) -> Result<()> {
    let top_n = count.unwrap_or(config.recommend.default_top_n);
    let recs = catalog.recommend(product, top_n);

    if recs.is_empty() {
        println!("No recommendations available for this product.");
        return Ok(());
    }

    println!("--- Similar to {} ({} results) ---", product, recs.len());
    for (i, rec) in recs.iter().enumerate() {
        println!(
            "{:>2}. [{:.4}] {}  ({}, rating {:.1})",
            i + 1,
            rec.score,
            rec.product.name,
            rec.product.brand,
            rec.product.rating
        );
    }

    Ok(())
}
