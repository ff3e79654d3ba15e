//! Trending listing CLI output.

use anyhow::Result;

use crate::catalog::Catalog;
use crate::config::Config;

/// Print the trending listing (first `[catalog].trending_rows` rows).
pub fn run_trending(config: &Config, catalog: &Catalog) -> Result<()> {
    let rows = catalog.trending_head(config.catalog.trending_rows);

    println!("--- Trending products ({}) ---", rows.len());
    for (i, p) in rows.iter().enumerate() {
        println!(
            "{:>2}. {}  [{}]  rating {:.1}  ({} reviews)",
            i + 1,
            p.name,
            p.brand,
            p.rating,
            p.review_count
        );
    }

    Ok(())
}
