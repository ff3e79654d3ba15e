//! Cosmetic display data for product cards.
//!
//! The demo datasets carry no usable image or price columns, so the
//! storefront assigns a placeholder image per card and one price per page
//! render, drawn from fixed pools. Not a domain invariant; nothing asserts
//! on the specific values chosen.

use rand::Rng;

/// Fixed price pool, drawn from once per rendered page.
pub const PRICE_POOL: &[i64] = &[40, 50, 60, 70, 100, 122, 106, 50, 30, 50];

/// Number of bundled placeholder images (`static/img/img_1.png` ...).
pub const PLACEHOLDER_IMAGE_COUNT: usize = 8;

/// Pick a placeholder image path for one card.
pub fn placeholder_image<R: Rng>(rng: &mut R) -> String {
    let n = rng.gen_range(1..=PLACEHOLDER_IMAGE_COUNT);
    format!("static/img/img_{}.png", n)
}

/// Pick the page-level display price.
pub fn page_price<R: Rng>(rng: &mut R) -> i64 {
    PRICE_POOL[rng.gen_range(0..PRICE_POOL.len())]
}
