//! Ordering and deterministic best-value / top-rated selection.
//!
//! All functions are pure. Ties always resolve to the leftmost candidate,
//! so results depend only on input order.

use std::cmp::Ordering;

use crate::models::Product;

/// The two picks derived from a candidate set.
#[derive(Debug, Clone, PartialEq)]
pub struct Selections {
    pub best_value: Product,
    pub top_rated: Product,
}

/// Stable sort by rating, highest first.
pub fn sort_by_rating(products: &mut [Product]) {
    products.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
}

/// Highest `rating`; earliest wins ties.
pub fn top_rated(products: &[Product]) -> Option<&Product> {
    leftmost_best(products, |candidate, best| candidate.rating > best.rating)
}

/// Lowest `price / effective_rating`; earliest wins ties.
///
/// Unrated products count as rating 1 here, so a rating of 0 never divides
/// by zero.
pub fn best_value(products: &[Product]) -> Option<&Product> {
    leftmost_best(products, |candidate, best| {
        candidate.value_ratio() < best.value_ratio()
    })
}

/// Both picks, or `None` for an empty candidate set.
pub fn select(products: &[Product]) -> Option<Selections> {
    Some(Selections {
        best_value: best_value(products)?.clone(),
        top_rated: top_rated(products)?.clone(),
    })
}

fn leftmost_best<F>(products: &[Product], beats: F) -> Option<&Product>
where
    F: Fn(&Product, &Product) -> bool,
{
    let mut iter = products.iter();
    let first = iter.next()?;
    Some(iter.fold(first, |best, candidate| {
        if beats(candidate, best) {
            candidate
        } else {
            best
        }
    }))
}
