//! Candidate retrieval over the [`CatalogStore`].
//!
//! # Algorithm
//!
//! 1. Keep categories related to the intent's product type: either name is
//!    a case-insensitive substring of the other. An absent product type
//!    relates to every category.
//! 2. Drop products above the effective budget ceiling (query max, else a
//!    positive intent max, else no ceiling).
//! 3. If the query names brands, keep products whose name contains one of
//!    them (case-insensitive).
//! 4. Concatenate matches in category-name order. The same product listed
//!    under two matching categories appears twice.
//! 5. Stable sort by rating, descending.
//! 6. Truncate to [`MAX_RESULTS`].
//!
//! Retrieval never errors. Malformed intent fields were already reduced to
//! `None` by the extractor, and each `None` disables its filter. A missing
//! intent (the extractor call failed) yields an empty result.

use crate::catalog::CatalogStore;
use crate::models::{ExtractedIntent, Product, SearchQuery};
use crate::rank::sort_by_rating;

/// Maximum number of candidates retrieval returns.
pub const MAX_RESULTS: usize = 10;

/// Run the full retrieval algorithm.
///
/// `intent` is `None` when the extractor call itself failed. That yields no
/// candidates, so the request ends as "no products matched" instead of
/// recommending from unrelated categories. A successful intent that simply
/// omits the product type still searches every category.
pub fn retrieve(
    store: &CatalogStore,
    query: &SearchQuery,
    intent: Option<&ExtractedIntent>,
) -> Vec<Product> {
    let Some(intent) = intent else {
        tracing::warn!(query = %query.text, "no intent available, retrieval returns no candidates");
        return Vec::new();
    };

    let product_type = intent
        .product_type
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let budget_max = effective_budget_max(query, intent);

    let mut candidates: Vec<Product> = Vec::new();
    let mut matched_categories = 0usize;

    for (category, products) in store.snapshot() {
        if !category_matches(&category, product_type) {
            continue;
        }
        matched_categories += 1;
        candidates.extend(
            products
                .iter()
                .filter(|p| within_budget(p, budget_max))
                .filter(|p| matches_brand(p, &query.brands))
                .cloned(),
        );
    }

    sort_by_rating(&mut candidates);
    candidates.truncate(MAX_RESULTS);

    tracing::debug!(
        product_type,
        matched_categories,
        budget_max,
        results = candidates.len(),
        "retrieval finished"
    );

    candidates
}

/// Bidirectional, case-insensitive substring match between a catalog
/// category and an extracted product type.
///
/// `"gaming laptops"` matches `"laptops"`, and `"laptop"` matches
/// `"laptops"`.
pub fn category_matches(category: &str, product_type: &str) -> bool {
    let category = category.to_lowercase();
    let product_type = product_type.to_lowercase();
    category.contains(&product_type) || product_type.contains(&category)
}

/// The budget ceiling to filter with, if any.
pub fn effective_budget_max(query: &SearchQuery, intent: &ExtractedIntent) -> Option<f64> {
    query.budget_max().or_else(|| intent.budget_max())
}

fn within_budget(product: &Product, budget_max: Option<f64>) -> bool {
    budget_max.map_or(true, |max| product.price <= max)
}

/// True if `brands` is empty or the product name contains any of them.
pub fn matches_brand(product: &Product, brands: &[String]) -> bool {
    if brands.is_empty() {
        return true;
    }
    let name = product.name.to_lowercase();
    brands
        .iter()
        .any(|brand| name.contains(&brand.trim().to_lowercase()))
}
