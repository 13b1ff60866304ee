//! In-memory product catalog, keyed by category.
//!
//! Each category holds an `Arc<Vec<Product>>` behind a `std::sync::RwLock`.
//! [`CatalogStore::index`] builds the replacement list outside the lock and
//! swaps the `Arc` in, so a concurrent reader sees either the old list or
//! the new one, never a partial write. Readers clone the `Arc`s and drop
//! the lock before filtering.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;

use crate::models::Product;

/// Category name and product count, for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub name: String,
    pub count: usize,
}

/// Category → products lookup table, shared across requests.
#[derive(Debug, Default)]
pub struct CatalogStore {
    categories: RwLock<BTreeMap<String, Arc<Vec<Product>>>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace every product under `category`.
    ///
    /// Category keys are stored as given (case-sensitive). Products are
    /// normalized (rating clamped to `[0, 5]`). Duplicate ids are kept.
    pub fn index(&self, category: impl Into<String>, products: Vec<Product>) {
        let category = category.into();
        let products: Vec<Product> = products.into_iter().map(Product::normalized).collect();
        let count = products.len();
        let replacement = Arc::new(products);

        let mut guard = self
            .categories
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        guard.insert(category.clone(), replacement);
        drop(guard);

        tracing::info!(category = %category, count, "indexed category");
    }

    /// Indexed categories with their product counts, sorted by name.
    pub fn categories(&self) -> Vec<CategorySummary> {
        self.read()
            .iter()
            .map(|(name, products)| CategorySummary {
                name: name.clone(),
                count: products.len(),
            })
            .collect()
    }

    /// Products under an exact category key.
    pub fn get(&self, category: &str) -> Option<Arc<Vec<Product>>> {
        self.read().get(category).cloned()
    }

    /// Find a product by category and id (first match wins).
    pub fn find_product(&self, category: &str, id: &str) -> Option<Product> {
        self.get(category)
            .and_then(|products| products.iter().find(|p| p.id == id).cloned())
    }

    /// Point-in-time view of every category, in name order.
    pub fn snapshot(&self) -> Vec<(String, Arc<Vec<Product>>)> {
        self.read()
            .iter()
            .map(|(name, products)| (name.clone(), Arc::clone(products)))
            .collect()
    }

    /// Total number of products across all categories.
    pub fn len(&self) -> usize {
        self.read().values().map(|products| products.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, BTreeMap<String, Arc<Vec<Product>>>> {
        self.categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
