//! Populate a [`CatalogStore`] from a JSON file.
//!
//! The file is a single object mapping category name to an array of
//! products:
//!
//! ```json
//! {
//!   "laptops": [
//!     { "id": "l1", "name": "HP Pavilion 14", "price": 55000,
//!       "platform": "Flipkart", "rating": 4.8, "reviews": "Great battery" }
//!   ]
//! }
//! ```
//!
//! Each category is indexed whole, replacing whatever the store held for it.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::Path;

use shopwise_core::{CatalogStore, Product};

/// Parse a catalog file without touching any store.
pub fn read_catalog(path: &Path) -> Result<BTreeMap<String, Vec<Product>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse catalog file: {}", path.display()))
}

/// Index every category in `path`. Returns the number of products loaded.
pub fn load_catalog(path: &Path, store: &CatalogStore) -> Result<usize> {
    let categories = read_catalog(path)?;
    let mut total = 0;
    for (category, products) in categories {
        total += products.len();
        store.index(category, products);
    }
    tracing::info!(path = %path.display(), products = total, "catalog loaded");
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_catalog_indexes_categories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "laptops": [
                    {"id": "l1", "name": "HP Pavilion", "price": 55000, "platform": "Flipkart", "rating": 4.8},
                    {"id": "l2", "name": "Acer Aspire", "price": 40000, "platform": "Amazon", "rating": 9}
                ],
                "phones": []
            }"#,
        )
        .unwrap();

        let store = CatalogStore::new();
        let count = load_catalog(&path, &store).unwrap();

        assert_eq!(count, 2);
        assert_eq!(store.categories().len(), 2);
        assert_eq!(store.find_product("laptops", "l2").unwrap().rating, 5.0);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = read_catalog(Path::new("/nonexistent/catalog.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("catalog.json");
        std::fs::write(&path, r#"["not", "an", "object"]"#).unwrap();
        assert!(read_catalog(&path).is_err());
    }
}
