use anyhow::Result;

use crate::config::Config;
use crate::recommend::load_store;

/// Print every indexed category with its product count.
pub fn run_categories(config: &Config) -> Result<()> {
    let store = load_store(config)?;
    let categories = store.categories();

    if categories.is_empty() {
        println!("Catalog is empty.");
        return Ok(());
    }

    let width = categories.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for c in &categories {
        println!("{:<width$}  {}", c.name, c.count, width = width);
    }
    println!("\n{} products in {} categories", store.len(), categories.len());
    Ok(())
}
