//! `shopwise recommend` and `shopwise describe`.
//!
//! Wires the LLM adapters into a [`RecommendationPipeline`] and renders the
//! result for the terminal.

use anyhow::{bail, Result};
use std::fmt::Write;
use std::sync::Arc;

use shopwise_core::{
    Budget, CatalogStore, Language, Product, RagRecommendation, RecommendError,
    RecommendationPipeline, SearchQuery, TranslationCache, TranslationService,
};

use crate::catalog_file;
use crate::config::Config;
use crate::describe::LlmProductDescriber;
use crate::intent::LlmIntentExtractor;
use crate::llm::LlmClient;
use crate::reasoning::LlmReasoner;
use crate::translator::LlmTranslator;

/// Shopper input collected from the command line.
#[derive(Debug, Clone, Default)]
pub struct RecommendArgs {
    pub text: String,
    pub min_budget: Option<f64>,
    pub max_budget: Option<f64>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub language: Option<String>,
    pub json: bool,
}

impl RecommendArgs {
    pub fn to_query(&self) -> Result<SearchQuery> {
        let mut query = SearchQuery::new(self.text.clone())
            .with_brands(self.brands.iter().cloned())
            .with_categories(self.categories.iter().cloned());
        if self.min_budget.is_some() || self.max_budget.is_some() {
            query = query.with_budget(Budget {
                min: self.min_budget,
                max: self.max_budget,
            });
        }
        if let Some(code) = &self.language {
            query = query.with_language(code.parse::<Language>()?);
        }
        Ok(query)
    }
}

/// Cached translation over the configured LLM.
pub fn build_translation(client: Arc<LlmClient>) -> TranslationService {
    TranslationService::new(
        Arc::new(LlmTranslator::new(client)),
        Arc::new(TranslationCache::new()),
    )
}

/// Assemble a pipeline with every LLM-backed collaborator from `config`.
pub fn build_pipeline(config: &Config, catalog: Arc<CatalogStore>) -> Result<RecommendationPipeline> {
    let client = Arc::new(LlmClient::new(&config.llm)?);

    let mut pipeline = RecommendationPipeline::new(
        catalog,
        Arc::new(LlmIntentExtractor::new(client.clone())),
        Arc::new(LlmReasoner::new(client.clone())),
    )
    .with_describer(Arc::new(LlmProductDescriber::new(client.clone())))
    .with_options(config.recommend.pipeline_options());

    if config.translation.enabled {
        pipeline = pipeline.with_translation(build_translation(client));
    }
    Ok(pipeline)
}

/// Load the configured catalog into a fresh store.
pub fn load_store(config: &Config) -> Result<Arc<CatalogStore>> {
    let store = Arc::new(CatalogStore::new());
    catalog_file::load_catalog(&config.catalog.path, &store)?;
    Ok(store)
}

pub async fn run_recommend(config: &Config, args: &RecommendArgs) -> Result<()> {
    let query = args.to_query()?;
    let pipeline = build_pipeline(config, load_store(config)?)?;

    let mut rec = match pipeline.generate_recommendations(&query).await {
        Ok(rec) => rec,
        Err(RecommendError::NoMatch { query }) => {
            bail!(
                "No products matched \"{}\". Try a broader description, another brand, or a higher budget.",
                query
            );
        }
        Err(e) => return Err(e.into()),
    };

    if config.recommend.augment_missing_descriptions {
        rec.products = pipeline.augment_products(&rec.products).await;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        print!("{}", render_text(&rec));
    }
    Ok(())
}

pub async fn run_describe(config: &Config, category: &str, id: &str) -> Result<()> {
    let store = load_store(config)?;
    let Some(product) = store.find_product(category, id) else {
        bail!("No product '{}' in category '{}'", id, category);
    };
    let pipeline = build_pipeline(config, store)?;

    let augmented = pipeline.augment_product(&product).await;
    match augmented.description {
        Some(description) => println!("{}\n\n{}", augmented.name, description),
        None => println!("{}\n\n(no description available)", augmented.name),
    }
    Ok(())
}

/// Plain-text rendering of a recommendation.
pub fn render_text(rec: &RagRecommendation) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Recommended:");
    for (i, p) in rec.products.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", i + 1, product_line(p));
    }

    if !rec.alternatives.is_empty() {
        let _ = writeln!(out, "\nAlternatives:");
        for p in &rec.alternatives {
            let _ = writeln!(out, "  - {}", product_line(p));
        }
    }

    let _ = writeln!(out, "\nBest value: {}", product_line(&rec.best_value));
    let _ = writeln!(out, "Top rated:  {}", product_line(&rec.top_rated));
    let _ = writeln!(out, "\nAnalysis:\n{}", rec.analysis.trim());
    let _ = writeln!(out, "\nComparison:\n{}", rec.reasoning.trim());
    out
}

fn product_line(p: &Product) -> String {
    let mut line = format!("{} — {:.0} on {}", p.name, p.price, p.platform);
    if p.rating > 0.0 {
        let _ = write!(line, " ({:.1}★)", p.rating);
    }
    if !p.in_stock {
        line.push_str(" [out of stock]");
    }
    if let Some(desc) = p.description.as_deref().filter(|d| !d.trim().is_empty()) {
        let _ = write!(line, "\n       {}", desc.trim());
    }
    line
}
