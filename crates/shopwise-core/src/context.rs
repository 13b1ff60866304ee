//! Bounded context handed to the reasoning collaborator.
//!
//! Generation sees up to [`GENERATION_LIMIT`] candidates; comparison sees
//! only the first [`COMPARISON_LIMIT`], since per-item comparison is the
//! more expensive call.

use serde::Serialize;

use crate::language::Language;
use crate::models::{ExtractedIntent, Product, SearchQuery};
use crate::retrieval::effective_budget_max;

pub const GENERATION_LIMIT: usize = 10;
pub const COMPARISON_LIMIT: usize = 5;

/// Shopper preferences forwarded alongside the candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub budget_max: Option<f64>,
    pub brands: Vec<String>,
    pub categories: Vec<String>,
    pub language: Option<Language>,
}

/// Everything the generate call needs, already truncated.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    pub query_text: String,
    pub candidates: Vec<Product>,
    pub preferences: Preferences,
}

impl RecommendationContext {
    /// Package retrieved candidates with the query's preferences.
    ///
    /// Brands come from the query; if it names none, the extracted intent's
    /// brands are used instead.
    pub fn assemble(query: &SearchQuery, intent: &ExtractedIntent, candidates: &[Product]) -> Self {
        let brands = if query.brands.is_empty() {
            intent.brands.clone().unwrap_or_default()
        } else {
            query.brands.clone()
        };

        RecommendationContext {
            query_text: query.text.clone(),
            candidates: candidates.iter().take(GENERATION_LIMIT).cloned().collect(),
            preferences: Preferences {
                budget_max: effective_budget_max(query, intent),
                brands,
                categories: query.categories.clone(),
                language: query.language,
            },
        }
    }

    /// The subset sent to the comparison call.
    pub fn comparison_candidates(&self) -> &[Product] {
        let end = self.candidates.len().min(COMPARISON_LIMIT);
        &self.candidates[..end]
    }
}
