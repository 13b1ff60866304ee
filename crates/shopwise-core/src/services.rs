//! Collaborator traits the pipeline calls out to.
//!
//! Each trait is one external capability. Implementations are created by
//! the application (LLM adapters in the `shopwise` crate, mocks in tests)
//! and injected into [`RecommendationPipeline`](crate::pipeline::RecommendationPipeline).
//!
//! All methods return `anyhow::Result`; the pipeline tags failures with the
//! [`Stage`](crate::error::Stage) that issued the call. Timeouts are the
//! implementation's concern and must surface as ordinary errors.
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`IntentExtractor`] | Free text → [`ExtractedIntent`] |
//! | [`ReasoningService`] | Recommendation analysis and comparison text |
//! | [`Translator`] | Translation into a natively supported language |
//! | [`ProductDescriber`] | Short description for a product lacking one |

use anyhow::Result;
use async_trait::async_trait;

use crate::context::RecommendationContext;
use crate::language::Language;
use crate::models::{ExtractedIntent, Product};

#[async_trait]
pub trait IntentExtractor: Send + Sync {
    /// Interpret a shopping query.
    ///
    /// Fields the backend could not determine should be `None`. An `Err`
    /// is logged by the pipeline, retrieval then yields no candidates and
    /// the request ends as `NoMatch`.
    async fn extract(&self, text: &str) -> Result<ExtractedIntent>;
}

#[async_trait]
pub trait ReasoningService: Send + Sync {
    /// Free-text analysis over the full (≤10) candidate context.
    async fn generate(&self, context: &RecommendationContext) -> Result<String>;

    /// Free-text comparison of the top (≤5) candidates.
    async fn compare(&self, query_text: &str, candidates: &[Product]) -> Result<String>;
}

#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target`.
    ///
    /// Only called with natively supported languages; fallback is handled by
    /// [`TranslationService`](crate::translate::TranslationService).
    async fn translate(&self, text: &str, target: Language) -> Result<String>;
}

#[async_trait]
pub trait ProductDescriber: Send + Sync {
    /// A short shopper-facing description of `product`.
    async fn describe(&self, product: &Product) -> Result<String>;
}
