//! Recommendation orchestrator.
//!
//! Sequences intent extraction → retrieval → generation → comparison →
//! selection for one [`SearchQuery`], then optionally translates the text
//! fields. Every run records the [`PipelineState`]s it passed through.
//!
//! # Failure policy
//!
//! | Stage | On failure |
//! |-------|------------|
//! | validation | `Validation`, nothing else runs |
//! | intent extraction | logged as a warning, retrieval yields nothing, `NoMatch` |
//! | retrieval (zero candidates) | `NoMatch` |
//! | generation / comparison / translation | logged as an error, `ExternalCall` |
//! | product augmentation | logged as a warning, original product returned |
//!
//! No call is retried here. Nothing irreversible happens before
//! `Completed`, so dropping the future mid-run needs no cleanup.

use std::sync::Arc;

use uuid::Uuid;

use crate::catalog::CatalogStore;
use crate::context::RecommendationContext;
use crate::error::{RecommendError, Stage};
use crate::language::Language;
use crate::models::{ExtractedIntent, Product, RagRecommendation, SearchQuery};
use crate::rank;
use crate::retrieval;
use crate::services::{IntentExtractor, ProductDescriber, ReasoningService};
use crate::translate::TranslationService;

/// Why a run ended in [`PipelineState::Failed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Validation,
    NoResults,
    External(Stage),
}

/// Pipeline position, in the order a successful run visits them.
///
/// `Translating` is only entered when the query asks for a non-English
/// language and a translation service is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    ExtractingIntent,
    Retrieving,
    Reasoning,
    Comparing,
    Selecting,
    Translating,
    Completed,
    Failed(Failure),
}

/// How many retrieved candidates to show, and how many to offer as
/// alternatives after them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineOptions {
    pub display_count: usize,
    pub alternatives_count: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            display_count: 5,
            alternatives_count: 5,
        }
    }
}

/// Outcome of one run plus the states it visited.
#[derive(Debug)]
pub struct RecommendationRun {
    pub request_id: Uuid,
    pub trace: Vec<PipelineState>,
    pub result: Result<RagRecommendation, RecommendError>,
}

impl RecommendationRun {
    pub fn final_state(&self) -> Option<PipelineState> {
        self.trace.last().copied()
    }
}

struct StateTrace {
    request_id: Uuid,
    states: Vec<PipelineState>,
}

impl StateTrace {
    fn new(request_id: Uuid) -> Self {
        Self {
            request_id,
            states: vec![PipelineState::Idle],
        }
    }

    fn enter(&mut self, state: PipelineState) {
        tracing::debug!(request_id = %self.request_id, ?state, "pipeline state");
        self.states.push(state);
    }
}

/// The recommendation orchestrator.
///
/// Collaborators are injected at construction; the pipeline holds no
/// per-request state and can be shared across tasks behind an `Arc`.
pub struct RecommendationPipeline {
    catalog: Arc<CatalogStore>,
    extractor: Arc<dyn IntentExtractor>,
    reasoner: Arc<dyn ReasoningService>,
    translation: Option<TranslationService>,
    describer: Option<Arc<dyn ProductDescriber>>,
    options: PipelineOptions,
}

impl RecommendationPipeline {
    pub fn new(
        catalog: Arc<CatalogStore>,
        extractor: Arc<dyn IntentExtractor>,
        reasoner: Arc<dyn ReasoningService>,
    ) -> Self {
        Self {
            catalog,
            extractor,
            reasoner,
            translation: None,
            describer: None,
            options: PipelineOptions::default(),
        }
    }

    pub fn with_translation(mut self, translation: TranslationService) -> Self {
        self.translation = Some(translation);
        self
    }

    pub fn with_describer(mut self, describer: Arc<dyn ProductDescriber>) -> Self {
        self.describer = Some(describer);
        self
    }

    pub fn with_options(mut self, options: PipelineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn catalog(&self) -> &Arc<CatalogStore> {
        &self.catalog
    }

    /// Produce a recommendation for `query`.
    pub async fn generate_recommendations(
        &self,
        query: &SearchQuery,
    ) -> Result<RagRecommendation, RecommendError> {
        self.run(query).await.result
    }

    /// Like [`generate_recommendations`](Self::generate_recommendations),
    /// but also returns the state trace.
    pub async fn run(&self, query: &SearchQuery) -> RecommendationRun {
        let request_id = Uuid::new_v4();
        let mut trace = StateTrace::new(request_id);
        let result = self.execute(query, &mut trace).await;

        match &result {
            Ok(rec) => tracing::info!(
                request_id = %request_id,
                shown = rec.products.len(),
                alternatives = rec.alternatives.len(),
                "recommendation completed"
            ),
            Err(e) => tracing::warn!(request_id = %request_id, error = %e, "recommendation failed"),
        }

        RecommendationRun {
            request_id,
            trace: trace.states,
            result,
        }
    }

    async fn execute(
        &self,
        query: &SearchQuery,
        trace: &mut StateTrace,
    ) -> Result<RagRecommendation, RecommendError> {
        let request_id = trace.request_id;
        tracing::info!(request_id = %request_id, query = %query.text, "recommendation query started");

        if let Err(e) = query.validate() {
            trace.enter(PipelineState::Failed(Failure::Validation));
            return Err(e);
        }

        trace.enter(PipelineState::ExtractingIntent);
        let intent = self.extract_intent(request_id, &query.text).await;

        trace.enter(PipelineState::Retrieving);
        let relevant = retrieval::retrieve(&self.catalog, query, intent.as_ref());
        tracing::info!(request_id = %request_id, count = relevant.len(), "retrieved candidates");
        if relevant.is_empty() {
            trace.enter(PipelineState::Failed(Failure::NoResults));
            return Err(RecommendError::NoMatch {
                query: query.text.clone(),
            });
        }

        let intent = intent.unwrap_or_default();
        let context = RecommendationContext::assemble(query, &intent, &relevant);

        trace.enter(PipelineState::Reasoning);
        let analysis = self
            .call(request_id, Stage::Generation, trace, self.reasoner.generate(&context))
            .await?;

        trace.enter(PipelineState::Comparing);
        let reasoning = self
            .call(
                request_id,
                Stage::Comparison,
                trace,
                self.reasoner
                    .compare(&context.query_text, context.comparison_candidates()),
            )
            .await?;

        trace.enter(PipelineState::Selecting);
        let selections = match rank::select(&relevant) {
            Some(s) => s,
            None => {
                trace.enter(PipelineState::Failed(Failure::NoResults));
                return Err(RecommendError::NoMatch {
                    query: query.text.clone(),
                });
            }
        };

        let (analysis, reasoning) = match (query.language, &self.translation) {
            (Some(language), Some(translation)) if language != Language::English => {
                trace.enter(PipelineState::Translating);
                let analysis = self
                    .call(
                        request_id,
                        Stage::Translation,
                        trace,
                        translation.translate(&analysis, language),
                    )
                    .await?;
                let reasoning = self
                    .call(
                        request_id,
                        Stage::Translation,
                        trace,
                        translation.translate(&reasoning, language),
                    )
                    .await?;
                (analysis, reasoning)
            }
            (Some(language), None) if language != Language::English => {
                tracing::warn!(
                    request_id = %request_id,
                    language = %language,
                    "no translation service configured, returning English"
                );
                (analysis, reasoning)
            }
            _ => (analysis, reasoning),
        };

        let shown_end = self.options.display_count.min(relevant.len());
        let alt_end = (shown_end + self.options.alternatives_count).min(relevant.len());

        trace.enter(PipelineState::Completed);
        Ok(RagRecommendation {
            products: relevant[..shown_end].to_vec(),
            analysis,
            reasoning,
            alternatives: relevant[shown_end..alt_end].to_vec(),
            best_value: selections.best_value,
            top_rated: selections.top_rated,
        })
    }

    /// `None` when the extractor call failed; the failure is logged, not raised.
    async fn extract_intent(&self, request_id: Uuid, text: &str) -> Option<ExtractedIntent> {
        match self.extractor.extract(text).await {
            Ok(intent) => {
                tracing::info!(
                    request_id = %request_id,
                    product_type = intent.product_type.as_deref().unwrap_or(""),
                    "intent extraction succeeded"
                );
                Some(intent)
            }
            Err(e) => {
                tracing::warn!(
                    request_id = %request_id,
                    error = %e,
                    "intent extraction failed, no candidates will be retrieved"
                );
                None
            }
        }
    }

    async fn call<F>(
        &self,
        request_id: Uuid,
        stage: Stage,
        trace: &mut StateTrace,
        fut: F,
    ) -> Result<String, RecommendError>
    where
        F: std::future::Future<Output = anyhow::Result<String>>,
    {
        match fut.await {
            Ok(text) => {
                tracing::info!(request_id = %request_id, %stage, "external call succeeded");
                Ok(text)
            }
            Err(e) => {
                tracing::error!(request_id = %request_id, %stage, error = %e, "external call failed");
                trace.enter(PipelineState::Failed(Failure::External(stage)));
                Err(RecommendError::external(stage, e))
            }
        }
    }

    /// Fill in a missing description via the [`ProductDescriber`].
    ///
    /// Products that already have a description, or a pipeline without a
    /// describer, return an unchanged copy. A failed or blank description
    /// is logged and the original product is returned.
    pub async fn augment_product(&self, product: &Product) -> Product {
        if product.has_description() {
            return product.clone();
        }
        let Some(describer) = &self.describer else {
            return product.clone();
        };

        match describer.describe(product).await {
            Ok(text) if !text.trim().is_empty() => {
                tracing::info!(product_id = %product.id, stage = %Stage::Augmentation, "external call succeeded");
                product.clone().with_description(text.trim())
            }
            Ok(_) => {
                tracing::warn!(product_id = %product.id, "describer returned empty text, keeping product unchanged");
                product.clone()
            }
            Err(e) => {
                tracing::warn!(
                    product_id = %product.id,
                    error = %e,
                    "product augmentation failed, keeping product unchanged"
                );
                product.clone()
            }
        }
    }

    /// [`augment_product`](Self::augment_product) over a list, sequentially.
    pub async fn augment_products(&self, products: &[Product]) -> Vec<Product> {
        let mut out = Vec::with_capacity(products.len());
        for p in products {
            out.push(self.augment_product(p).await);
        }
        out
    }
}
