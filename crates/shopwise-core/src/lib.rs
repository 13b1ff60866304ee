//! # Shopwise Core
//!
//! Pure recommendation logic for Shopwise: product models, the in-memory
//! catalog store, retrieval and selection, context assembly, and the
//! pipeline that sequences them around the LLM-backed collaborators.
//!
//! This crate contains no tokio, HTTP client, or filesystem I/O. Every
//! external call goes through a trait in [`services`], so the pipeline can
//! be driven by real LLM adapters or by in-memory test doubles.
//!
//! ```text
//!  SearchQuery
//!      │
//!      ▼
//! ┌──────────────┐   ┌───────────┐   ┌────────┐   ┌─────────────┐
//! │IntentExtractor│──▶│ Retriever │──▶│ Ranker │──▶│  Reasoning  │
//! └──────────────┘   │ (catalog) │   └────────┘   │ gen+compare │
//!                    └───────────┘                └──────┬──────┘
//!                                                        ▼
//!                                              RagRecommendation
//! ```

pub mod catalog;
pub mod context;
pub mod error;
pub mod language;
pub mod models;
pub mod pipeline;
pub mod rank;
pub mod retrieval;
pub mod services;
pub mod translate;

pub use catalog::{CatalogStore, CategorySummary};
pub use error::{RecommendError, Stage};
pub use language::Language;
pub use models::{Budget, ExtractedIntent, Priority, Product, RagRecommendation, SearchQuery};
pub use pipeline::{PipelineOptions, PipelineState, RecommendationPipeline, RecommendationRun};
pub use translate::{TranslationCache, TranslationService};
