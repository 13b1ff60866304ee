//! Error taxonomy for the recommendation pipeline.

use std::fmt;

/// The collaborator call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Extraction,
    Generation,
    Comparison,
    Translation,
    Augmentation,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Extraction => "intent extraction",
            Stage::Generation => "recommendation generation",
            Stage::Comparison => "comparison",
            Stage::Translation => "translation",
            Stage::Augmentation => "product augmentation",
        };
        f.write_str(name)
    }
}

/// Errors surfaced to callers of [`RecommendationPipeline`](crate::pipeline::RecommendationPipeline).
#[derive(Debug, thiserror::Error)]
pub enum RecommendError {
    /// Retrieval produced zero candidates. Retrying needs a different query.
    #[error("no products matched \"{query}\"")]
    NoMatch { query: String },

    /// A collaborator failed, timed out, or returned unusable data.
    #[error("{stage} call failed: {source}")]
    ExternalCall {
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// The query was rejected before retrieval started.
    #[error("invalid query: {0}")]
    Validation(String),
}

impl RecommendError {
    pub fn external(stage: Stage, source: anyhow::Error) -> Self {
        RecommendError::ExternalCall { stage, source }
    }

    /// The failing stage, for `ExternalCall` errors.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            RecommendError::ExternalCall { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    pub fn is_no_match(&self) -> bool {
        matches!(self, RecommendError::NoMatch { .. })
    }
}

/// A language code outside the supported set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language: {0}")]
pub struct ParseLanguageError(pub String);

impl From<ParseLanguageError> for RecommendError {
    fn from(err: ParseLanguageError) -> Self {
        RecommendError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_external_call_names_stage() {
        let err = RecommendError::external(Stage::Comparison, anyhow::anyhow!("HTTP 503"));
        assert_eq!(err.stage(), Some(Stage::Comparison));
        let msg = err.to_string();
        assert!(msg.starts_with("comparison call failed"), "got: {}", msg);
        assert!(msg.contains("HTTP 503"));
    }

    #[test]
    fn test_no_match_has_no_stage() {
        let err = RecommendError::NoMatch {
            query: "tablets".into(),
        };
        assert!(err.is_no_match());
        assert_eq!(err.stage(), None);
    }
}
