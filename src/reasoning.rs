//! LLM-backed recommendation analysis and comparison.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use shopwise_core::context::RecommendationContext;
use shopwise_core::services::ReasoningService;
use shopwise_core::Product;

use crate::llm::LlmClient;
use crate::prompts;

pub struct LlmReasoner {
    client: Arc<LlmClient>,
}

impl LlmReasoner {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReasoningService for LlmReasoner {
    async fn generate(&self, context: &RecommendationContext) -> Result<String> {
        self.client
            .complete(prompts::RECOMMEND_SYSTEM, &prompts::recommend_prompt(context))
            .await
    }

    async fn compare(&self, query_text: &str, candidates: &[Product]) -> Result<String> {
        self.client
            .complete(
                prompts::COMPARE_SYSTEM,
                &prompts::compare_prompt(query_text, candidates),
            )
            .await
    }
}
