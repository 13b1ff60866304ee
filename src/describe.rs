//! Product descriptions from the thumbnail (vision) or the listing text.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use shopwise_core::services::ProductDescriber;
use shopwise_core::Product;

use crate::llm::LlmClient;
use crate::prompts;

pub struct LlmProductDescriber {
    client: Arc<LlmClient>,
}

impl LlmProductDescriber {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProductDescriber for LlmProductDescriber {
    async fn describe(&self, product: &Product) -> Result<String> {
        match product.thumbnail.as_deref().filter(|t| !t.trim().is_empty()) {
            Some(image_url) => {
                self.client
                    .complete_with_image(&prompts::describe_image_prompt(product), image_url)
                    .await
            }
            None => {
                self.client
                    .complete(prompts::DESCRIBE_SYSTEM, &prompts::describe_prompt(product))
                    .await
            }
        }
    }
}
