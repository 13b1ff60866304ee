//! LLM-backed translation into natively supported languages.
//!
//! Caching and the fallback language live in
//! [`TranslationService`](shopwise_core::TranslationService); this adapter
//! only performs the call.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use shopwise_core::services::Translator;
use shopwise_core::Language;

use crate::llm::LlmClient;
use crate::prompts;

pub struct LlmTranslator {
    client: Arc<LlmClient>,
}

impl LlmTranslator {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Translator for LlmTranslator {
    async fn translate(&self, text: &str, target: Language) -> Result<String> {
        let translated = self
            .client
            .complete(&prompts::translate_system(target), text)
            .await?;
        Ok(translated.trim().to_string())
    }
}
