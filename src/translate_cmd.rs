use anyhow::{Context, Result};
use std::sync::Arc;

use shopwise_core::Language;

use crate::config::Config;
use crate::llm::LlmClient;
use crate::recommend::build_translation;

/// Translate one piece of text and print it.
pub async fn run_translate(config: &Config, text: &str, language: &str) -> Result<()> {
    let target: Language = language.parse()?;
    let client = Arc::new(LlmClient::new(&config.llm)?);
    let service = build_translation(client);

    let translated = service
        .translate(text, target)
        .await
        .with_context(|| format!("Translation into {} failed", target))?;
    println!("{}", translated);
    Ok(())
}
