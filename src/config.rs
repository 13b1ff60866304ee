use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use shopwise_core::PipelineOptions;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub recommend: RecommendConfig,
    #[serde(default)]
    pub translation: TranslationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub model: String,
    #[serde(default)]
    pub vision_model: Option<String>,
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_max_retries() -> u32 {
    2
}
fn default_temperature() -> f32 {
    0.2
}

impl LlmConfig {
    pub fn vision_model(&self) -> &str {
        self.vision_model.as_deref().unwrap_or(&self.model)
    }

    /// API key from the configured environment variable, if set.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RecommendConfig {
    #[serde(default = "default_display_count")]
    pub display_count: usize,
    #[serde(default = "default_alternatives_count")]
    pub alternatives_count: usize,
    #[serde(default)]
    pub augment_missing_descriptions: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            display_count: default_display_count(),
            alternatives_count: default_alternatives_count(),
            augment_missing_descriptions: false,
        }
    }
}

fn default_display_count() -> usize {
    5
}
fn default_alternatives_count() -> usize {
    5
}

impl RecommendConfig {
    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            display_count: self.display_count,
            alternatives_count: self.alternatives_count,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    #[serde(default = "default_translation_enabled")]
    pub enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

fn default_translation_enabled() -> bool {
    true
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;
    Ok(config)
}

pub fn validate(config: &Config) -> Result<()> {
    if config.llm.model.trim().is_empty() {
        anyhow::bail!("llm.model must not be empty");
    }

    if config.llm.timeout_secs == 0 {
        anyhow::bail!("llm.timeout_secs must be > 0");
    }

    if !(0.0..=2.0).contains(&config.llm.temperature) {
        anyhow::bail!("llm.temperature must be in [0.0, 2.0]");
    }

    if !config.llm.base_url.starts_with("http://") && !config.llm.base_url.starts_with("https://")
    {
        anyhow::bail!(
            "llm.base_url must be an http(s) URL, got '{}'",
            config.llm.base_url
        );
    }

    if config.recommend.display_count == 0 {
        anyhow::bail!("recommend.display_count must be >= 1");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_src: &str) -> Config {
        toml::from_str(toml_src).unwrap()
    }

    #[test]
    fn test_minimal_config_gets_defaults() {
        let cfg = parse(
            r#"
[catalog]
path = "catalog.json"

[llm]
model = "gpt-4o-mini"
"#,
        );
        assert!(validate(&cfg).is_ok());
        assert_eq!(cfg.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(cfg.llm.vision_model(), "gpt-4o-mini");
        assert_eq!(cfg.llm.timeout_secs, 30);
        assert_eq!(cfg.recommend.display_count, 5);
        assert!(cfg.translation.enabled);
        assert!(!cfg.recommend.augment_missing_descriptions);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let cfg = parse(
            r#"
[catalog]
path = "catalog.json"

[llm]
model = "m"
timeout_secs = 0
"#,
        );
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_rejects_zero_display_count() {
        let cfg = parse(
            r#"
[catalog]
path = "catalog.json"

[llm]
model = "m"

[recommend]
display_count = 0
"#,
        );
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("display_count"));
    }

    #[test]
    fn test_rejects_non_http_base_url() {
        let cfg = parse(
            r#"
[catalog]
path = "catalog.json"

[llm]
base_url = "localhost:11434"
model = "m"
"#,
        );
        assert!(validate(&cfg).is_err());
    }

    #[test]
    fn test_vision_model_override() {
        let cfg = parse(
            r#"
[catalog]
path = "catalog.json"

[llm]
model = "text-model"
vision_model = "vision-model"
"#,
        );
        assert_eq!(cfg.llm.vision_model(), "vision-model");
    }
}
