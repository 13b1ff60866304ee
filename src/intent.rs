//! LLM-backed intent extraction with tolerant response parsing.
//!
//! Models wrap JSON in code fences, quote numbers, write `"60k"` for a
//! budget, or return a comma-separated string where an array was asked for.
//! [`parse_intent`] reads each field independently and drops anything it
//! cannot interpret, so one bad field never discards the others.

use anyhow::{bail, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use shopwise_core::services::IntentExtractor;
use shopwise_core::{Budget, ExtractedIntent, Priority};

use crate::llm::LlmClient;
use crate::prompts;

pub struct LlmIntentExtractor {
    client: Arc<LlmClient>,
}

impl LlmIntentExtractor {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntentExtractor for LlmIntentExtractor {
    async fn extract(&self, text: &str) -> Result<ExtractedIntent> {
        let raw = self
            .client
            .complete(prompts::INTENT_SYSTEM, &prompts::intent_prompt(text))
            .await?;
        parse_intent(&raw)
    }
}

/// Parse a model reply into an [`ExtractedIntent`].
///
/// Fails only when no JSON object can be found at all.
pub fn parse_intent(raw: &str) -> Result<ExtractedIntent> {
    let (start, end) = match (raw.find('{'), raw.rfind('}')) {
        (Some(s), Some(e)) if s < e => (s, e),
        _ => bail!("intent response contains no JSON object"),
    };
    let value: Value = serde_json::from_str(&raw[start..=end])?;
    let Some(obj) = value.as_object() else {
        bail!("intent response is not a JSON object");
    };

    Ok(ExtractedIntent {
        product_type: field(obj, &["productType", "product_type"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        budget: field(obj, &["budget"]).and_then(parse_budget),
        brands: field(obj, &["brands", "brand"]).and_then(parse_string_list),
        features: field(obj, &["features"]).and_then(parse_string_list),
        priority: field(obj, &["priority"])
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Priority>().ok()),
        sentiment: field(obj, &["sentiment"])
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    })
}

fn field<'a>(obj: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| obj.get(*k))
        .find(|v| !v.is_null())
}

fn parse_budget(value: &Value) -> Option<Budget> {
    let budget = match value {
        Value::Object(o) => Budget {
            min: o.get("min").and_then(parse_amount),
            max: o.get("max").and_then(parse_amount),
        },
        // A bare amount reads as a ceiling.
        other => Budget {
            min: None,
            max: parse_amount(other),
        },
    };
    if budget.min.is_none() && budget.max.is_none() {
        None
    } else {
        Some(budget)
    }
}

/// Numbers, or strings that are wholly an amount: `"60000"`, `"60,000"`,
/// `"₹45000"`, `"Rs. 45000"`, `"60k"`, `"50 thousand"`, `"1 lakh"`,
/// `"1.5 crore"`. Ranges and mixed text (`"10-20k"`, `"under 50000"`) are
/// rejected so they never become a ceiling.
fn parse_amount(value: &Value) -> Option<f64> {
    let amount = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_amount_str(s)?,
        _ => return None,
    };
    (amount.is_finite() && amount >= 0.0).then_some(amount)
}

const CURRENCY_PREFIXES: &[&str] = &["₹", "rs.", "rs", "inr", "$"];

fn parse_amount_str(raw: &str) -> Option<f64> {
    let lower = raw.trim().to_lowercase();
    let mut rest = lower.as_str();
    for prefix in CURRENCY_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            rest = stripped.trim_start();
            break;
        }
    }

    let split = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(rest.len());
    let (number, unit) = rest.split_at(split);
    let number: String = number.chars().filter(|c| *c != ',').collect();
    if number.is_empty() {
        return None;
    }

    let scale = match unit.trim() {
        "" => 1.0,
        "k" | "thousand" => 1_000.0,
        "lakh" | "lakhs" | "lac" => 100_000.0,
        "crore" | "crores" | "cr" => 10_000_000.0,
        _ => return None,
    };
    Some(number.parse::<f64>().ok()? * scale)
}

fn parse_string_list(value: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = match value {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => return None,
    };
    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_clean_json() {
        let raw = r#"{"productType":"laptops","budget":{"min":null,"max":60000},
            "brands":["HP","Dell"],"features":["backlit keyboard"],
            "priority":"ratings","sentiment":"eager"}"#;
        let intent = parse_intent(raw).unwrap();
        assert_eq!(intent.product_type.as_deref(), Some("laptops"));
        assert_eq!(intent.budget_max(), Some(60000.0));
        assert_eq!(intent.brands, Some(vec!["HP".to_string(), "Dell".to_string()]));
        assert_eq!(intent.priority, Some(Priority::Ratings));
        assert_eq!(intent.sentiment.as_deref(), Some("eager"));
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "Sure! Here you go:\n```json\n{\"productType\": \"phones\"}\n```";
        let intent = parse_intent(raw).unwrap();
        assert_eq!(intent.product_type.as_deref(), Some("phones"));
        assert_eq!(intent.budget, None);
    }

    #[test]
    fn test_string_budgets() {
        let intent =
            parse_intent(r#"{"budget": {"min": "₹20,000", "max": "60k"}}"#).unwrap();
        let budget = intent.budget.unwrap();
        assert_eq!(budget.min, Some(20000.0));
        assert_eq!(budget.max, Some(60000.0));
    }

    #[test]
    fn test_non_numeric_budget_dropped() {
        let intent = parse_intent(
            r#"{"productType": "tv", "budget": {"max": "affordable"}, "priority": "vibes"}"#,
        )
        .unwrap();
        assert_eq!(intent.product_type.as_deref(), Some("tv"));
        assert_eq!(intent.budget, None);
        assert_eq!(intent.priority, None);
    }

    #[test]
    fn test_budget_unit_words() {
        let max = |raw: &str| {
            parse_intent(&format!(r#"{{"budget": {{"max": "{}"}}}}"#, raw))
                .unwrap()
                .budget_max()
        };
        assert_eq!(max("1 lakh"), Some(100_000.0));
        assert_eq!(max("50 thousand"), Some(50_000.0));
        assert_eq!(max("1.5 crore"), Some(15_000_000.0));
        assert_eq!(max("Rs. 45,000"), Some(45_000.0));
    }

    #[test]
    fn test_ranges_and_mixed_text_dropped() {
        for raw in ["10-20k", "under 50000", "50000 or less", "1.2.3", "k", "5 bucks"] {
            let intent =
                parse_intent(&format!(r#"{{"budget": {{"max": "{}"}}}}"#, raw)).unwrap();
            assert_eq!(intent.budget, None, "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_bare_budget_is_ceiling() {
        let intent = parse_intent(r#"{"budget": 15000}"#).unwrap();
        assert_eq!(intent.budget_max(), Some(15000.0));
    }

    #[test]
    fn test_comma_separated_brands() {
        let intent = parse_intent(r#"{"brands": "Samsung, OnePlus ,"}"#).unwrap();
        assert_eq!(
            intent.brands,
            Some(vec!["Samsung".to_string(), "OnePlus".to_string()])
        );
    }

    #[test]
    fn test_snake_case_keys() {
        let intent = parse_intent(r#"{"product_type": "headphones"}"#).unwrap();
        assert_eq!(intent.product_type.as_deref(), Some("headphones"));
    }

    #[test]
    fn test_prose_is_an_error() {
        assert!(parse_intent("I think they want a laptop.").is_err());
        assert!(parse_intent("{not json}").is_err());
    }
}
