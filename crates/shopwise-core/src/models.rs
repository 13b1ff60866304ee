//! Core data models used throughout Shopwise.
//!
//! These types represent the products, queries, extracted intents, and
//! final recommendations that flow through the retrieval pipeline. JSON
//! field names are camelCase so catalog files and LLM payloads share one
//! shape.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RecommendError;
use crate::language::Language;

/// Highest rating a product can carry.
pub const MAX_RATING: f64 = 5.0;

/// A product record owned by the catalog.
///
/// `id` is unique within a category only. A `rating` of 0 means "not
/// rated"; selection math treats it as 1 via [`effective_rating`](Product::effective_rating).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub platform: String,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: f64,
        platform: impl Into<String>,
        rating: f64,
    ) -> Self {
        Product {
            id: id.into(),
            name: name.into(),
            price,
            platform: platform.into(),
            rating,
            reviews: String::new(),
            description: None,
            url: None,
            thumbnail: None,
            in_stock: true,
        }
        .normalized()
    }

    /// Clamp `rating` into `[0, 5]` and `price` to a non-negative value.
    ///
    /// NaN ratings become 0 (unrated); NaN or negative prices become 0.
    pub fn normalized(mut self) -> Self {
        self.rating = if self.rating.is_nan() {
            0.0
        } else {
            self.rating.clamp(0.0, MAX_RATING)
        };
        if self.price.is_nan() || self.price < 0.0 {
            self.price = 0.0;
        }
        self
    }

    /// Rating used for value math: the stored rating, or 1 when unrated.
    pub fn effective_rating(&self) -> f64 {
        if self.rating > 0.0 {
            self.rating
        } else {
            1.0
        }
    }

    /// `price / effective_rating`. Lower is better value.
    pub fn value_ratio(&self) -> f64 {
        self.price / self.effective_rating()
    }

    pub fn with_reviews(mut self, reviews: impl Into<String>) -> Self {
        self.reviews = reviews.into();
        self
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn has_description(&self) -> bool {
        self.description
            .as_deref()
            .is_some_and(|d| !d.trim().is_empty())
    }
}

/// A price range. Either bound may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Budget {
    pub fn up_to(max: f64) -> Self {
        Budget {
            min: None,
            max: Some(max),
        }
    }
}

/// A shopper's request as submitted to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub brands: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>) -> Self {
        SearchQuery {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = Some(budget);
        self
    }

    pub fn with_brands<I, S>(mut self, brands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.brands = brands.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    /// Upper budget bound supplied by the shopper, if any.
    pub fn budget_max(&self) -> Option<f64> {
        self.budget.and_then(|b| b.max)
    }

    /// Reject queries that cannot be retrieved against.
    pub fn validate(&self) -> Result<(), RecommendError> {
        if self.text.trim().is_empty() {
            return Err(RecommendError::Validation(
                "query text must not be empty".to_string(),
            ));
        }
        if let Some(budget) = self.budget {
            for (label, bound) in [("min", budget.min), ("max", budget.max)] {
                if let Some(value) = bound {
                    if !value.is_finite() || value < 0.0 {
                        return Err(RecommendError::Validation(format!(
                            "budget.{} must be a non-negative number, got {}",
                            label, value
                        )));
                    }
                }
            }
            if let (Some(min), Some(max)) = (budget.min, budget.max) {
                if min > max {
                    return Err(RecommendError::Validation(format!(
                        "budget.min ({}) exceeds budget.max ({})",
                        min, max
                    )));
                }
            }
        }
        Ok(())
    }
}

/// What the shopper cares about most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Price,
    Quality,
    Ratings,
    Brand,
    Delivery,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "price" => Ok(Priority::Price),
            "quality" => Ok(Priority::Quality),
            "ratings" | "rating" => Ok(Priority::Ratings),
            "brand" => Ok(Priority::Brand),
            "delivery" => Ok(Priority::Delivery),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Priority::Price => "price",
            Priority::Quality => "quality",
            Priority::Ratings => "ratings",
            Priority::Brand => "brand",
            Priority::Delivery => "delivery",
        };
        f.write_str(s)
    }
}

/// Structured reading of a free-text query, produced by an
/// [`IntentExtractor`](crate::services::IntentExtractor).
///
/// Advisory only. Every field is optional and consumers must treat an
/// absent field as "no constraint on that dimension".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedIntent {
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub budget: Option<Budget>,
    #[serde(default)]
    pub brands: Option<Vec<String>>,
    #[serde(default)]
    pub features: Option<Vec<String>>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub sentiment: Option<String>,
}

impl ExtractedIntent {
    pub fn for_product_type(product_type: impl Into<String>) -> Self {
        ExtractedIntent {
            product_type: Some(product_type.into()),
            ..Default::default()
        }
    }

    /// Upper budget bound, only when it is a usable positive number.
    pub fn budget_max(&self) -> Option<f64> {
        self.budget
            .and_then(|b| b.max)
            .filter(|max| max.is_finite() && *max > 0.0)
    }
}

/// The final answer returned to the shopper.
///
/// `best_value` and `top_rated` are chosen from the full retrieved set,
/// so either may also appear in `alternatives` rather than `products`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RagRecommendation {
    pub products: Vec<Product>,
    pub analysis: String,
    pub reasoning: String,
    pub alternatives: Vec<Product>,
    pub best_value: Product,
    pub top_rated: Product,
}
