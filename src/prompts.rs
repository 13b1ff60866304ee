//! Prompt text for each LLM-backed collaborator.
//!
//! Wording here is tuning, not contract; the adapters only depend on the
//! response shapes described in each system prompt.

use std::fmt::Write;

use shopwise_core::context::RecommendationContext;
use shopwise_core::{Language, Product};

pub const INTENT_SYSTEM: &str = "You extract structured shopping intent from a shopper's message. \
Reply with a single JSON object and nothing else, using these keys: \
\"productType\" (string, the kind of product, plural, e.g. \"laptops\"), \
\"budget\" (object with optional numeric \"min\" and \"max\"), \
\"brands\" (array of strings), \
\"features\" (array of strings), \
\"priority\" (one of \"price\", \"quality\", \"ratings\", \"brand\", \"delivery\"), \
\"sentiment\" (short string). Use null for anything the message does not say.";

pub const RECOMMEND_SYSTEM: &str = "You are a careful shopping assistant. Recommend products \
only from the candidate list you are given. Mention prices and ratings, respect the shopper's \
budget and brand preferences, and keep the answer under 200 words.";

pub const COMPARE_SYSTEM: &str = "You compare shortlisted products for a shopper. For each \
product give one line of strengths and weaknesses, then state which one you would pick and why.";

pub const DESCRIBE_SYSTEM: &str = "You write short, factual product descriptions for a \
shopping catalog. One or two sentences. No marketing superlatives.";

pub fn intent_prompt(text: &str) -> String {
    format!("Shopper message:\n{}", text)
}

pub fn recommend_prompt(context: &RecommendationContext) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shopper request: {}", context.query_text);

    let prefs = &context.preferences;
    if let Some(max) = prefs.budget_max {
        let _ = writeln!(out, "Budget ceiling: {:.0}", max);
    }
    if !prefs.brands.is_empty() {
        let _ = writeln!(out, "Preferred brands: {}", prefs.brands.join(", "));
    }
    if !prefs.categories.is_empty() {
        let _ = writeln!(out, "Categories of interest: {}", prefs.categories.join(", "));
    }

    let _ = writeln!(out, "\nCandidates:");
    write_products(&mut out, &context.candidates);
    out
}

pub fn compare_prompt(query_text: &str, candidates: &[Product]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Shopper request: {}\n\nShortlist:", query_text);
    write_products(&mut out, candidates);
    out
}

pub fn translate_system(target: Language) -> String {
    format!(
        "Translate the user's text into {}. Keep product names, brand names, numbers and \
         currency amounts unchanged. Reply with the translation only.",
        target.name()
    )
}

pub fn describe_prompt(product: &Product) -> String {
    let mut out = format!(
        "Product: {}\nSold on: {}\nPrice: {:.0}\n",
        product.name, product.platform, product.price
    );
    if !product.reviews.trim().is_empty() {
        let _ = writeln!(out, "Review summary: {}", product.reviews);
    }
    out
}

pub fn describe_image_prompt(product: &Product) -> String {
    format!(
        "{}\n\n{}Describe this product from its photo and the details above.",
        DESCRIBE_SYSTEM,
        describe_prompt(product)
    )
}

fn write_products(out: &mut String, products: &[Product]) {
    for (i, p) in products.iter().enumerate() {
        let rating = if p.rating > 0.0 {
            format!("{:.1}/5", p.rating)
        } else {
            "unrated".to_string()
        };
        let _ = writeln!(
            out,
            "{}. {} | {:.0} | {} | {}{}",
            i + 1,
            p.name,
            p.price,
            p.platform,
            rating,
            if p.in_stock { "" } else { " | out of stock" }
        );
        if !p.reviews.trim().is_empty() {
            let _ = writeln!(out, "   Reviews: {}", p.reviews);
        }
    }
}
