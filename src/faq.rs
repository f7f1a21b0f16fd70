//! Synthesizes community-style FAQs for one property.
//!
//! One external call requests a fixed-shape JSON array; each item is
//! post-processed (dash removal) and assigned fresh identities. Malformed
//! items are skipped individually; an unparseable response yields an empty
//! list rather than an error.

use crate::features::PropertyFeatures;
use crate::groq_client::GroqClient;
use crate::models::{FaqAnswer, GeneratedFaq};
use crate::names::unique_first_names;
use crate::prompts::faq_prompt;
use crate::text::remove_dash_symbols;
use rand::Rng;
use serde_json::Value;

pub struct FaqSynthesizer<'a> {
    groq: Option<&'a GroqClient>,
    count: usize,
}

impl<'a> FaqSynthesizer<'a> {
    pub fn new(groq: Option<&'a GroqClient>, count: usize) -> Self {
        Self { groq, count }
    }

    pub async fn generate<R: Rng + ?Sized>(
        &self,
        features: &PropertyFeatures,
        rng: &mut R,
    ) -> Vec<GeneratedFaq> {
        let Some(groq) = self.groq else {
            tracing::warn!("Groq client not configured; skipping FAQ generation");
            return Vec::new();
        };

        let prompt = faq_prompt(features, self.count);
        let response = match groq.complete(&prompt, 2000, 0.7).await {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("FAQ generation failed: {}", e);
                return Vec::new();
            }
        };

        let faqs = parse_faq_items(&response, rng);
        tracing::info!("✓ Generated {} FAQ item(s)", faqs.len());
        faqs
    }
}

/// Parses the model's JSON output into FAQs, skipping malformed items.
pub fn parse_faq_items<R: Rng + ?Sized>(response: &str, rng: &mut R) -> Vec<GeneratedFaq> {
    let Some(items) = extract_json_array(response) else {
        tracing::warn!("FAQ response was not parseable JSON; returning empty list");
        return Vec::new();
    };

    let mut faqs = Vec::new();
    for item in items {
        match build_faq(&item, rng) {
            Some(faq) => faqs.push(faq),
            None => tracing::debug!("Skipping malformed FAQ item: {}", item),
        }
    }
    faqs
}

/// Locates and parses the JSON array inside a possibly fenced or
/// prose-wrapped model response.
fn extract_json_array(response: &str) -> Option<Vec<Value>> {
    let trimmed = response.trim();
    if let Ok(items) = serde_json::from_str::<Vec<Value>>(trimmed) {
        return Some(items);
    }
    // Tolerate code fences and surrounding prose
    let start = trimmed.find('[')?;
    let end = trimmed.rfind(']')?;
    if end <= start {
        return None;
    }
    serde_json::from_str::<Vec<Value>>(&trimmed[start..=end]).ok()
}

fn build_faq<R: Rng + ?Sized>(item: &Value, rng: &mut R) -> Option<GeneratedFaq> {
    let question = item.get("question")?.as_str()?.trim();
    if question.is_empty() {
        return None;
    }
    let answers_text: Vec<&str> = item
        .get("answers_text")?
        .as_array()?
        .iter()
        .filter_map(|a| a.as_str())
        .filter(|a| !a.trim().is_empty())
        .collect();
    if answers_text.is_empty() {
        return None;
    }
    let category = item
        .get("category")
        .and_then(|c| c.as_str())
        .unwrap_or("Other")
        .to_string();

    // One asker plus one name per answer, all distinct within this FAQ;
    // the pool resets on the next item.
    let mut names = unique_first_names(answers_text.len() + 1, rng);
    let asker = names.remove(0);
    let answers = answers_text
        .iter()
        .zip(names)
        .map(|(answer, first_name)| FaqAnswer {
            first_name,
            answer: remove_dash_symbols(answer.trim()),
        })
        .collect();

    Some(GeneratedFaq {
        question: remove_dash_symbols(question),
        answers,
        first_name: asker,
        category,
    })
}
