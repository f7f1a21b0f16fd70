//! Synthesizes a batch of customer reviews for one property.
//!
//! Per review: a language style, a fresh identity, a unique calendar date
//! inside a bounded window, a lifecycle mode, a weighted sentiment, short
//! generated text (with a deterministic fallback when the external call
//! fails), and a star rating derived from lexical cues in the text. Every
//! probability lives on [`ReviewOptions`] and every draw goes through the
//! injected random source.

use crate::errors::AppError;
use crate::features::PropertyFeatures;
use crate::groq_client::GroqClient;
use crate::models::GeneratedReview;
use crate::names::unique_full_name;
use crate::prompts::review_prompt;
use crate::region::Region;
use crate::text::parse_date;
use chrono::{Duration, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "love", "nice", "amazing", "comfortable", "super",
];
const NEGATIVE_WORDS: &[&str] = &[
    "bad", "poor", "noisy", "dirty", "delay", "slow", "problem", "issue", "disappointed",
];

/// Lifecycle mode steering what one review talks about. Stateless: decided
/// independently per review from two dates vs today, exactly one active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReviewMode {
    Locality,
    HandOver,
    Amenities,
    UnderConstruction,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Positive,
    Negative,
}

/// Tunable knobs for review synthesis.
#[derive(Debug, Clone)]
pub struct ReviewOptions {
    pub count: usize,
    /// Chance of styling a review in the detected region's language.
    pub regional_language_odds: f64,
    /// Chance of a slightly critical review.
    pub negative_odds: f64,
    /// Window before today used when the launch date is absent or future.
    pub fallback_window_days: i64,
    /// Collision retries before reusing today's date.
    pub date_retry_budget: u32,
}

impl Default for ReviewOptions {
    fn default() -> Self {
        Self {
            count: 10,
            regional_language_odds: 0.10,
            negative_odds: 0.25,
            fallback_window_days: 60,
            date_retry_budget: 200,
        }
    }
}

/// Classifies the review mode from launch/possession dates vs today.
pub fn decide_review_mode(
    launch: Option<NaiveDate>,
    possession: Option<NaiveDate>,
    today: NaiveDate,
) -> ReviewMode {
    if launch == Some(today) {
        return ReviewMode::Locality;
    }
    match possession {
        Some(p) if p == today => ReviewMode::HandOver,
        Some(p) if today > p => ReviewMode::Amenities,
        Some(p) if today < p => ReviewMode::UnderConstruction,
        _ => ReviewMode::General,
    }
}

/// Picks a review day in `[launch or (today - window), today]`, unique
/// against `used` for up to `retry_budget` attempts.
///
/// After the budget is exhausted today's date is reused, which can
/// duplicate an existing entry — known edge case, kept as-is.
pub fn pick_review_date<R: Rng + ?Sized>(
    launch: Option<NaiveDate>,
    used: &mut HashSet<NaiveDate>,
    today: NaiveDate,
    window_days: i64,
    retry_budget: u32,
    rng: &mut R,
) -> NaiveDate {
    let floor = launch
        .filter(|l| *l <= today)
        .unwrap_or(today - Duration::days(window_days));
    let delta = (today - floor).num_days();
    if delta < 1 {
        return today;
    }
    for _ in 0..retry_budget {
        let day = floor + Duration::days(rng.gen_range(0..=delta));
        if used.insert(day) {
            return day;
        }
    }
    today
}

/// Derives a 1-5 star rating from lexical cues in the review text.
///
/// A coarse heuristic, not sentiment analysis: positive-only words bucket
/// to {4,5}, negative-only to {1,2}, both-or-neither to {2,3,4}. Empty or
/// garbled text matches nothing and lands in the middle bucket.
pub fn rating_from_text<R: Rng + ?Sized>(text: &str, rng: &mut R) -> u8 {
    let lowered = text.to_lowercase();
    let positive = POSITIVE_WORDS.iter().any(|w| lowered.contains(w));
    let negative = NEGATIVE_WORDS.iter().any(|w| lowered.contains(w));
    let bucket: &[u8] = if positive && !negative {
        &[4, 5]
    } else if negative && !positive {
        &[1, 2]
    } else {
        &[2, 3, 4]
    };
    *bucket.choose(rng).unwrap_or(&3)
}

pub struct ReviewSynthesizer<'a> {
    groq: Option<&'a GroqClient>,
    options: ReviewOptions,
}

impl<'a> ReviewSynthesizer<'a> {
    pub fn new(groq: Option<&'a GroqClient>, options: ReviewOptions) -> Self {
        Self { groq, options }
    }

    /// Generates the whole batch sequentially, one external call per
    /// review. External failures never abort the batch — they degrade to
    /// the fixed fallback sentence, and rating derivation still runs.
    pub async fn generate_batch<R: Rng + ?Sized>(
        &self,
        features: &PropertyFeatures,
        region: Region,
        rng: &mut R,
    ) -> Vec<GeneratedReview> {
        let today = chrono::Local::now().date_naive();
        let mut used_first_names: HashSet<String> = HashSet::new();
        let mut used_dates: HashSet<NaiveDate> = HashSet::new();
        let mut reviews = Vec::with_capacity(self.options.count);

        for _ in 0..self.options.count.max(1) {
            reviews.push(
                self.generate_one(features, region, today, &mut used_first_names, &mut used_dates, rng)
                    .await,
            );
        }
        reviews
    }

    async fn generate_one<R: Rng + ?Sized>(
        &self,
        features: &PropertyFeatures,
        region: Region,
        today: NaiveDate,
        used_first_names: &mut HashSet<String>,
        used_dates: &mut HashSet<NaiveDate>,
        rng: &mut R,
    ) -> GeneratedReview {
        let language = if region != Region::General
            && rng.gen::<f64>() < self.options.regional_language_odds
        {
            region
        } else {
            Region::General
        };

        let full_name = unique_full_name(used_first_names, region, rng);
        let (first_name, last_name) = match full_name.split_once(' ') {
            Some((first, last)) => (first.to_string(), last.to_string()),
            None => (full_name, String::new()),
        };

        let launch = features.launch_date.as_deref().and_then(parse_date);
        let possession = features.possession_date.as_deref().and_then(parse_date);

        let date = pick_review_date(
            launch,
            used_dates,
            today,
            self.options.fallback_window_days,
            self.options.date_retry_budget,
            rng,
        );
        let mode = decide_review_mode(launch, possession, today);
        let sentiment = if rng.gen::<f64>() < self.options.negative_odds {
            Sentiment::Negative
        } else {
            Sentiment::Positive
        };

        let review = match self.request_text(mode, language, features, sentiment).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => fallback_review_text(features),
            Err(e) => {
                tracing::warn!("Review generation fell back to fixed text: {}", e);
                fallback_review_text(features)
            }
        };

        let rating_value = rating_from_text(&review, rng);

        GeneratedReview {
            first_name,
            last_name,
            date: date.format("%Y-%m-%d").to_string(),
            rating_value,
            review,
        }
    }

    async fn request_text(
        &self,
        mode: ReviewMode,
        language: Region,
        features: &PropertyFeatures,
        sentiment: Sentiment,
    ) -> Result<String, AppError> {
        let groq = self
            .groq
            .ok_or_else(|| AppError::ExternalApiError("Groq client not configured".to_string()))?;
        let prompt = review_prompt(mode, language, features, sentiment);
        groq.complete(&prompt, 140, 0.8).await
    }
}

/// Fixed fallback sentence referencing the builder, used whenever the
/// external call cannot produce text.
pub fn fallback_review_text(features: &PropertyFeatures) -> String {
    format!(
        "Good project by {}. Nice location and amenities. Worth considering.",
        features.builder.as_deref().unwrap_or("the builder")
    )
}
