//! Word-count sufficiency checks that decide, per field, whether supplied
//! text is passed through cleaned or replaced by generated text.
//!
//! The decision is strictly binary; there is no partial-expansion mode.

use crate::text::{count_words, strip_html};
use serde::Deserialize;

/// Per-field minimum word counts. Each threshold is configuration, not a
/// constant buried in the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldThresholds {
    pub locality: usize,
    pub prop_locality: usize,
    pub property: usize,
    pub builder_details: usize,
    pub builder_listing: usize,
}

impl Default for FieldThresholds {
    fn default() -> Self {
        Self {
            locality: 150,
            prop_locality: 150,
            property: 250,
            builder_details: 100,
            builder_listing: 100,
        }
    }
}

/// True iff the stripped word count reaches the threshold (boundary inclusive).
pub fn is_sufficient(text: &str, min_words: usize) -> bool {
    count_words(text) >= min_words
}

/// One inbound description field: its raw value, measured richness and the
/// resulting pass-through/generate decision.
#[derive(Debug, Clone)]
pub struct ContentField {
    pub raw: Option<String>,
    pub word_count: usize,
    pub sufficient: bool,
}

impl ContentField {
    /// Evaluates a possibly-absent raw value against a threshold.
    ///
    /// Absence and emptiness both yield an insufficient field, but `raw`
    /// preserves the distinction for downstream fallbacks.
    pub fn evaluate(raw: Option<&str>, min_words: usize) -> Self {
        match raw {
            Some(text) if !text.trim().is_empty() => Self {
                raw: Some(text.to_string()),
                word_count: count_words(text),
                sufficient: is_sufficient(text, min_words),
            },
            _ => Self {
                raw: None,
                word_count: 0,
                sufficient: false,
            },
        }
    }

    /// Cleaned pass-through text, present only when the field is sufficient.
    pub fn passthrough(&self) -> Option<String> {
        if self.sufficient {
            self.raw.as_deref().map(strip_html)
        } else {
            None
        }
    }

    pub fn needs_generation(&self) -> bool {
        !self.sufficient
    }
}

/// The five description fields the pipeline validates and assembles.
#[derive(Debug, Clone)]
pub struct ContentFields {
    pub locality: ContentField,
    pub prop_locality: ContentField,
    pub property: ContentField,
    pub builder_details: ContentField,
    pub builder_listing: ContentField,
}

impl ContentFields {
    pub fn any_needs_generation(&self) -> bool {
        self.locality.needs_generation()
            || self.prop_locality.needs_generation()
            || self.property.needs_generation()
            || self.builder_details.needs_generation()
            || self.builder_listing.needs_generation()
    }
}
