//! Plain-text normalization helpers shared by the content pipeline.
//!
//! Everything here is a pure function: HTML stripping, word counting, date
//! normalization and dash cleanup. None of these may fail — malformed input
//! degrades to best-effort output.

use chrono::NaiveDate;
use regex::Regex;
use scraper::Html;

/// Strips markup from a fragment and collapses whitespace runs.
///
/// Best-effort: malformed HTML is tolerated by the parser, and plain text
/// passes through unchanged apart from whitespace normalization.
pub fn strip_html(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    let fragment = Html::parse_fragment(text);
    let joined: Vec<&str> = fragment.root_element().text().collect();
    collapse_whitespace(&joined.join(" "))
}

fn collapse_whitespace(text: &str) -> String {
    let re = Regex::new(r"\s+").unwrap();
    re.replace_all(text, " ").trim().to_string()
}

/// Word count of the stripped text; 0 for empty input.
pub fn count_words(text: &str) -> usize {
    if text.is_empty() {
        return 0;
    }
    strip_html(text).split_whitespace().count()
}

/// Normalizes assorted human date spellings to an ISO `YYYY-MM-DD` string.
///
/// Accepts bare years (`"2023"` -> `"2023-01-01"`), year-month
/// (`"2023-05"` -> `"2023-05-01"`), ISO dates (pass through), and a fixed
/// list of human formats. Unrecognized input is returned unchanged — this
/// function never fails.
pub fn normalize_date(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }
    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        return format!("{}-01-01", s);
    }
    if s.len() == 7 && s.as_bytes()[4] == b'-' {
        return format!("{}-01", s);
    }
    if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() {
        return s.to_string();
    }
    for fmt in ["%d %B %Y", "%d %b %Y", "%d-%m-%Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(s, fmt) {
            return parsed.format("%Y-%m-%d").to_string();
        }
    }
    // Month-year spellings ("March 2021") get day 1
    for fmt in ["%d %B %Y", "%d %b %Y"] {
        if let Ok(parsed) = NaiveDate::parse_from_str(&format!("1 {}", s), fmt) {
            return parsed.format("%Y-%m-%d").to_string();
        }
    }
    s.to_string()
}

/// Parses a raw date string to a calendar day via [`normalize_date`].
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(&normalize_date(raw), "%Y-%m-%d").ok()
}

/// Deletes hyphen, en-dash and em-dash characters, then collapses the
/// double spaces left behind.
///
/// Legitimately hyphenated compound words lose their hyphen too; accepted
/// trade-off for scrubbing bullet-dash artifacts out of generated text.
pub fn remove_dash_symbols(text: &str) -> String {
    let without: String = text.chars().filter(|c| !matches!(c, '-' | '–' | '—')).collect();
    let re = Regex::new(r" {2,}").unwrap();
    re.replace_all(&without, " ").to_string()
}

/// Wraps double-newline-separated paragraphs in `<p>` tags.
pub fn wrap_in_p_tags(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    text.split("\n\n")
        .map(str::trim)
        .filter(|para| !para.is_empty())
        .map(|para| format!("<p>{}</p>", para.replace('\n', " ")))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Scrubs model-output debris from a generated blob before extraction:
/// markdown table fragments, skip placeholders, and filler phrases the
/// prompt forbids but models still emit.
pub fn clean_generated_text(text: &str) -> String {
    let mut cleaned = text.to_string();

    let table_debris = Regex::new(r"\|\s*(---\s*)?\|").unwrap();
    cleaned = table_debris.replace_all(&cleaned, "").to_string();

    let skip_lines = Regex::new(r"(?i)\[skip this line\].*\n?").unwrap();
    cleaned = skip_lines.replace_all(&cleaned, "").to_string();

    let phrases = [
        "coming soon",
        "will be updated soon",
        "to be updated",
        "details will be shared",
        "information not available",
    ];
    for phrase in phrases {
        let re = Regex::new(&format!("(?i){}", regex::escape(phrase))).unwrap();
        cleaned = re.replace_all(&cleaned, "").to_string();
    }

    cleaned
}
