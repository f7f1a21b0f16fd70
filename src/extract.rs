//! Recovers the named content sections from one generated text blob.
//!
//! The model is asked to delimit sections with `###` headers, but real
//! output drifts, so recovery is an ordered chain of strategies with
//! early exit: marker search, an anchor-phrase fallback for the property
//! description, then a positional bucket split as a last resort. Each
//! strategy returns an `Option` and is testable on its own; extraction
//! never fails — a section that cannot be recovered is simply `None`.

use crate::text::count_words;
use regex::Regex;

/// Minimum recovered word count for a marker/anchor hit to be accepted.
const MIN_SECTION_WORDS: usize = 50;

/// The five sections the generation prompt requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Locality,
    PropLocality,
    Property,
    BuilderDetails,
    BuilderListing,
}

/// Canonical section order assumed by the positional bucket fallback.
///
/// This must match the order the generation prompt requests sections in;
/// if the prompt template changes order, change this with it.
pub const DEFAULT_SECTION_ORDER: [Section; 5] = [
    Section::Locality,
    Section::PropLocality,
    Section::Property,
    Section::BuilderDetails,
    Section::BuilderListing,
];

impl Section {
    /// Acceptable marker spellings for this section, tried in order.
    fn marker_spellings(&self) -> &'static [&'static str] {
        match self {
            Section::Locality => &["LOCALITY DESCRIPTION", "ABOUT THE LOCALITY", "LOCATION"],
            Section::PropLocality => &[
                "PROPERTY LOCALITY DESCRIPTION",
                "PROPERTY AND LOCALITY",
                "LOCALITY ADVANTAGES",
            ],
            Section::Property => &["PROPERTY DESCRIPTION", "ABOUT THE PROJECT"],
            Section::BuilderDetails => &[
                "BUILDER DETAILS DESCRIPTION",
                "ABOUT THE DEVELOPER",
                "DEVELOPER PROFILE",
            ],
            Section::BuilderListing => &["BUILDER LISTING DESCRIPTION", "DEVELOPER OVERVIEW"],
        }
    }
}

pub struct SectionExtractor {
    /// Phrase known to open the property-description block
    /// (the prompt forces `"<project> by <builder>"` as its first words).
    anchor_phrase: Option<String>,
    /// Bucket-order mapping for the positional fallback.
    bucket_order: [Section; 5],
}

impl SectionExtractor {
    pub fn new(anchor_phrase: Option<String>) -> Self {
        Self {
            anchor_phrase,
            bucket_order: DEFAULT_SECTION_ORDER,
        }
    }

    /// Recovers one section, trying each strategy in order.
    pub fn extract(&self, blob: &str, section: Section) -> Option<String> {
        if blob.trim().is_empty() {
            return None;
        }
        if let Some(text) = self.extract_by_markers(blob, section) {
            return Some(text);
        }
        if section == Section::Property {
            if let Some(text) = self.extract_by_anchor(blob) {
                return Some(text);
            }
        }
        // Buckets only apply when the blob carries no markers at all;
        // a partially-markered blob means the missing section is absent.
        if !any_marker_present(blob) {
            return self.extract_by_buckets(blob, section);
        }
        None
    }

    /// Strategy 1: split on an explicit marker, in any accepted decoration.
    pub fn extract_by_markers(&self, blob: &str, section: Section) -> Option<String> {
        for spelling in section.marker_spellings() {
            for pattern in marker_patterns(spelling) {
                let Ok(re) = Regex::new(&pattern) else { continue };
                let Some(m) = re.find(blob) else { continue };
                let after = &blob[m.end()..];
                let content = cut_at_next_marker(after);
                let paragraphs = paragraph_blocks(content);
                if count_words(&paragraphs) >= MIN_SECTION_WORDS {
                    return Some(paragraphs);
                }
            }
        }
        None
    }

    /// Strategy 2 (property description only): the anchor phrase that
    /// always opens that section's content block.
    pub fn extract_by_anchor(&self, blob: &str) -> Option<String> {
        let anchor = self.anchor_phrase.as_deref()?;
        let re = Regex::new(&format!("(?i){}", regex::escape(anchor))).ok()?;
        let m = re.find(blob)?;
        let content = cut_at_next_marker(&blob[m.start()..]);
        let paragraphs = paragraph_blocks(content);
        if count_words(&paragraphs) >= MIN_SECTION_WORDS {
            Some(paragraphs)
        } else {
            None
        }
    }

    /// Strategy 3: partition every paragraph into five ordered buckets and
    /// hand back the one mapped to the requested section.
    ///
    /// Degraded, not exact: assumes generated section order matches
    /// `bucket_order`.
    pub fn extract_by_buckets(&self, blob: &str, section: Section) -> Option<String> {
        let index = self.bucket_order.iter().position(|s| *s == section)?;
        let paragraphs: Vec<&str> = split_paragraphs(blob);
        if paragraphs.is_empty() {
            return None;
        }
        let n = paragraphs.len();
        let buckets = self.bucket_order.len();
        let start = index * n / buckets;
        let end = (index + 1) * n / buckets;
        if start >= end {
            return None;
        }
        Some(paragraphs[start..end].join("\n\n"))
    }
}

/// Decorated regex patterns for one marker spelling:
/// `### NAME`, `[NAME]`, `=== NAME ===`, then the bare name on its own line.
fn marker_patterns(spelling: &str) -> Vec<String> {
    let escaped = regex::escape(spelling);
    vec![
        format!(r"(?i)###\s*{}[^\n]*", escaped),
        format!(r"(?i)\[\s*{}\s*\]", escaped),
        format!(r"(?i)===\s*{}\s*===", escaped),
        format!(r"(?mi)^\s*{}\s*:?\s*$", escaped),
    ]
}

/// Truncates content at the next marker-like token: a `###` heading, a
/// bracketed or `===` delimiter, or an all-caps line.
fn cut_at_next_marker(content: &str) -> &str {
    let markers = [
        r"(?m)^\s*###\s+",
        r"(?m)^\s*\[[^\]\n]+\]\s*$",
        r"(?m)^\s*===",
        r"(?m)^\s*[A-Z][A-Z \t&/]{4,}[A-Z]\s*:?\s*$",
    ];
    let mut cut = content.len();
    for pattern in markers {
        if let Some(m) = Regex::new(pattern).unwrap().find(content) {
            if m.start() > 0 && m.start() < cut {
                cut = m.start();
            }
        }
    }
    &content[..cut]
}

fn split_paragraphs(text: &str) -> Vec<&str> {
    let re = Regex::new(r"\n\s*\n").unwrap();
    re.split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Contained paragraph blocks of a slice, re-joined with blank lines.
fn paragraph_blocks(content: &str) -> String {
    split_paragraphs(content).join("\n\n")
}

/// Whether any known marker for any section appears in the blob.
fn any_marker_present(blob: &str) -> bool {
    let all_sections = [
        Section::Locality,
        Section::PropLocality,
        Section::Property,
        Section::BuilderDetails,
        Section::BuilderListing,
    ];
    for section in all_sections {
        for spelling in section.marker_spellings() {
            for pattern in marker_patterns(spelling) {
                if let Ok(re) = Regex::new(&pattern) {
                    if re.is_match(blob) {
                        return true;
                    }
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(label: &str, n: usize) -> String {
        (0..n).map(|i| format!("{}{}", label, i)).collect::<Vec<_>>().join(" ")
    }

    fn markered_blob() -> String {
        format!(
            "### LOCALITY DESCRIPTION\n{}\n\n### PROPERTY LOCALITY DESCRIPTION\n{}\n\n\
             ### PROPERTY DESCRIPTION\n{}\n\n### BUILDER DETAILS DESCRIPTION\n{}\n\n\
             ### BUILDER LISTING DESCRIPTION\n{}\n",
            words("loc", 70),
            words("ploc", 70),
            words("prop", 70),
            words("bdet", 70),
            words("blist", 70),
        )
    }

    #[test]
    fn test_marker_roundtrip_all_sections() {
        let blob = markered_blob();
        let extractor = SectionExtractor::new(None);
        let sections = [
            Section::Locality,
            Section::PropLocality,
            Section::Property,
            Section::BuilderDetails,
            Section::BuilderListing,
        ];
        let mut recovered = Vec::new();
        for section in sections {
            let text = extractor.extract(&blob, section);
            assert!(text.is_some(), "missing {:?}", section);
            recovered.push(text.unwrap());
        }
        for i in 0..recovered.len() {
            for j in (i + 1)..recovered.len() {
                assert_ne!(recovered[i], recovered[j]);
            }
        }
    }

    #[test]
    fn test_marker_content_stops_at_next_section() {
        let blob = markered_blob();
        let extractor = SectionExtractor::new(None);
        let locality = extractor.extract(&blob, Section::Locality).unwrap();
        assert!(locality.contains("loc0"));
        assert!(!locality.contains("ploc0"));
    }

    #[test]
    fn test_bracketed_and_bare_markers_accepted() {
        let blob = format!(
            "[LOCALITY DESCRIPTION]\n{}\n\nABOUT THE DEVELOPER\n{}\n",
            words("loc", 60),
            words("dev", 60),
        );
        let extractor = SectionExtractor::new(None);
        assert!(extractor.extract(&blob, Section::Locality).is_some());
        assert!(extractor.extract(&blob, Section::BuilderDetails).is_some());
    }

    #[test]
    fn test_short_section_rejected_by_markers() {
        let blob = "### LOCALITY DESCRIPTION\nonly a few words here\n";
        let extractor = SectionExtractor::new(None);
        assert!(extractor.extract_by_markers(blob, Section::Locality).is_none());
    }

    #[test]
    fn test_anchor_fallback_for_property_description() {
        let blob = format!(
            "Some preamble text.\n\nTest Towers by Acme Homes is {}\n\nABOUT THE DEVELOPER\n{}\n",
            words("prop", 60),
            words("dev", 60),
        );
        let extractor = SectionExtractor::new(Some("Test Towers by".to_string()));
        let text = extractor.extract(&blob, Section::Property).unwrap();
        assert!(text.starts_with("Test Towers by"));
        assert!(!text.contains("dev0"));
    }

    #[test]
    fn test_bucket_fallback_when_no_markers() {
        let paragraphs: Vec<String> = (0..10).map(|i| words(&format!("p{}x", i), 12)).collect();
        let blob = paragraphs.join("\n\n");
        let extractor = SectionExtractor::new(None);
        let first = extractor.extract(&blob, Section::Locality).unwrap();
        let last = extractor.extract(&blob, Section::BuilderListing).unwrap();
        assert!(first.contains("p0x0"));
        assert!(last.contains("p9x0"));
        assert_ne!(first, last);
    }

    #[test]
    fn test_buckets_not_used_when_markers_exist() {
        // Blob has one marker but not the requested one: bucket fallback
        // must not fire.
        let blob = format!("### PROPERTY DESCRIPTION\n{}\n", words("prop", 60));
        let extractor = SectionExtractor::new(None);
        assert!(extractor.extract(&blob, Section::Locality).is_none());
    }

    #[test]
    fn test_empty_blob_never_panics() {
        let extractor = SectionExtractor::new(None);
        assert!(extractor.extract("", Section::Property).is_none());
        assert!(extractor.extract("   \n\n  ", Section::Locality).is_none());
    }
}
