//! Prompt templates for the text-generation collaborator.
//!
//! One combined prompt covers every description field that needs
//! generation, delimited with `###` section markers the extractor knows
//! how to find. Review and FAQ prompts are built per call.

use crate::features::PropertyFeatures;
use crate::region::Region;
use crate::reviews::{ReviewMode, Sentiment};
use crate::text::strip_html;
use crate::validator::{ContentField, ContentFields};

/// Max characters of existing content quoted into a restructure block.
const EXCERPT_LIMIT: usize = 1500;

fn excerpt(raw: &str) -> String {
    let clean = strip_html(raw);
    clean.chars().take(EXCERPT_LIMIT).collect()
}

fn field_block(
    marker: &str,
    field: &ContentField,
    generate_instructions: &str,
    restructure_instructions: &str,
) -> String {
    match field.raw.as_deref() {
        Some(raw) => format!(
            "### {}\nThe following content is provided but too thin. EXPAND and \
             RESTRUCTURE it:\n{}\n\nPROVIDED CONTENT:\n{}\n",
            marker,
            restructure_instructions,
            excerpt(raw)
        ),
        None => format!("### {}\n{}\n", marker, generate_instructions),
    }
}

/// Builds the single content-generation prompt, requesting only the
/// sections the validator marked insufficient. Section order matches the
/// extractor's canonical bucket order.
pub fn content_prompt(features: &PropertyFeatures, fields: &ContentFields) -> String {
    let mut sections: Vec<String> = Vec::new();

    if fields.locality.needs_generation() {
        sections.push(field_block(
            "LOCALITY DESCRIPTION",
            &fields.locality,
            "Write 300-350 words about the locality itself: connectivity, nearby IT hubs, \
             schools, hospitals, growth potential and livability. Do NOT mention the project \
             name anywhere in this section. 3-4 paragraphs.",
            "Target 300-350 words. Focus on connectivity, social infrastructure and growth. \
             Do NOT mention the project name anywhere in this section.",
        ));
    }
    if fields.prop_locality.needs_generation() {
        sections.push(field_block(
            "PROPERTY LOCALITY DESCRIPTION",
            &fields.prop_locality,
            "Write 300-350 words connecting the project to its locality: why this location \
             works for residents of this project. Mention the project name 2-3 times. \
             3-4 paragraphs.",
            "Target 300-350 words connecting the project to its locality. Mention the \
             project name 2-3 times.",
        ));
    }
    if fields.property.needs_generation() {
        sections.push(field_block(
            "PROPERTY DESCRIPTION",
            &fields.property,
            &format!(
                "Write 200-250 words describing the PROJECT (not the developer). Start with: \
                 \"{} by {} is\". Cover what makes it special, configurations, lifestyle and \
                 who it suits. 3-4 paragraphs.",
                features.name,
                features.builder.as_deref().unwrap_or("the developer")
            ),
            &format!(
                "Target 200-250 words about the PROJECT only. Start with: \"{} by {} is\".",
                features.name,
                features.builder.as_deref().unwrap_or("the developer")
            ),
        ));
    }
    if fields.builder_details.needs_generation() {
        sections.push(field_block(
            "BUILDER DETAILS DESCRIPTION",
            &fields.builder_details,
            "Write 300-350 words profiling the developer: background, founding year, \
             experience, achievements, quality standards and customer satisfaction. \
             No invented project names. 3-4 paragraphs.",
            "Target 300-350 words. Professional developer profile; include provided \
             numbers and facts only.",
        ));
    }
    if fields.builder_listing.needs_generation() {
        sections.push(field_block(
            "BUILDER LISTING DESCRIPTION",
            &fields.builder_listing,
            "Write 100-150 words introducing the developer for a listing card: reputation, \
             strengths and what buyers can expect. 1-2 paragraphs.",
            "Target 100-150 words. Short listing-card developer introduction.",
        ));
    }

    format!(
        "You are an expert SEO content writer for a real estate portal.\n\n\
         Generate property page content for: {}\n\n\
         AVAILABLE DATA:\n{}\n\n\
         CRITICAL RULES:\n\
         1. ONLY use data provided above - NO hallucinations\n\
         2. If a value is null, SKIP that information entirely\n\
         3. Never write \"coming soon\", \"will be updated\", \"not mentioned\"\n\
         4. Remove ALL HTML tags, output clean plain text\n\
         5. Do not use hyphens or dashes as bullets\n\
         6. Start every section with its ### header exactly as given below\n\n\
         {}\n\nGenerate the complete content now.",
        features.name,
        serde_json::to_string_pretty(&features.summary_json()).unwrap_or_default(),
        sections.join("\n")
    )
}

fn language_instruction(region: Region) -> &'static str {
    match region {
        Region::General => {
            "Write the review in simple Indian English. Keep 2-3 sentences."
        }
        _ => {
            "Write the review ONLY using English letters. Do NOT mix other languages. \
             Keep 2-3 sentences."
        }
    }
}

fn mode_instruction(mode: ReviewMode) -> &'static str {
    match mode {
        ReviewMode::Locality => "Focus on locality, neighbourhood and nearby conveniences.",
        ReviewMode::Amenities => {
            "Focus on amenities (gym, pool, clubhouse, parking, security)."
        }
        ReviewMode::HandOver => "Talk about possession and handover experience.",
        ReviewMode::UnderConstruction => {
            "Talk about construction status, expected completion and investment potential."
        }
        ReviewMode::General => "Give a general, human-like review about the property.",
    }
}

/// Builds a single review prompt from tone, mode and the property summary.
pub fn review_prompt(
    mode: ReviewMode,
    language: Region,
    features: &PropertyFeatures,
    sentiment: Sentiment,
) -> String {
    let sentiment_instruction = match sentiment {
        Sentiment::Negative => "Tone: slightly critical, mention small issues.",
        Sentiment::Positive => "Tone: positive/neutral, not marketing.",
    };
    format!(
        "{}\n{}\n{}\n\nProperty details:\n{}\n\nWrite a short 2-3 sentence review in \
         simple Indian English. Only output the review text.",
        language_instruction(language),
        mode_instruction(mode),
        sentiment_instruction,
        serde_json::to_string_pretty(&features.summary_json()).unwrap_or_default()
    )
}

/// Builds the FAQ prompt requesting a strict JSON array.
pub fn faq_prompt(features: &PropertyFeatures, count: usize) -> String {
    format!(
        "Generate {} frequently asked questions a home buyer would ask about this \
         property, with community-style answers.\n\nProperty details:\n{}\n\n\
         Respond with ONLY a JSON array, no prose and no code fences. Each element:\n\
         {{\"question\": \"...\", \"answer_count\": 2, \"answers_text\": [\"...\", \"...\"], \
         \"category\": \"Pricing|Location|Amenities|Possession|Builder|Other\"}}\n\
         Vary answer_count between 1 and 3.",
        count,
        serde_json::to_string_pretty(&features.summary_json()).unwrap_or_default()
    )
}
