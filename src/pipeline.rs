//! Shared content-assembly workflow for the background job and the
//! synchronous debug endpoints:
//!
//! 1. Flatten the inbound payload into property features
//! 2. Validate each description field against its threshold
//! 3. One generation call for everything insufficient (with fallback)
//! 4. Recover per-field text from the single response
//! 5. Synthesize reviews and FAQs
//! 6. Assemble the callback payload
use crate::errors::{AppError, ResultExt};
use crate::extract::{Section, SectionExtractor};
use crate::faq::FaqSynthesizer;
use crate::features::PropertyFeatures;
use crate::handlers::AppState;
use crate::models::{
    CallbackResult, ContentPayload, FirstOrDefault, IncomingPropertyData,
};
use crate::region;
use crate::reviews::{ReviewOptions, ReviewSynthesizer};
use crate::text::{clean_generated_text, remove_dash_symbols, strip_html, wrap_in_p_tags};
use crate::validator::{ContentField, ContentFields, FieldThresholds};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use std::sync::Arc;

/// Evaluates the five description fields against their thresholds.
pub fn build_content_fields(
    data: &IncomingPropertyData,
    thresholds: &FieldThresholds,
) -> ContentFields {
    let prop = data.prop_info.first_or_default();
    let basic = data.basic_details.first_or_default();
    let dev = data.developer_info.first_or_default();

    ContentFields {
        locality: ContentField::evaluate(
            prop.locality_description.as_deref(),
            thresholds.locality,
        ),
        prop_locality: ContentField::evaluate(
            prop.property_locality_description.as_deref(),
            thresholds.prop_locality,
        ),
        property: ContentField::evaluate(
            basic.property_description.as_deref(),
            thresholds.property,
        ),
        builder_details: ContentField::evaluate(
            dev.builder_details_desc.as_deref(),
            thresholds.builder_details,
        ),
        builder_listing: ContentField::evaluate(
            dev.builder_listing_desc.as_deref(),
            thresholds.builder_listing,
        ),
    }
}

/// Deterministic property-description fallback built from whatever raw
/// fields the payload supplied, used when generation fails outright.
pub fn fallback_seo_text(data: &IncomingPropertyData) -> String {
    let prop = data.prop_info.first_or_default();
    let basic = data.basic_details.first_or_default();
    let candidates = [
        basic.property_description.as_deref(),
        prop.property_locality_description.as_deref(),
        prop.locality_description.as_deref(),
    ];
    for candidate in candidates.into_iter().flatten() {
        let text = strip_html(candidate);
        if !text.is_empty() {
            return text;
        }
    }
    "Brief property overview not available. Please check property data.".to_string()
}

async fn generate_blob(
    state: &AppState,
    features: &PropertyFeatures,
    fields: &ContentFields,
) -> Result<String, AppError> {
    let groq = state
        .groq
        .as_ref()
        .ok_or_else(|| AppError::ExternalApiError("Groq client not configured".to_string()))?;
    let prompt = crate::prompts::content_prompt(features, fields);
    tracing::info!(
        "🔄 Generating content (locality: {}, prop_locality: {}, property: {}, builder_details: {}, builder_listing: {})",
        if fields.locality.needs_generation() { "GENERATE" } else { "PASS" },
        if fields.prop_locality.needs_generation() { "GENERATE" } else { "PASS" },
        if fields.property.needs_generation() { "GENERATE" } else { "PASS" },
        if fields.builder_details.needs_generation() { "GENERATE" } else { "PASS" },
        if fields.builder_listing.needs_generation() { "GENERATE" } else { "PASS" },
    );
    let text = groq
        .complete(&prompt, 16000, 0.7)
        .await
        .context("SEO content generation")?;
    Ok(clean_generated_text(&text))
}

/// Runs the full assembly for one request and returns the callback-shaped
/// payload. Never fails: every error degrades to fallbacks and lands in
/// `error_note`.
pub async fn assemble_content(
    state: &AppState,
    data: &IncomingPropertyData,
) -> ContentPayload {
    let features = PropertyFeatures::from_payload(data);
    let detected_region = region::classify(&features);
    let fields = build_content_fields(data, &state.config.thresholds);

    let mut error_note: Option<String> = None;
    let mut blob: Option<String> = None;
    if fields.any_needs_generation() {
        match generate_blob(state, &features, &fields).await {
            Ok(text) => {
                tracing::info!("✓ Content generated ({} chars)", text.len());
                blob = Some(text);
            }
            Err(e) => {
                tracing::error!("Content generation failed: {}", e);
                error_note = Some(format!("Content generation failed: {}", e));
            }
        }
    }

    let extractor = SectionExtractor::new(Some(format!("{} by", features.name)));
    let resolve = |field: &ContentField, section: Section| -> Option<String> {
        if let Some(clean) = field.passthrough() {
            return Some(wrap_in_p_tags(&clean));
        }
        blob.as_deref()
            .and_then(|b| extractor.extract(b, section))
            .map(|text| wrap_in_p_tags(&remove_dash_symbols(&text)))
    };

    let locality_desc = resolve(&fields.locality, Section::Locality);
    let prop_locality_desc = resolve(&fields.prop_locality, Section::PropLocality);
    let builder_desc_details = resolve(&fields.builder_details, Section::BuilderDetails);
    let builder_desc_listing = resolve(&fields.builder_listing, Section::BuilderListing);
    let prop_desc = resolve(&fields.property, Section::Property)
        .or_else(|| {
            // The primary field always ships something, even when the
            // external call produced nothing usable.
            if error_note.is_some() || blob.is_some() {
                Some(wrap_in_p_tags(&fallback_seo_text(data)))
            } else {
                None
            }
        });

    let mut rng = StdRng::from_entropy();

    tracing::info!("🔄 Generating reviews (region: {})", detected_region.as_str());
    let review_synthesizer = ReviewSynthesizer::new(
        state.groq.as_ref(),
        ReviewOptions {
            count: state.config.review_count,
            ..ReviewOptions::default()
        },
    );
    let reviews = review_synthesizer
        .generate_batch(&features, detected_region, &mut rng)
        .await;
    tracing::info!("✓ Generated {} review(s)", reviews.len());

    tracing::info!("🔄 Generating FAQs");
    let faq_synthesizer = FaqSynthesizer::new(state.groq.as_ref(), state.config.faq_count);
    let faq = faq_synthesizer.generate(&features, &mut rng).await;

    ContentPayload {
        propid: features.property_id.clone(),
        prop_name: Some(features.name.clone()),
        prop_desc,
        localityid: features.locality_id.clone(),
        locality_desc,
        prop_locality_desc,
        builderid: features.builder_id.clone(),
        builder_desc_details,
        builder_desc_listing,
        reviews,
        faq,
        error_note,
    }
}

/// Parses, validates, assembles, delivers and archives one request.
/// The callback is attempted exactly once per request.
pub async fn process_and_deliver(
    state: &AppState,
    body: &Value,
) -> Result<CallbackResult, AppError> {
    let data: IncomingPropertyData = serde_json::from_value(body.clone())
        .map_err(|e| AppError::BadRequest(format!("Payload validation failed: {}", e)))?;
    data.validate()?;

    let payload = assemble_content(state, &data).await;
    tracing::info!(
        "✓ Output assembled for {:?} ({} reviews, {} FAQs)",
        payload.prop_name,
        payload.reviews.len(),
        payload.faq.len()
    );

    let result = state.callback.deliver(&payload).await;
    if let Some(ref archive) = state.archive {
        archive.record(&payload).await;
    }
    Ok(result)
}

/// Spawns the fire-and-forget background job for one accepted request.
///
/// The outermost scope catches every failure and still attempts a minimal
/// callback notification — no error path may end the task silently.
pub fn spawn_processing_job(state: Arc<AppState>, body: Value) {
    tokio::spawn(async move {
        let propid = body
            .pointer("/prop_info/0/propertyid")
            .or_else(|| body.pointer("/prop_info/0/propertyID"))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());
        let prop_name = body
            .pointer("/prop_info/0/propertyName")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string());

        tracing::info!("Starting background processing for {:?}", prop_name);

        match process_and_deliver(&state, &body).await {
            Ok(result) => {
                tracing::info!(
                    "Background processing complete: callback ok={} status={:?}",
                    result.ok,
                    result.status_code
                );
            }
            Err(e) => {
                tracing::error!("❌ Background processing failed: {}", e);
                let note = format!("Background processing failed: {}", e);
                let result = state
                    .callback
                    .deliver_minimal(propid.as_deref(), prop_name.as_deref(), &note)
                    .await;
                if !result.ok {
                    tracing::error!(
                        "Failed to send failure notification: status={:?} error={:?}",
                        result.status_code,
                        result.error
                    );
                }
            }
        }
    });
}
