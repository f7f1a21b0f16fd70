//! Wire models: the company inbound POST format, the generated artifacts
//! (reviews, FAQs) and the callback-compatible output payload.
//!
//! Inbound field names follow the company spelling exactly, with serde
//! aliases for the variants seen across payload versions. Only the
//! property name is required; everything else is optional and absence
//! never fails deserialization.

use crate::errors::AppError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PropInfo {
    #[serde(default, rename = "propertyid", alias = "propertyID")]
    pub property_id: Option<String>,
    #[serde(rename = "propertyName")]
    pub property_name: String,
    #[serde(default)]
    pub city_name: Option<String>,
    #[serde(default)]
    pub locality_name: Option<String>,
    #[serde(default, rename = "localityid", alias = "localityID")]
    pub locality_id: Option<String>,
    #[serde(default, rename = "LocalityDiscription")]
    pub locality_description: Option<String>,
    #[serde(default, rename = "Property_LocalityDiscription")]
    pub property_locality_description: Option<String>,
    #[serde(default, rename = "BuilderName")]
    pub builder_name: Option<String>,
    #[serde(default, rename = "BuilderId", alias = "BuilderID")]
    pub builder_id: Option<String>,
    #[serde(default, rename = "Status")]
    pub status: Option<String>,
    #[serde(default)]
    pub bhk: Option<String>,
    #[serde(default)]
    pub min_price: Option<String>,
    #[serde(default)]
    pub max_price: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct BasicDetails {
    #[serde(default)]
    pub property_description: Option<String>,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub total_apartments: Option<String>,
    #[serde(default)]
    pub area_min: Option<String>,
    #[serde(default)]
    pub area_max: Option<String>,
    #[serde(default, rename = "PossessionDate")]
    pub possession_date: Option<String>,
    #[serde(default, rename = "LaunchDate", alias = "launch_date")]
    pub launch_date: Option<String>,
    #[serde(default, rename = "propertyType")]
    pub property_type: Option<String>,
    #[serde(default, rename = "RERA_ID")]
    pub rera_id: Option<String>,
    #[serde(default, rename = "RegionName")]
    pub region_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Amenity {
    #[serde(default, rename = "PropertyId")]
    pub property_id: Option<String>,
    #[serde(default, rename = "Name")]
    pub name: Option<String>,
    #[serde(default, rename = "ImgPath")]
    pub img_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Highlight {
    #[serde(default)]
    pub highlight_point: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeveloperInfo {
    #[serde(default, rename = "BuilderName")]
    pub builder_name: Option<String>,
    #[serde(default, rename = "BuilderId", alias = "BuilderID")]
    pub builder_id: Option<String>,
    #[serde(default)]
    pub property_count: Option<String>,
    #[serde(default)]
    pub founded_year: Option<String>,
    #[serde(default, alias = "builder_data_discription")]
    pub builder_details_desc: Option<String>,
    #[serde(default, alias = "builder_description")]
    pub builder_listing_desc: Option<String>,
}

/// The company POST body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IncomingPropertyData {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub prop_info: Vec<PropInfo>,
    #[serde(default)]
    pub basic_details: Vec<BasicDetails>,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
    #[serde(default)]
    pub developer_info: Vec<DeveloperInfo>,
}

impl IncomingPropertyData {
    /// The single hard requirement on the inbound payload: a property name.
    pub fn validate(&self) -> Result<(), AppError> {
        let name_present = self
            .prop_info
            .first()
            .map(|p| !p.property_name.trim().is_empty())
            .unwrap_or(false);
        if !name_present {
            return Err(AppError::BadRequest(
                "prop_info[0].propertyName is required".to_string(),
            ));
        }
        Ok(())
    }
}

/// First element of an inbound collection, or a default object.
///
/// The company format repeats the "array whose first element matters"
/// pattern across `prop_info`, `basic_details` and `developer_info`; this
/// accessor replaces the inline null-guards that pattern invites.
pub trait FirstOrDefault<T> {
    fn first_or_default(&self) -> T;
}

impl<T: Default + Clone> FirstOrDefault<T> for Vec<T> {
    fn first_or_default(&self) -> T {
        self.first().cloned().unwrap_or_default()
    }
}

/// One synthesized customer review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedReview {
    pub first_name: String,
    pub last_name: String,
    /// ISO calendar day, unique within a batch up to the retry budget.
    pub date: String,
    pub rating_value: u8,
    pub review: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqAnswer {
    pub first_name: String,
    pub answer: String,
}

/// One synthesized FAQ: an asker plus one or more answerers, every person
/// distinct within this FAQ only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedFaq {
    pub question: String,
    pub answers: Vec<FaqAnswer>,
    pub first_name: String,
    pub category: String,
}

/// The assembled output object forwarded to the company callback.
/// The field set is wire compatibility; do not reorder or rename.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentPayload {
    pub propid: Option<String>,
    pub prop_name: Option<String>,
    pub prop_desc: Option<String>,
    pub localityid: Option<String>,
    pub locality_desc: Option<String>,
    pub prop_locality_desc: Option<String>,
    pub builderid: Option<String>,
    pub builder_desc_details: Option<String>,
    pub builder_desc_listing: Option<String>,
    pub reviews: Vec<GeneratedReview>,
    #[serde(rename = "FAQ")]
    pub faq: Vec<GeneratedFaq>,
    pub error_note: Option<String>,
}

/// Outcome of the single callback delivery attempt. Captured, never raised.
#[derive(Debug, Clone, Serialize)]
pub struct CallbackResult {
    pub ok: bool,
    pub status_code: Option<u16>,
    pub response_text: Option<String>,
    pub error: Option<String>,
}
