//! Maps free-text location fields to a linguistic/cultural region tag.
//!
//! This is a keyword heuristic, not a geocoder: the first region whose any
//! keyword substring-matches the concatenated location text wins, in fixed
//! table order.

use crate::features::PropertyFeatures;
use serde::Serialize;

/// Region tag used to select name pools and review language styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Tamil,
    Kannada,
    Telugu,
    Hindi,
    Marathi,
    Bengali,
    Kerala,
    Gujarati,
    General,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Tamil => "tamil",
            Region::Kannada => "kannada",
            Region::Telugu => "telugu",
            Region::Hindi => "hindi",
            Region::Marathi => "marathi",
            Region::Bengali => "bengali",
            Region::Kerala => "kerala",
            Region::Gujarati => "gujarati",
            Region::General => "general",
        }
    }
}

/// Ordered keyword table; order is the tie-break when multiple regions match.
const REGION_KEYWORDS: &[(Region, &[&str])] = &[
    (
        Region::Tamil,
        &["tamil nadu", "chennai", "coimbatore", "madurai", "trichy", "salem", "vellore"],
    ),
    (
        Region::Kannada,
        &["karnataka", "bengaluru", "bangalore", "mysore", "mangalore"],
    ),
    (
        Region::Telugu,
        &["telangana", "andhra", "hyderabad", "visakhapatnam", "vizag"],
    ),
    (
        Region::Hindi,
        &[
            "delhi",
            "new delhi",
            "uttar pradesh",
            "up",
            "rajasthan",
            "madhya pradesh",
            "punjab",
            "haryana",
        ],
    ),
    (Region::Marathi, &["maharashtra", "mumbai", "pune", "nagpur"]),
    (Region::Bengali, &["west bengal", "kolkata", "howrah"]),
    (
        Region::Kerala,
        &["kerala", "kochi", "kozhikode", "thiruvananthapuram", "trivandrum"],
    ),
    (Region::Gujarati, &["gujarat", "ahmedabad", "surat", "vadodara"]),
];

/// Classifies a property into a region from its location fields.
///
/// Concatenates locality, city, state-like region name and the combined
/// location string (lowercased) and scans the keyword table in order.
/// Falls back to [`Region::General`] when nothing matches.
pub fn classify(features: &PropertyFeatures) -> Region {
    let mut fields: Vec<String> = Vec::new();
    for value in [
        features.locality.as_deref(),
        features.city.as_deref(),
        features.region_name.as_deref(),
        features.location.as_deref(),
    ]
    .into_iter()
    .flatten()
    {
        fields.push(value.to_lowercase());
    }
    let text = fields.join(" ");

    for (region, keywords) in REGION_KEYWORDS {
        for keyword in *keywords {
            if text.contains(keyword) {
                return *region;
            }
        }
    }
    Region::General
}
