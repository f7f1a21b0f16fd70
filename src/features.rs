//! Flattened, request-scoped view of one property.
//!
//! Built once from the company inbound format and immutable thereafter.
//! Missing fields stay `None` — absence (not emptiness) is what drives the
//! generation decisions downstream.

use crate::models::{FirstOrDefault, IncomingPropertyData};
use crate::text::normalize_date;
use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyFeatures {
    pub property_id: Option<String>,
    pub name: String,
    pub builder: Option<String>,
    pub builder_id: Option<String>,
    pub locality_id: Option<String>,
    pub locality: Option<String>,
    pub city: Option<String>,
    pub region_name: Option<String>,
    /// "Locality, City" when both are present, else the city alone.
    pub location: Option<String>,
    pub configurations: Vec<String>,
    pub area_range: Option<String>,
    pub price_range: Option<String>,
    pub possession_date: Option<String>,
    pub launch_date: Option<String>,
    pub status: Option<String>,
    pub rera_id: Option<String>,
    pub total_units: Option<String>,
    pub property_type: Option<String>,
    pub amenities: Vec<String>,
    pub highlights: Vec<String>,
    pub developer_founded: Option<String>,
    pub developer_project_count: Option<String>,
}

impl PropertyFeatures {
    /// Bare features with just a name; handy in tests.
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn from_payload(data: &IncomingPropertyData) -> Self {
        let prop = data.prop_info.first_or_default();
        let basic = data.basic_details.first_or_default();
        let dev = data.developer_info.first_or_default();

        let amenities: Vec<String> = data
            .amenities
            .iter()
            .filter_map(|a| a.name.clone())
            .filter(|n| !n.trim().is_empty())
            .collect();

        let highlights: Vec<String> = data
            .highlights
            .iter()
            .filter_map(|h| h.highlight_point.clone())
            .filter(|h| !h.trim().is_empty())
            .collect();

        let price_range = match (prop.min_price.as_deref(), prop.max_price.as_deref()) {
            (Some(min), Some(max)) => format_price_range(min, max),
            _ => None,
        };

        let area_range = match (basic.area_min.as_deref(), basic.area_max.as_deref()) {
            (Some(min), Some(max)) => {
                Some(format!("{} - {} sq.ft", min.trim(), max.trim()))
            }
            _ => None,
        };

        let location = match (prop.locality_name.as_deref(), prop.city_name.as_deref()) {
            (Some(locality), Some(city)) => Some(format!("{}, {}", locality, city)),
            (None, Some(city)) => Some(city.to_string()),
            (Some(locality), None) => Some(locality.to_string()),
            (None, None) => None,
        };

        Self {
            property_id: prop.property_id.clone(),
            name: prop.property_name.clone(),
            builder: prop.builder_name.clone().or_else(|| dev.builder_name.clone()),
            builder_id: prop.builder_id.clone().or_else(|| dev.builder_id.clone()),
            locality_id: prop.locality_id.clone(),
            locality: prop.locality_name.clone(),
            city: prop.city_name.clone(),
            region_name: basic.region_name.clone(),
            location,
            configurations: prop.bhk.clone().into_iter().collect(),
            area_range,
            price_range,
            possession_date: basic.possession_date.as_deref().map(normalize_date),
            launch_date: basic.launch_date.as_deref().map(normalize_date),
            status: prop.status.clone(),
            rera_id: basic
                .rera_id
                .clone()
                .filter(|r| !r.trim().is_empty()),
            total_units: basic.total_apartments.clone(),
            property_type: basic.property_type.clone(),
            amenities,
            highlights,
            developer_founded: dev.founded_year.clone(),
            developer_project_count: dev.property_count.clone(),
        }
    }

    /// Compact JSON summary of the property, embedded into prompts.
    pub fn summary_json(&self) -> serde_json::Value {
        serde_json::json!({
            "project_name": self.name,
            "builder": self.builder,
            "location": self.location,
            "configurations": self.configurations,
            "area": self.area_range,
            "price": self.price_range,
            "possession_date": self.possession_date,
            "launch_date": self.launch_date,
            "status": self.status,
            "amenities": self.amenities,
            "highlights": self.highlights,
            "project_type": self.property_type,
        })
    }
}

/// Formats raw rupee amounts as a crore range, e.g. `₹ 1.49 Cr - 4.70 Cr`.
/// Unparseable amounts yield no range rather than an error.
fn format_price_range(min: &str, max: &str) -> Option<String> {
    let min_value: f64 = min.trim().parse().ok()?;
    let max_value: f64 = max.trim().parse().ok()?;
    Some(format!(
        "₹ {:.2} Cr - {:.2} Cr",
        min_value / 10_000_000.0,
        max_value / 10_000_000.0
    ))
}
