/// Unit tests for the content-generation core: date normalization, region
/// classification, sufficiency checks, identity/date uniqueness and rating
/// derivation.
use property_content_api::extract::{Section, SectionExtractor};
use property_content_api::features::PropertyFeatures;
use property_content_api::region::{self, Region};
use property_content_api::reviews::{
    pick_review_date, rating_from_text, ReviewOptions, ReviewSynthesizer,
};
use property_content_api::text::normalize_date;
use property_content_api::validator::is_sufficient;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(test)]
mod date_normalization_tests {
    use super::*;

    #[test]
    fn test_bare_year_maps_to_january_first() {
        assert_eq!(normalize_date("2023"), "2023-01-01");
        assert_eq!(normalize_date("1999"), "1999-01-01");
    }

    #[test]
    fn test_year_month_maps_to_first_day() {
        assert_eq!(normalize_date("2023-05"), "2023-05-01");
        assert_eq!(normalize_date("2023-12"), "2023-12-01");
    }

    #[test]
    fn test_iso_dates_pass_through() {
        assert_eq!(normalize_date("2016-03-03"), "2016-03-03");
    }

    #[test]
    fn test_human_formats() {
        assert_eq!(normalize_date("December 2024"), "2024-12-01");
        assert_eq!(normalize_date("03-03-2016"), "2016-03-03");
    }

    #[test]
    fn test_unrecognized_input_returned_unmodified() {
        assert_eq!(normalize_date("Q3 next year"), "Q3 next year");
        assert_eq!(normalize_date("Ready to Move"), "Ready to Move");
    }
}

#[cfg(test)]
mod region_tests {
    use super::*;

    #[test]
    fn test_bangalore_classifies_kannada() {
        let mut features = PropertyFeatures::named("Test Towers");
        features.city = Some("Bangalore".to_string());
        assert_eq!(region::classify(&features), Region::Kannada);
    }

    #[test]
    fn test_no_location_fields_classifies_general() {
        let features = PropertyFeatures::named("Test Towers");
        assert_eq!(region::classify(&features), Region::General);
    }

    #[test]
    fn test_locality_field_alone_is_enough() {
        let mut features = PropertyFeatures::named("Test Towers");
        features.locality = Some("Andheri, Mumbai".to_string());
        assert_eq!(region::classify(&features), Region::Marathi);
    }
}

#[cfg(test)]
mod sufficiency_tests {
    use super::*;

    #[test]
    fn test_threshold_boundary_inclusive() {
        let text_149 = vec!["word"; 149].join(" ");
        let text_150 = vec!["word"; 150].join(" ");
        assert!(!is_sufficient(&text_149, 150));
        assert!(is_sufficient(&text_150, 150));
    }

    #[test]
    fn test_markup_does_not_inflate_count() {
        let html = format!("<div><p><b>{}</b></p></div>", vec!["word"; 149].join(" "));
        assert!(!is_sufficient(&html, 150));
    }
}

#[cfg(test)]
mod review_batch_tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use std::collections::HashSet;

    #[tokio::test]
    async fn test_first_names_pairwise_distinct_while_pool_lasts() {
        let mut rng = StdRng::seed_from_u64(17);
        let mut features = PropertyFeatures::named("Klassik Landmark");
        features.city = Some("Bangalore".to_string());
        let synthesizer = ReviewSynthesizer::new(
            None,
            ReviewOptions {
                count: 20,
                ..ReviewOptions::default()
            },
        );
        let reviews = synthesizer
            .generate_batch(&features, Region::Kannada, &mut rng)
            .await;
        assert_eq!(reviews.len(), 20);
        let firsts: HashSet<&String> = reviews.iter().map(|r| &r.first_name).collect();
        assert_eq!(firsts.len(), 20, "first names must be pairwise distinct");
    }

    #[test]
    fn test_dates_distinct_and_inside_window() {
        let mut rng = StdRng::seed_from_u64(17);
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let launch = today - Duration::days(365);
        let mut used = HashSet::new();
        let mut seen = HashSet::new();
        for _ in 0..200 {
            let date = pick_review_date(Some(launch), &mut used, today, 60, 200, &mut rng);
            assert!(date >= launch && date <= today, "date out of window: {}", date);
            assert!(seen.insert(date), "duplicate review date: {}", date);
        }
    }

    #[test]
    fn test_absent_launch_uses_sixty_day_floor() {
        let mut rng = StdRng::seed_from_u64(17);
        let today = NaiveDate::from_ymd_opt(2025, 8, 7).unwrap();
        let mut used = HashSet::new();
        for _ in 0..30 {
            let date = pick_review_date(None, &mut used, today, 60, 200, &mut rng);
            assert!(date >= today - Duration::days(60) && date <= today);
        }
    }
}

#[cfg(test)]
mod rating_tests {
    use super::*;

    #[test]
    fn test_positive_only_text_rates_four_or_five() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let rating = rating_from_text("excellent connectivity and layout", &mut rng);
            assert!(matches!(rating, 4 | 5));
        }
    }

    #[test]
    fn test_negative_only_text_rates_one_or_two() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let rating = rating_from_text("poor water supply here", &mut rng);
            assert!(matches!(rating, 1 | 2));
        }
    }

    #[test]
    fn test_neither_or_both_rates_middle_bucket() {
        let mut rng = StdRng::seed_from_u64(23);
        for _ in 0..100 {
            let rating = rating_from_text("the flat has two bedrooms", &mut rng);
            assert!(matches!(rating, 2 | 3 | 4));
            let rating = rating_from_text("excellent tower but poor lift", &mut rng);
            assert!(matches!(rating, 2 | 3 | 4));
        }
    }
}

#[cfg(test)]
mod section_extraction_tests {
    use super::*;

    fn section_body(label: &str) -> String {
        (0..70)
            .map(|i| format!("{}{}", label, i))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn test_all_five_sections_recovered_and_distinct() {
        let blob = format!(
            "### LOCALITY DESCRIPTION\n{}\n\n\
             ### PROPERTY LOCALITY DESCRIPTION\n{}\n\n\
             ### PROPERTY DESCRIPTION\n{}\n\n\
             ### BUILDER DETAILS DESCRIPTION\n{}\n\n\
             ### BUILDER LISTING DESCRIPTION\n{}\n",
            section_body("alpha"),
            section_body("beta"),
            section_body("gamma"),
            section_body("delta"),
            section_body("epsilon"),
        );
        let extractor = SectionExtractor::new(None);
        let sections = [
            Section::Locality,
            Section::PropLocality,
            Section::Property,
            Section::BuilderDetails,
            Section::BuilderListing,
        ];
        let texts: Vec<String> = sections
            .iter()
            .map(|s| {
                extractor
                    .extract(&blob, *s)
                    .unwrap_or_else(|| panic!("section {:?} not recovered", s))
            })
            .collect();
        for i in 0..texts.len() {
            for j in (i + 1)..texts.len() {
                assert_ne!(texts[i], texts[j], "sections {} and {} identical", i, j);
            }
        }
    }
}
