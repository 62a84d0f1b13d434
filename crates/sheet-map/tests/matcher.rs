use sheet_catalog::{build_template, builtin_profile};
use sheet_map::{
    ColumnMatcher, ConfidenceLevel, MatchOptions, confidence_level, find_match_for_field,
    find_missing_required_fields, match_columns, match_statistics,
};
use sheet_model::ImportProfile;

fn property() -> &'static ImportProfile {
    builtin_profile("property").expect("property profile")
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-3,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn arabic_headers_map_completely() {
    let headers = [
        "عنوان العقار",
        "النوع",
        "للبيع أو الإيجار",
        "السعر بالريال",
        "المساحة بالمتر المربع",
    ];
    let matches = match_columns(&headers, property(), &MatchOptions::default());

    let fields: Vec<Option<&str>> = matches.iter().map(|m| m.matched_field()).collect();
    assert_eq!(
        fields,
        vec![
            Some("title"),
            Some("property_type"),
            Some("listing_type"),
            Some("price"),
            Some("area"),
        ]
    );
    assert!(matches.iter().all(|m| m.confidence == 1.0));
    assert!(find_missing_required_fields(&matches, &property().catalog).is_empty());
}

#[test]
fn exact_synonyms_ignore_case_and_padding() {
    let headers = ["Price", "PRICE", "  السعر  ", "Title"];
    let matches = match_columns(&headers, property(), &MatchOptions::default());
    for column in &matches {
        assert_eq!(column.confidence, 1.0);
    }
    assert_eq!(matches[2].matched_field(), Some("price"));
    assert_eq!(matches[3].matched_field(), Some("title"));
}

#[test]
fn near_miss_is_matched_with_lower_confidence() {
    let matches = match_columns(&["Bedroom", "Cty"], property(), &MatchOptions::default());

    assert_eq!(matches[0].matched_field(), Some("bedrooms"));
    assert_close(matches[0].confidence, 0.875);
    assert_eq!(matches[0].suggestions.len(), 1);
    assert_eq!(matches[0].suggestions[0].field, "bathrooms");

    assert_eq!(matches[1].matched_field(), Some("city"));
    assert_close(matches[1].confidence, 0.75);
    assert_eq!(confidence_level(matches[1].confidence).level, ConfidenceLevel::Medium);
}

#[test]
fn unmatched_header_keeps_best_score_and_suggestions() {
    let matches = match_columns(&["Pricing", "xyz123"], property(), &MatchOptions::default());

    let pricing = &matches[0];
    assert!(!pricing.is_matched());
    assert_close(pricing.confidence, 0.5714);
    assert_eq!(pricing.suggestions.len(), 1);
    assert_eq!(pricing.suggestions[0].field, "price");

    let noise = &matches[1];
    assert!(!noise.is_matched());
    assert_close(noise.confidence, 0.1667);
    assert!(noise.suggestions.is_empty());
}

#[test]
fn unmatched_suggestions_use_lower_floor() {
    let matches = match_columns(&["Listing"], property(), &MatchOptions::default());
    let fields: Vec<&str> = matches[0]
        .suggestions
        .iter()
        .map(|s| s.field.as_str())
        .collect();
    assert_eq!(fields, vec!["listing_type", "district", "location"]);
}

#[test]
fn stricter_threshold_turns_match_into_suggestion() {
    let options = MatchOptions {
        min_confidence: 0.9,
        ..MatchOptions::default()
    };
    let matches = match_columns(&["سعرر"], property(), &options);
    assert!(!matches[0].is_matched());
    assert_close(matches[0].confidence, 0.75);
    assert_eq!(matches[0].suggestions[0].field, "price");
    assert_eq!(matches[0].suggestions.len(), 3);
}

#[test]
fn ties_keep_catalog_order() {
    // "Area" is a synonym of both `area` and `district`.
    let matches = match_columns(&["Area"], property(), &MatchOptions::default());
    assert_eq!(matches[0].matched_field(), Some("area"));
    assert_eq!(matches[0].suggestions[0].field, "district");
    assert_eq!(matches[0].suggestions[0].confidence, 1.0);
}

#[test]
fn suggestions_never_repeat_the_match() {
    let headers = ["نوع العقار", "المساحة", "المدينة", "Bedrooms", "حالة العقار"];
    for column in match_columns(&headers, property(), &MatchOptions::default()) {
        let field = column.matched_field().expect("matched");
        assert!(column.suggestions.len() <= 3);
        assert!(column.suggestions.iter().all(|s| s.field != field));
        assert!(
            column
                .suggestions
                .windows(2)
                .all(|pair| pair[0].confidence >= pair[1].confidence)
        );
    }
}

#[test]
fn output_is_deterministic_and_ordered() {
    let headers = ["Title", "", "نوع العقار", "Price", "   ", "Column 1"];
    let matcher = ColumnMatcher::for_profile(property(), MatchOptions::default());
    let first = matcher.match_columns(&headers);
    let second = matcher.match_columns(&headers);
    assert_eq!(first, second);

    let positions: Vec<usize> = first.iter().map(|m| m.column_index).collect();
    assert_eq!(positions, vec![0, 2, 3, 5]);
    let sources: Vec<&str> = first.iter().map(|m| m.source_header.as_str()).collect();
    assert_eq!(sources, vec!["Title", "نوع العقار", "Price", "Column 1"]);
}

#[test]
fn price_then_title_keeps_input_order() {
    let matches = match_columns(&["السعر", "العنوان"], property(), &MatchOptions::default());
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].matched_field(), Some("price"));
    assert_eq!(matches[0].column_index, 0);
    assert_eq!(matches[1].matched_field(), Some("title"));
    assert_eq!(matches[1].column_index, 1);
    assert!(matches[0].confidence >= 0.9);

    let padded = match_columns(&["السعر", "", "  "], property(), &MatchOptions::default());
    assert_eq!(padded.len(), 1);
}

#[test]
fn price_and_area_alone_leave_required_fields_missing() {
    let matches = match_columns(&["السعر", "المساحة"], property(), &MatchOptions::default());
    let mapped: Vec<Option<&str>> = matches.iter().map(|m| m.matched_field()).collect();
    assert_eq!(mapped, vec![Some("price"), Some("area")]);

    let missing: Vec<&str> = find_missing_required_fields(&matches, &property().catalog)
        .iter()
        .map(|field| field.key.as_str())
        .collect();
    assert_eq!(missing, vec!["title", "property_type", "listing_type"]);
}

#[test]
fn tier_boundaries() {
    assert_eq!(confidence_level(0.9).level, ConfidenceLevel::High);
    assert_eq!(confidence_level(0.89).level, ConfidenceLevel::Medium);
    assert_eq!(confidence_level(0.69).level, ConfidenceLevel::Low);
}

#[test]
fn statistics_count_tiers_and_missing_labels() {
    let headers = ["Title", "Price", "Bedroom", "Cty", "Column 1"];
    let matches = match_columns(&headers, property(), &MatchOptions::default());
    let stats = match_statistics(&matches, &property().catalog);

    assert_eq!(stats.total, 5);
    assert_eq!(stats.matched, 4);
    assert_eq!(stats.unmatched, 1);
    assert_eq!(stats.high_confidence, 2);
    assert_eq!(stats.medium_confidence, 2);
    assert_eq!(stats.low_confidence, 0);
    assert_eq!(stats.missing_required, vec!["نوع العقار", "نوع العرض"]);
    assert!(!stats.is_complete());

    let price = find_match_for_field("price", &matches).expect("price column");
    assert_eq!(price.column_index, 1);
    assert!(find_match_for_field("listing_type", &matches).is_none());
}

#[test]
fn templates_map_back_onto_their_profile() {
    for name in ["property", "customer"] {
        let profile = builtin_profile(name).expect("profile");
        let template = build_template(&profile.catalog);
        let matches = match_columns(template.headers.as_slice(), profile, &MatchOptions::default());
        let keys: Vec<&str> = matches.iter().filter_map(|m| m.matched_field()).collect();
        let expected: Vec<&str> = profile.catalog.iter().map(|f| f.key.as_str()).collect();
        assert_eq!(keys, expected, "profile {name}");
    }
}

#[test]
fn match_serializes_for_json_consumers() {
    let matches = match_columns(&["Cty"], property(), &MatchOptions::default());
    insta::assert_json_snapshot!(matches, @r#"
    [
      {
        "source_header": "Cty",
        "column_index": 0,
        "matched_field": "city",
        "confidence": 0.75,
        "suggestions": []
      }
    ]
    "#);
}
