//! Tests for catalog record decoding and estimate helpers

use super::*;

#[test]
fn search_result_accepts_string_year() {
    let json = r#"{
        "id": 249504,
        "title": "Rick Astley - Never Gonna Give You Up",
        "year": "1987",
        "cover_image": "https://example.com/cover.jpg",
        "catno": "PB 41447"
    }"#;

    let result: SearchResult = serde_json::from_str(json).unwrap();
    assert_eq!(result.id, 249504);
    assert_eq!(result.year, Some(1987));
    assert_eq!(result.catno.as_deref(), Some("PB 41447"));
}

#[test]
fn search_result_accepts_numeric_or_missing_year() {
    let numeric: SearchResult = serde_json::from_str(r#"{"id": 1, "year": 1970}"#).unwrap();
    assert_eq!(numeric.year, Some(1970));

    let missing: SearchResult = serde_json::from_str(r#"{"id": 2, "title": "X"}"#).unwrap();
    assert_eq!(missing.year, None);

    let garbage: SearchResult = serde_json::from_str(r#"{"id": 3, "year": "n/a"}"#).unwrap();
    assert_eq!(garbage.year, None);
}

#[test]
fn image_url_falls_back_to_thumb() {
    let result: SearchResult = serde_json::from_str(
        r#"{"id": 1, "cover_image": "", "thumb": "https://example.com/thumb.jpg"}"#,
    )
    .unwrap();
    assert_eq!(result.image_url(), Some("https://example.com/thumb.jpg"));
}

#[test]
fn search_response_defaults_pagination() {
    let response: SearchResponse = serde_json::from_str(r#"{"results": []}"#).unwrap();
    assert_eq!(response.pagination.page, 1);
    assert_eq!(response.pagination.pages, 1);
}

#[test]
fn stats_ignore_non_numeric_prices() {
    let json = r#"{
        "lowest_price": {"value": 9.5, "currency": "USD"},
        "median": 12,
        "highest_price": null,
        "number_for_sale": 4
    }"#;

    let stats: MarketStats = serde_json::from_str(json).unwrap();
    assert_eq!(stats.lowest_price, None);
    assert_eq!(stats.median, Some(12.0));
    assert_eq!(stats.highest_price, None);
    assert_eq!(stats.for_sale(), Some(4));
}

#[test]
fn stats_accept_both_for_sale_names_together() {
    let json = r#"{
        "lowest_price": 9.0,
        "median": 12.0,
        "highest_price": 20.0,
        "num_for_sale": 3,
        "number_for_sale": 5
    }"#;

    let stats: MarketStats = serde_json::from_str(json).unwrap();
    assert_eq!(stats.median, Some(12.0));
    assert_eq!(stats.for_sale(), Some(3));
}

#[test]
fn release_decodes_detail_fields() {
    let json = r#"{
        "id": 42,
        "title": "Blue Train",
        "artists_sort": "John Coltrane",
        "year": 1957,
        "images": [{"uri": "https://example.com/a.jpg", "type": "primary"}],
        "labels": [{"name": "Blue Note", "catno": "BLP 1577"}],
        "formats": [{"name": "Vinyl", "text": "Mono", "descriptions": ["LP", "Album"]}],
        "genres": ["Jazz"],
        "styles": ["Hard Bop"],
        "community": {"rating": {"average": 4.7, "count": 321}, "have": 1000, "want": 2000},
        "tracklist": [{"position": "A1", "title": "Blue Train", "duration": "10:43"}],
        "videos": [{"uri": "https://youtube.com/x", "title": "Blue Train"}],
        "notes": "Original pressing",
        "lowest_price": 85.0
    }"#;

    let release: Release = serde_json::from_str(json).unwrap();
    assert_eq!(release.cover_uri(), Some("https://example.com/a.jpg"));
    assert_eq!(release.labels[0].catno.as_deref(), Some("BLP 1577"));
    assert_eq!(release.formats[0].descriptions, vec!["LP", "Album"]);
    let community = release.community.unwrap();
    assert_eq!(community.rating.unwrap().count, Some(321));
    assert_eq!(release.lowest_price, Some(85.0));
}

#[test]
fn empty_estimate_serializes_as_empty_object() {
    let json = serde_json::to_string(&PriceEstimate::default()).unwrap();
    assert_eq!(json, "{}");

    let back: PriceEstimate = serde_json::from_str("{}").unwrap();
    assert!(!back.has_price());
    assert!(back.source.is_unknown());
}

#[test]
fn estimate_uses_wire_names() {
    let estimate = PriceEstimate {
        typical: Some(12.0),
        min: Some(9.0),
        max: Some(20.0),
        for_sale: Some(3),
        source: PriceSource::Stats,
        suggestions: None,
    };
    let value = serde_json::to_value(&estimate).unwrap();
    assert_eq!(value["forSale"], 3);
    assert_eq!(value["source"], "stats");
}

#[test]
fn representative_price_precedence() {
    let all = PriceEstimate {
        typical: Some(10.0),
        min: Some(5.0),
        max: Some(20.0),
        ..PriceEstimate::default()
    };
    assert_eq!(all.representative(), Some(10.0));

    let no_typical = PriceEstimate {
        min: Some(5.0),
        max: Some(20.0),
        ..PriceEstimate::default()
    };
    assert_eq!(no_typical.representative(), Some(5.0));

    let only_max = PriceEstimate {
        max: Some(20.0),
        ..PriceEstimate::default()
    };
    assert_eq!(only_max.representative(), Some(20.0));

    assert_eq!(PriceEstimate::default().representative(), None);
}

#[test]
fn release_lowest_is_one_point_estimate() {
    let estimate = PriceEstimate::release_lowest(7.5);
    assert_eq!(estimate.typical, Some(7.5));
    assert_eq!(estimate.min, Some(7.5));
    assert_eq!(estimate.max, Some(7.5));
    assert_eq!(estimate.source, PriceSource::ReleaseLowest);
}
