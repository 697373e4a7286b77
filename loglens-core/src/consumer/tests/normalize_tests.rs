use crate::consumer::{CanonicalRow, normalize_body, normalize_row};
use crate::model::ResultCategory;
use pretty_assertions::assert_eq;
use serde_json::json;

fn row(dimension: &str, count: u64) -> CanonicalRow {
    CanonicalRow {
        dimension: dimension.to_string(),
        count,
    }
}

#[test]
fn named_and_tuple_status_rows_normalize_alike() {
    let named = normalize_row(
        ResultCategory::StatusCounts,
        &json!({"statusCode": 200, "count": 5}),
    );
    let tuple = normalize_row(ResultCategory::StatusCounts, &json!({"_1": 200, "_2": 5}));

    assert_eq!(named, Some(row("200", 5)));
    assert_eq!(tuple, Some(row("200", 5)));
}

#[test]
fn array_rows_are_read_positionally() {
    let normalized = normalize_row(ResultCategory::TopUrls, &json!(["/index.html", 12]));

    assert_eq!(normalized, Some(row("/index.html", 12)));
}

#[test]
fn aliases_resolve_in_priority_order() {
    // both "ipAddress" and "ip" present: the earlier candidate wins
    let normalized = normalize_row(
        ResultCategory::TopIps,
        &json!({"ip": "10.0.0.1", "ipAddress": "10.0.0.2", "cnt": 3}),
    );

    assert_eq!(normalized, Some(row("10.0.0.2", 3)));
}

#[test]
fn null_candidates_are_skipped() {
    let normalized = normalize_row(
        ResultCategory::TopUrls,
        &json!({"url": null, "path": "/fallback", "count": 1}),
    );

    assert_eq!(normalized, Some(row("/fallback", 1)));
}

#[test]
fn counts_are_coerced_from_strings_and_integral_floats() {
    assert_eq!(
        normalize_row(ResultCategory::TopUrls, &json!({"url": "/a", "count": "42"})),
        Some(row("/a", 42))
    );
    assert_eq!(
        normalize_row(ResultCategory::TopUrls, &json!({"url": "/a", "count": 7.0})),
        Some(row("/a", 7))
    );
}

#[test]
fn bad_or_missing_count_defaults_to_zero() {
    let cases = [
        json!({"url": "/a"}),
        json!({"url": "/a", "count": "many"}),
        json!({"url": "/a", "count": -3}),
        json!({"url": "/a", "count": 1.5}),
        json!({"url": "/a", "count": {"n": 1}}),
    ];

    for case in cases {
        assert_eq!(
            normalize_row(ResultCategory::TopUrls, &case),
            Some(row("/a", 0)),
            "case: {case}"
        );
    }
}

#[test]
fn rows_without_dimension_are_dropped() {
    assert_eq!(
        normalize_row(ResultCategory::TopIps, &json!({"count": 3})),
        None
    );
    assert_eq!(
        normalize_row(ResultCategory::TopIps, &json!({"ipAddress": "", "count": 3})),
        None
    );
    assert_eq!(normalize_row(ResultCategory::TopIps, &json!("10.0.0.1")), None);
}

#[test]
fn body_skips_malformed_lines_only() {
    // Arrange
    let body = "{\"url\":\"/a\",\"count\":2}\n\
                not json\n\
                \n\
                {\"count\":9}\n\
                {\"_1\":\"/b\",\"_2\":1}\n";

    // Act
    let normalized = normalize_body(ResultCategory::TopUrls, body);

    // Assert
    assert_eq!(normalized.rows, vec![row("/a", 2), row("/b", 1)]);
    assert_eq!(normalized.malformed_lines, 1);
    assert_eq!(normalized.dropped_rows, 1);
}

#[test]
fn all_malformed_body_degrades_to_empty() {
    let normalized = normalize_body(ResultCategory::StatusCounts, "{oops\n[1,\n");

    assert!(normalized.rows.is_empty());
    assert_eq!(normalized.malformed_lines, 2);
}
