//! End-to-end generation scenarios driven through the builder.

use querygen_rs::serialize::parse_suffix;
use querygen_rs::{Generator, QueryBuilder, QueryGenError, QuerySpec};

const HOST: &str = "http://localhost:8080";

fn urls(spec: &QuerySpec) -> Vec<String> {
    Generator::new().urls(spec).expect("generation succeeds")
}

fn products_by_filter() -> QuerySpec {
    QueryBuilder::new("ProductsByFilter")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/products/by-filters"))
        .map(|b| b.always_filter())
        .and_then(|b| b.mix_param("colorCodingType", ["status"]))
        .and_then(|b| b.mix_param("color", ["green", "yellow", "red"]))
        .expect("valid spec")
        .build()
}

#[test]
fn fixed_only_query_yields_single_url() {
    let spec = QueryBuilder::new("PromotionsByFilter")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/promotions/by-filters"))
        .and_then(|b| b.fix_param("promotion", ["123456"]))
        .expect("valid spec")
        .build();
    assert_eq!(
        urls(&spec),
        vec!["http://localhost:8080/promotions/by-filters?promotion=123456"]
    );
}

#[test]
fn query_without_parameters_yields_bare_url() {
    let spec = QueryBuilder::new("Departments")
        .and_then(|b| b.host("http://localhost:8080/"))
        .and_then(|b| b.url("/app/departments"))
        .expect("valid spec")
        .build();
    assert_eq!(urls(&spec), vec!["http://localhost:8080/app/departments"]);
}

#[test]
fn always_filtered_mixed_query_drops_the_empty_combination() {
    let spec = products_by_filter();
    assert_eq!(spec.raw_combinations(), 16);

    let base = "http://localhost:8080/products/by-filters";
    let expected: Vec<String> = [
        "?color=green",
        "?color=yellow",
        "?color=red",
        "?color=green&color=yellow",
        "?color=green&color=red",
        "?color=yellow&color=red",
        "?color=green&color=yellow&color=red",
        "?colorCodingType=status",
        "?colorCodingType=status&color=green",
        "?colorCodingType=status&color=yellow",
        "?colorCodingType=status&color=red",
        "?colorCodingType=status&color=green&color=yellow",
        "?colorCodingType=status&color=green&color=red",
        "?colorCodingType=status&color=yellow&color=red",
        "?colorCodingType=status&color=green&color=yellow&color=red",
    ]
    .iter()
    .map(|suffix| format!("{base}{suffix}"))
    .collect();

    assert_eq!(urls(&spec), expected);
}

#[test]
fn unfiltered_query_keeps_every_combination() {
    let spec = QueryBuilder::new("Classes")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/classes"))
        .and_then(|b| b.mix_param("department", ["123"]))
        .and_then(|b| b.mix_param("class", ["1234", "1235", "1236"]))
        .expect("valid spec")
        .build();
    let generated = urls(&spec);
    assert_eq!(generated.len(), 16);
    assert_eq!(generated[0], "http://localhost:8080/classes");
}

#[test]
fn require_non_empty_with_single_value_keeps_one_of_two() {
    let spec = QueryBuilder::new("Single")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/single"))
        .and_then(|b| b.mix_param("flag", ["on"]))
        .map(|b| b.always_filter())
        .expect("valid spec")
        .build();
    assert_eq!(spec.raw_combinations(), 2);
    assert_eq!(urls(&spec), vec!["http://localhost:8080/single?flag=on"]);
}

#[test]
fn fixed_parameters_make_the_filter_a_no_op() {
    let spec = QueryBuilder::new("Products")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/products"))
        .and_then(|b| b.fix_param("product", "654321"))
        .and_then(|b| b.mix_param("promotion", "123456"))
        .map(|b| b.always_filter())
        .expect("valid spec")
        .build();
    assert_eq!(
        urls(&spec),
        vec![
            "http://localhost:8080/products?product=654321",
            "http://localhost:8080/products?product=654321&promotion=123456",
        ]
    );
}

#[test]
fn generation_is_repeatable() {
    let spec = products_by_filter();
    assert_eq!(urls(&spec), urls(&spec));
}

#[test]
fn suffix_round_trips_to_declared_pairs() {
    let spec = products_by_filter();
    let last = urls(&spec).pop().expect("at least one url");
    let suffix = last
        .strip_prefix("http://localhost:8080/products/by-filters")
        .expect("base prefix");
    let pairs = parse_suffix(suffix);
    let expected: Vec<(String, String)> = [
        ("colorCodingType", "status"),
        ("color", "green"),
        ("color", "yellow"),
        ("color", "red"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
    assert_eq!(pairs, expected);
}

#[test]
fn spaces_are_escaped_in_output() {
    let spec = QueryBuilder::new("Regions")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/regions"))
        .and_then(|b| b.fix_param("region", "north america"))
        .expect("valid spec")
        .build();
    assert_eq!(
        urls(&spec),
        vec!["http://localhost:8080/regions?region=north%20america"]
    );
}

#[test]
fn missing_url_fails_before_any_output() {
    let spec = QueryBuilder::new("NoUrl")
        .and_then(|b| b.host(HOST))
        .expect("builder")
        .build();
    let mut lines: Vec<String> = Vec::new();
    let err = Generator::new()
        .generate(&spec, &mut lines)
        .expect_err("url is required");
    assert!(matches!(err, QueryGenError::Configuration(_)));
    assert!(err.to_string().starts_with("querygen error: Query URL is required"));
    assert!(lines.is_empty());
}

#[test]
fn always_filter_without_parameters_is_a_configuration_error() {
    let spec = QueryBuilder::new("Empty")
        .and_then(|b| b.host(HOST))
        .and_then(|b| b.url("/empty"))
        .map(|b| b.always_filter())
        .expect("builder")
        .build();
    assert!(matches!(
        Generator::new().urls(&spec),
        Err(QueryGenError::Configuration(_))
    ));
}
