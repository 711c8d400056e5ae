use cthru_api::{
    soql, FilterValue, Predicate, Query, SortClause, SortDirection, StructuredQuery,
    DEFAULT_LIMIT,
};
use url::Url;

fn base_url() -> Url {
    Url::parse("https://example.com/resource/9ttk-7vz6.json").unwrap()
}

fn decoded_pairs(url: &Url) -> Vec<(String, String)> {
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

#[test]
fn structured_query_defaults() {
    let query = StructuredQuery::default();
    assert_eq!(query.limit, DEFAULT_LIMIT);
    assert_eq!(query.offset, 0);
    assert!(query.sort.is_none());
    assert!(query.search.is_none());

    let pairs = decoded_pairs(&query.add_to_url(&base_url()));
    assert_eq!(
        pairs,
        vec![
            ("$limit".to_string(), "100".to_string()),
            ("$offset".to_string(), "0".to_string()),
        ]
    );
}

#[test]
fn payroll_style_query_round_trips_through_url() {
    let names = vec!["name_first".to_string(), "name_last".to_string()];
    let query = StructuredQuery::default()
        .with_predicate(Predicate::equals("year", FilterValue::Integer(2025)))
        .with_predicate(Predicate::contains("department_division", "police"))
        .with_predicate(Predicate::at_least("pay_total_actual", 200000.0))
        .with_predicate(Predicate::contains_any(&names, "smith"))
        .with_sort(SortClause::new("pay_total_actual", SortDirection::Desc))
        .with_limit(25)
        .with_offset(50);

    let pairs = decoded_pairs(&query.add_to_url(&base_url()));
    assert_eq!(pairs[0].0, "$where");
    assert_eq!(
        pairs[0].1,
        "year = 2025 AND upper(department_division) like upper('%police%') AND \
         pay_total_actual >= 200000 AND \
         (upper(name_first) like upper('%smith%') OR upper(name_last) like upper('%smith%'))"
    );
    assert_eq!(pairs[1], ("$order".to_string(), "pay_total_actual DESC".to_string()));
    assert_eq!(pairs[2], ("$limit".to_string(), "25".to_string()));
    assert_eq!(pairs[3], ("$offset".to_string(), "50".to_string()));
}

#[test]
fn inverted_range_is_still_sent() {
    let query = StructuredQuery::default()
        .with_predicate(Predicate::at_least("amount", 5000.0))
        .with_predicate(Predicate::at_most("amount", 100.0));
    assert_eq!(
        query.where_clause().as_deref(),
        Some("amount >= 5000 AND amount <= 100")
    );
}

#[test]
fn full_text_search_uses_q() {
    let pairs = decoded_pairs(
        &StructuredQuery::default()
            .with_search("wrongful termination")
            .add_to_url(&base_url()),
    );
    assert!(pairs.contains(&("$q".to_string(), "wrongful termination".to_string())));
    assert!(!pairs.iter().any(|(k, _)| k == "$where"));
}

#[test]
fn compiler_is_independent_of_query() {
    assert_eq!(
        soql::compile(&Predicate::contains("fund", "opioid")),
        "upper(fund) like upper('%opioid%')"
    );
}

#[test]
fn identical_builds_are_equal() {
    let build = || {
        StructuredQuery::default()
            .with_predicate(Predicate::contains("vendor", "acme"))
            .with_limit(10)
    };
    assert_eq!(build(), build());
    assert_eq!(build().to_params(), build().to_params());
}
