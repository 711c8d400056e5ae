//! Turns a [`FilterSpec`] into a [`StructuredQuery`] for one dataset.

use cthru_api::types::{DatasetDescriptor, FieldKind, FieldTarget, LogicalFilter};
use cthru_api::{FilterValue, Predicate, StructuredQuery};

use crate::error::CthruError;
use crate::filter::FilterSpec;
use crate::validation;

fn target<'a>(
    dataset: &'a DatasetDescriptor,
    filter: LogicalFilter,
) -> Result<&'a FieldTarget, CthruError> {
    dataset
        .target(filter)
        .ok_or_else(|| CthruError::UnsupportedFilter {
            dataset: dataset.id.clone(),
            filter,
        })
}

/// The single field a one-column filter applies to.
fn primary_field(dataset: &DatasetDescriptor, filter: LogicalFilter) -> Result<&str, CthruError> {
    target(dataset, filter)?
        .primary()
        .ok_or_else(|| CthruError::UnsupportedFilter {
            dataset: dataset.id.clone(),
            filter,
        })
}

fn year_predicate(dataset: &DatasetDescriptor, year: i32) -> Result<Predicate, CthruError> {
    let target = target(dataset, LogicalFilter::Year)?;
    let value = match target.kind {
        FieldKind::Text => FilterValue::Text(year.to_string()),
        FieldKind::Number => FilterValue::Integer(i64::from(year)),
    };
    Ok(Predicate::equals(primary_field(dataset, LogicalFilter::Year)?, value))
}

fn text_predicate(
    dataset: &DatasetDescriptor,
    filter: LogicalFilter,
    input: &str,
) -> Result<Predicate, CthruError> {
    let target = target(dataset, filter)?;
    let needle = validation::validate_text_filter(input)?;
    Ok(Predicate::contains_any(&target.fields, &needle))
}

/// Builds the query. Pure: the same inputs always give an equal result.
///
/// Predicates come out in a fixed order: year, department, vendor, fund,
/// min amount, max amount, name, search. A filter the dataset has no column
/// for is rejected rather than dropped.
pub fn build(dataset: &DatasetDescriptor, spec: &FilterSpec) -> Result<StructuredQuery, CthruError> {
    let mut query = StructuredQuery::default()
        .with_limit(validation::validate_limit(spec.limit)?)
        .with_offset(validation::validate_offset(spec.offset)?);

    if let Some(year) = spec.year {
        query = query.with_predicate(year_predicate(dataset, year)?);
    }

    let text_filters = [
        (LogicalFilter::Department, &spec.department),
        (LogicalFilter::Vendor, &spec.vendor),
        (LogicalFilter::Fund, &spec.fund),
    ];
    for (filter, value) in text_filters {
        if let Some(value) = value {
            query = query.with_predicate(text_predicate(dataset, filter, value)?);
        }
    }

    if spec.min_amount.is_some() || spec.max_amount.is_some() {
        let amount = primary_field(dataset, LogicalFilter::Amount)?;
        if let Some(min) = spec.min_amount {
            query = query.with_predicate(Predicate::at_least(amount, validation::validate_amount(min)?));
        }
        if let Some(max) = spec.max_amount {
            query = query.with_predicate(Predicate::at_most(amount, validation::validate_amount(max)?));
        }
        if let (Some(min), Some(max)) = (spec.min_amount, spec.max_amount) {
            if min > max {
                tracing::warn!(
                    "min amount {} exceeds max amount {}; the query will match no rows",
                    min,
                    max
                );
            }
        }
    }

    if let Some(name) = &spec.name {
        query = query.with_predicate(text_predicate(dataset, LogicalFilter::Name, name)?);
    }

    if let Some(search) = &spec.search {
        query = match dataset.target(LogicalFilter::Search) {
            Some(_) => query.with_predicate(text_predicate(dataset, LogicalFilter::Search, search)?),
            None => query.with_search(&validation::sanitize_text(search, validation::MAX_TEXT_LENGTH)?),
        };
    }

    if let Some(sort) = &spec.sort {
        query = query.with_sort(validation::parse_sort(dataset, sort)?);
    }

    tracing::debug!(
        "built query for {}: {} predicates, limit {}, offset {}",
        dataset.id,
        query.predicates.len(),
        query.limit,
        query.offset
    );
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Registry;
    use cthru_api::{Operator, SortClause, SortDirection};

    fn dataset(name: &str) -> DatasetDescriptor {
        Registry::builtin().resolve(name).unwrap().clone()
    }

    #[test]
    fn spending_year_and_vendor() {
        let spec = FilterSpec::default()
            .with_year(2025)
            .with_vendor("Acme Corp")
            .with_limit(20);
        let query = build(&dataset("spending"), &spec).unwrap();

        assert_eq!(
            query.predicates,
            vec![
                Predicate::equals("budget_fiscal_year", FilterValue::Text("2025".to_string())),
                Predicate::contains("vendor", "acme corp"),
            ]
        );
        assert!(query.sort.is_none());
        assert!(query.search.is_none());
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn payroll_year_is_numeric() {
        let query = build(&dataset("payroll"), &FilterSpec::default().with_year(2025)).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::equals("year", FilterValue::Integer(2025))]
        );
    }

    #[test]
    fn department_maps_per_dataset() {
        let spec = FilterSpec::default().with_department("Police");
        let spending = build(&dataset("spending"), &spec).unwrap();
        let payroll = build(&dataset("payroll"), &spec).unwrap();
        assert_eq!(spending.predicates, vec![Predicate::contains("department", "police")]);
        assert_eq!(
            payroll.predicates,
            vec![Predicate::contains("department_division", "police")]
        );
    }

    #[test]
    fn text_filters_never_use_equality() {
        let spec = FilterSpec::default()
            .with_department("EHS")
            .with_vendor("Mason")
            .with_fund("Opioid")
            .with_search("office");
        let query = build(&dataset("spending"), &spec).unwrap();
        fn ops(p: &Predicate, out: &mut Vec<Operator>) {
            match p {
                Predicate::Compare { op, .. } => out.push(*op),
                Predicate::AnyOf(members) => members.iter().for_each(|m| ops(m, out)),
            }
        }
        let mut all = Vec::new();
        query.predicates.iter().for_each(|p| ops(p, &mut all));
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|op| *op == Operator::Contains));
    }

    #[test]
    fn amount_range_both_sides() {
        let spec = FilterSpec::default()
            .with_min_amount(1000.0)
            .with_max_amount(50000.0);
        let query = build(&dataset("payroll"), &spec).unwrap();
        assert_eq!(
            query.predicates,
            vec![
                Predicate::at_least("pay_total_actual", 1000.0),
                Predicate::at_most("pay_total_actual", 50000.0),
            ]
        );
    }

    #[test]
    fn inverted_range_is_not_an_error() {
        let spec = FilterSpec::default()
            .with_min_amount(90000.0)
            .with_max_amount(10.0);
        let query = build(&dataset("spending"), &spec).unwrap();
        assert_eq!(
            query.predicates,
            vec![
                Predicate::at_least("amount", 90000.0),
                Predicate::at_most("amount", 10.0),
            ]
        );
    }

    #[test]
    fn single_bound_only() {
        let query = build(&dataset("spending"), &FilterSpec::default().with_max_amount(5.0)).unwrap();
        assert_eq!(query.predicates, vec![Predicate::at_most("amount", 5.0)]);
    }

    #[test]
    fn empty_spec_has_no_predicates() {
        for name in ["spending", "payroll", "settlements", "revenue"] {
            let query = build(&dataset(name), &FilterSpec::default()).unwrap();
            assert!(query.predicates.is_empty(), "{} produced predicates", name);
            assert!(query.search.is_none());
            assert!(query.sort.is_none());
            assert_eq!(query.limit, 100);
            assert_eq!(query.offset, 0);
        }
    }

    #[test]
    fn omitted_keys_add_nothing() {
        let full = FilterSpec::default()
            .with_year(2024)
            .with_department("dot")
            .with_vendor("acme")
            .with_fund("general")
            .with_min_amount(1.0)
            .with_max_amount(2.0)
            .with_search("roads");
        let all = build(&dataset("spending"), &full).unwrap().predicates.len();
        assert_eq!(all, 7);

        let mut without_vendor = full.clone();
        without_vendor.vendor = None;
        let query = build(&dataset("spending"), &without_vendor).unwrap();
        assert_eq!(query.predicates.len(), all - 1);
        assert!(!query
            .predicates
            .contains(&Predicate::contains("vendor", "acme")));
    }

    #[test]
    fn payroll_name_spans_both_name_fields() {
        let query = build(&dataset("payroll"), &FilterSpec::default().with_name("Smith")).unwrap();
        assert_eq!(
            query.predicates,
            vec![Predicate::AnyOf(vec![
                Predicate::contains("name_first", "smith"),
                Predicate::contains("name_last", "smith"),
            ])]
        );
    }

    #[test]
    fn search_on_open_schema_uses_full_text() {
        let query = build(
            &dataset("settlements"),
            &FilterSpec::default().with_search("Wrongful Termination"),
        )
        .unwrap();
        assert!(query.predicates.is_empty());
        assert_eq!(query.search.as_deref(), Some("Wrongful Termination"));
    }

    #[test]
    fn unsupported_filter_is_rejected() {
        let err = build(&dataset("payroll"), &FilterSpec::default().with_vendor("acme")).unwrap_err();
        assert!(matches!(
            err,
            CthruError::UnsupportedFilter {
                filter: LogicalFilter::Vendor,
                ..
            }
        ));
        assert!(build(&dataset("revenue"), &FilterSpec::default().with_year(2024)).is_err());
    }

    #[test]
    fn empty_field_mappings_are_unsupported() {
        let ds = DatasetDescriptor::new("custom", "abcd-1234")
            .with_mapping(LogicalFilter::Year, &[], FieldKind::Number)
            .with_mapping(LogicalFilter::Amount, &[], FieldKind::Number)
            .with_mapping(LogicalFilter::Vendor, &[], FieldKind::Text);

        for spec in [
            FilterSpec::default().with_year(2024),
            FilterSpec::default().with_min_amount(1.0),
            FilterSpec::default().with_vendor("acme"),
        ] {
            assert!(matches!(
                build(&ds, &spec),
                Err(CthruError::UnsupportedFilter { .. })
            ));
        }
    }

    #[test]
    fn sort_limit_offset() {
        let spec = FilterSpec::default()
            .with_sort("amount DESC")
            .with_limit(20)
            .with_offset(40);
        let query = build(&dataset("spending"), &spec).unwrap();
        assert_eq!(query.sort, Some(SortClause::new("amount", SortDirection::Desc)));
        assert_eq!(query.limit, 20);
        assert_eq!(query.offset, 40);
    }

    #[test]
    fn invalid_pagination_and_sort() {
        let ds = dataset("spending");
        assert!(matches!(
            build(&ds, &FilterSpec::default().with_limit(0)),
            Err(CthruError::InvalidLimit(0))
        ));
        assert!(matches!(
            build(&ds, &FilterSpec::default().with_offset(-10)),
            Err(CthruError::InvalidOffset(-10))
        ));
        assert!(matches!(
            build(&ds, &FilterSpec::default().with_sort("bogus_field DESC")),
            Err(CthruError::InvalidSort { .. })
        ));
    }

    #[test]
    fn build_is_deterministic() {
        let spec = FilterSpec::default()
            .with_year(2023)
            .with_search("mason")
            .with_sort("date");
        let ds = dataset("spending");
        assert_eq!(build(&ds, &spec).unwrap(), build(&ds, &spec).unwrap());
    }

    #[test]
    fn blank_text_filter_is_invalid_input() {
        assert!(matches!(
            build(&dataset("spending"), &FilterSpec::default().with_vendor("   ")),
            Err(CthruError::InvalidInput(_))
        ));
    }
}
