//! Compiles [`Predicate`]s into SoQL `$where` fragments.
//!
//! Pure string building, no I/O. Contains-matches always wrap both sides in
//! `upper()` so matching is case-insensitive regardless of how the value was
//! folded.

use super::{FilterValue, Operator, Predicate};

/// Renders a literal. Text is single-quoted with embedded quotes doubled.
pub fn literal(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(s) => format!("'{}'", escape(s)),
        FilterValue::Integer(i) => i.to_string(),
        FilterValue::Decimal(d) => d.to_string(),
    }
}

fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

/// Quotes are escaped. `%` and `_` pass through as wildcards; see
/// [`Operator::Contains`].
fn contains_needle(value: &FilterValue) -> String {
    match value {
        FilterValue::Text(s) => escape(s),
        other => literal(other),
    }
}

pub fn compile(predicate: &Predicate) -> String {
    match predicate {
        Predicate::Compare { field, op, value } => match op {
            Operator::Equals => format!("{} = {}", field, literal(value)),
            Operator::GreaterOrEqual => format!("{} >= {}", field, literal(value)),
            Operator::LessOrEqual => format!("{} <= {}", field, literal(value)),
            Operator::Contains => format!(
                "upper({}) like upper('%{}%')",
                field,
                contains_needle(value)
            ),
        },
        Predicate::AnyOf(members) => {
            let parts: Vec<String> = members.iter().map(compile).collect();
            format!("({})", parts.join(" OR "))
        }
    }
}

/// Joins all predicates with `AND`. `None` when there is nothing to filter on.
pub fn where_clause(predicates: &[Predicate]) -> Option<String> {
    if predicates.is_empty() {
        return None;
    }
    let parts: Vec<String> = predicates.iter().map(compile).collect();
    Some(parts.join(" AND "))
}
