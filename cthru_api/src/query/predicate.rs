//! Predicates: field comparisons, optionally grouped with OR.

use std::fmt;

/// Comparison applied between a field and a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Equals,
    GreaterOrEqual,
    LessOrEqual,
    /// Case-insensitive substring match, compiled to SoQL `like`.
    ///
    /// SoQL `like` has no `ESCAPE` clause, so `%` and `_` in the needle keep
    /// their wildcard meaning: `a_b` also matches `axb`. Matches are a
    /// superset of true substring matches, never a subset.
    Contains,
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operator::Equals => "==",
                Operator::GreaterOrEqual => ">=",
                Operator::LessOrEqual => "<=",
                Operator::Contains => "CONTAINS",
            }
        )
    }
}

/// A typed literal on the right-hand side of a comparison.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterValue {
    Text(String),
    Integer(i64),
    Decimal(f64),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Text(s) => write!(f, "\"{}\"", s),
            FilterValue::Integer(i) => write!(f, "{}", i),
            FilterValue::Decimal(d) => write!(f, "{}", d),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Compare {
        field: String,
        op: Operator,
        value: FilterValue,
    },
    /// Matches when at least one member matches.
    AnyOf(Vec<Predicate>),
}

impl Predicate {
    pub fn equals(field: &str, value: FilterValue) -> Self {
        Self::Compare {
            field: field.to_string(),
            op: Operator::Equals,
            value,
        }
    }

    pub fn at_least(field: &str, value: f64) -> Self {
        Self::Compare {
            field: field.to_string(),
            op: Operator::GreaterOrEqual,
            value: FilterValue::Decimal(value),
        }
    }

    pub fn at_most(field: &str, value: f64) -> Self {
        Self::Compare {
            field: field.to_string(),
            op: Operator::LessOrEqual,
            value: FilterValue::Decimal(value),
        }
    }

    pub fn contains(field: &str, needle: &str) -> Self {
        Self::Compare {
            field: field.to_string(),
            op: Operator::Contains,
            value: FilterValue::Text(needle.to_string()),
        }
    }

    /// `needle` contained in any of `fields`. A single field yields a plain
    /// comparison rather than a one-member group.
    pub fn contains_any(fields: &[String], needle: &str) -> Self {
        match fields {
            [field] => Self::contains(field, needle),
            _ => Self::AnyOf(fields.iter().map(|f| Self::contains(f, needle)).collect()),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::Compare { field, op, value } => write!(f, "{} {} {}", field, op, value),
            Predicate::AnyOf(members) => {
                let parts: Vec<String> = members.iter().map(|m| m.to_string()).collect();
                write!(f, "({})", parts.join(" OR "))
            }
        }
    }
}
