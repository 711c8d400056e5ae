use cthru_api::types::DatasetDescriptor;
use cthru_api::{SortClause, SortDirection, DEFAULT_LIMIT};

use crate::error::CthruError;

pub const MAX_TEXT_LENGTH: usize = 100;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, CthruError> {
    if input.len() > max_len {
        return Err(CthruError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(CthruError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a partial-match filter value and fold it to lower case.
pub fn validate_text_filter(input: &str) -> Result<String, CthruError> {
    Ok(sanitize_text(input, MAX_TEXT_LENGTH)?.to_lowercase())
}

/// Validate a dollar amount: must be a finite number.
pub fn validate_amount(amount: f64) -> Result<f64, CthruError> {
    if !amount.is_finite() {
        return Err(CthruError::InvalidInput(format!(
            "amount '{}' is not a finite number",
            amount
        )));
    }
    Ok(amount)
}

/// Validate limit (must be >= 1). `None` means the default of 100.
pub fn validate_limit(limit: Option<i64>) -> Result<u32, CthruError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(n) if n >= 1 => u32::try_from(n).map_err(|_| CthruError::InvalidLimit(n)),
        Some(n) => Err(CthruError::InvalidLimit(n)),
    }
}

/// Validate offset (must be >= 0). `None` means 0.
pub fn validate_offset(offset: Option<i64>) -> Result<u64, CthruError> {
    match offset {
        None => Ok(0),
        Some(n) => u64::try_from(n).map_err(|_| CthruError::InvalidOffset(n)),
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Parse `"field DIRECTION"` (or `field:direction`) into a sort clause.
///
/// Direction is case-insensitive and defaults to ascending. The field must be
/// one of the dataset's known fields; datasets without catalogued fields
/// accept any plain identifier.
pub fn parse_sort(dataset: &DatasetDescriptor, input: &str) -> Result<SortClause, CthruError> {
    let invalid = |reason: String| CthruError::InvalidSort {
        input: input.to_string(),
        reason,
    };

    let parts: Vec<&str> = input
        .split(|c: char| c.is_whitespace() || c == ':')
        .filter(|p| !p.is_empty())
        .collect();

    let (field, direction) = match parts.as_slice() {
        [field] => (*field, SortDirection::Asc),
        [field, dir] => {
            let direction = dir
                .parse::<SortDirection>()
                .map_err(|_| invalid(format!("unknown direction '{}', use ASC or DESC", dir)))?;
            (*field, direction)
        }
        [] => return Err(invalid("sort expression is empty".to_string())),
        _ => return Err(invalid("expected 'field [ASC|DESC]'".to_string())),
    };

    if dataset.is_open_schema() {
        if !is_identifier(field) {
            return Err(invalid(format!("'{}' is not a valid field name", field)));
        }
    } else if !dataset.has_field(field) {
        let known: Vec<&str> = dataset.known_fields.iter().map(|f| f.name.as_str()).collect();
        return Err(invalid(format!(
            "unknown field '{}' for {}. Known fields: {}",
            field,
            dataset.id,
            known.join(", ")
        )));
    }

    Ok(SortClause::new(field, direction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::Registry;

    fn spending() -> DatasetDescriptor {
        Registry::builtin().resolve("spending").unwrap().clone()
    }

    // -- Text sanitization --

    #[test]
    fn sanitize_strips_control_chars() {
        assert_eq!(sanitize_text("ac\x07me\n", 100).unwrap(), "acme");
    }

    #[test]
    fn sanitize_rejects_empty() {
        assert!(sanitize_text("   ", 100).is_err());
        assert!(sanitize_text("", 100).is_err());
    }

    #[test]
    fn sanitize_rejects_too_long() {
        let long = "x".repeat(MAX_TEXT_LENGTH + 1);
        assert!(sanitize_text(&long, MAX_TEXT_LENGTH).is_err());
    }

    #[test]
    fn text_filter_is_case_folded() {
        assert_eq!(validate_text_filter("  Acme Corp ").unwrap(), "acme corp");
    }

    #[test]
    fn amount_must_be_finite() {
        assert_eq!(validate_amount(1500.5).unwrap(), 1500.5);
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_amount(f64::INFINITY).is_err());
    }

    // -- Limit / offset --

    #[test]
    fn limit_defaults_to_100() {
        assert_eq!(validate_limit(None).unwrap(), 100);
        assert_eq!(validate_limit(Some(20)).unwrap(), 20);
    }

    #[test]
    fn limit_must_be_positive() {
        assert!(matches!(validate_limit(Some(0)), Err(CthruError::InvalidLimit(0))));
        assert!(matches!(validate_limit(Some(-5)), Err(CthruError::InvalidLimit(-5))));
    }

    #[test]
    fn offset_defaults_to_zero() {
        assert_eq!(validate_offset(None).unwrap(), 0);
        assert_eq!(validate_offset(Some(0)).unwrap(), 0);
        assert_eq!(validate_offset(Some(300)).unwrap(), 300);
    }

    #[test]
    fn offset_must_not_be_negative() {
        assert!(matches!(validate_offset(Some(-1)), Err(CthruError::InvalidOffset(-1))));
    }

    // -- Sort parsing --

    #[test]
    fn sort_with_direction() {
        let sort = parse_sort(&spending(), "amount DESC").unwrap();
        assert_eq!(sort, SortClause::new("amount", SortDirection::Desc));
    }

    #[test]
    fn sort_defaults_ascending() {
        let sort = parse_sort(&spending(), "amount").unwrap();
        assert_eq!(sort, SortClause::new("amount", SortDirection::Asc));
    }

    #[test]
    fn sort_accepts_colon_and_lowercase() {
        let sort = parse_sort(&spending(), "amount:desc").unwrap();
        assert_eq!(sort, SortClause::new("amount", SortDirection::Desc));
    }

    #[test]
    fn sort_unknown_field() {
        match parse_sort(&spending(), "bogus_field DESC") {
            Err(CthruError::InvalidSort { input, reason }) => {
                assert_eq!(input, "bogus_field DESC");
                assert!(reason.contains("bogus_field"));
            }
            other => panic!("expected InvalidSort, got {:?}", other),
        }
    }

    #[test]
    fn sort_unknown_direction() {
        assert!(matches!(
            parse_sort(&spending(), "amount SIDEWAYS"),
            Err(CthruError::InvalidSort { .. })
        ));
    }

    #[test]
    fn sort_empty_or_too_many_parts() {
        assert!(parse_sort(&spending(), "  ").is_err());
        assert!(parse_sort(&spending(), "amount DESC extra").is_err());
    }

    #[test]
    fn sort_open_schema_accepts_identifiers() {
        let revenue = Registry::builtin().resolve("revenue").unwrap().clone();
        let sort = parse_sort(&revenue, "collection_date DESC").unwrap();
        assert_eq!(sort.field, "collection_date");
        assert!(parse_sort(&revenue, "amount;drop DESC").is_err());
    }
}
