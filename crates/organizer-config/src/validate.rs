//! Validation helpers and parsing utilities for configuration documents.
//!
//! Numeric fields accept numbers or numeric strings. A value that cannot be read
//! as a number fails with a type message; a number outside its domain fails with
//! a range message. Both surface as `ConfigError::InvalidField`.

use std::path::PathBuf;

use serde_json::{Map, Value};

use crate::defaults::DOCUMENT_SECTION;
use crate::error::{ConfigError, ConfigResult};

/// Borrow a named section as a mapping; absent or null sections yield `None`.
pub(crate) fn section_map<'a>(
    section: Option<&'a Value>,
    name: &'static str,
) -> ConfigResult<Option<&'a Map<String, Value>>> {
    match section {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(_) => Err(ConfigError::invalid(DOCUMENT_SECTION, name, "must be a mapping")),
    }
}

/// Look up an optional field, treating explicit nulls as omitted.
pub(crate) fn optional_field<'a>(
    fields: Option<&'a Map<String, Value>>,
    field: &str,
) -> Option<&'a Value> {
    fields
        .and_then(|map| map.get(field))
        .filter(|value| !value.is_null())
}

pub(crate) fn parse_f64(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<f64> {
    let parsed = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|number| number.is_finite())
        .ok_or_else(|| ConfigError::invalid(section, field, "must be a number"))
}

pub(crate) fn parse_unit_interval(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<f64> {
    let number = parse_f64(value, section, field)?;
    if !(0.0..=1.0).contains(&number) {
        return Err(ConfigError::invalid(
            section,
            field,
            "must be between 0.0 and 1.0",
        ));
    }
    Ok(number)
}

/// Parse a non-negative integer, rejecting fractional values.
pub(crate) fn parse_non_negative_int(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<u64> {
    let type_error = || ConfigError::invalid(section, field, "must be an integer");
    let range_error = || ConfigError::invalid(section, field, "must be >= 0");

    match value {
        Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                return Ok(unsigned);
            }
            if number.as_i64().is_some() {
                return Err(range_error());
            }
            let float = number.as_f64().ok_or_else(type_error)?;
            integral_float(float).ok_or_else(type_error).and_then(|integral| {
                u64::try_from(integral).map_err(|_| range_error())
            })
        }
        Value::String(text) => {
            let signed = text.trim().parse::<i64>().map_err(|_| type_error())?;
            u64::try_from(signed).map_err(|_| range_error())
        }
        _ => Err(type_error()),
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::float_cmp
)]
fn integral_float(value: f64) -> Option<i64> {
    let in_range = value >= i64::MIN as f64 && value <= i64::MAX as f64;
    (value.is_finite() && value.trunc() == value && in_range).then_some(value as i64)
}

pub(crate) fn parse_bool(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| ConfigError::invalid(section, field, "must be a boolean"))
}

/// Check that a string field is a member of `allowed`.
pub(crate) fn parse_choice<'a>(
    value: &'a Value,
    section: &'static str,
    field: &'static str,
    allowed: &[&str],
) -> ConfigResult<&'a str> {
    let text = value
        .as_str()
        .ok_or_else(|| ConfigError::invalid(section, field, "must be a string"))?;
    if allowed.contains(&text) {
        Ok(text)
    } else {
        Err(ConfigError::invalid(
            section,
            field,
            format!("'{text}' must be one of: {}", allowed.join(", ")),
        ))
    }
}

pub(crate) fn parse_path(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<PathBuf> {
    match value.as_str() {
        Some(text) if !text.trim().is_empty() => Ok(PathBuf::from(text)),
        Some(_) => Err(ConfigError::invalid(section, field, "must not be empty")),
        None => Err(ConfigError::invalid(section, field, "must be a path string")),
    }
}

pub(crate) fn parse_path_list(
    value: &Value,
    section: &'static str,
    field: &'static str,
) -> ConfigResult<Vec<PathBuf>> {
    let entries = value
        .as_array()
        .ok_or_else(|| ConfigError::invalid(section, field, "must be a list of paths"))?;
    if entries.is_empty() {
        return Err(ConfigError::invalid(
            section,
            field,
            "must contain at least one folder",
        ));
    }
    entries
        .iter()
        .map(|entry| parse_path(entry, section, field))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn section_map_accepts_missing_and_null() {
        assert!(section_map(None, "paths").expect("missing ok").is_none());
        assert!(
            section_map(Some(&Value::Null), "paths")
                .expect("null ok")
                .is_none()
        );
        let err = section_map(Some(&json!([1, 2])), "paths").unwrap_err();
        assert!(err.to_string().contains("must be a mapping"));
    }

    #[test]
    fn parse_f64_coerces_strings_and_rejects_garbage() {
        assert!((parse_f64(&json!("0.25"), "behavior", "x").unwrap() - 0.25).abs() < f64::EPSILON);
        assert!((parse_f64(&json!(1), "behavior", "x").unwrap() - 1.0).abs() < f64::EPSILON);
        let err = parse_f64(&json!("high"), "behavior", "x").unwrap_err();
        assert!(err.to_string().contains("must be a number"));
        assert!(parse_f64(&json!(true), "behavior", "x").is_err());
        assert!(parse_f64(&json!("nan"), "behavior", "x").is_err());
    }

    #[test]
    fn unit_interval_is_inclusive() {
        assert!(parse_unit_interval(&json!(0.0), "behavior", "x").is_ok());
        assert!(parse_unit_interval(&json!(1.0), "behavior", "x").is_ok());
        let err = parse_unit_interval(&json!(1.1), "behavior", "x").unwrap_err();
        assert!(err.to_string().contains("between 0.0 and 1.0"));
        assert!(parse_unit_interval(&json!(-0.1), "behavior", "x").is_err());
    }

    #[test]
    fn non_negative_int_distinguishes_type_and_range() {
        assert_eq!(parse_non_negative_int(&json!(3), "behavior", "d").unwrap(), 3);
        assert_eq!(parse_non_negative_int(&json!("7"), "behavior", "d").unwrap(), 7);
        assert_eq!(parse_non_negative_int(&json!(2.0), "behavior", "d").unwrap(), 2);

        let range = parse_non_negative_int(&json!(-1), "behavior", "d").unwrap_err();
        assert!(range.to_string().contains(">= 0"));
        let range = parse_non_negative_int(&json!("-4"), "behavior", "d").unwrap_err();
        assert!(range.to_string().contains(">= 0"));

        let kind = parse_non_negative_int(&json!("soon"), "behavior", "d").unwrap_err();
        assert!(kind.to_string().contains("must be an integer"));
        let kind = parse_non_negative_int(&json!(1.5), "behavior", "d").unwrap_err();
        assert!(kind.to_string().contains("must be an integer"));
        assert!(parse_non_negative_int(&json!(false), "behavior", "d").is_err());
    }

    #[test]
    fn parse_bool_requires_real_booleans() {
        assert!(parse_bool(&json!(true), "behavior", "b").unwrap());
        assert!(parse_bool(&json!("true"), "behavior", "b").is_err());
        assert!(parse_bool(&json!(1), "behavior", "b").is_err());
    }

    #[test]
    fn parse_choice_lists_allowed_values() {
        let allowed = ["dry", "active"];
        assert_eq!(
            parse_choice(&json!("dry"), "behavior", "mode_default", &allowed).unwrap(),
            "dry"
        );
        let err = parse_choice(&json!("fast"), "behavior", "mode_default", &allowed).unwrap_err();
        assert!(err.to_string().contains("must be one of: dry, active"));
        assert!(parse_choice(&json!(3), "behavior", "mode_default", &allowed).is_err());
    }

    #[test]
    fn path_list_rejects_non_lists_and_empty_entries() {
        let paths = parse_path_list(&json!(["/a", "b"]), "paths", "watch_folders").unwrap();
        assert_eq!(paths, vec![PathBuf::from("/a"), PathBuf::from("b")]);
        assert!(parse_path_list(&json!("/a"), "paths", "watch_folders").is_err());
        assert!(parse_path_list(&json!([]), "paths", "watch_folders").is_err());
        assert!(parse_path_list(&json!(["  "]), "paths", "watch_folders").is_err());
        assert_eq!(
            parse_path(&json!(" inbox "), "paths", "output_folder").unwrap(),
            PathBuf::from(" inbox ")
        );
        assert!(parse_path_list(&json!([7]), "paths", "watch_folders").is_err());
    }
}
