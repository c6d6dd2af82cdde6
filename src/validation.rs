//! Declarative request-body validation.
//!
//! Each route declares a table of [`Rule`]s; [`validate`] walks the table over
//! the raw JSON body and collects every violation before any data access.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// A single violated rule, as reported to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Predicate applied to one body field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field is present, not null, and not an empty string or array
    NotEmpty,
    /// When present, field parses as a date
    Date,
    /// When both fields are present and parse as dates, this field is strictly earlier
    Before(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
}

pub const fn rule(field: &'static str, check: Check, message: &'static str) -> Rule {
    Rule { field, check, message }
}

/// Evaluate `rules` in order against `body`, failing with every violation found.
pub fn validate(body: &Value, rules: &[Rule]) -> Result<(), ApiError> {
    let errors: Vec<FieldError> = rules
        .iter()
        .filter(|rule| !passes(body, rule))
        .map(|rule| FieldError {
            param: rule.field.to_string(),
            msg: rule.message.to_string(),
            value: body.get(rule.field).filter(|v| !v.is_null()).cloned(),
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!("Rejected request body with {} violation(s)", errors.len());
        Err(ApiError::validation_error(errors))
    }
}

fn passes(body: &Value, rule: &Rule) -> bool {
    let value = body.get(rule.field);
    match rule.check {
        Check::NotEmpty => !is_empty(value),
        Check::Date => is_empty(value) || value.and_then(date_value).is_some(),
        Check::Before(other) => {
            let this = value.and_then(date_value);
            let that = body.get(other).and_then(date_value);
            match (this, that) {
                (Some(this), Some(that)) => this < that,
                _ => true,
            }
        }
    }
}

fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

fn date_value(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(parse_date)
}

/// Parse an RFC 3339 timestamp or a `YYYY-MM-DD` calendar date (midnight UTC).
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Some(Utc.from_utc_datetime(&naive));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const RULES: &[Rule] = &[
        rule("title", Check::NotEmpty, "Title is required"),
        rule("from", Check::NotEmpty, "From date is required"),
        rule("from", Check::Date, "From date is invalid"),
        rule("from", Check::Before("to"), "From date must be before to date"),
    ];

    fn params(body: Value) -> Vec<String> {
        match validate(&body, RULES) {
            Ok(()) => vec![],
            Err(ApiError::ValidationError(errors)) => errors.into_iter().map(|e| e.msg).collect(),
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_body() {
        assert!(params(json!({ "title": "Dev", "from": "2020-01-01", "to": "2021-01-01" })).is_empty());
        assert!(params(json!({ "title": "Dev", "from": "2020-01-01" })).is_empty());
    }

    #[test]
    fn missing_and_empty_fields_are_reported_in_rule_order() {
        assert_eq!(
            params(json!({ "title": "" })),
            vec!["Title is required", "From date is required"]
        );
        assert_eq!(params(json!({ "title": null, "from": "2020-01-01" })), vec!["Title is required"]);
    }

    #[test]
    fn from_must_precede_to() {
        assert_eq!(
            params(json!({ "title": "Dev", "from": "2021-01-01", "to": "2020-01-01" })),
            vec!["From date must be before to date"]
        );
        assert_eq!(
            params(json!({ "title": "Dev", "from": "2021-01-01", "to": "2021-01-01" })),
            vec!["From date must be before to date"]
        );
    }

    #[test]
    fn unparseable_date_is_rejected() {
        assert_eq!(params(json!({ "title": "Dev", "from": "last spring" })), vec!["From date is invalid"]);
    }

    #[test]
    fn violation_carries_offending_value() {
        let err = validate(&json!({ "title": "Dev", "from": "nope" }), RULES).unwrap_err();
        match err {
            ApiError::ValidationError(errors) => assert_eq!(errors[0].value, Some(json!("nope"))),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parses_supported_date_forms() {
        let day = parse_date("2019-06-01").unwrap();
        assert_eq!(day.to_rfc3339(), "2019-06-01T00:00:00+00:00");
        assert!(parse_date("2019-06-01T10:30:00Z").is_some());
        assert!(parse_date("2019-06-01T10:30:00").is_some());
        assert!(parse_date("06/01/2019").is_none());
        assert!(parse_date("  ").is_none());
    }
}
