//! Field rules and value parsers shared by the entity forms

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

use super::{FormError, ValidationErrors};

const URL_PATTERN: &str = r"^https?://[^\s/$.?#][^\s]*$";
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
const SLUG_PATTERN: &str = r"^[a-z0-9]+(?:-[a-z0-9]+)*$";

fn url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(URL_PATTERN).expect("URL pattern compiles"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"))
}

fn slug_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(SLUG_PATTERN).expect("slug pattern compiles"))
}

pub fn is_url(value: &str) -> bool {
    url_regex().is_match(value.trim())
}

pub fn is_email(value: &str) -> bool {
    email_regex().is_match(value.trim())
}

pub fn is_slug(value: &str) -> bool {
    slug_regex().is_match(value)
}

// ============================================
// Rules
// ============================================

/// Value must be present (whitespace does not count)
pub fn required(errors: &mut ValidationErrors, field: &str, label: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, format!("{} is required", label));
        false
    } else {
        true
    }
}

/// Minimum length in characters; empty values are left to [`required`]
pub fn min_len(errors: &mut ValidationErrors, field: &str, label: &str, value: &str, min: usize) {
    let len = value.trim().chars().count();
    if len > 0 && len < min {
        errors.add(
            field,
            format!("{} must be at least {} characters", label, min),
        );
    }
}

pub fn max_len(errors: &mut ValidationErrors, field: &str, label: &str, value: &str, max: usize) {
    if value.chars().count() > max {
        errors.add(
            field,
            format!("{} must be at most {} characters", label, max),
        );
    }
}

/// Optional URL: checked only when present
pub fn optional_url(errors: &mut ValidationErrors, field: &str, label: &str, value: Option<&str>) {
    if let Some(value) = value {
        if !is_url(value) {
            errors.add(field, format!("{} must be a valid URL", label));
        }
    }
}

/// Required URL
pub fn url(errors: &mut ValidationErrors, field: &str, label: &str, value: &str) {
    if required(errors, field, label, value) && !is_url(value) {
        errors.add(field, format!("{} must be a valid URL", label));
    }
}

/// Required email
pub fn email(errors: &mut ValidationErrors, field: &str, value: &str) {
    if required(errors, field, "Email", value) && !is_email(value) {
        errors.add(field, "Email must be a valid email address");
    }
}

/// Optional number within an inclusive range
pub fn range<T>(
    errors: &mut ValidationErrors,
    field: &str,
    label: &str,
    value: Option<T>,
    min: T,
    max: T,
) where
    T: PartialOrd + std::fmt::Display + Copy,
{
    if let Some(value) = value {
        if value < min || value > max {
            errors.add(
                field,
                format!("{} must be between {} and {}", label, min, max),
            );
        }
    }
}

/// End date, when both are present, must not precede the start date
pub fn date_order(
    errors: &mut ValidationErrors,
    field: &str,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            errors.add(field, "End date must be after start date");
        }
    }
}

// ============================================
// Value parsers
// ============================================

/// Trimmed text; empty becomes `None`
pub fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `YYYY-MM-DD`; empty becomes `None`
pub fn parse_date(field: &str, value: &str) -> Result<Option<NaiveDate>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| FormError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a date as YYYY-MM-DD, got '{}'", trimmed),
        })
}

pub fn parse_bool(field: &str, value: &str) -> Result<bool, FormError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" | "on" => Ok(true),
        "false" | "no" | "n" | "0" | "off" | "" => Ok(false),
        other => Err(FormError::InvalidValue {
            field: field.to_string(),
            message: format!("expected true or false, got '{}'", other),
        }),
    }
}

/// Parse a number; empty becomes `None`
pub fn parse_number<T: std::str::FromStr>(field: &str, value: &str) -> Result<Option<T>, FormError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|_| FormError::InvalidValue {
            field: field.to_string(),
            message: format!("expected a number, got '{}'", trimmed),
        })
}

/// Ordering index; empty resets to 0
pub fn parse_order(field: &str, value: &str) -> Result<i32, FormError> {
    Ok(parse_number::<i32>(field, value)?.unwrap_or(0))
}
