//! Typed entity forms
//!
//! One form struct per entity, serialized as the request body of create and
//! update calls. Validation runs client-side before anything is sent;
//! failures are collected per field.
//!
//! - [`Form`]: what every entity form can do
//! - [`FormState`]: a form plus its [`Mode`] and last validation result
//! - [`rules`]: reusable field checks

mod entities;
pub mod rules;

pub use entities::{
    AchievementForm, EducationForm, ExperienceForm, NavlinkForm, ResumeForm, SkillForm,
    SocialLinkForm, TemplateForm, TestimonialForm,
};

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::model::Entity;

/// UI mode controlling editability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Add,
    Edit,
    View,
}

impl Mode {
    pub fn is_read_only(&self) -> bool {
        matches!(self, Mode::View)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Add => write!(f, "ADD"),
            Mode::Edit => write!(f, "EDIT"),
            Mode::View => write!(f, "VIEW"),
        }
    }
}

/// Per-field validation failures
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.fields
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of fields with at least one failure
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Messages for one field
    pub fn field(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Iterate `(field, messages)` in field order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// `Ok(())` when nothing failed
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .fields
            .iter()
            .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors while filling in a form
#[derive(Error, Debug, PartialEq)]
pub enum FormError {
    #[error("Form is read-only in VIEW mode")]
    ReadOnly,

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Expected key=value, got: {0}")]
    MalformedPair(String),

    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
}

/// An entity form
pub trait Form: Default + Clone + fmt::Debug + Serialize + Send + Sync + 'static {
    type Record: Entity;

    /// Keys accepted by [`Form::set_field`]
    const FIELDS: &'static [&'static str];

    /// Set one field from its textual value
    fn set_field(&mut self, key: &str, value: &str) -> Result<(), FormError>;

    /// Prefill from an existing record (edit mode)
    fn from_record(record: &Self::Record) -> Self;

    /// Client-side validation
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// A form together with its mode and last validation result
#[derive(Debug, Clone)]
pub struct FormState<F: Form> {
    mode: Mode,
    form: F,
    record_id: Option<String>,
    errors: ValidationErrors,
}

impl<F: Form> FormState<F> {
    /// Empty form for a new record
    pub fn add() -> Self {
        Self {
            mode: Mode::Add,
            form: F::default(),
            record_id: None,
            errors: ValidationErrors::new(),
        }
    }

    /// Prefilled form for an existing record
    pub fn edit(record: &F::Record) -> Self {
        Self {
            mode: Mode::Edit,
            form: F::from_record(record),
            record_id: Some(record.id().to_string()),
            errors: ValidationErrors::new(),
        }
    }

    /// Read-only view of an existing record
    pub fn view(record: &F::Record) -> Self {
        Self {
            mode: Mode::View,
            ..Self::edit(record)
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    /// Errors from the last [`FormState::validate`] call
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Set one field; refused in view mode
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), FormError> {
        if self.mode.is_read_only() {
            return Err(FormError::ReadOnly);
        }
        self.form.set_field(key, value)
    }

    /// Apply `key=value` pairs in order
    pub fn apply_pairs<I, S>(&mut self, pairs: I) -> Result<(), FormError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for pair in pairs {
            let (key, value) = parse_pair(pair.as_ref())?;
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Validate and remember the errors. Returns whether the form is valid.
    pub fn validate(&mut self) -> bool {
        self.errors = match self.form.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        self.errors.is_empty()
    }

    pub fn into_form(self) -> F {
        self.form
    }
}

/// Split `key=value` (value may contain `=`)
pub fn parse_pair(pair: &str) -> Result<(&str, &str), FormError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value)),
        _ => Err(FormError::MalformedPair(pair.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Achievement, RecordMeta};

    fn sample_achievement() -> Achievement {
        Achievement {
            meta: RecordMeta::new("a1"),
            title: "Speaker at RustConf".to_string(),
            description: None,
            issuer: Some("RustConf".to_string()),
            achieved_on: None,
            url: None,
            image_url: None,
        }
    }

    #[test]
    fn test_validation_errors_collect_per_field() {
        let mut errors = ValidationErrors::new();
        errors.add("title", "Title is required");
        errors.add("title", "Title must be at least 3 characters");
        errors.add("url", "URL must be a valid URL");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.field("title").len(), 2);
        assert!(errors.field("issuer").is_empty());
        assert_eq!(
            errors.to_string(),
            "title: Title is required, Title must be at least 3 characters; url: URL must be a valid URL"
        );
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("title=Hello").unwrap(), ("title", "Hello"));
        assert_eq!(parse_pair("url=https://x.io/?a=b").unwrap(), ("url", "https://x.io/?a=b"));
        assert_eq!(parse_pair("description=").unwrap(), ("description", ""));
        assert!(parse_pair("novalue").is_err());
        assert!(parse_pair("=value").is_err());
    }

    #[test]
    fn test_view_mode_is_read_only() {
        let mut state = FormState::<AchievementForm>::view(&sample_achievement());

        assert_eq!(state.mode(), Mode::View);
        assert_eq!(state.set("title", "Changed"), Err(FormError::ReadOnly));
        assert_eq!(state.form().title, "Speaker at RustConf");
    }

    #[test]
    fn test_edit_mode_prefills_and_updates() {
        let mut state = FormState::<AchievementForm>::edit(&sample_achievement());

        assert_eq!(state.record_id(), Some("a1"));
        state
            .apply_pairs(["title=Keynote at RustConf", "url=https://rustconf.com"])
            .unwrap();

        assert!(state.validate());
        assert_eq!(state.form().title, "Keynote at RustConf");
        assert_eq!(state.form().issuer.as_deref(), Some("RustConf"));
    }

    #[test]
    fn test_add_mode_validation_remembers_errors() {
        let mut state = FormState::<AchievementForm>::add();

        assert!(!state.validate());
        assert!(state.errors().has("title"));

        state.set("title", "Open source award").unwrap();
        assert!(state.validate());
        assert!(state.errors().is_empty());
    }
}
