//! Declarative validation schema.
//!
//! This module contains the constraint model for the profile form:
//! - `Constraint`: tagged variants describing a single rule
//! - `Rule`: one (field, constraint, message) entry
//! - `Schema`: the rule list plus the `validate` entry point
//!
//! Constraints are declarative data rather than imperative checks, so the
//! rule list can be introspected or serialized independently of the form.

mod profile;

pub use profile::Profile;

use crate::state::{FieldId, FormData};
use crate::utils::datetime::parse_date_time;
use chrono::{Local, NaiveDate};
use log::*;
use regex::Regex;
use std::collections::BTreeMap;

/// Partial mapping from field to the first violated constraint's message.
///
pub type ErrorMap = BTreeMap<FieldId, String>;

/// Date shape produced by the date-of-birth input.
///
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Email address grammar.
///
const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

/// Symbols the password rule accepts as its special-character class.
///
const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// A single rule a field's value must satisfy.
///
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Non-empty after trimming.
    Required,
    /// Numeric value must be at least this.
    MinNumber(i64),
    /// Numeric value must be at most this.
    MaxNumber(i64),
    /// Value must match the regex pattern.
    Pattern(&'static str),
    /// Value must parse under standard URL grammar.
    Url,
    /// Combined password complexity: minimum length, at least one ASCII
    /// uppercase letter, one digit, one symbol from the fixed set, and no
    /// characters outside the allowed class.
    Password { min_len: usize },
    /// Value must parse as a calendar date strictly before today.
    PastDate,
    /// Value must parse as a date-time.
    DateTime,
    /// Collection must contain at least this many entries.
    MinItems(usize),
    /// Value must be one of the listed options.
    OneOf(&'static [&'static str]),
    /// File handle must be present with positive size.
    FilePresent,
}

impl Constraint {
    /// Check whether a field's current value satisfies this constraint.
    ///
    fn holds(&self, field: FieldId, data: &FormData) -> bool {
        match self {
            Constraint::Required => data
                .text_value(field)
                .map(|value| !value.trim().is_empty())
                .unwrap_or(false),
            Constraint::MinNumber(min) => data.age >= *min,
            Constraint::MaxNumber(max) => data.age <= *max,
            Constraint::Pattern(pattern) => {
                let value = data.text_value(field).unwrap_or_default();
                match Regex::new(pattern) {
                    Ok(re) => re.is_match(value),
                    Err(e) => {
                        warn!("Failed to compile pattern '{}': {}", pattern, e);
                        false
                    }
                }
            }
            Constraint::Url => {
                let value = data.text_value(field).unwrap_or_default();
                url::Url::parse(value).is_ok()
            }
            Constraint::Password { min_len } => {
                let value = data.text_value(field).unwrap_or_default();
                password_meets_criteria(value, *min_len)
            }
            Constraint::PastDate => {
                let value = data.text_value(field).unwrap_or_default();
                match NaiveDate::parse_from_str(value, DATE_FORMAT) {
                    Ok(date) => date < Local::now().date_naive(),
                    Err(_) => false,
                }
            }
            Constraint::DateTime => {
                let value = data.text_value(field).unwrap_or_default();
                parse_date_time(value).is_some()
            }
            Constraint::MinItems(min) => data.courses.len() >= *min,
            Constraint::OneOf(options) => {
                let value = data.text_value(field).unwrap_or_default();
                options.contains(&value)
            }
            Constraint::FilePresent => data.file.as_ref().map(|f| f.size > 0).unwrap_or(false),
        }
    }
}

/// Check the combined password criteria. The `regex` crate has no
/// lookahead, so the conjunction is spelled out over character classes.
///
fn password_meets_criteria(value: &str, min_len: usize) -> bool {
    value.chars().count() >= min_len
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c))
}

/// One (field, constraint, message) entry in the schema.
///
#[derive(Debug, Clone)]
pub struct Rule {
    pub field: FieldId,
    pub constraint: Constraint,
    pub message: &'static str,
}

impl Rule {
    fn new(field: FieldId, constraint: Constraint, message: &'static str) -> Self {
        Rule {
            field,
            constraint,
            message,
        }
    }
}

/// The declarative schema for the profile form.
///
#[derive(Debug, Clone)]
pub struct Schema {
    rules: Vec<Rule>,
}

impl Default for Schema {
    fn default() -> Schema {
        Schema {
            rules: vec![
                Rule::new(FieldId::Name, Constraint::Required, "Text is required"),
                Rule::new(FieldId::Age, Constraint::MinNumber(1), "Number is required"),
                Rule::new(
                    FieldId::Age,
                    Constraint::MaxNumber(100),
                    "Must be less than 100",
                ),
                Rule::new(
                    FieldId::Email,
                    Constraint::Pattern(EMAIL_PATTERN),
                    "Invalid email address",
                ),
                Rule::new(
                    FieldId::Password,
                    Constraint::Password { min_len: 10 },
                    "Password didnt meet the criteria",
                ),
                Rule::new(FieldId::DateOfBirth, Constraint::PastDate, "Invalid date"),
                Rule::new(
                    FieldId::Courses,
                    Constraint::MinItems(1),
                    "Must select atleast one course",
                ),
                Rule::new(
                    FieldId::Gender,
                    Constraint::OneOf(&["Male", "Female"]),
                    "Invalid gender",
                ),
                Rule::new(FieldId::File, Constraint::FilePresent, "File is required"),
                Rule::new(FieldId::Url, Constraint::Url, "Invalid URL"),
                Rule::new(
                    FieldId::DateTime,
                    Constraint::DateTime,
                    "Invalid date time",
                ),
            ],
        }
    }
}

impl Schema {
    /// Return the rule list for introspection.
    ///
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Validate form data against the schema.
    ///
    /// All fields are checked independently so every error surfaces in one
    /// pass; only the first violated constraint per field is reported. On
    /// success the data is returned re-typed as a validated `Profile`.
    ///
    pub fn validate(&self, data: &FormData) -> Result<Profile, ErrorMap> {
        let mut errors = ErrorMap::new();
        for rule in &self.rules {
            if errors.contains_key(&rule.field) {
                continue;
            }
            if !rule.constraint.holds(rule.field, data) {
                errors.insert(rule.field, rule.message.to_string());
            }
        }
        match Profile::from_form(data) {
            Some(profile) if errors.is_empty() => Ok(profile),
            // A convertible profile implies the parse rules above passed,
            // so reaching here means errors is non-empty.
            _ => Err(errors),
        }
    }
}
