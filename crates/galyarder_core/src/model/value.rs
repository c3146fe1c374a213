//! Tagged field values.
//!
//! # Responsibility
//! - Represent one field value of a record with an explicit kind tag.
//! - Define emptiness, display form and cross-value ordering.
//!
//! # Invariants
//! - `Empty`, blank `Text` and `NaN` numbers are empty; `Bool(false)` and
//!   `Number(0.0)` are not.
//! - `compare` is a total order, so it can back stable sorting.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One field value of a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    /// Free text, also used for select values.
    Text(String),
    /// Numeric value; `NaN` models a failed numeric coercion.
    Number(f64),
    /// Calendar date without time zone.
    Date(NaiveDate),
    /// Checkbox state.
    Bool(bool),
    /// Ordered tag list.
    Tags(Vec<String>),
    /// Explicitly unset value.
    Empty,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn tags<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::Tags(values.into_iter().map(Into::into).collect())
    }

    /// Returns whether this value fails a `required` check.
    ///
    /// An empty tag list counts as empty so required tag fields need at
    /// least one tag.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(value) => value.is_empty(),
            Self::Number(value) => value.is_nan(),
            Self::Date(_) | Self::Bool(_) => false,
            Self::Tags(values) => values.is_empty(),
            Self::Empty => true,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) if !value.is_nan() => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_tags(&self) -> Option<&[String]> {
        match self {
            Self::Tags(values) => Some(values.as_slice()),
            _ => None,
        }
    }

    /// Returns the searchable string forms of this value.
    ///
    /// Tag lists yield one entry per tag; `Empty` yields nothing.
    pub fn search_terms(&self) -> Vec<String> {
        match self {
            Self::Text(value) => vec![value.clone()],
            Self::Number(value) => vec![format_number(*value)],
            Self::Date(value) => vec![value.format("%Y-%m-%d").to_string()],
            Self::Bool(value) => vec![value.to_string()],
            Self::Tags(values) => values.clone(),
            Self::Empty => Vec::new(),
        }
    }

    /// Total order used by list sorting.
    ///
    /// Same-kind values compare naturally. Different kinds compare by a
    /// fixed rank with empty values last.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Greater,
            (false, true) => return Ordering::Less,
            (false, false) => {}
        }
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => a.cmp(b),
            (Self::Number(a), Self::Number(b)) => a.total_cmp(b),
            (Self::Date(a), Self::Date(b)) => a.cmp(b),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Tags(a), Self::Tags(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Self::Bool(_) => 0,
            Self::Number(_) => 1,
            Self::Date(_) => 2,
            Self::Text(_) => 3,
            Self::Tags(_) => 4,
            Self::Empty => u8::MAX,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::FieldValue;
    use chrono::NaiveDate;
    use std::cmp::Ordering;

    #[test]
    fn emptiness_follows_form_rules() {
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("").is_empty());
        assert!(FieldValue::Number(f64::NAN).is_empty());
        assert!(FieldValue::Tags(Vec::new()).is_empty());
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(!FieldValue::text(" ").is_empty());
    }

    #[test]
    fn integral_numbers_render_without_fraction() {
        assert_eq!(FieldValue::Number(7.0).search_terms(), vec!["7"]);
        assert_eq!(FieldValue::Number(7.5).search_terms(), vec!["7.5"]);
    }

    #[test]
    fn dates_render_as_iso_days() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(FieldValue::Date(date).search_terms(), vec!["2024-03-10"]);
    }

    #[test]
    fn empty_values_sort_after_everything() {
        assert_eq!(
            FieldValue::Empty.compare(&FieldValue::text("a")),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::text("").compare(&FieldValue::Number(1.0)),
            Ordering::Greater
        );
        assert_eq!(
            FieldValue::Number(2.0).compare(&FieldValue::Number(10.0)),
            Ordering::Less
        );
    }
}
