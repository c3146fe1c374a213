//! Built-in life-management domains.
//!
//! # Responsibility
//! - Bind each domain to its namespace, field schema and seed records.
//! - Host domain-specific derived queries.
//!
//! # Invariants
//! - Namespaces are unique across domains.
//! - Seed records satisfy their schema's required fields.

pub mod family;
pub mod gratitude;
pub mod responsibility;
pub mod sleep;
pub mod spiritual;

use crate::model::record::Record;
use crate::model::schema::FieldSchema;
use crate::model::value::FieldValue;
use crate::persist::Namespace;
use chrono::NaiveDate;

/// Built-in record domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Domain {
    Family,
    Sleep,
    Gratitude,
    Responsibility,
    Spiritual,
}

impl Domain {
    pub const ALL: [Domain; 5] = [
        Domain::Family,
        Domain::Sleep,
        Domain::Gratitude,
        Domain::Responsibility,
        Domain::Spiritual,
    ];

    /// Stable short id, also used as the dashboard module id.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Family => "family",
            Self::Sleep => "sleep",
            Self::Gratitude => "gratitude",
            Self::Responsibility => "responsibilities",
            Self::Spiritual => "spirituality",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|domain| domain.as_str() == normalized)
    }

    pub fn namespace(self) -> Namespace {
        Namespace::from_static(match self {
            Self::Family => family::NAMESPACE,
            Self::Sleep => sleep::NAMESPACE,
            Self::Gratitude => gratitude::NAMESPACE,
            Self::Responsibility => responsibility::NAMESPACE,
            Self::Spiritual => spiritual::NAMESPACE,
        })
    }

    pub fn schema(self) -> FieldSchema {
        match self {
            Self::Family => family::SCHEMA,
            Self::Sleep => sleep::SCHEMA,
            Self::Gratitude => gratitude::SCHEMA,
            Self::Responsibility => responsibility::SCHEMA,
            Self::Spiritual => spiritual::SCHEMA,
        }
    }

    /// Mock records a fresh install starts with.
    pub fn seed(self) -> Vec<Record> {
        match self {
            Self::Family => family::seed(),
            Self::Sleep => sleep::seed(),
            Self::Gratitude => gratitude::seed(),
            Self::Responsibility => responsibility::seed(),
            Self::Spiritual => spiritual::seed(),
        }
    }
}

pub(crate) fn date_value(year: i32, month: u32, day: u32) -> FieldValue {
    NaiveDate::from_ymd_opt(year, month, day).map_or(FieldValue::Empty, FieldValue::Date)
}

/// Reads a date field, accepting ISO text left by older payloads.
pub(crate) fn read_date(value: &FieldValue) -> Option<NaiveDate> {
    match value {
        FieldValue::Date(date) => Some(*date),
        FieldValue::Text(text) => NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").ok(),
        _ => None,
    }
}
