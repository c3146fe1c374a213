//! Spiritual practice log.

use super::date_value;
use crate::model::record::Record;
use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};
use crate::model::value::FieldValue;

pub const NAMESPACE: &str = "galyarder.spiritual";

pub const PRACTICES: &[&str] = &[
    "Prayer",
    "Meditation",
    "Reading",
    "Reflection",
    "Service",
    "Worship",
];

pub const SCHEMA: FieldSchema = &[
    FieldDescriptor::new("title", "Title", FieldKind::Text)
        .required()
        .column(),
    FieldDescriptor::new("practice", "Practice", FieldKind::Select)
        .required()
        .options(PRACTICES)
        .column(),
    FieldDescriptor::new("date", "Date", FieldKind::Date).column(),
    FieldDescriptor::new("duration_minutes", "Duration (minutes)", FieldKind::Number).column(),
    FieldDescriptor::new("reflection", "Reflection", FieldKind::Textarea),
    FieldDescriptor::new("tags", "Tags", FieldKind::Tags),
];

pub fn seed() -> Vec<Record> {
    vec![
        Record::with_id("1", Default::default())
            .field("title", "Dawn prayer")
            .field("practice", "Prayer")
            .field("date", date_value(2024, 3, 1))
            .field("duration_minutes", 15.0),
        Record::with_id("2", Default::default())
            .field("title", "Breathing meditation")
            .field("practice", "Meditation")
            .field("date", date_value(2024, 3, 2))
            .field("duration_minutes", 20.0)
            .field("tags", FieldValue::tags(["calm"])),
    ]
}

/// Sum of recorded practice minutes.
pub fn total_minutes(records: &[Record]) -> f64 {
    records
        .iter()
        .filter_map(|record| record.value("duration_minutes").as_number())
        .sum()
}
