//! Sleep sessions.

use super::date_value;
use crate::model::record::Record;
use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};

pub const NAMESPACE: &str = "galyarder.sleep";

pub const QUALITY_OPTIONS: &[&str] = &["Poor", "Fair", "Good", "Excellent"];

pub const SCHEMA: FieldSchema = &[
    FieldDescriptor::new("date", "Date", FieldKind::Date)
        .required()
        .column(),
    FieldDescriptor::new("bedtime", "Bedtime", FieldKind::Text).column(),
    FieldDescriptor::new("wake_time", "Wake Time", FieldKind::Text).column(),
    FieldDescriptor::new("duration_hours", "Duration (hours)", FieldKind::Number)
        .required()
        .column(),
    FieldDescriptor::new("quality", "Quality", FieldKind::Select)
        .options(QUALITY_OPTIONS)
        .column(),
    FieldDescriptor::new("notes", "Notes", FieldKind::Textarea),
];

pub fn seed() -> Vec<Record> {
    vec![
        Record::with_id("1", Default::default())
            .field("date", date_value(2024, 3, 1))
            .field("bedtime", "22:30")
            .field("wake_time", "06:00")
            .field("duration_hours", 7.5)
            .field("quality", "Good"),
        Record::with_id("2", Default::default())
            .field("date", date_value(2024, 3, 2))
            .field("bedtime", "23:45")
            .field("wake_time", "06:15")
            .field("duration_hours", 6.5)
            .field("quality", "Fair")
            .field("notes", "Late coffee"),
        Record::with_id("3", Default::default())
            .field("date", date_value(2024, 3, 3))
            .field("bedtime", "22:00")
            .field("wake_time", "06:30")
            .field("duration_hours", 8.5)
            .field("quality", "Excellent"),
    ]
}

/// Mean of `duration_hours` over sessions that record one.
pub fn average_duration_hours(records: &[Record]) -> Option<f64> {
    let durations = records
        .iter()
        .filter_map(|record| record.value("duration_hours").as_number())
        .collect::<Vec<_>>();
    if durations.is_empty() {
        return None;
    }
    Some(durations.iter().sum::<f64>() / durations.len() as f64)
}
