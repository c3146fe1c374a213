//! Gratitude journal entries.

use super::date_value;
use crate::model::record::Record;
use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};
use crate::model::value::FieldValue;

pub const NAMESPACE: &str = "galyarder.gratitude";

pub const SCHEMA: FieldSchema = &[
    FieldDescriptor::new("date", "Date", FieldKind::Date)
        .required()
        .column(),
    FieldDescriptor::new("entry", "Entry", FieldKind::Textarea)
        .required()
        .column(),
    FieldDescriptor::new("tags", "Tags", FieldKind::Tags).column(),
];

pub fn seed() -> Vec<Record> {
    vec![
        Record::with_id("1", Default::default())
            .field("date", date_value(2024, 3, 1))
            .field("entry", "Morning walk with the kids")
            .field("tags", FieldValue::tags(["family", "health"])),
        Record::with_id("2", Default::default())
            .field("date", date_value(2024, 3, 2))
            .field("entry", "Finished the quarterly report early")
            .field("tags", FieldValue::tags(["work"])),
    ]
}

/// Entries carrying `tag`, compared case-insensitively.
pub fn entries_with_tag<'a>(records: &'a [Record], tag: &str) -> Vec<&'a Record> {
    let wanted = tag.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .value("tags")
                .as_tags()
                .is_some_and(|tags| tags.iter().any(|value| value.to_lowercase() == wanted))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{entries_with_tag, seed};

    #[test]
    fn tag_lookup_is_case_insensitive() {
        let records = seed();
        let matched = entries_with_tag(&records, "WORK");
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].id, "2");
        assert!(entries_with_tag(&records, "travel").is_empty());
    }
}
