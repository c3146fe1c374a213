//! Household and personal responsibilities.

use super::date_value;
use crate::model::record::Record;
use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};
use crate::view::list_view::{shape_list, ListQuery, SortDirection};

pub const NAMESPACE: &str = "galyarder.responsibilities";

pub const CATEGORIES: &[&str] = &["Home", "Work", "Family", "Finance", "Health", "Personal"];
pub const PRIORITIES: &[&str] = &["Low", "Medium", "High"];

pub const SCHEMA: FieldSchema = &[
    FieldDescriptor::new("title", "Title", FieldKind::Text)
        .required()
        .column(),
    FieldDescriptor::new("category", "Category", FieldKind::Select)
        .options(CATEGORIES)
        .column(),
    FieldDescriptor::new("due_date", "Due Date", FieldKind::Date).column(),
    FieldDescriptor::new("priority", "Priority", FieldKind::Select)
        .options(PRIORITIES)
        .column(),
    FieldDescriptor::new("completed", "Completed", FieldKind::Checkbox).column(),
    FieldDescriptor::new("notes", "Notes", FieldKind::Textarea),
];

pub fn seed() -> Vec<Record> {
    vec![
        Record::with_id("1", Default::default())
            .field("title", "Pay electricity bill")
            .field("category", "Finance")
            .field("due_date", date_value(2024, 3, 20))
            .field("priority", "High")
            .field("completed", false),
        Record::with_id("2", Default::default())
            .field("title", "School parent meeting")
            .field("category", "Family")
            .field("due_date", date_value(2024, 3, 12))
            .field("priority", "Medium")
            .field("completed", false),
        Record::with_id("3", Default::default())
            .field("title", "Renew car insurance")
            .field("category", "Finance")
            .field("due_date", date_value(2024, 2, 28))
            .field("priority", "High")
            .field("completed", true),
    ]
}

/// Open responsibilities ordered by due date; undated ones come last.
pub fn pending(records: &[Record]) -> Vec<Record> {
    let open = records
        .iter()
        .filter(|record| record.value("completed").as_bool() != Some(true))
        .cloned()
        .collect::<Vec<_>>();
    shape_list(
        &open,
        &[],
        &ListQuery::default().sorted_by("due_date", SortDirection::Asc),
    )
}

#[cfg(test)]
mod tests {
    use super::{pending, seed};
    use crate::model::record::Record;

    #[test]
    fn pending_skips_completed_and_orders_by_due_date() {
        let mut records = seed();
        records.push(Record::with_id("4", Default::default()).field("title", "Someday"));

        let ids = pending(&records)
            .into_iter()
            .map(|record| record.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["2", "1", "4"]);
    }
}
