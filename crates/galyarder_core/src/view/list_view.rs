//! Free-text filter plus single-field stable sort.
//!
//! # Responsibility
//! - Keep records with any searched field containing the query,
//!   case-insensitively.
//! - Order the kept records by one field and direction.
//!
//! # Invariants
//! - Only an empty query keeps every record; whitespace is matched literally.
//! - Without a sort field, input order is preserved.
//! - Sorting is stable; ties keep input order in both directions.

use crate::model::record::Record;
use crate::model::schema::FieldSchema;
use crate::model::value::FieldValue;
use std::cmp::Ordering;

/// Sort direction of a list view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// Query options for shaping one list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Free-text query; matched as a case-insensitive substring.
    pub text: String,
    /// Field to order by; `None` keeps collection order.
    pub sort_field: Option<String>,
    pub direction: SortDirection,
}

impl ListQuery {
    pub fn search(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_field = Some(field.into());
        self.direction = direction;
        self
    }
}

/// Returns the filtered and ordered view of `records`.
///
/// `fields` restricts which fields are searched; an empty slice searches
/// every field present on a record.
pub fn shape_list(records: &[Record], fields: &[&str], query: &ListQuery) -> Vec<Record> {
    let needle = query.text.to_lowercase();
    let mut shaped = records
        .iter()
        .filter(|record| needle.is_empty() || record_matches(record, fields, &needle))
        .cloned()
        .collect::<Vec<_>>();

    if let Some(sort_field) = query.sort_field.as_deref() {
        shaped.sort_by(|a, b| compare_records(a, b, sort_field, query.direction));
    }

    shaped
}

/// Shapes a list searching only the fields a schema declares.
pub fn shape_with_schema(records: &[Record], schema: FieldSchema, query: &ListQuery) -> Vec<Record> {
    let fields = schema.iter().map(|field| field.name).collect::<Vec<_>>();
    shape_list(records, &fields, query)
}

/// Returns whether any searched field of `record` contains `needle`.
///
/// `needle` must already be lowercase.
pub fn record_matches(record: &Record, fields: &[&str], needle: &str) -> bool {
    let contains = |value: &FieldValue| {
        value
            .search_terms()
            .iter()
            .any(|term| term.to_lowercase().contains(needle))
    };

    if fields.is_empty() {
        return record.fields.values().any(contains);
    }
    fields
        .iter()
        .filter_map(|name| record.get(name))
        .any(contains)
}

/// Compares two records on one field in the given direction.
pub fn compare_records(a: &Record, b: &Record, field: &str, direction: SortDirection) -> Ordering {
    let ordering = a.value(field).compare(b.value(field));
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::{record_matches, shape_list, ListQuery, SortDirection};
    use crate::model::record::{field_map, Record};
    use crate::model::value::FieldValue;

    fn people() -> Vec<Record> {
        vec![
            Record::with_id("1", field_map([("name", "Mike")])),
            Record::with_id("2", field_map([("name", "Ann")])),
        ]
    }

    fn ids(records: &[Record]) -> Vec<&str> {
        records.iter().map(|record| record.id.as_str()).collect()
    }

    #[test]
    fn search_is_case_insensitive_on_named_field() {
        let shaped = shape_list(&people(), &["name"], &ListQuery::search("ann"));
        assert_eq!(ids(&shaped), vec!["2"]);
    }

    #[test]
    fn sorts_both_directions() {
        let asc = shape_list(
            &people(),
            &[],
            &ListQuery::default().sorted_by("name", SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec!["2", "1"]);

        let desc = shape_list(
            &people(),
            &[],
            &ListQuery::default().sorted_by("name", SortDirection::Desc),
        );
        assert_eq!(ids(&desc), vec!["1", "2"]);
    }

    #[test]
    fn tag_elements_are_searched_individually() {
        let records = vec![
            Record::with_id("1", field_map([("tags", FieldValue::tags(["Health", "Family"]))])),
            Record::with_id("2", field_map([("tags", FieldValue::tags(["Work"]))])),
        ];
        let shaped = shape_list(&records, &[], &ListQuery::search("FAM"));
        assert_eq!(ids(&shaped), vec!["1"]);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let records = vec![
            Record::with_id("a", field_map([("score", 1.0)])),
            Record::with_id("b", field_map([("score", 2.0)])),
            Record::with_id("c", field_map([("score", 1.0)])),
        ];
        let asc = shape_list(
            &records,
            &[],
            &ListQuery::default().sorted_by("score", SortDirection::Asc),
        );
        assert_eq!(ids(&asc), vec!["a", "c", "b"]);

        let desc = shape_list(
            &records,
            &[],
            &ListQuery::default().sorted_by("score", SortDirection::Desc),
        );
        assert_eq!(ids(&desc), vec!["b", "a", "c"]);
    }

    #[test]
    fn whitespace_in_query_is_matched_literally() {
        let records = vec![
            Record::with_id("1", field_map([("name", "Mike")])),
            Record::with_id("2", field_map([("name", "Ann Lee")])),
        ];

        let blank = shape_list(&records, &[], &ListQuery::search(" "));
        assert_eq!(ids(&blank), vec!["2"]);

        let trailing = shape_list(&records, &[], &ListQuery::search("ann l "));
        assert!(trailing.is_empty());

        let inner = shape_list(&records, &[], &ListQuery::search("ann l"));
        assert_eq!(ids(&inner), vec!["2"]);
    }

    #[test]
    fn empty_query_without_sort_returns_collection_in_order() {
        let records = vec![
            Record::with_id("c", field_map([("name", "Zed")])),
            Record::with_id("a", field_map([("name", "Amy")])),
            Record::with_id("b", field_map([("name", "Bob")])),
        ];

        let shaped = shape_list(&records, &[], &ListQuery::default());
        assert_eq!(shaped, records);
    }

    #[test]
    fn filtering_without_sort_keeps_input_order() {
        let records = vec![
            Record::with_id("1", field_map([("name", "Zara")])),
            Record::with_id("2", field_map([("name", "Bob")])),
            Record::with_id("3", field_map([("name", "Lizzy")])),
            Record::with_id("4", field_map([("name", "Adz")])),
        ];

        let shaped = shape_list(&records, &["name"], &ListQuery::search("z"));
        assert_eq!(ids(&shaped), vec!["1", "3", "4"]);
    }

    #[test]
    fn excluded_records_have_no_matching_field() {
        let records = vec![
            Record::with_id("1", field_map([("name", "Sarah"), ("notes", "Gym")])),
            Record::with_id("2", field_map([("name", "Mike"), ("notes", "Soccer")])),
            Record::with_id("3", field_map([("name", "Ann"), ("notes", "Garden")])),
        ];
        let needle = "ar";

        let shaped = shape_list(&records, &[], &ListQuery::search(needle));
        assert_eq!(ids(&shaped), vec!["1", "3"]);

        for record in records.iter().filter(|record| !shaped.contains(record)) {
            assert!(!record_matches(record, &[], needle), "{} matched", record.id);
        }
    }

    #[test]
    fn sorting_twice_gives_the_same_order() {
        let records = vec![
            Record::with_id("a", field_map([("score", 3.0)])),
            Record::with_id("b", field_map([("score", 1.0)])),
            Record::with_id("c", field_map([("score", 3.0)])),
            Record::with_id("d", field_map([("score", 2.0)])),
        ];
        let query = ListQuery::default().sorted_by("score", SortDirection::Desc);

        let once = shape_list(&records, &[], &query);
        let twice = shape_list(&once, &[], &query);
        assert_eq!(ids(&once), vec!["a", "c", "d", "b"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn numbers_sort_numerically() {
        let records = vec![
            Record::with_id("ten", field_map([("hours", 10.0)])),
            Record::with_id("two", field_map([("hours", 2.0)])),
        ];
        let shaped = shape_list(
            &records,
            &[],
            &ListQuery::default().sorted_by("hours", SortDirection::Asc),
        );
        assert_eq!(ids(&shaped), vec!["two", "ten"]);
    }
}
