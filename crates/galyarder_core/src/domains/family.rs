//! Family members and birthday reminders.
//!
//! # Invariants
//! - `birth_date` anniversaries on Feb 29 fall on Mar 1 in common years.
//! - Upcoming birthdays are ordered by next occurrence, ties by input order.

use super::{date_value, read_date};
use crate::model::record::{Record, RecordId};
use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};
use chrono::{Datelike, NaiveDate};

pub const NAMESPACE: &str = "galyarder.family";

pub const RELATIONSHIPS: &[&str] = &[
    "Wife", "Husband", "Partner", "Son", "Daughter", "Mother", "Father", "Brother", "Sister",
    "Grandparent", "Grandchild", "Cousin", "Other",
];

pub const SCHEMA: FieldSchema = &[
    FieldDescriptor::new("name", "Name", FieldKind::Text)
        .required()
        .column(),
    FieldDescriptor::new("relationship", "Relationship", FieldKind::Select)
        .required()
        .options(RELATIONSHIPS)
        .column(),
    FieldDescriptor::new("birth_date", "Birth Date", FieldKind::Date).column(),
    FieldDescriptor::new("contact.phone", "Phone", FieldKind::Text),
    FieldDescriptor::new("contact.email", "Email", FieldKind::Text).column(),
    FieldDescriptor::new("notes", "Notes", FieldKind::Textarea),
    FieldDescriptor::new("tags", "Tags", FieldKind::Tags),
];

pub fn seed() -> Vec<Record> {
    vec![
        Record::with_id("1", Default::default())
            .field("name", "Sarah")
            .field("relationship", "Wife")
            .field("birth_date", date_value(1990, 3, 10))
            .field("contact.email", "sarah@example.com")
            .field("contact.phone", "+62 812 0000 0001"),
        Record::with_id("2", Default::default())
            .field("name", "Mike")
            .field("relationship", "Son")
            .field("birth_date", date_value(2015, 7, 22))
            .field("notes", "Football practice on Saturdays"),
        Record::with_id("3", Default::default())
            .field("name", "Ann")
            .field("relationship", "Mother")
            .field("birth_date", date_value(1962, 11, 2))
            .field("contact.phone", "+62 812 0000 0003"),
    ]
}

/// One family member with a birthday inside the requested window.
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingBirthday {
    pub record_id: RecordId,
    pub name: String,
    pub next_occurrence: NaiveDate,
    pub days_until: i64,
    /// Age reached on `next_occurrence`.
    pub turning: i32,
}

/// Returns members whose next birthday lies in `[today, today + within_days]`.
///
/// Records without a readable `birth_date` are skipped.
pub fn upcoming_birthdays(
    records: &[Record],
    today: NaiveDate,
    within_days: u32,
) -> Vec<UpcomingBirthday> {
    let mut upcoming = records
        .iter()
        .filter_map(|record| {
            let birth = read_date(record.value("birth_date"))?;
            let next = next_occurrence(birth, today)?;
            let days_until = (next - today).num_days();
            if days_until > i64::from(within_days) {
                return None;
            }
            Some(UpcomingBirthday {
                record_id: record.id.clone(),
                name: record
                    .value("name")
                    .as_text()
                    .unwrap_or_default()
                    .to_string(),
                next_occurrence: next,
                days_until,
                turning: next.year() - birth.year(),
            })
        })
        .collect::<Vec<_>>();

    upcoming.sort_by_key(|birthday| birthday.next_occurrence);
    upcoming
}

/// Next anniversary of `birth` on or after `today`.
pub fn next_occurrence(birth: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let this_year = anniversary_in(birth, today.year())?;
    if this_year >= today {
        return Some(this_year);
    }
    anniversary_in(birth, today.year() + 1)
}

fn anniversary_in(birth: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
}
