//! Form draft state, coercion and submission.
//!
//! # Responsibility
//! - Track a draft record against a static field schema.
//! - Turn raw text input into typed field values.
//! - Route valid drafts to `EntityStore::add` or `EntityStore::update`.
//!
//! # Invariants
//! - Validation yields exactly one message per failing field.
//! - `submit` calls the store only when validation passed.

use crate::model::record::{FieldMap, Record, RecordId};
use crate::model::schema::{find_field, missing_required, FieldKind, FieldSchema, ValidationErrors};
use crate::model::value::FieldValue;
use crate::persist::NamespaceStorage;
use crate::store::entity_store::{EntityStore, Mutation, StoreError};
use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*,\s*").expect("valid tag separator regex"));

const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// Submission failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Draft rejected before reaching the store.
    Validation(ValidationErrors),
    /// Store rejected the change.
    Store(StoreError),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FormError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<ValidationErrors> for FormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Created(Record),
    Updated { id: RecordId, mutation: Mutation },
}

/// Draft state of one create/edit form.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: FieldSchema,
    values: FieldMap,
    editing: Option<RecordId>,
}

impl FormState {
    /// Empty draft for creating a record.
    pub fn new(schema: FieldSchema) -> Self {
        Self {
            schema,
            values: FieldMap::new(),
            editing: None,
        }
    }

    /// Draft pre-filled from an existing record for editing.
    pub fn edit(schema: FieldSchema, record: &Record) -> Self {
        Self {
            schema,
            values: record.fields.clone(),
            editing: Some(record.id.clone()),
        }
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    pub fn values(&self) -> &FieldMap {
        &self.values
    }

    pub fn value(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&FieldValue::Empty)
    }

    /// Sets an already typed value.
    pub fn set_value(&mut self, name: &str, value: impl Into<FieldValue>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Sets a value from raw text input, coerced by the field's kind.
    ///
    /// Fields unknown to the schema are stored as text.
    pub fn set_input(&mut self, name: &str, raw: &str) {
        let kind = find_field(self.schema, name).map_or(FieldKind::Text, |field| field.kind);
        self.values.insert(name.to_string(), coerce_input(kind, raw));
    }

    /// Renders the current value of `name` back into input text.
    ///
    /// Tag lists are joined with `", "`.
    pub fn input_text(&self, name: &str) -> String {
        match self.value(name) {
            FieldValue::Tags(tags) => tags.join(", "),
            other => other.search_terms().join(""),
        }
    }

    /// Validates the draft and returns its typed field values.
    ///
    /// # Errors
    /// - One `"{label} is required"` per empty required field.
    /// - `"{label} must be a valid date"` for unparsable date input.
    /// - `"{label} has an unknown option"` for select values outside options.
    pub fn validate(&self) -> Result<FieldMap, ValidationErrors> {
        let mut errors = missing_required(self.schema, &self.values);

        for field in self.schema {
            let Some(value) = self.values.get(field.name) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match (field.kind, value) {
                (FieldKind::Date, FieldValue::Text(_)) => {
                    errors.insert(field.name, format!("{} must be a valid date", field.label));
                }
                (FieldKind::Select, FieldValue::Text(choice))
                    if !field.options.is_empty() && !field.options.contains(&choice.as_str()) =>
                {
                    errors.insert(field.name, format!("{} has an unknown option", field.label));
                }
                _ => {}
            }
        }

        errors.into_result()?;
        Ok(self
            .values
            .iter()
            .map(|(name, value)| match value {
                FieldValue::Number(number) if number.is_nan() => (name.clone(), FieldValue::Empty),
                other => (name.clone(), other.clone()),
            })
            .collect())
    }

    /// Validates and hands the draft to `store`.
    ///
    /// Drafts without an editing id are added; others update in place.
    pub fn submit<S: NamespaceStorage>(
        &self,
        store: &mut EntityStore<S>,
    ) -> Result<Submission, FormError> {
        let fields = match self.validate() {
            Ok(fields) => fields,
            Err(errors) => {
                debug!(
                    "event=form_submit module=form status=rejected namespace={} errors={}",
                    store.namespace(),
                    errors.len()
                );
                return Err(FormError::Validation(errors));
            }
        };

        match self.editing.as_ref() {
            None => Ok(Submission::Created(store.add(fields)?)),
            Some(id) => {
                let mutation = store.update(id, fields)?;
                Ok(Submission::Updated {
                    id: id.clone(),
                    mutation,
                })
            }
        }
    }
}

/// Coerces raw text input into a typed value for `kind`.
pub fn coerce_input(kind: FieldKind, raw: &str) -> FieldValue {
    match kind {
        FieldKind::Text | FieldKind::Textarea | FieldKind::Select => FieldValue::text(raw),
        FieldKind::Number => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                FieldValue::Empty
            } else {
                let number = trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|number| number.is_finite())
                    .unwrap_or(f64::NAN);
                FieldValue::Number(number)
            }
        }
        FieldKind::Date => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                FieldValue::Empty
            } else {
                NaiveDate::parse_from_str(trimmed, DATE_INPUT_FORMAT)
                    .map_or_else(|_| FieldValue::text(trimmed), FieldValue::Date)
            }
        }
        FieldKind::Checkbox => FieldValue::Bool(matches!(
            raw.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "yes" | "1"
        )),
        FieldKind::Tags => FieldValue::Tags(split_tags(raw)),
    }
}

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn split_tags(raw: &str) -> Vec<String> {
    TAG_SEPARATOR_RE
        .split(raw.trim())
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{coerce_input, split_tags, FormState};
    use crate::model::schema::{FieldDescriptor, FieldKind, FieldSchema};
    use crate::model::value::FieldValue;
    use chrono::NaiveDate;

    const SCHEMA: FieldSchema = &[
        FieldDescriptor::new("title", "Title", FieldKind::Text).required(),
        FieldDescriptor::new("hours", "Hours", FieldKind::Number),
        FieldDescriptor::new("when", "When", FieldKind::Date),
        FieldDescriptor::new("mood", "Mood", FieldKind::Select).options(&["good", "bad"]),
    ];

    #[test]
    fn split_tags_trims_and_drops_empties() {
        assert_eq!(split_tags(" a, b ,,c , "), vec!["a", "b", "c"]);
        assert!(split_tags("  ").is_empty());
    }

    #[test]
    fn number_coercion_maps_garbage_to_nan() {
        assert_eq!(coerce_input(FieldKind::Number, ""), FieldValue::Empty);
        assert_eq!(coerce_input(FieldKind::Number, "7.5"), FieldValue::Number(7.5));
        assert!(coerce_input(FieldKind::Number, "abc").is_empty());
    }

    #[test]
    fn non_finite_number_input_counts_as_empty() {
        for raw in ["inf", "-Infinity", "NaN", "1e999"] {
            assert!(coerce_input(FieldKind::Number, raw).is_empty(), "{raw}");
        }
    }

    #[test]
    fn date_coercion_parses_iso_days() {
        assert_eq!(
            coerce_input(FieldKind::Date, "2024-03-10"),
            FieldValue::Date(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap())
        );
        assert_eq!(
            coerce_input(FieldKind::Date, "soon"),
            FieldValue::text("soon")
        );
    }

    #[test]
    fn checkbox_coercion_accepts_common_truthy_inputs() {
        assert_eq!(coerce_input(FieldKind::Checkbox, "on"), FieldValue::Bool(true));
        assert_eq!(coerce_input(FieldKind::Checkbox, "no"), FieldValue::Bool(false));
    }

    #[test]
    fn empty_draft_reports_required_title() {
        let errors = FormState::new(SCHEMA).validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("title"), Some("Title is required"));
    }

    #[test]
    fn malformed_date_and_unknown_option_are_reported() {
        let mut form = FormState::new(SCHEMA);
        form.set_input("title", "Walk");
        form.set_input("when", "tomorrow");
        form.set_input("mood", "meh");

        let errors = form.validate().unwrap_err();
        assert_eq!(errors.get("when"), Some("When must be a valid date"));
        assert_eq!(errors.get("mood"), Some("Mood has an unknown option"));
    }

    #[test]
    fn nan_numbers_are_cleared_on_validate() {
        let mut form = FormState::new(SCHEMA);
        form.set_input("title", "Walk");
        form.set_input("hours", "lots");

        let fields = form.validate().unwrap();
        assert_eq!(fields["hours"], FieldValue::Empty);
    }

    #[test]
    fn tags_render_back_as_comma_list() {
        let mut form = FormState::new(SCHEMA);
        form.set_value("labels", FieldValue::tags(["a", "b"]));
        assert_eq!(form.input_text("labels"), "a, b");
    }
}
