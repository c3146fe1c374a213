//! Static field schemas.
//!
//! # Responsibility
//! - Describe editable fields of a domain: label, kind, requiredness,
//!   select options and list-column visibility.
//! - Check required fields of a field map.
//!
//! # Invariants
//! - Schemas are `'static` data, defined once per domain.
//! - Field order is the display order.

use crate::model::record::FieldMap;
use crate::model::value::FieldValue;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Input widget kind of one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Date,
    Select,
    Checkbox,
    Tags,
}

/// Descriptor of one editable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Flat field key, e.g. `birth_date` or `contact.email`.
    pub name: &'static str,
    /// Human label used in validation messages.
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Allowed values for `FieldKind::Select`; empty for other kinds.
    pub options: &'static [&'static str],
    /// Whether list views show this field as a column.
    pub list_column: bool,
}

impl FieldDescriptor {
    /// Descriptor for an optional field with no options.
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            required: false,
            options: &[],
            list_column: false,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn options(mut self, options: &'static [&'static str]) -> Self {
        self.options = options;
        self
    }

    pub const fn column(mut self) -> Self {
        self.list_column = true;
        self
    }

    pub fn required_message(&self) -> String {
        format!("{} is required", self.label)
    }
}

/// Ordered field descriptors of one domain.
pub type FieldSchema = &'static [FieldDescriptor];

/// Finds one descriptor by field name.
pub fn find_field(schema: FieldSchema, name: &str) -> Option<&'static FieldDescriptor> {
    schema.iter().find(|field| field.name == name)
}

/// Returns the names of list-column fields in display order.
pub fn list_columns(schema: FieldSchema) -> Vec<&'static str> {
    schema
        .iter()
        .filter(|field| field.list_column)
        .map(|field| field.name)
        .collect()
}

/// Field name to message mapping of a rejected draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a message for `field`; the first message per field wins.
    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .map(|(field, message)| (field.as_str(), message.as_str()))
    }

    pub fn into_map(self) -> BTreeMap<String, String> {
        self.errors
    }

    /// Converts an empty error set into `Ok(())`.
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let messages = self.errors.values().cloned().collect::<Vec<_>>();
        write!(f, "validation failed: {}", messages.join("; "))
    }
}

impl Error for ValidationErrors {}

/// Collects one `"{label} is required"` message per empty required field.
pub fn missing_required(schema: FieldSchema, fields: &FieldMap) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for field in schema.iter().filter(|field| field.required) {
        if fields.get(field.name).map_or(true, FieldValue::is_empty) {
            errors.insert(field.name, field.required_message());
        }
    }
    errors
}
