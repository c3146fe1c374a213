//! Generic entity store with write-through persistence.
//!
//! # Responsibility
//! - Provide `add`/`update`/`delete` over one in-memory collection.
//! - Rehydrate from storage at open time, falling back to seed records.
//! - Report persistence problems without failing mutations.
//!
//! # Invariants
//! - `add` always assigns a fresh id not present in the collection.
//! - `update` is a shallow merge; a rejected merge leaves the record intact.
//! - `delete` removes at most one record.
//! - Non-finite numbers are stored as `FieldValue::Empty`.

use crate::model::record::{new_record_id, FieldMap, Record, RecordId};
use crate::model::schema::{missing_required, FieldSchema, ValidationErrors};
use crate::model::value::FieldValue;
use crate::persist::{
    decode_payload, encode_payload, DiagnosticSink, Namespace, NamespaceStorage,
    PersistDiagnostic, PersistError, PersistResult, PersistStage,
};
use crate::view::list_view::{shape_with_schema, ListQuery};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Semantic store error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Required fields are empty after the requested change.
    Validation(ValidationErrors),
    /// Strict mode only: no record carries the given id.
    NotFound(RecordId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Result of an `update`/`delete` call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// The collection changed and was mirrored to storage.
    Applied,
    /// No record matched the id; nothing changed.
    Skipped,
}

/// Behavior switches shared by every store of a workspace.
#[derive(Clone, Default)]
pub struct StoreOptions {
    /// Surface missing ids as `StoreError::NotFound` instead of `Skipped`.
    pub strict_not_found: bool,
    /// Receives fail-open persistence problems.
    pub diagnostics: Option<DiagnosticSink>,
}

impl StoreOptions {
    pub fn strict(mut self, strict_not_found: bool) -> Self {
        self.strict_not_found = strict_not_found;
        self
    }

    pub fn with_diagnostics(mut self, sink: DiagnosticSink) -> Self {
        self.diagnostics = Some(sink);
        self
    }

    pub(crate) fn report(&self, namespace: &Namespace, stage: PersistStage, err: &PersistError) {
        warn!(
            "event=persist_failed module=store status=fallback namespace={} stage={} error={}",
            namespace,
            stage.as_str(),
            err
        );
        if let Some(sink) = self.diagnostics.as_ref() {
            sink(&PersistDiagnostic {
                namespace: namespace.clone(),
                stage,
                message: err.to_string(),
            });
        }
    }
}

impl Debug for StoreOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreOptions")
            .field("strict_not_found", &self.strict_not_found)
            .field("diagnostics", &self.diagnostics.is_some())
            .finish()
    }
}

#[derive(Serialize)]
struct CollectionOut<'a> {
    records: &'a [Record],
}

#[derive(Deserialize)]
struct CollectionIn {
    records: Vec<Record>,
}

/// One domain collection plus its schema, namespace and storage handle.
pub struct EntityStore<S: NamespaceStorage> {
    namespace: Namespace,
    schema: FieldSchema,
    records: Vec<Record>,
    storage: S,
    options: StoreOptions,
}

impl<S: NamespaceStorage> EntityStore<S> {
    /// Opens a store, preferring persisted state over `seed`.
    ///
    /// Missing, undecodable or wrong-version payloads fall back to `seed`.
    /// Decoding problems are reported, never returned.
    pub fn open(
        namespace: Namespace,
        schema: FieldSchema,
        seed: Vec<Record>,
        storage: S,
        options: StoreOptions,
    ) -> Self {
        let records = match load_collection(&storage, &namespace) {
            Ok(Some(records)) => {
                info!(
                    "event=store_open module=store status=ok namespace={} source=storage count={}",
                    namespace,
                    records.len()
                );
                dedupe_ids(&namespace, records)
            }
            Ok(None) => {
                info!(
                    "event=store_open module=store status=ok namespace={} source=seed count={}",
                    namespace,
                    seed.len()
                );
                seed
            }
            Err(err) => {
                options.report(&namespace, PersistStage::Load, &err);
                seed
            }
        };

        Self {
            namespace,
            schema,
            records,
            storage,
            options,
        }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn schema(&self) -> FieldSchema {
        self.schema
    }

    /// Collection in insertion order.
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Record> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Filtered/sorted view over the schema's fields.
    pub fn list(&self, query: &ListQuery) -> Vec<Record> {
        shape_with_schema(&self.records, self.schema, query)
    }

    /// Appends a new record with a freshly generated id.
    ///
    /// # Errors
    /// - `StoreError::Validation` when a required field is empty.
    pub fn add(&mut self, fields: FieldMap) -> StoreResult<Record> {
        let fields = sanitize_fields(fields);
        missing_required(self.schema, &fields).into_result()?;

        let mut id = new_record_id();
        while self.get(&id).is_some() {
            id = new_record_id();
        }

        let record = Record::with_id(id, fields);
        self.records.push(record.clone());
        debug!(
            "event=record_add module=store status=ok namespace={} count={}",
            self.namespace,
            self.records.len()
        );
        self.mirror();
        Ok(record)
    }

    /// Shallow-merges `patch` into the record with `id`.
    ///
    /// # Errors
    /// - `StoreError::Validation` when the merge empties a required field.
    /// - `StoreError::NotFound` for a missing id in strict mode.
    pub fn update(&mut self, id: &str, patch: FieldMap) -> StoreResult<Mutation> {
        let Some(index) = self.position(id) else {
            return self.missing(id, "record_update");
        };

        let mut candidate = self.records[index].clone();
        candidate.merge(sanitize_fields(patch));
        missing_required(self.schema, &candidate.fields).into_result()?;

        self.records[index] = candidate;
        debug!(
            "event=record_update module=store status=ok namespace={}",
            self.namespace
        );
        self.mirror();
        Ok(Mutation::Applied)
    }

    /// Removes the record with `id`.
    ///
    /// # Errors
    /// - `StoreError::NotFound` for a missing id in strict mode.
    pub fn delete(&mut self, id: &str) -> StoreResult<Mutation> {
        let Some(index) = self.position(id) else {
            return self.missing(id, "record_delete");
        };

        self.records.remove(index);
        debug!(
            "event=record_delete module=store status=ok namespace={} count={}",
            self.namespace,
            self.records.len()
        );
        self.mirror();
        Ok(Mutation::Applied)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|record| record.id == id)
    }

    fn missing(&self, id: &str, event: &str) -> StoreResult<Mutation> {
        if self.options.strict_not_found {
            debug!(
                "event={event} module=store status=error namespace={} error_code=not_found",
                self.namespace
            );
            return Err(StoreError::NotFound(id.to_string()));
        }
        debug!(
            "event={event} module=store status=skipped namespace={} reason=not_found",
            self.namespace
        );
        Ok(Mutation::Skipped)
    }

    fn mirror(&self) {
        let result = encode_payload(&CollectionOut {
            records: &self.records,
        })
        .and_then(|payload| self.storage.save_namespace(&self.namespace, &payload));
        if let Err(err) = result {
            self.options
                .report(&self.namespace, PersistStage::Save, &err);
        }
    }
}

fn load_collection<S: NamespaceStorage>(
    storage: &S,
    namespace: &Namespace,
) -> PersistResult<Option<Vec<Record>>> {
    let Some(payload) = storage.load_namespace(namespace)? else {
        return Ok(None);
    };
    let collection: CollectionIn = decode_payload(namespace, &payload)?;
    Ok(Some(collection.records))
}

fn dedupe_ids(namespace: &Namespace, records: Vec<Record>) -> Vec<Record> {
    let mut seen = HashSet::new();
    let before = records.len();
    let unique = records
        .into_iter()
        .filter(|record| seen.insert(record.id.clone()))
        .collect::<Vec<_>>();
    if unique.len() != before {
        warn!(
            "event=store_open module=store status=repaired namespace={} dropped_duplicates={}",
            namespace,
            before - unique.len()
        );
    }
    unique
}

fn sanitize_fields(fields: FieldMap) -> FieldMap {
    fields
        .into_iter()
        .map(|(name, value)| match value {
            FieldValue::Number(number) if !number.is_finite() => (name, FieldValue::Empty),
            other => (name, other),
        })
        .collect()
}
