//! Namespaced key-value persistence for store state.
//!
//! # Responsibility
//! - Define the storage seam stores mirror their state through.
//! - Encode and decode versioned payload envelopes.
//! - Report fail-open persistence problems to an optional sink.
//!
//! # Invariants
//! - One namespace key holds one serialized payload.
//! - Payloads carry `version`; other versions are never used.
//! - Persistence failures never abort a store mutation.

mod memory;
mod sqlite;

pub use memory::MemoryNamespaceStorage;
pub use sqlite::SqliteNamespaceStorage;

use crate::db::DbError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// Version written into every payload envelope.
pub const PAYLOAD_VERSION: u32 = 1;

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z0-9][a-z0-9_-]*(\.[a-z0-9][a-z0-9_-]*)*$").expect("valid namespace regex")
});

pub type PersistResult<T> = Result<T, PersistError>;

/// Persistence-layer failure.
#[derive(Debug)]
pub enum PersistError {
    InvalidNamespace(String),
    Db(DbError),
    Encode(serde_json::Error),
    Decode {
        namespace: String,
        source: serde_json::Error,
    },
    UnsupportedVersion {
        namespace: String,
        found: u32,
        expected: u32,
    },
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNamespace(value) => write!(f, "invalid namespace key `{value}`"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "failed to encode payload: {err}"),
            Self::Decode { namespace, source } => {
                write!(f, "failed to decode payload for `{namespace}`: {source}")
            }
            Self::UnsupportedVersion {
                namespace,
                found,
                expected,
            } => write!(
                f,
                "payload for `{namespace}` has version {found}, expected {expected}"
            ),
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::Decode { source, .. } => Some(source),
            Self::InvalidNamespace(_) | Self::UnsupportedVersion { .. } => None,
        }
    }
}

impl From<DbError> for PersistError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for PersistError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Validated storage key of one store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Namespace(String);

impl Namespace {
    /// Validates a dot-separated lowercase key such as `galyarder.family`.
    pub fn new(value: impl Into<String>) -> PersistResult<Self> {
        let value = value.into();
        if !NAMESPACE_RE.is_match(&value) {
            return Err(PersistError::InvalidNamespace(value));
        }
        Ok(Self(value))
    }

    /// Wraps a compile-time key of a built-in store.
    pub(crate) fn from_static(value: &'static str) -> Self {
        debug_assert!(
            NAMESPACE_RE.is_match(value),
            "invalid static namespace `{value}`"
        );
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Namespace {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Durable key-value collaborator consumed by stores.
///
/// Both calls are synchronous from the caller's point of view.
pub trait NamespaceStorage {
    /// Returns the payload stored under `key`, or `None` when absent.
    fn load_namespace(&self, key: &Namespace) -> PersistResult<Option<String>>;
    /// Replaces the payload stored under `key`.
    fn save_namespace(&self, key: &Namespace, payload: &str) -> PersistResult<()>;
}

impl<T: NamespaceStorage + ?Sized> NamespaceStorage for &T {
    fn load_namespace(&self, key: &Namespace) -> PersistResult<Option<String>> {
        (**self).load_namespace(key)
    }

    fn save_namespace(&self, key: &Namespace, payload: &str) -> PersistResult<()> {
        (**self).save_namespace(key, payload)
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a, T: Serialize> {
    version: u32,
    #[serde(flatten)]
    state: &'a T,
}

#[derive(Deserialize)]
struct EnvelopeVersion {
    version: u32,
}

#[derive(Deserialize)]
struct EnvelopeIn<T> {
    #[serde(flatten)]
    state: T,
}

/// Serializes `state` into a versioned envelope.
pub fn encode_payload<T: Serialize>(state: &T) -> PersistResult<String> {
    serde_json::to_string(&EnvelopeOut {
        version: PAYLOAD_VERSION,
        state,
    })
    .map_err(PersistError::Encode)
}

/// Parses a versioned envelope, rejecting payloads of another version.
pub fn decode_payload<T: DeserializeOwned>(namespace: &Namespace, payload: &str) -> PersistResult<T> {
    let decode_error = |source| PersistError::Decode {
        namespace: namespace.to_string(),
        source,
    };

    let header: EnvelopeVersion = serde_json::from_str(payload).map_err(decode_error)?;
    if header.version != PAYLOAD_VERSION {
        return Err(PersistError::UnsupportedVersion {
            namespace: namespace.to_string(),
            found: header.version,
            expected: PAYLOAD_VERSION,
        });
    }

    let envelope: EnvelopeIn<T> = serde_json::from_str(payload).map_err(decode_error)?;
    Ok(envelope.state)
}

/// Direction of the persistence call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStage {
    Load,
    Save,
}

impl PersistStage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Save => "save",
        }
    }
}

/// Fail-open persistence problem handed to a diagnostic sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistDiagnostic {
    pub namespace: Namespace,
    pub stage: PersistStage,
    pub message: String,
}

/// Callback receiving persistence diagnostics.
pub type DiagnosticSink = Arc<dyn Fn(&PersistDiagnostic) + Send + Sync>;

#[cfg(test)]
mod tests {
    use super::{decode_payload, encode_payload, Namespace, PersistError};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct State {
        items: Vec<u32>,
    }

    #[test]
    fn namespace_accepts_dotted_lowercase_keys() {
        assert!(Namespace::new("galyarder.family").is_ok());
        assert!(Namespace::new("galyarder.sleep_log-v2").is_ok());
    }

    #[test]
    fn namespace_rejects_malformed_keys() {
        for key in ["", "Galyarder", "a..b", ".a", "a b"] {
            assert!(
                matches!(Namespace::new(key), Err(PersistError::InvalidNamespace(_))),
                "`{key}` should be rejected"
            );
        }
    }

    #[test]
    fn envelope_carries_version_and_state() {
        let payload = encode_payload(&State { items: vec![1, 2] }).unwrap();
        assert!(payload.contains("\"version\":1"));

        let namespace = Namespace::new("test.state").unwrap();
        let decoded: State = decode_payload(&namespace, &payload).unwrap();
        assert_eq!(decoded.items, vec![1, 2]);
    }

    #[test]
    fn envelope_with_other_version_is_rejected() {
        let namespace = Namespace::new("test.state").unwrap();
        let err = decode_payload::<State>(&namespace, r#"{"version":7,"items":[]}"#).unwrap_err();
        assert!(matches!(
            err,
            PersistError::UnsupportedVersion {
                found: 7,
                expected: 1,
                ..
            }
        ));
    }

    #[test]
    fn unversioned_payload_is_a_decode_error() {
        let namespace = Namespace::new("test.state").unwrap();
        let err = decode_payload::<State>(&namespace, r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, PersistError::Decode { .. }));
    }
}
