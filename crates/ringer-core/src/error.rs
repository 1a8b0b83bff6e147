// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Error taxonomy surfaced by Ringer write paths.

use crate::store::StoreError;
use thiserror::Error;

/// Failures that callers are expected to report to the user.
///
/// Read paths never produce these; they degrade through
/// [`Fetched`](crate::fetch::Fetched) instead.
#[derive(Debug, Error)]
pub enum RingerError {
    /// Contact or ringtone-write access was refused.
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    /// A referenced contact, SIM, ringtone or mapping does not exist.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// What was looked up (`contact`, `sim`, `ringtone`, ...).
        kind: &'static str,
        /// The identifier that missed.
        id: String,
    },
    /// The source file was missing or could not be copied during import.
    #[error("import failed: {reason}")]
    ImportFailure {
        /// Human-readable cause.
        reason: String,
        /// Underlying I/O error, when there was one.
        #[source]
        source: Option<std::io::Error>,
    },
    /// The settings document could not be written.
    #[error("could not persist settings: {0}")]
    PersistenceFailure(#[source] StoreError),
    /// An external data source could not be parsed.
    #[error("malformed {what}")]
    Malformed {
        /// What was being read, for the message.
        what: String,
        /// Parser error.
        #[source]
        source: serde_json::Error,
    },
    /// Filesystem failure on a write path other than import.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RingerError {
    /// Shorthand for [`RingerError::NotFound`].
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Import failure without an underlying I/O cause.
    pub fn import(reason: impl Into<String>) -> Self {
        Self::ImportFailure {
            reason: reason.into(),
            source: None,
        }
    }

    /// Import failure caused by `err`.
    pub fn import_io(reason: impl Into<String>, err: std::io::Error) -> Self {
        Self::ImportFailure {
            reason: reason.into(),
            source: Some(err),
        }
    }
}
