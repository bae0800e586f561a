//! Error types and handling for PREMIS record generation

use std::{io, result::Result as StdResult};

use thiserror::Error;

/// Custom result type for record generation operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for the record-construction pipeline
///
/// Format-detection misses are deliberately absent: both detection
/// strategies are best-effort and downgrade to "no result" rather
/// than surfacing an error.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The uploaded content could not be written to or read from its
    /// staging location.
    #[error("staging failure: {0}")]
    Staging(#[source] io::Error),

    /// The staged stream became unreadable mid-digest. No partial
    /// record is ever produced after this.
    #[error("digest computation failed: {0}")]
    Digest(#[source] io::Error),

    /// The client-asserted MD5 did not match the computed value.
    /// Distinguishable from internal errors so the transport layer can
    /// report a client-side integrity problem.
    #[error("md5 mismatch: client asserted {client}, computed {computed}")]
    FixityMismatch { client: String, computed: String },

    /// Malformed record graph or XML writer failure. Unreachable as
    /// long as the link invariant holds.
    #[error("record serialization failed: {0}")]
    Serialization(String),
}

impl Error {
    /// Helper for wrapping any displayable failure as a `Serialization` error
    pub fn serialization<E: std::fmt::Display>(e: E) -> Self {
        Error::Serialization(e.to_string())
    }
}
