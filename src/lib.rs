//! PREMIS preservation-metadata record generation for uploaded files
//!
//! Takes a staged byte stream and synchronously produces a PREMIS
//! record: a minted object identifier, four fixity digests from a
//! single read pass, dual-method format identification, a generation
//! event, and optional client-checksum verification, serialized to
//! XML. The HTTP transport in front of this crate is a thin shell;
//! everything with invariants lives here.

// Configuration and Core Pipeline
pub mod builder;
pub mod config;
pub mod digest;
pub mod error;
pub mod format;
pub mod pipeline;
pub mod premis;
pub mod staging;
pub mod verify;

// Re-exports for crate consumers
pub use builder::RecordBuilder;
pub use config::PipelineConfig;
pub use digest::{ContentDigests, DigestEngine};
pub use error::{Error, Result};
pub use format::FormatDetector;
pub use pipeline::{Pipeline, PremisDocument, UploadRequest, OUTPUT_CONTENT_TYPE, OUTPUT_FILENAME};
pub use premis::{Event, Fixity, Format, Object, ObjectCharacteristics, Record};
pub use staging::StagedUpload;
pub use verify::FixityVerifier;
