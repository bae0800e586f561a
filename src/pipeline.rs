//! Record-Generation Pipeline — Stage-by-Stage Execution
//!
//! digest → format detection → record build → optional fixity
//! verification → XML serialization, strictly sequential within one
//! request. The record graph never escapes the handling request; the
//! caller-visible contract is binary: a complete internally-consistent
//! document, or a typed failure and nothing else.

use std::path::Path;

use tokio::io::AsyncRead;
use tracing::{info, instrument};

use crate::builder::RecordBuilder;
use crate::config::PipelineConfig;
use crate::digest::DigestEngine;
use crate::error::Result;
use crate::format::FormatDetector;
use crate::premis::{xml, Record};
use crate::staging::StagedUpload;
use crate::verify::FixityVerifier;

/// Logical filename hint for the serialized record
pub const OUTPUT_FILENAME: &str = "premis.xml";

/// Content type of the serialized record
pub const OUTPUT_CONTENT_TYPE: &str = "application/xml";

/// Client-supplied metadata accompanying one upload
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    /// Claimed original filename; used only for extension detection
    /// and the `originalName` field, never for path construction
    pub original_name: Option<String>,
    /// Expected MD5 digest; presence turns on fixity verification
    pub client_md5: Option<String>,
}

/// The serialized record plus the response hints the transport layer
/// needs
#[derive(Debug, Clone)]
pub struct PremisDocument {
    pub bytes: Vec<u8>,
    pub filename: &'static str,
    pub content_type: &'static str,
}

/// Orchestrates one synchronous record-generation request
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    digests: DigestEngine,
    formats: FormatDetector,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let digests = DigestEngine::new(&config);
        Self {
            config,
            digests,
            formats: FormatDetector::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Builds the record graph for already-staged content. The graph
    /// is returned un-serialized so callers can render it as XML or
    /// JSON.
    #[instrument(skip(self, request))]
    pub async fn build_record(&self, staged: &Path, request: &UploadRequest) -> Result<Record> {
        let digests = self.digests.digest_file(staged).await?;
        let formats = self
            .formats
            .detect(staged, request.original_name.as_deref())
            .await;

        let mut record =
            RecordBuilder::build(&digests, formats, request.original_name.as_deref())?;

        if let Some(client_md5) = &request.client_md5 {
            FixityVerifier::verify_md5(&mut record, client_md5)?;
        }

        info!(
            object = %record.objects()[0].identifier.value,
            events = record.events().len(),
            "record complete"
        );
        Ok(record)
    }

    /// Full pipeline over staged content, ending in XML bytes
    pub async fn describe(&self, staged: &Path, request: &UploadRequest) -> Result<PremisDocument> {
        let record = self.build_record(staged, request).await?;
        let bytes = xml::to_xml(&record)?;
        Ok(PremisDocument {
            bytes,
            filename: OUTPUT_FILENAME,
            content_type: OUTPUT_CONTENT_TYPE,
        })
    }

    /// Stages a raw byte stream and runs the full pipeline. The
    /// staged artifact is removed on every exit path.
    pub async fn describe_stream<R: AsyncRead + Unpin>(
        &self,
        reader: &mut R,
        request: &UploadRequest,
    ) -> Result<PremisDocument> {
        let staged = StagedUpload::stage(&self.config, reader).await?;
        self.describe(staged.path(), request).await
    }
}
