//! Streaming multi-algorithm digest engine
//!
//! All four accumulators are fed identical chunks in lockstep from a
//! single read pass, so every fixity entry describes the same observed
//! content and the file is never held in memory at once.

use std::path::Path;

use adler32::RollingAdler32;
use flate2::Crc;
use md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, instrument};

use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::premis::Fixity;

/// Digests and byte count from one pass over the content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentDigests {
    pub md5: String,
    pub sha256: String,
    pub crc32: String,
    pub adler32: String,
    pub size: u64,
}

impl ContentDigests {
    /// Fixity entries in a fixed order, each noting the crate that
    /// produced its value
    pub fn fixities(&self) -> Vec<Fixity> {
        vec![
            Fixity {
                algorithm: "md5".to_string(),
                digest: self.md5.clone(),
                originator: "rust md-5 (RustCrypto)".to_string(),
            },
            Fixity {
                algorithm: "sha256".to_string(),
                digest: self.sha256.clone(),
                originator: "rust sha2 (RustCrypto)".to_string(),
            },
            Fixity {
                algorithm: "crc32".to_string(),
                digest: self.crc32.clone(),
                originator: "rust flate2::Crc".to_string(),
            },
            Fixity {
                algorithm: "adler32".to_string(),
                digest: self.adler32.clone(),
                originator: "rust adler32::RollingAdler32".to_string(),
            },
        ]
    }
}

/// Computes the fixed algorithm set {MD5, SHA-256, CRC32, Adler-32}
/// over a byte stream in bounded chunks
#[derive(Debug, Clone)]
pub struct DigestEngine {
    chunk_size: usize,
}

impl DigestEngine {
    pub fn new(config: &PipelineConfig) -> Self {
        // Anything of a few KiB or more is acceptable; guard against
        // pathological config values.
        Self {
            chunk_size: config.chunk_size.max(4096),
        }
    }

    /// Consumes the reader to exhaustion. The stream is advanced and
    /// must not be reused without a reset.
    #[instrument(skip(self, reader))]
    pub async fn digest_reader<R: AsyncReadExt + Unpin>(
        &self,
        reader: &mut R,
    ) -> Result<ContentDigests> {
        let mut buf = vec![0u8; self.chunk_size];
        let mut md5 = Md5::new();
        let mut sha256 = Sha256::new();
        let mut crc32 = Crc::new();
        let mut adler32 = RollingAdler32::new();
        let mut total = 0u64;

        loop {
            let n = reader.read(&mut buf).await.map_err(Error::Digest)?;
            if n == 0 {
                break;
            }
            let chunk = &buf[..n];
            md5.update(chunk);
            sha256.update(chunk);
            crc32.update(chunk);
            adler32.update_buffer(chunk);
            total += n as u64;
        }

        debug!(bytes = total, "digest pass complete");

        Ok(ContentDigests {
            md5: hex::encode(md5.finalize()),
            sha256: hex::encode(sha256.finalize()),
            crc32: format!("{:08x}", crc32.sum()),
            adler32: format!("{:08x}", adler32.hash()),
            size: total,
        })
    }

    /// Opens the staged file and digests it. An unopenable staging
    /// path is a staging failure; a read that dies mid-pass is a
    /// digest failure.
    pub async fn digest_file(&self, path: &Path) -> Result<ContentDigests> {
        let mut file = File::open(path).await.map_err(Error::Staging)?;
        self.digest_reader(&mut file).await
    }
}
