//! Dual-strategy, best-effort format identification
//!
//! Two independent detectors run per upload: a content-signature scan
//! over the staged bytes and a static extension lookup on the claimed
//! original filename. Each returns an optional MIME string; neither
//! can abort the request. The merge step guarantees at least one
//! format entry on every object via the `undetected` fallback.

mod extensions;
mod signatures;

use std::path::Path;

use tokio::{fs::File, io::AsyncReadExt};
use tracing::{debug, instrument, warn};

use crate::premis::Format;

/// Bytes sampled from the head of the file for signature matching.
/// Large enough for every offset in the table (the tar magic sits at
/// byte 257).
const SAMPLE_SIZE: usize = 512;

const MAGIC_NOTE: &str = "from magic number (content signature table)";
const EXTENSION_NOTE: &str = "from file extension (static extension table)";
const UNDETECTED_NOTE: &str =
    "format detection failed by content signature table and file extension lookup";

#[derive(Debug, Clone, Default)]
pub struct FormatDetector;

impl FormatDetector {
    pub fn new() -> Self {
        Self
    }

    /// Runs both detectors and merges their results into 1-2 format
    /// entries, or the single `undetected` placeholder when both miss.
    #[instrument(skip(self))]
    pub async fn detect(&self, path: &Path, original_name: Option<&str>) -> Vec<Format> {
        let by_magic = self.detect_by_signature(path).await;
        let by_extension = original_name.and_then(extensions::mime_for_name);

        let mut formats = Vec::new();
        if let Some(mime) = by_magic {
            formats.push(Format {
                designation: mime.to_string(),
                note: MAGIC_NOTE.to_string(),
            });
        }
        if let Some(mime) = by_extension {
            formats.push(Format {
                designation: mime.to_string(),
                note: EXTENSION_NOTE.to_string(),
            });
        }
        if formats.is_empty() {
            formats.push(Format {
                designation: "undetected".to_string(),
                note: UNDETECTED_NOTE.to_string(),
            });
        }
        formats
    }

    /// Content-signature strategy. Its failure causes are all local:
    /// an unreadable file, an empty sample, or bytes matching nothing
    /// in the table. Each downgrades to "no result".
    async fn detect_by_signature(&self, path: &Path) -> Option<&'static str> {
        let sample = match self.read_sample(path).await {
            Ok(sample) => sample,
            Err(err) => {
                warn!(path = %path.display(), error = %err, "signature sample unreadable");
                return None;
            }
        };
        if sample.is_empty() {
            return None;
        }
        if let Some(sig) = signatures::match_signature(&sample) {
            debug!(mime = sig.mime, description = sig.description, "signature match");
            return Some(sig.mime);
        }
        // libmagic-style last resort: a head of clean UTF-8 text
        if looks_like_text(&sample) {
            return Some("text/plain");
        }
        None
    }

    async fn read_sample(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let mut file = File::open(path).await?;
        let mut buf = vec![0u8; SAMPLE_SIZE];
        let mut filled = 0;
        while filled < buf.len() {
            let n = file.read(&mut buf[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        buf.truncate(filled);
        Ok(buf)
    }
}

/// True when the sample is valid UTF-8 (allowing a character cut off
/// at the sample boundary) with no control bytes besides tab, LF, CR.
fn looks_like_text(sample: &[u8]) -> bool {
    let valid = match std::str::from_utf8(sample) {
        Ok(s) => s,
        Err(e) => {
            if e.error_len().is_some() || sample.len() - e.valid_up_to() > 3 {
                return false;
            }
            // trailing bytes are an incomplete sequence at the cut
            std::str::from_utf8(&sample[..e.valid_up_to()]).unwrap_or("")
        }
    };
    !valid.is_empty()
        && valid
            .chars()
            .all(|c| !c.is_control() || matches!(c, '\t' | '\n' | '\r'))
}
