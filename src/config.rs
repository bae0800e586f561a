//! Configuration for the record-generation pipeline

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Global pipeline execution config
///
/// Passed explicitly into the staging collaborator and digest engine;
/// there is no process-wide mutable default for the temp directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Parent directory for staged uploads. `None` uses the system
    /// temp directory.
    pub staging_dir: Option<PathBuf>,
    /// Read chunk size for digest computation. Not semantically
    /// significant; anything of a few KiB or more is fine.
    pub chunk_size: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            staging_dir: None,
            chunk_size: 64 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_system_tempdir() {
        let config = PipelineConfig::default();
        assert!(config.staging_dir.is_none());
        assert_eq!(config.chunk_size, 65536);
    }
}
