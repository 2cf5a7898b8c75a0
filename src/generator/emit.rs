//! Idempotent artifact materialization.

use crate::error::GenerateError;
use std::fs;
use std::path::Path;

/// What to do when an artifact already exists on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    /// Leave existing files untouched; re-running the pipeline is a no-op
    /// for artifacts already on disk.
    #[default]
    SkipIfExists,
    /// Always replace with the latest rendering.
    AlwaysOverwrite,
}

/// Result of one emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    Written,
    SkippedExisting,
}

/// Writes rendered artifacts to disk, creating parent directories as
/// needed. Any filesystem error is fatal to the run; previously written
/// artifacts are left in place with no rollback.
#[derive(Debug)]
pub struct ArtifactEmitter {
    policy: OverwritePolicy,
}

impl ArtifactEmitter {
    pub fn new(policy: OverwritePolicy) -> Self {
        Self { policy }
    }

    pub fn emit(&self, path: &Path, contents: &str) -> Result<EmitOutcome, GenerateError> {
        if self.policy == OverwritePolicy::SkipIfExists && path.exists() {
            tracing::debug!("Skipping existing artifact {}", path.display());
            return Ok(EmitOutcome::SkippedExisting);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| GenerateError::Emit {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, contents).map_err(|e| GenerateError::Emit {
            path: path.to_path_buf(),
            source: e,
        })?;

        tracing::debug!("Wrote {}", path.display());
        Ok(EmitOutcome::Written)
    }
}
