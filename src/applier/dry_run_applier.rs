use crate::applier::Applier;
use crate::errors::ClipwriteError;
use crate::extractor::CodeBlock;
use crate::paths::{resolve_target, PathPolicy};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolves targets and reports what would be written, without touching disk.
#[derive(Debug, Clone)]
pub struct DryRunApplier {
    base_path: PathBuf,
    policy: PathPolicy,
}

impl DryRunApplier {
    pub fn new(base_path: &Path, policy: PathPolicy) -> Self {
        DryRunApplier {
            base_path: base_path.to_path_buf(),
            policy,
        }
    }
}

#[async_trait]
impl Applier for DryRunApplier {
    async fn apply(&self, block: &CodeBlock) -> Result<PathBuf, ClipwriteError> {
        let file_path = resolve_target(&self.base_path, &block.relative_path, self.policy)?;
        info!(
            "Would write {} bytes to {}",
            block.content.len(),
            file_path.display()
        );
        Ok(file_path)
    }
}
