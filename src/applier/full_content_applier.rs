use crate::applier::utils::print_diff;
use crate::applier::Applier;
use crate::errors::ClipwriteError;
use crate::extractor::CodeBlock;
use crate::paths::{resolve_target, PathPolicy};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs as async_fs;
use tracing::{debug, trace};

/// Writes each block's content verbatim, replacing whatever was there.
#[derive(Debug, Clone)]
pub struct FullContentApplier {
    base_path: PathBuf,
    policy: PathPolicy,
    show_diff: bool,
}

impl FullContentApplier {
    pub fn new(base_path: &Path) -> Self {
        debug!("Creating FullContentApplier with base path: {}", base_path.display());
        FullContentApplier {
            base_path: base_path.to_path_buf(),
            policy: PathPolicy::default(),
            show_diff: false,
        }
    }

    pub fn with_policy(mut self, policy: PathPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Log a diff against the previous file content before overwriting.
    pub fn with_diff(mut self, show_diff: bool) -> Self {
        self.show_diff = show_diff;
        self
    }
}

#[async_trait]
impl Applier for FullContentApplier {
    async fn apply(&self, block: &CodeBlock) -> Result<PathBuf, ClipwriteError> {
        let file_path = resolve_target(&self.base_path, &block.relative_path, self.policy)?;
        debug!("Applying full content to file: {}", file_path.display());

        if let Some(parent) = file_path.parent() {
            async_fs::create_dir_all(parent).await.map_err(|e| {
                ClipwriteError::WriteError(parent.display().to_string(), e.to_string())
            })?;
        }

        let original_content = if self.show_diff {
            async_fs::read_to_string(&file_path).await.unwrap_or_default()
        } else {
            String::new()
        };

        async_fs::write(&file_path, block.content.as_bytes())
            .await
            .map_err(|e| {
                ClipwriteError::WriteError(file_path.display().to_string(), e.to_string())
            })?;
        trace!("Wrote {} bytes to {}", block.content.len(), file_path.display());

        if self.show_diff {
            print_diff(&block.relative_path, &original_content, &block.content);
        }
        Ok(file_path)
    }
}
