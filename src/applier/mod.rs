use crate::errors::ClipwriteError;
use crate::extractor::CodeBlock;
use crate::paths::PathPolicy;
use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

pub mod dry_run_applier;
pub mod full_content_applier;
pub mod utils;

pub use dry_run_applier::DryRunApplier;
pub use full_content_applier::FullContentApplier;

/// Materializes one block. Returns the resolved path on success.
#[async_trait]
pub trait Applier: Send + Sync {
    async fn apply(&self, block: &CodeBlock) -> Result<PathBuf, ClipwriteError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteOutcome {
    pub relative_path: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    pub bytes_written: usize,
}

impl WriteOutcome {
    pub fn succeeded(relative_path: &str, bytes_written: usize) -> Self {
        WriteOutcome {
            relative_path: relative_path.to_string(),
            success: true,
            error_message: None,
            bytes_written,
        }
    }

    pub fn failed(relative_path: &str, error_message: impl Into<String>) -> Self {
        WriteOutcome {
            relative_path: relative_path.to_string(),
            success: false,
            error_message: Some(error_message.into()),
            bytes_written: 0,
        }
    }
}

/// Outcomes of one batch, one entry per input block, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub processed_count: usize,
    pub outcomes: Vec<WriteOutcome>,
}

impl BatchResult {
    pub fn record(&mut self, outcome: WriteOutcome) {
        if outcome.success {
            self.processed_count += 1;
        }
        self.outcomes.push(outcome);
    }

    pub fn failures(&self) -> impl Iterator<Item = &WriteOutcome> {
        self.outcomes.iter().filter(|outcome| !outcome.success)
    }

    pub fn has_failures(&self) -> bool {
        self.processed_count < self.outcomes.len()
    }
}

/// Runs an [`Applier`] over a batch of blocks, one at a time.
///
/// A failing block is recorded and the batch moves on; nothing that happens
/// to one block stops the others.
pub struct BatchWriter<A: Applier> {
    applier: A,
}

impl<A: Applier> BatchWriter<A> {
    pub fn new(applier: A) -> Self {
        BatchWriter { applier }
    }

    pub async fn write_all(&self, blocks: &[CodeBlock]) -> BatchResult {
        let start_time = std::time::Instant::now();
        let mut result = BatchResult::default();

        for block in blocks {
            match self.applier.apply(block).await {
                Ok(full_path) => {
                    debug!("Wrote {} to {:?}", block.relative_path, full_path);
                    result.record(WriteOutcome::succeeded(
                        &block.relative_path,
                        block.content.len(),
                    ));
                }
                Err(err) => {
                    error!("Error writing file {}: {}", block.relative_path, err);
                    result.record(WriteOutcome::failed(&block.relative_path, err.to_string()));
                }
            }
        }

        debug!(
            "Batch complete: {}/{} blocks written in {:?}",
            result.processed_count,
            result.outcomes.len(),
            start_time.elapsed()
        );
        result
    }
}

pub async fn write_all(root: &Path, blocks: &[CodeBlock], policy: PathPolicy) -> BatchResult {
    let writer = BatchWriter::new(FullContentApplier::new(root).with_policy(policy));
    writer.write_all(blocks).await
}
