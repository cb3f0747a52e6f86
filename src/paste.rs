use crate::applier::{BatchResult, BatchWriter, DryRunApplier, FullContentApplier};
use crate::errors::ClipwriteError;
use crate::extractor::{Extractor, FencedBlockExtractor};
use crate::paths::PathPolicy;
use crate::source::{resolve_workspace_root, TextSource};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct PasteConfig {
    /// Workspace root. `None` means the current directory.
    pub root: Option<PathBuf>,
    pub path_policy: PathPolicy,
    pub show_diff: bool,
    pub dry_run: bool,
}

#[async_trait]
pub trait ClipboardPaster {
    async fn paste_text(&self, text: &str) -> Result<BatchResult, ClipwriteError>;
}

pub struct BasicClipboardPaster {
    config: PasteConfig,
    extractor: Box<dyn Extractor>,
}

impl BasicClipboardPaster {
    pub fn new(config: PasteConfig) -> Self {
        BasicClipboardPaster {
            config,
            extractor: Box::new(FencedBlockExtractor::new()),
        }
    }

    pub fn with_extractor(mut self, extractor: Box<dyn Extractor>) -> Self {
        self.extractor = extractor;
        self
    }
}

#[async_trait]
impl ClipboardPaster for BasicClipboardPaster {
    async fn paste_text(&self, text: &str) -> Result<BatchResult, ClipwriteError> {
        if text.trim().is_empty() {
            return Err(ClipwriteError::EmptyInput);
        }

        let root = resolve_workspace_root(self.config.root.clone()).await?;

        let blocks = self.extractor.extract(text);
        if blocks.is_empty() {
            return Err(ClipwriteError::NoMatchFound);
        }
        info!("Found {} code block(s) with file paths", blocks.len());

        let result = if self.config.dry_run {
            debug!("Dry run, nothing will be written");
            BatchWriter::new(DryRunApplier::new(&root, self.config.path_policy))
                .write_all(&blocks)
                .await
        } else {
            let applier = FullContentApplier::new(&root)
                .with_policy(self.config.path_policy)
                .with_diff(self.config.show_diff);
            BatchWriter::new(applier).write_all(&blocks).await
        };
        Ok(result)
    }
}

pub async fn paste_from_source(
    config: PasteConfig,
    source: &mut dyn TextSource,
) -> Result<BatchResult, ClipwriteError> {
    let text = source.read_text().await?;
    let paster = BasicClipboardPaster::new(config);
    paster.paste_text(&text).await
}
