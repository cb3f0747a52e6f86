use serde::Serialize;

pub mod fenced;

pub use fenced::FencedBlockExtractor;

/// A fenced code block whose first line names the file it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub relative_path: String,
    pub content: String,
}

impl CodeBlock {
    pub fn new(relative_path: impl Into<String>, content: impl Into<String>) -> Self {
        CodeBlock {
            relative_path: relative_path.into(),
            content: content.into(),
        }
    }
}

/// Scans a blob of text for path-annotated code blocks.
///
/// Extraction never fails: text without any matching block yields an empty
/// vector. Blocks come back in document order.
pub trait Extractor: Send + Sync {
    fn extract(&self, text: &str) -> Vec<CodeBlock>;
}

pub fn extract_blocks(text: &str) -> Vec<CodeBlock> {
    FencedBlockExtractor::new().extract(text)
}
