pub mod applier;
pub mod errors;
pub mod extractor;
pub mod logger;
pub mod paste;
pub mod paths;
pub mod reporting;
pub mod source;
pub mod trie;

pub use applier::{write_all, BatchResult, BatchWriter, WriteOutcome};
pub use errors::ClipwriteError;
pub use extractor::{extract_blocks, CodeBlock};
pub use paste::{paste_from_source, PasteConfig};
pub use paths::PathPolicy;
