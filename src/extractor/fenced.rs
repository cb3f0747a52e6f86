use super::{CodeBlock, Extractor};
use std::ops::Range;
use tracing::{debug, trace, warn};

const FENCE: &str = "```";
const PATH_MARKER: &str = "//";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    SeekOpenFence,
    ReadPathLine {
        fence_start: usize,
        line_start: usize,
    },
    ReadContentUntilCloseFence {
        fence_start: usize,
        path_start: usize,
        path_end: usize,
        content_start: usize,
    },
}

/// A block as it appears in the source text. `path` is already trimmed but may be empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBlock<'a> {
    pub path: &'a str,
    pub content: &'a str,
    /// Byte range from the opening fence through the closing fence.
    pub span: Range<usize>,
}

/// Left-to-right scanner over fenced blocks whose first line is a `//` path comment.
///
/// A candidate opener that is not followed by a path line is abandoned and the
/// scan resumes one byte past its first backtick, so a closing fence can itself
/// open the next block. Content ends at the first fence after the path line.
pub struct FenceScanner<'a> {
    text: &'a str,
    cursor: usize,
}

impl<'a> FenceScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        FenceScanner { text, cursor: 0 }
    }

    /// Returns the start of the line after the opener, if the opener is
    /// three backticks, an optional `[A-Za-z0-9_-]` tag and a line break.
    fn opener_line_end(&self, fence_start: usize) -> Option<usize> {
        let bytes = self.text.as_bytes();
        let mut i = fence_start + FENCE.len();
        while i < bytes.len()
            && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_' || bytes[i] == b'-')
        {
            i += 1;
        }
        match bytes.get(i) {
            Some(b'\n') => Some(i + 1),
            Some(b'\r') if bytes.get(i + 1) == Some(&b'\n') => Some(i + 2),
            _ => None,
        }
    }

    /// Locates the path comment, skipping blank lines, and returns
    /// `(path_start, path_end, content_start)`.
    fn path_line(&self, line_start: usize) -> Option<(usize, usize, usize)> {
        let rest = &self.text[line_start..];
        let marker = line_start + (rest.len() - rest.trim_start().len());
        if !self.text[marker..].starts_with(PATH_MARKER) {
            return None;
        }

        let path_start = marker + PATH_MARKER.len();
        let newline = path_start + self.text[path_start..].find('\n')?;
        let path_end = if newline > path_start && self.text.as_bytes()[newline - 1] == b'\r' {
            newline - 1
        } else {
            newline
        };
        // A lone carriage return cannot appear inside a path line.
        if self.text[path_start..path_end].contains('\r') {
            return None;
        }
        Some((path_start, path_end, newline + 1))
    }
}

impl<'a> Iterator for FenceScanner<'a> {
    type Item = RawBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        let mut state = ScanState::SeekOpenFence;
        loop {
            state = match state {
                ScanState::SeekOpenFence => {
                    let Some(offset) = text[self.cursor..].find(FENCE) else {
                        self.cursor = text.len();
                        return None;
                    };
                    let fence_start = self.cursor + offset;
                    match self.opener_line_end(fence_start) {
                        Some(line_start) => ScanState::ReadPathLine {
                            fence_start,
                            line_start,
                        },
                        None => {
                            self.cursor = fence_start + 1;
                            ScanState::SeekOpenFence
                        }
                    }
                }
                ScanState::ReadPathLine {
                    fence_start,
                    line_start,
                } => match self.path_line(line_start) {
                    Some((path_start, path_end, content_start)) => {
                        ScanState::ReadContentUntilCloseFence {
                            fence_start,
                            path_start,
                            path_end,
                            content_start,
                        }
                    }
                    None => {
                        trace!("Fence at byte {} has no path line", fence_start);
                        self.cursor = fence_start + 1;
                        ScanState::SeekOpenFence
                    }
                },
                ScanState::ReadContentUntilCloseFence {
                    fence_start,
                    path_start,
                    path_end,
                    content_start,
                } => {
                    let Some(offset) = text[content_start..].find(FENCE) else {
                        trace!("Unclosed block starting at byte {}", fence_start);
                        self.cursor = text.len();
                        return None;
                    };
                    let close = content_start + offset;
                    self.cursor = close + FENCE.len();
                    return Some(RawBlock {
                        path: text[path_start..path_end].trim(),
                        content: &text[content_start..close],
                        span: fence_start..self.cursor,
                    });
                }
            };
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FencedBlockExtractor;

impl FencedBlockExtractor {
    pub fn new() -> Self {
        debug!("Initializing FencedBlockExtractor");
        FencedBlockExtractor
    }
}

impl Extractor for FencedBlockExtractor {
    fn extract(&self, text: &str) -> Vec<CodeBlock> {
        let start_time = std::time::Instant::now();
        debug!("Scanning {} bytes for path-annotated code blocks", text.len());

        let mut blocks = Vec::new();
        for raw in FenceScanner::new(text) {
            if raw.path.is_empty() {
                warn!(
                    "Skipping code block at byte {} with an empty path line",
                    raw.span.start
                );
                continue;
            }
            trace!(
                "Found block for {} ({} bytes of content)",
                raw.path,
                raw.content.len()
            );
            blocks.push(CodeBlock::new(raw.path, raw.content));
        }

        debug!(
            "Extraction complete. Found {} blocks in {:?}",
            blocks.len(),
            start_time.elapsed()
        );
        blocks
    }
}
