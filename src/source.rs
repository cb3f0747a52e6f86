use crate::errors::ClipwriteError;
use arboard::{Clipboard, Error as ArboardError};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs as async_fs;
use tokio::io::AsyncReadExt;
use tracing::debug;

/// Supplies the raw text a paste operates on.
///
/// Futures are not required to be `Send`: the system clipboard handle is not
/// `Send` on every platform.
#[async_trait(?Send)]
pub trait TextSource {
    async fn read_text(&mut self) -> Result<String, ClipwriteError>;
}

pub struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, ClipwriteError> {
        debug!("Initializing clipboard");
        let clipboard =
            Clipboard::new().map_err(|e| ClipwriteError::ClipboardInitError(e.to_string()))?;
        Ok(SystemClipboard { clipboard })
    }
}

#[async_trait(?Send)]
impl TextSource for SystemClipboard {
    async fn read_text(&mut self) -> Result<String, ClipwriteError> {
        match self.clipboard.get_text() {
            Ok(text) => {
                debug!("Read {} bytes from clipboard", text.len());
                Ok(text)
            }
            // Nothing (or nothing textual) on the clipboard.
            Err(ArboardError::ContentNotAvailable) => Ok(String::new()),
            Err(e) => Err(ClipwriteError::ClipboardReadError(e.to_string())),
        }
    }
}

pub struct StdinSource;

#[async_trait(?Send)]
impl TextSource for StdinSource {
    async fn read_text(&mut self) -> Result<String, ClipwriteError> {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        debug!("Read {} bytes from stdin", text.len());
        Ok(text)
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }
}

#[async_trait(?Send)]
impl TextSource for FileSource {
    async fn read_text(&mut self) -> Result<String, ClipwriteError> {
        let text = async_fs::read_to_string(&self.path).await?;
        debug!("Read {} bytes from {}", text.len(), self.path.display());
        Ok(text)
    }
}

/// Fixed text, for embedding and tests.
pub struct StaticText(pub String);

#[async_trait(?Send)]
impl TextSource for StaticText {
    async fn read_text(&mut self) -> Result<String, ClipwriteError> {
        Ok(self.0.clone())
    }
}

/// Picks the workspace root: the explicit one if given, else the current directory.
pub async fn resolve_workspace_root(root: Option<PathBuf>) -> Result<PathBuf, ClipwriteError> {
    let root = match root {
        Some(root) => root,
        None => std::env::current_dir().map_err(|e| ClipwriteError::NoWorkspace(e.to_string()))?,
    };

    let is_dir = async_fs::metadata(&root)
        .await
        .map(|metadata| metadata.is_dir())
        .unwrap_or(false);
    if !is_dir {
        return Err(ClipwriteError::NoWorkspace(format!(
            "{} is not a directory",
            root.display()
        )));
    }
    debug!("Using workspace root: {}", root.display());
    Ok(root)
}
