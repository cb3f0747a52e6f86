use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipwriteError {
    #[error("Clipboard initialization failed: {0}")]
    ClipboardInitError(String),

    #[error("Clipboard read failed: {0}")]
    ClipboardReadError(String),

    #[error("Clipboard is empty.")]
    EmptyInput,

    #[error("No valid code blocks with file paths found in clipboard.")]
    NoMatchFound,

    #[error("No workspace folder is open: {0}")]
    NoWorkspace(String),

    #[error("Path escapes the workspace root: {0}")]
    PathOutsideRoot(String),

    #[error("Failed to write file {0}: {1}")]
    WriteError(String, String),

    #[error("IO Error: {0}")]
    IoError(String),

    #[error("Serialization Error: {0}")]
    SerializationError(String),
}

impl From<std::io::Error> for ClipwriteError {
    fn from(err: std::io::Error) -> Self {
        ClipwriteError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for ClipwriteError {
    fn from(err: serde_json::Error) -> Self {
        ClipwriteError::SerializationError(err.to_string())
    }
}
