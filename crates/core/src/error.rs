//! Error types for the snipgrab-core library.
//!
//! This module provides granular error variants for different failure modes,
//! enabling precise error handling and user-friendly error messages.

use thiserror::Error;

/// Errors that can occur within the snipgrab-core library.
///
/// Each variant represents a specific failure mode with contextual information
/// to help diagnose and handle errors appropriately.
#[derive(Error, Debug)]
pub enum SnipError {
    /// The external capture service reported an error.
    ///
    /// Surfaced to the user as a blocking notice; the overlay is kept
    /// alive so the selection can be retried.
    #[error("Capture failed: {0}")]
    Capture(String),

    /// Writing the image payload to the system clipboard failed.
    ///
    /// Recovered locally by presenting the image through the fallback
    /// viewer; never shown to the user as an error.
    #[error("Clipboard write failed: {0}")]
    ClipboardWrite(String),

    /// The selection is below the minimum usable size.
    #[error("Selection area is empty or invalid")]
    DegenerateSelection,

    /// Decoding the captured raster failed.
    #[error("Image decoding failed: {0}")]
    ImageDecode(String),

    /// Encoding the cropped raster failed.
    #[error("Image encoding failed: {0}")]
    ImageEncode(String),

    /// Local screen capture operation failed.
    #[error("Screen capture failed: {0}")]
    ScreenCapture(String),

    /// Requested screen/monitor index was not found.
    #[error("Screen not found: index {0}")]
    ScreenNotFound(usize),

    /// UI-related errors (rendering, window management).
    #[error("UI error: {0}")]
    Ui(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnipError {
    /// Creates a capture-service error with the given message.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Creates a clipboard-write error with the given message.
    pub fn clipboard(msg: impl Into<String>) -> Self {
        Self::ClipboardWrite(msg.into())
    }

    /// Creates an image-decode error with the given message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    /// Creates an image-encode error with the given message.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::ImageEncode(msg.into())
    }

    /// Creates a local screen capture error with the given message.
    pub fn screen(msg: impl Into<String>) -> Self {
        Self::ScreenCapture(msg.into())
    }

    /// Creates a UI error with the given message.
    pub fn ui(msg: impl Into<String>) -> Self {
        Self::Ui(msg.into())
    }
}

/// A convenient alias for Result with [`SnipError`].
pub type Result<T> = std::result::Result<T, SnipError>;
