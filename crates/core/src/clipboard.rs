//! System clipboard and fallback delivery.
//!
//! [`SystemClipboard`] commits image payloads through `arboard`;
//! [`FilePresenter`] is the fallback surface used when the clipboard refuses
//! the write: the encoded PNG goes to a file the user can open and save.

use crate::error::{Result, SnipError};
use crate::pipeline::{ClipboardSink, FallbackPresenter};
use image::RgbaImage;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Clipboard sink backed by the OS clipboard.
///
/// Construction never fails; when the clipboard cannot be reached (headless
/// session, denied access) every write reports [`SnipError::ClipboardWrite`]
/// and the pipeline takes its fallback path.
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(e) => {
                log::warn!("clipboard unavailable: {e}");
                None
            }
        };
        Self { inner }
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipboardSink for SystemClipboard {
    async fn write_image(&mut self, image: &RgbaImage) -> Result<()> {
        let clipboard = self
            .inner
            .as_mut()
            .ok_or_else(|| SnipError::clipboard("clipboard unavailable"))?;
        let payload = arboard::ImageData {
            width: image.width() as usize,
            height: image.height() as usize,
            bytes: Cow::Borrowed(image.as_raw()),
        };
        clipboard
            .set_image(payload)
            .map_err(|e| SnipError::clipboard(e.to_string()))
    }
}

/// Fallback presenter writing the PNG next to the user's temp files.
pub struct FilePresenter {
    dir: PathBuf,
    last_path: Option<PathBuf>,
}

impl FilePresenter {
    pub fn new() -> Self {
        Self::in_dir(std::env::temp_dir())
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last_path: None,
        }
    }

    /// Where the most recent fallback image landed.
    pub fn last_path(&self) -> Option<&Path> {
        self.last_path.as_deref()
    }

    fn next_path(&self) -> PathBuf {
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        self.dir.join(format!("snipgrab-{stamp}.png"))
    }
}

impl Default for FilePresenter {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackPresenter for FilePresenter {
    fn present(&mut self, png: &[u8]) -> Result<String> {
        let path = self.next_path();
        fs::write(&path, png)?;
        log::info!("clipboard unavailable, image saved to {}", path.display());
        let detail = format!("image saved to {}", path.display());
        self.last_path = Some(path);
        Ok(detail)
    }
}
