//! Screen capture functionality.
//!
//! [`ScreenCapturer`] grabs whole monitors through the `screenshots` crate;
//! [`FrozenCapture`] adapts one grabbed frame to the [`CaptureService`]
//! boundary so the pipeline sees the same frame the overlay is drawn over.

use crate::error::{Result, SnipError};
use crate::pipeline::{CaptureService, to_png_data_url};
use image::DynamicImage;
use screenshots::Screen;

/// Screen capturer that provides multi-monitor screenshot capabilities.
pub struct ScreenCapturer {
    screens: Vec<Screen>,
}

impl ScreenCapturer {
    /// Initializes the screen capturer by detecting available screens.
    ///
    /// # Errors
    ///
    /// Returns [`SnipError::ScreenCapture`] if screen enumeration fails or
    /// no screens are detected.
    pub fn new() -> Result<Self> {
        let screens = Screen::all()
            .map_err(|e| SnipError::screen(format!("Failed to enumerate screens: {}", e)))?;

        if screens.is_empty() {
            return Err(SnipError::screen("No screens detected"));
        }

        Ok(Self { screens })
    }

    /// Lists available screens with their dimensions and metadata.
    pub fn list_screens(&self) -> Vec<String> {
        self.screens
            .iter()
            .enumerate()
            .map(|(i, s)| {
                format!(
                    "Monitor {}: {}x{} (scale: {})",
                    i, s.display_info.width, s.display_info.height, s.display_info.scale_factor
                )
            })
            .collect()
    }

    /// Returns the number of available screens.
    pub fn screen_count(&self) -> usize {
        self.screens.len()
    }

    /// Scale factor of a screen (device pixels per logical pixel).
    pub fn scale_factor(&self, index: usize) -> Result<f32> {
        self.screens
            .get(index)
            .map(|s| s.display_info.scale_factor)
            .ok_or(SnipError::ScreenNotFound(index))
    }

    /// Captures a specific screen by its index.
    ///
    /// # Errors
    ///
    /// Returns:
    /// - [`SnipError::ScreenNotFound`] if the index is out of bounds
    /// - [`SnipError::ScreenCapture`] if the capture operation fails
    pub fn capture_screen_by_index(&self, index: usize) -> Result<DynamicImage> {
        let screen = self
            .screens
            .get(index)
            .ok_or(SnipError::ScreenNotFound(index))?;

        let captured = screen
            .capture()
            .map_err(|e| SnipError::screen(format!("Failed to capture screen: {}", e)))?;

        let width = captured.width();
        let height = captured.height();
        let rgba_data = captured.into_raw();

        let img_buffer = image::ImageBuffer::from_raw(width, height, rgba_data)
            .ok_or_else(|| SnipError::screen("Failed to create image buffer"))?;

        Ok(DynamicImage::ImageRgba8(img_buffer))
    }
}

/// A [`CaptureService`] over a frame captured before the overlay opened.
///
/// The overlay freezes the screen at session start; every confirm crops from
/// that frozen frame, so re-confirms are stable and the overlay itself never
/// appears in the crop.
#[derive(Clone)]
pub struct FrozenCapture {
    data_url: String,
}

impl FrozenCapture {
    pub fn new(frame: &DynamicImage) -> Result<Self> {
        Ok(Self {
            data_url: to_png_data_url(frame)?,
        })
    }

    pub fn from_data_url(data_url: String) -> Self {
        Self { data_url }
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }
}

impl CaptureService for FrozenCapture {
    async fn capture_visible(&self) -> Result<String> {
        Ok(self.data_url.clone())
    }
}
