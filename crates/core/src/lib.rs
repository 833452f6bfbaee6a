//! SnipGrab Core Library
//!
//! This library provides the core functionality for the snipgrab region
//! snipping tool: screen capture, an interactive selection overlay, and a
//! capture pipeline that crops the selected region and commits it to the
//! system clipboard as a PNG.
//!
//! # Overview
//!
//! SnipGrab freezes a monitor into a fullscreen overlay, lets the user draw,
//! move, and resize a selection rectangle, and copies the selected region to
//! the clipboard. The library handles:
//!
//! - **Screen Capture**: Multi-monitor support via the [`capture`] module
//! - **Selection Interaction**: Draw/move/resize state machine via [`selection`]
//! - **Scene Layout**: Masks, handles, and toolbar placement via [`scene`]
//! - **Capture Pipeline**: Decode, crop, encode, deliver via [`pipeline`]
//! - **Session Orchestration**: Lifecycle and confirm flow via [`session`]
//! - **User Interface**: Fullscreen egui overlay via [`ui`]
//!
//! # Quick Start
//!
//! The simplest way to use the library is through the [`SnipGrab`] facade:
//!
//! ```ignore
//! use snipgrab_core::SnipGrab;
//!
//! let app = SnipGrab::new()?;
//!
//! // List available monitors
//! for monitor in app.list_monitors() {
//!     println!("{}", monitor);
//! }
//!
//! // Launch interactive snipping on the primary monitor
//! app.run_interactive(0, Default::default())?;
//! ```
//!
//! # Module Structure
//!
//! - [`capture`]: Screen capture functionality
//! - [`clipboard`]: Clipboard sink and fallback file viewer
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Viewport and device-pixel rectangle math
//! - [`pipeline`]: The capture-to-clipboard pipeline
//! - [`prefs`]: Persisted user preferences
//! - [`protocol`]: JSON wire messages for external hosts
//! - [`scene`]: Pure overlay layout computation
//! - [`selection`]: Selection interaction state machine
//! - [`session`]: Session lifecycle orchestration
//! - [`ui`]: The fullscreen overlay host

pub mod capture;
pub mod clipboard;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod prefs;
pub mod protocol;
pub mod scene;
pub mod selection;
pub mod session;
pub mod ui;

// Re-export primary types for convenience
pub use capture::ScreenCapturer;
pub use error::{Result, SnipError};
pub use prefs::Preferences;
pub use ui::OverlayOptions;

use image::DynamicImage;

/// Main entry point for the snipgrab application.
///
/// This struct provides a facade over the various subsystems,
/// handling initialization and orchestration. It's the recommended
/// way to use the library for most use cases.
///
/// # Example
///
/// ```ignore
/// use snipgrab_core::SnipGrab;
///
/// let app = SnipGrab::new()?;
/// app.run_interactive(0, Default::default())?;
/// ```
pub struct SnipGrab {
    capturer: ScreenCapturer,
}

impl SnipGrab {
    /// Creates a new SnipGrab instance.
    ///
    /// # Errors
    ///
    /// Returns an error if screen capture initialization fails
    /// (e.g., no display available).
    pub fn new() -> Result<Self> {
        let capturer = ScreenCapturer::new()?;
        Ok(Self { capturer })
    }

    /// Lists available monitors with their dimensions.
    ///
    /// Returns a vector of human-readable monitor descriptions,
    /// useful for displaying to users or for debugging.
    pub fn list_monitors(&self) -> Vec<String> {
        self.capturer.list_screens()
    }

    /// Returns the number of available monitors.
    pub fn monitor_count(&self) -> usize {
        self.capturer.screen_count()
    }

    /// Captures a specific monitor and launches the interactive overlay.
    ///
    /// This is the main entry point for the snipping workflow. It captures
    /// the specified monitor, displays a fullscreen overlay over the frozen
    /// frame, and lets the user select and copy a region.
    ///
    /// # Arguments
    /// * `monitor_index` - Zero-based index of the monitor to capture
    /// * `options` - Overlay configuration (auto-copy override, click policy)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The monitor index is out of bounds
    /// - Screen capture fails
    /// - UI initialization fails
    pub fn run_interactive(&self, monitor_index: usize, options: OverlayOptions) -> Result<()> {
        let screenshot = self.capturer.capture_screen_by_index(monitor_index)?;
        ui::run_overlay(screenshot, options)
    }

    /// Launches the interactive overlay with a pre-captured image.
    ///
    /// Useful when the image has already been captured (e.g., by a daemon)
    /// or loaded from disk.
    pub fn run_interactive_with_image(
        &self,
        image: DynamicImage,
        options: OverlayOptions,
    ) -> Result<()> {
        ui::run_overlay(image, options)
    }

    /// Captures a screenshot from a specific monitor without UI.
    ///
    /// Useful for headless operation or when you want to process
    /// the image programmatically.
    ///
    /// # Arguments
    /// * `monitor_index` - Zero-based index of the monitor to capture
    pub fn capture(&self, monitor_index: usize) -> Result<DynamicImage> {
        self.capturer.capture_screen_by_index(monitor_index)
    }
}
