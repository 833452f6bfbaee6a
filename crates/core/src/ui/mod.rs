//! User interface components for snipgrab.
//!
//! This module provides the fullscreen selection overlay: the screen is
//! frozen into a background texture and the user draws, moves, and resizes a
//! selection rectangle over it, then confirms to copy the region to the
//! clipboard.
//!
//! # Architecture
//!
//! The UI is split into focused submodules:
//! - [`rendering`]: Drawing utilities for masks, borders, and handles
//! - [`overlay`]: The eframe application hosting the session
//!
//! # Usage
//!
//! ```ignore
//! use snipgrab_core::ui::{self, OverlayOptions};
//!
//! let screenshot = capture_screen()?;
//! ui::run_overlay(screenshot, OverlayOptions::default())?;
//! ```

mod overlay;
mod rendering;

pub use overlay::OverlayOptions;

use crate::error::Result;
use image::DynamicImage;

/// Launches the fullscreen overlay over a frozen screen frame and blocks
/// until the session ends (Escape, Cancel, or a non-persistent confirm).
pub fn run_overlay(screenshot: DynamicImage, options: OverlayOptions) -> Result<()> {
    overlay::run(screenshot, options)
}
