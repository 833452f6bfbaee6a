//! The capture -> decode -> crop -> encode -> commit pipeline.
//!
//! Runs once per confirmed selection. The three host boundaries (capture
//! service, clipboard, fallback viewer) are traits so the pipeline can be
//! exercised against doubles; suspension points sit exactly at the capture
//! request and the clipboard write.
//!
//! A clipboard failure is not an error: the encoded image is handed to the
//! fallback presenter so the user can save it manually, and the run still
//! counts as delivered.

use crate::error::{Result, SnipError};
use crate::geometry::{PixelRect, Rect};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use image::{DynamicImage, ImageFormat, RgbaImage};
use std::io::Cursor;

/// Provides a full-viewport raster snapshot, encoded as a base64 data URL.
///
/// Mirrors the `CAPTURE_VISIBLE` request/response boundary; implementations
/// wrap whatever actually produces the pixels.
#[allow(async_fn_in_trait)]
pub trait CaptureService {
    async fn capture_visible(&self) -> Result<String>;
}

/// Commits a raster image to the system clipboard.
#[allow(async_fn_in_trait)]
pub trait ClipboardSink {
    async fn write_image(&mut self, image: &RgbaImage) -> Result<()>;
}

/// Presents an encoded image for manual saving when the clipboard is
/// unavailable. Returns a short user-facing description of where the image
/// went (e.g. "image saved to /tmp/shot.png").
pub trait FallbackPresenter {
    fn present(&mut self, png: &[u8]) -> Result<String>;
}

/// How a successful pipeline run delivered the crop.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// The image payload landed on the system clipboard.
    Clipboard,
    /// The clipboard refused the write; the image went to the fallback
    /// viewer instead. Carries the presenter's description of where.
    FallbackViewer(String),
}

/// Orchestrates one capture run against the three host boundaries.
pub struct CapturePipeline<C, K, F> {
    capture: C,
    clipboard: K,
    fallback: F,
}

impl<C, K, F> CapturePipeline<C, K, F>
where
    C: CaptureService,
    K: ClipboardSink,
    F: FallbackPresenter,
{
    pub fn new(capture: C, clipboard: K, fallback: F) -> Self {
        Self {
            capture,
            clipboard,
            fallback,
        }
    }

    /// Runs the full pipeline for a confirmed selection.
    ///
    /// The selection is in viewport coordinates; the crop rectangle is the
    /// selection scaled by `device_pixel_ratio` with each channel rounded to
    /// the nearest device pixel.
    ///
    /// # Errors
    ///
    /// - [`SnipError::Capture`] when the capture service reports an error;
    ///   the caller decides whether the session survives.
    /// - [`SnipError::DegenerateSelection`] when the crop has zero area.
    /// - Decode/encode failures for malformed rasters.
    pub async fn run(&mut self, selection: Rect, device_pixel_ratio: f32) -> Result<Delivery> {
        let data_url = self.capture.capture_visible().await?;
        let frame = decode_data_url(&data_url)?;
        let crop = selection.to_device_pixels(device_pixel_ratio);
        let cropped = crop_frame(&frame, crop)?;
        let png = encode_png(&cropped)?;

        match self.clipboard.write_image(&cropped).await {
            Ok(()) => Ok(Delivery::Clipboard),
            Err(err) => {
                log::warn!("clipboard write failed, presenting fallback: {err}");
                let destination = self.fallback.present(&png)?;
                Ok(Delivery::FallbackViewer(destination))
            }
        }
    }
}

/// Decodes a `data:<mime>;base64,` raster payload into pixels.
pub fn decode_data_url(data_url: &str) -> Result<DynamicImage> {
    let payload = data_url
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(_, payload)| payload)
        .ok_or_else(|| SnipError::decode("not a base64 image data URL"))?;

    let bytes = BASE64
        .decode(payload)
        .map_err(|e| SnipError::decode(format!("invalid base64 payload: {e}")))?;

    image::load_from_memory(&bytes)
        .map_err(|e| SnipError::decode(format!("unreadable raster: {e}")))
}

/// Cuts `crop` out of the frame into a new surface sized exactly to the
/// crop, clamped to the frame bounds. The pixels are copied as-is, never
/// resampled.
pub fn crop_frame(frame: &DynamicImage, crop: PixelRect) -> Result<RgbaImage> {
    let x = crop.x.min(frame.width());
    let y = crop.y.min(frame.height());
    let w = crop.w.min(frame.width().saturating_sub(x));
    let h = crop.h.min(frame.height().saturating_sub(y));

    if w == 0 || h == 0 {
        return Err(SnipError::DegenerateSelection);
    }

    Ok(frame.crop_imm(x, y, w, h).to_rgba8())
}

/// Encodes a raster to PNG bytes, the clipboard/fallback payload format.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buffer: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| SnipError::encode(format!("PNG encoding failed: {e}")))?;
    Ok(buffer)
}

/// Encodes a raster as a `data:image/png;base64,` URL, the wire format of
/// the capture boundary.
pub fn to_png_data_url(image: &DynamicImage) -> Result<String> {
    let mut buffer: Vec<u8> = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .map_err(|e| SnipError::encode(format!("PNG encoding failed: {e}")))?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(buffer)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Capture double returning a fixed data URL or a fixed error.
    pub struct FixedCapture {
        pub data_url: Option<String>,
        pub requests: Arc<Mutex<usize>>,
    }

    impl FixedCapture {
        pub fn of_image(image: &DynamicImage) -> Self {
            Self {
                data_url: Some(to_png_data_url(image).unwrap()),
                requests: Arc::new(Mutex::new(0)),
            }
        }

        pub fn failing() -> Self {
            Self {
                data_url: None,
                requests: Arc::new(Mutex::new(0)),
            }
        }

        pub fn request_count(&self) -> usize {
            *self.requests.lock().unwrap()
        }
    }

    impl CaptureService for FixedCapture {
        async fn capture_visible(&self) -> Result<String> {
            *self.requests.lock().unwrap() += 1;
            self.data_url
                .clone()
                .ok_or_else(|| SnipError::capture("service unavailable"))
        }
    }

    /// Clipboard double recording written images, optionally rejecting them.
    /// The record is behind an `Arc` so tests keep a handle after the double
    /// moves into a pipeline.
    #[derive(Clone, Default)]
    pub struct RecordingClipboard {
        pub reject: bool,
        pub images: Arc<Mutex<Vec<RgbaImage>>>,
    }

    impl RecordingClipboard {
        pub fn rejecting() -> Self {
            Self {
                reject: true,
                images: Arc::default(),
            }
        }

        pub fn written(&self) -> Vec<RgbaImage> {
            self.images.lock().unwrap().clone()
        }
    }

    impl ClipboardSink for RecordingClipboard {
        async fn write_image(&mut self, image: &RgbaImage) -> Result<()> {
            if self.reject {
                return Err(SnipError::clipboard("permission denied"));
            }
            self.images.lock().unwrap().push(image.clone());
            Ok(())
        }
    }

    /// Fallback double recording presented payloads.
    #[derive(Clone, Default)]
    pub struct RecordingFallback {
        pub payloads: Arc<Mutex<Vec<Vec<u8>>>>,
    }

    impl RecordingFallback {
        pub fn presented(&self) -> Vec<Vec<u8>> {
            self.payloads.lock().unwrap().clone()
        }
    }

    impl FallbackPresenter for RecordingFallback {
        fn present(&mut self, png: &[u8]) -> Result<String> {
            let detail = format!("image recorded ({} bytes)", png.len());
            self.payloads.lock().unwrap().push(png.to_vec());
            Ok(detail)
        }
    }

    /// A small frame with per-pixel coordinates baked into the channels, so
    /// crops can be checked for exact content.
    pub fn coordinate_frame(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([x as u8, y as u8, 7, 255])
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;

    struct Harness {
        pipeline: CapturePipeline<FixedCapture, RecordingClipboard, RecordingFallback>,
        clipboard: RecordingClipboard,
        fallback: RecordingFallback,
    }

    fn harness(capture: FixedCapture, reject_clipboard: bool) -> Harness {
        let clipboard = if reject_clipboard {
            RecordingClipboard::rejecting()
        } else {
            RecordingClipboard::default()
        };
        let fallback = RecordingFallback::default();
        Harness {
            pipeline: CapturePipeline::new(capture, clipboard.clone(), fallback.clone()),
            clipboard,
            fallback,
        }
    }

    #[test]
    fn data_url_round_trips() {
        let frame = coordinate_frame(8, 6);
        let url = to_png_data_url(&frame).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = decode_data_url(&url).unwrap();
        assert_eq!(decoded.to_rgba8(), frame.to_rgba8());
    }

    #[test]
    fn decode_rejects_non_data_urls() {
        assert!(matches!(
            decode_data_url("https://example.com/shot.png"),
            Err(SnipError::ImageDecode(_))
        ));
        assert!(matches!(
            decode_data_url("data:image/png;base64,@@@"),
            Err(SnipError::ImageDecode(_))
        ));
    }

    #[test]
    fn crop_copies_exact_pixels() {
        let frame = coordinate_frame(32, 24);
        let crop = crop_frame(
            &frame,
            PixelRect {
                x: 4,
                y: 6,
                w: 10,
                h: 8,
            },
        )
        .unwrap();
        assert_eq!((crop.width(), crop.height()), (10, 8));
        assert_eq!(crop.get_pixel(0, 0), &image::Rgba([4, 6, 7, 255]));
        assert_eq!(crop.get_pixel(9, 7), &image::Rgba([13, 13, 7, 255]));
    }

    #[test]
    fn crop_clamps_to_frame_bounds() {
        let frame = coordinate_frame(32, 24);
        let crop = crop_frame(
            &frame,
            PixelRect {
                x: 28,
                y: 20,
                w: 100,
                h: 100,
            },
        )
        .unwrap();
        assert_eq!((crop.width(), crop.height()), (4, 4));
    }

    #[test]
    fn zero_area_crop_is_degenerate() {
        let frame = coordinate_frame(32, 24);
        let err = crop_frame(
            &frame,
            PixelRect {
                x: 40,
                y: 0,
                w: 10,
                h: 10,
            },
        )
        .unwrap_err();
        assert!(matches!(err, SnipError::DegenerateSelection));
    }

    #[tokio::test]
    async fn run_delivers_crop_to_clipboard() {
        let frame = coordinate_frame(200, 160);
        let mut h = harness(FixedCapture::of_image(&frame), false);
        let delivery = h
            .pipeline
            .run(Rect::new(10.0, 20.0, 100.0, 50.0), 1.0)
            .await
            .unwrap();
        assert_eq!(delivery, Delivery::Clipboard);
        let written = h.clipboard.written();
        assert_eq!(written.len(), 1);
        assert_eq!((written[0].width(), written[0].height()), (100, 50));
        assert_eq!(written[0].get_pixel(0, 0), &image::Rgba([10, 20, 7, 255]));
        assert!(h.fallback.presented().is_empty());
    }

    #[tokio::test]
    async fn run_scales_crop_by_device_pixel_ratio() {
        let frame = coordinate_frame(240, 160);
        let mut h = harness(FixedCapture::of_image(&frame), false);
        h.pipeline
            .run(Rect::new(10.0, 20.0, 100.0, 50.0), 2.0)
            .await
            .unwrap();
        let written = h.clipboard.written();
        assert_eq!((written[0].width(), written[0].height()), (200, 100));
        assert_eq!(written[0].get_pixel(0, 0), &image::Rgba([20, 40, 7, 255]));
    }

    #[tokio::test]
    async fn clipboard_failure_falls_back_without_error() {
        let frame = coordinate_frame(100, 80);
        let mut h = harness(FixedCapture::of_image(&frame), true);
        let delivery = h
            .pipeline
            .run(Rect::new(0.0, 0.0, 50.0, 40.0), 1.0)
            .await
            .unwrap();
        assert!(matches!(delivery, Delivery::FallbackViewer(_)));
        let presented = h.fallback.presented();
        assert_eq!(presented.len(), 1);
        // The fallback payload is a decodable PNG of the crop
        let png = image::load_from_memory(&presented[0]).unwrap();
        assert_eq!((png.width(), png.height()), (50, 40));
    }

    #[tokio::test]
    async fn capture_failure_surfaces_as_error() {
        let mut h = harness(FixedCapture::failing(), false);
        let err = h
            .pipeline
            .run(Rect::new(0.0, 0.0, 50.0, 40.0), 1.0)
            .await
            .unwrap_err();
        assert!(matches!(err, SnipError::Capture(_)));
        assert!(h.clipboard.written().is_empty());
        assert!(h.fallback.presented().is_empty());
    }
}
