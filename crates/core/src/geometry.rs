//! Rectangle and coordinate math for the selection overlay.
//!
//! All interactive geometry lives in viewport (logical/CSS pixel) space as
//! `f32`. Conversion to the raster's native pixel grid happens in exactly one
//! place, [`Rect::to_device_pixels`], so device-pixel-ratio handling cannot
//! drift between call sites.

/// Clamps `v` into `[min, max]`.
pub fn clamp(v: f32, min: f32, max: f32) -> f32 {
    v.max(min).min(max)
}

/// A point in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A size in viewport coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in viewport coordinates.
///
/// Invariant: `width` and `height` are never negative. Rectangles built from
/// arbitrary corner pairs go through [`Rect::from_corners`], which normalizes
/// the corners, so negative extents cannot be stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Builds the normalized bounding box of two arbitrary corner points.
    ///
    /// The user can drag in any of the four directions; this always yields
    /// `left <= right` and `top <= bottom` with non-negative extents.
    pub fn from_corners(a: Point, b: Point) -> Self {
        let left = a.x.min(b.x);
        let top = a.y.min(b.y);
        Self {
            left,
            top,
            width: a.x.max(b.x) - left,
            height: a.y.max(b.y) - top,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// Returns a copy positioned at `(left, top)`, with both axes clamped
    /// independently so the rectangle stays fully inside `bounds`.
    pub fn positioned_within(&self, left: f32, top: f32, bounds: Size) -> Self {
        Self {
            left: clamp(left, 0.0, bounds.width - self.width),
            top: clamp(top, 0.0, bounds.height - self.height),
            width: self.width,
            height: self.height,
        }
    }

    /// Re-clamps the whole rectangle into `bounds`, preserving at least
    /// `min_extent` in each dimension.
    pub fn clamped_to(&self, bounds: Size, min_extent: f32) -> Self {
        let width = clamp(self.width.max(min_extent), min_extent, bounds.width);
        let height = clamp(self.height.max(min_extent), min_extent, bounds.height);
        let left = clamp(self.left, 0.0, bounds.width - width);
        let top = clamp(self.top, 0.0, bounds.height - height);
        Self {
            left,
            top,
            width: clamp(width, min_extent, bounds.width - left),
            height: clamp(height, min_extent, bounds.height - top),
        }
    }

    /// Scales the rectangle to the raster's native pixel grid.
    ///
    /// Each channel is the viewport value multiplied by the device-pixel
    /// ratio, rounded to the nearest integer pixel. This mirrors how the
    /// already-rendered pixels were produced, so the crop is bit-for-bit
    /// rather than resampled.
    pub fn to_device_pixels(&self, device_pixel_ratio: f32) -> PixelRect {
        let px = |v: f32| (v * device_pixel_ratio).round().max(0.0) as u32;
        PixelRect {
            x: px(self.left),
            y: px(self.top),
            w: px(self.width),
            h: px(self.height),
        }
    }
}

/// An integer rectangle on the raster's native pixel grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}
