//! Painter helpers for the overlay host.
//!
//! Translates the host-agnostic scene geometry into egui painting calls:
//! mask panels, selection border, resize handles, and the coordinate/cursor
//! conversions between the core types and egui's.

use crate::geometry::{Point, Rect, Size};
use crate::scene::{HandlePlacement, MaskPanels};
use crate::session::Cursor;
use eframe::egui;

/// Darkness of the mask panels (0-255). Matches a 45% black overlay.
pub const MASK_ALPHA: u8 = 115;

/// Selection border and handle outline color.
pub const BORDER_COLOR: egui::Color32 = egui::Color32::from_rgb(0x00, 0x78, 0xD4);

pub fn to_egui_rect(rect: Rect) -> egui::Rect {
    egui::Rect::from_min_size(
        egui::pos2(rect.left, rect.top),
        egui::vec2(rect.width, rect.height),
    )
}

pub fn to_point(pos: egui::Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

pub fn to_size(v: egui::Vec2) -> Size {
    Size::new(v.x, v.y)
}

/// Draws the four panels darkening everything outside the selection.
pub fn draw_mask_panels(painter: &egui::Painter, masks: &MaskPanels, alpha: u8) {
    let color = egui::Color32::from_black_alpha(alpha);
    for panel in masks.as_array() {
        painter.rect_filled(to_egui_rect(panel), 0.0, color);
    }
}

/// Draws a border around the selection rectangle.
pub fn draw_selection_border(
    painter: &egui::Painter,
    selection: Rect,
    stroke_width: f32,
    color: egui::Color32,
) {
    painter.rect_stroke(
        to_egui_rect(selection),
        0.0,
        egui::Stroke::new(stroke_width, color),
        egui::StrokeKind::Middle,
    );
}

/// Draws the eight resize handles: white squares with the border color as
/// outline, lightly rounded.
pub fn draw_handles(painter: &egui::Painter, handles: &[HandlePlacement; 8]) {
    for handle in handles {
        let rect = to_egui_rect(handle.rect);
        painter.rect_filled(rect, 2.0, egui::Color32::WHITE);
        painter.rect_stroke(
            rect,
            2.0,
            egui::Stroke::new(2.0, BORDER_COLOR),
            egui::StrokeKind::Inside,
        );
    }
}

/// Maps the scene cursor to egui's cursor icons.
pub fn cursor_icon(cursor: Cursor) -> egui::CursorIcon {
    use crate::selection::HandleId;
    match cursor {
        Cursor::Crosshair => egui::CursorIcon::Crosshair,
        Cursor::Move => egui::CursorIcon::Move,
        Cursor::Arrow => egui::CursorIcon::Default,
        Cursor::Resize(handle) => match handle {
            HandleId::N | HandleId::S => egui::CursorIcon::ResizeVertical,
            HandleId::E | HandleId::W => egui::CursorIcon::ResizeHorizontal,
            HandleId::Nw | HandleId::Se => egui::CursorIcon::ResizeNwSe,
            HandleId::Ne | HandleId::Sw => egui::CursorIcon::ResizeNeSw,
        },
    }
}
