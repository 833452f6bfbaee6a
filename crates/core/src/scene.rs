//! Pure scene layout for the selection overlay.
//!
//! Given a selection rectangle and the viewport size, computes the four mask
//! panels darkening everything outside the selection, the eight resize-handle
//! rectangles, and the toolbar placement. This module holds no state; hosts
//! feed the resulting [`SceneLayout`] to whatever actually draws.

use crate::geometry::{Rect, Size, clamp};
use crate::selection::{HANDLE_SIZE, HandleId};

/// Minimum gap kept between the toolbar and every viewport edge.
pub const TOOLBAR_MARGIN: f32 = 8.0;

/// The four rectangles that darken the viewport outside the selection.
///
/// Invariant: the four panels plus the selection tile the viewport exactly,
/// with no gap and no overlap. The top and bottom panels span the full
/// viewport width; the left and right panels span the selection's vertical
/// extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaskPanels {
    pub top: Rect,
    pub left: Rect,
    pub right: Rect,
    pub bottom: Rect,
}

impl MaskPanels {
    pub fn as_array(&self) -> [Rect; 4] {
        [self.top, self.left, self.right, self.bottom]
    }
}

/// One resize handle, placed so it is centered on its border anchor point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandlePlacement {
    pub id: HandleId,
    pub rect: Rect,
}

/// Everything a host needs to draw one frame of the overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneLayout {
    pub selection: Rect,
    pub masks: MaskPanels,
    pub handles: [HandlePlacement; 8],
    pub toolbar: Rect,
}

/// Computes the full overlay layout for a selection within a viewport.
pub fn layout(selection: Rect, viewport: Size, toolbar_size: Size) -> SceneLayout {
    SceneLayout {
        selection,
        masks: mask_panels(selection, viewport),
        handles: handle_placements(selection),
        toolbar: toolbar_rect(selection, viewport, toolbar_size),
    }
}

/// Tiles the viewport minus the selection with four panels.
pub fn mask_panels(selection: Rect, viewport: Size) -> MaskPanels {
    MaskPanels {
        top: Rect::new(0.0, 0.0, viewport.width, selection.top),
        left: Rect::new(0.0, selection.top, selection.left, selection.height),
        right: Rect::new(
            selection.right(),
            selection.top,
            viewport.width - selection.right(),
            selection.height,
        ),
        bottom: Rect::new(
            0.0,
            selection.bottom(),
            viewport.width,
            viewport.height - selection.bottom(),
        ),
    }
}

/// Places the eight handles centered on their anchor points.
pub fn handle_placements(selection: Rect) -> [HandlePlacement; 8] {
    let half = HANDLE_SIZE / 2.0;
    HandleId::ALL.map(|id| {
        let anchor = id.anchor(selection);
        HandlePlacement {
            id,
            rect: Rect::new(anchor.x - half, anchor.y - half, HANDLE_SIZE, HANDLE_SIZE),
        }
    })
}

/// Positions the toolbar immediately above the selection's top-left corner,
/// clamped so it never overflows any viewport edge. When there is no room
/// above, the same clamp pulls it down into view.
pub fn toolbar_rect(selection: Rect, viewport: Size, toolbar_size: Size) -> Rect {
    let left = clamp(
        selection.left,
        TOOLBAR_MARGIN,
        viewport.width - toolbar_size.width - TOOLBAR_MARGIN,
    );
    let top = clamp(
        selection.top - toolbar_size.height - TOOLBAR_MARGIN,
        TOOLBAR_MARGIN,
        viewport.height - toolbar_size.height - TOOLBAR_MARGIN,
    );
    Rect::new(left, top, toolbar_size.width, toolbar_size.height)
}
