//! Pointer-driven selection state machine.
//!
//! Owns the current interaction mode and the selection rectangle, consumes
//! pointer events, and hands back rectangle updates. It knows nothing about
//! rendering or capture; the session controller wires those in.

use crate::geometry::{Point, Rect, Size, clamp};

/// Final rectangle dimensions below this (in viewport px) discard the draw.
pub const MIN_SELECTION_SIZE: f32 = 3.0;

/// Resizing never shrinks an edge below this.
pub const MIN_RESIZE_EXTENT: f32 = 1.0;

/// Square hit area (and visual size) of a resize handle, centered on its
/// anchor point.
pub const HANDLE_SIZE: f32 = 10.0;

/// Exclusive interaction modes; exactly one is active at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InteractionMode {
    #[default]
    Idle,
    Drawing,
    Moving,
    Resizing,
}

/// The eight compass handles on the selection border.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleId {
    N,
    S,
    E,
    W,
    Ne,
    Nw,
    Se,
    Sw,
}

impl HandleId {
    pub const ALL: [HandleId; 8] = [
        HandleId::Nw,
        HandleId::N,
        HandleId::Ne,
        HandleId::E,
        HandleId::Se,
        HandleId::S,
        HandleId::Sw,
        HandleId::W,
    ];

    /// Whether this handle moves the north edge (`top` and `height`).
    pub fn north(self) -> bool {
        matches!(self, HandleId::N | HandleId::Ne | HandleId::Nw)
    }

    pub fn south(self) -> bool {
        matches!(self, HandleId::S | HandleId::Se | HandleId::Sw)
    }

    pub fn east(self) -> bool {
        matches!(self, HandleId::E | HandleId::Ne | HandleId::Se)
    }

    /// Whether this handle moves the west edge (`left` and `width`).
    pub fn west(self) -> bool {
        matches!(self, HandleId::W | HandleId::Nw | HandleId::Sw)
    }

    /// CSS cursor name for a pointer hovering this handle.
    pub fn cursor_name(self) -> &'static str {
        match self {
            HandleId::N | HandleId::S => "ns-resize",
            HandleId::E | HandleId::W => "ew-resize",
            HandleId::Nw | HandleId::Se => "nwse-resize",
            HandleId::Ne | HandleId::Sw => "nesw-resize",
        }
    }

    /// Anchor point of this handle on the selection border: edge midpoints
    /// for the cardinal handles, corners for the diagonal ones.
    pub fn anchor(self, selection: Rect) -> Point {
        let cx = selection.left + selection.width / 2.0;
        let cy = selection.top + selection.height / 2.0;
        match self {
            HandleId::N => Point::new(cx, selection.top),
            HandleId::S => Point::new(cx, selection.bottom()),
            HandleId::E => Point::new(selection.right(), cy),
            HandleId::W => Point::new(selection.left, cy),
            HandleId::Nw => Point::new(selection.left, selection.top),
            HandleId::Ne => Point::new(selection.right(), selection.top),
            HandleId::Se => Point::new(selection.right(), selection.bottom()),
            HandleId::Sw => Point::new(selection.left, selection.bottom()),
        }
    }
}

/// What a pointer-down lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    Handle(HandleId),
    SelectionBody,
    Backdrop,
}

/// Policy for a pointer-down that starts on an existing selection's body.
///
/// The two observed behaviors for this interaction differ (one redraws from
/// scratch, the other moves the selection), so it is a configuration knob
/// rather than a hardcoded choice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BodyClickPolicy {
    /// Body clicks grab and move the selection.
    #[default]
    MoveSelection,
    /// Body clicks discard the selection and start a new draw.
    RedrawSelection,
}

/// Outcome of a pointer-up event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerUp {
    /// No interaction was active.
    Ignored,
    /// A draw ended below [`MIN_SELECTION_SIZE`]; the rectangle was discarded.
    DiscardedDraw,
    /// A draw ended with a kept selection.
    FinishedDraw(Rect),
    FinishedMove(Rect),
    FinishedResize(Rect),
}

/// The selection-overlay interaction state machine.
///
/// State transitions (see [`InteractionMode`]):
/// - `Idle -> Drawing -> Idle`, keeping or discarding the rectangle by size;
/// - `Idle -> Moving -> Idle` and `Idle -> Resizing -> Idle`, only reachable
///   while a selection exists.
///
/// A fresh pointer-down on the backdrop always starts a new draw, discarding
/// the prior rectangle.
#[derive(Debug)]
pub struct SelectionMachine {
    viewport: Size,
    policy: BodyClickPolicy,
    mode: InteractionMode,
    rect: Option<Rect>,
    /// Drawing: the fixed corner opposite the pointer.
    anchor: Point,
    /// Moving: pointer offset within the rectangle at grab time.
    grab_offset: Point,
    /// Resizing: previous pointer position, for incremental deltas.
    last_pointer: Point,
    active_handle: Option<HandleId>,
}

impl SelectionMachine {
    pub fn new(viewport: Size, policy: BodyClickPolicy) -> Self {
        Self {
            viewport,
            policy,
            mode: InteractionMode::Idle,
            rect: None,
            anchor: Point::default(),
            grab_offset: Point::default(),
            last_pointer: Point::default(),
            active_handle: None,
        }
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn active_handle(&self) -> Option<HandleId> {
        self.active_handle
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Resolves what a pointer position lands on. Handles win over the body,
    /// which wins over the backdrop; without a selection everything is
    /// backdrop.
    pub fn hit_test(&self, p: Point) -> PointerTarget {
        let Some(rect) = self.rect else {
            return PointerTarget::Backdrop;
        };
        for id in HandleId::ALL {
            let anchor = id.anchor(rect);
            let half = HANDLE_SIZE / 2.0;
            let hit = Rect::new(anchor.x - half, anchor.y - half, HANDLE_SIZE, HANDLE_SIZE);
            if hit.contains(p) {
                return PointerTarget::Handle(id);
            }
        }
        if rect.contains(p) {
            PointerTarget::SelectionBody
        } else {
            PointerTarget::Backdrop
        }
    }

    /// Pointer-down: enters `Resizing` on a handle, `Moving` on the body
    /// (subject to [`BodyClickPolicy`]), otherwise starts a new `Drawing`
    /// with the rectangle collapsed to zero size at the anchor.
    pub fn pointer_down(&mut self, p: Point) {
        let mut target = self.hit_test(p);
        if target == PointerTarget::SelectionBody && self.policy == BodyClickPolicy::RedrawSelection
        {
            target = PointerTarget::Backdrop;
        }
        match target {
            PointerTarget::Handle(id) => {
                self.mode = InteractionMode::Resizing;
                self.active_handle = Some(id);
                self.last_pointer = p;
            }
            PointerTarget::SelectionBody => {
                // rect is present, or hit_test would have said Backdrop
                let rect = self.rect.unwrap_or_default();
                self.mode = InteractionMode::Moving;
                self.grab_offset = Point::new(p.x - rect.left, p.y - rect.top);
            }
            PointerTarget::Backdrop => {
                let p = self.bounded(p);
                self.mode = InteractionMode::Drawing;
                self.anchor = p;
                self.rect = Some(Rect::new(p.x, p.y, 0.0, 0.0));
            }
        }
    }

    /// Pointer-move: updates the rectangle for the active mode and returns
    /// the new rectangle, or `None` when idle.
    pub fn pointer_move(&mut self, p: Point) -> Option<Rect> {
        match self.mode {
            InteractionMode::Idle => None,
            InteractionMode::Drawing => {
                // Pointer grabs can report positions past the window while
                // the button is held; the draw never leaves the viewport.
                let rect = Rect::from_corners(self.anchor, self.bounded(p));
                self.rect = Some(rect);
                Some(rect)
            }
            InteractionMode::Moving => {
                let rect = self.rect?;
                let moved = rect.positioned_within(
                    p.x - self.grab_offset.x,
                    p.y - self.grab_offset.y,
                    self.viewport,
                );
                self.rect = Some(moved);
                Some(moved)
            }
            InteractionMode::Resizing => {
                let rect = self.rect?;
                let handle = self.active_handle?;
                let resized = self.resize_step(rect, handle, p);
                self.last_pointer = p;
                self.rect = Some(resized);
                Some(resized)
            }
        }
    }

    fn bounded(&self, p: Point) -> Point {
        Point::new(
            clamp(p.x, 0.0, self.viewport.width),
            clamp(p.y, 0.0, self.viewport.height),
        )
    }

    /// One incremental resize step. Deltas are taken since the previous
    /// pointer-move, not since the original anchor, so the dragged edge
    /// tracks the cursor exactly.
    fn resize_step(&self, rect: Rect, handle: HandleId, p: Point) -> Rect {
        let dx = p.x - self.last_pointer.x;
        let dy = p.y - self.last_pointer.y;

        let mut left = rect.left;
        let mut top = rect.top;
        let mut width = rect.width;
        let mut height = rect.height;

        if handle.east() {
            width = (width + dx).max(MIN_RESIZE_EXTENT);
        }
        if handle.south() {
            height = (height + dy).max(MIN_RESIZE_EXTENT);
        }
        if handle.west() {
            width = (width - dx).max(MIN_RESIZE_EXTENT);
            left += dx;
        }
        if handle.north() {
            height = (height - dy).max(MIN_RESIZE_EXTENT);
            top += dy;
        }

        left = clamp(left, 0.0, self.viewport.width - width);
        top = clamp(top, 0.0, self.viewport.height - height);
        width = clamp(width, MIN_RESIZE_EXTENT, self.viewport.width - left);
        height = clamp(height, MIN_RESIZE_EXTENT, self.viewport.height - top);

        Rect::new(left, top, width, height)
    }

    /// Pointer-up: returns to `Idle`. A finished draw below
    /// [`MIN_SELECTION_SIZE`] in either dimension discards the rectangle.
    pub fn pointer_up(&mut self, _p: Point) -> PointerUp {
        let mode = std::mem::take(&mut self.mode);
        match mode {
            InteractionMode::Idle => PointerUp::Ignored,
            InteractionMode::Drawing => match self.rect {
                Some(rect)
                    if rect.width >= MIN_SELECTION_SIZE && rect.height >= MIN_SELECTION_SIZE =>
                {
                    PointerUp::FinishedDraw(rect)
                }
                _ => {
                    self.rect = None;
                    PointerUp::DiscardedDraw
                }
            },
            InteractionMode::Moving => match self.rect {
                Some(rect) => PointerUp::FinishedMove(rect),
                None => PointerUp::Ignored,
            },
            InteractionMode::Resizing => {
                self.active_handle = None;
                match self.rect {
                    Some(rect) => PointerUp::FinishedResize(rect),
                    None => PointerUp::Ignored,
                }
            }
        }
    }

    /// Drops the selection and any in-progress interaction.
    pub fn reset(&mut self) {
        self.mode = InteractionMode::Idle;
        self.rect = None;
        self.active_handle = None;
    }
}
