//! Session lifecycle and orchestration.
//!
//! The [`SessionController`] owns the one live snip session: it feeds input
//! into the [`SelectionMachine`], pushes recomputed layouts at the scene,
//! hands out confirm tickets for the capture pipeline, and guards against
//! re-entrant starts and overlapping pipeline runs.
//!
//! Pipeline completions may arrive after the session they belong to was torn
//! down (Escape does not abort an in-flight capture). Every ticket carries
//! the session generation; [`SessionController::finish_confirm`] drops stale
//! completions silently instead of touching a dead scene.

use crate::error::Result;
use crate::geometry::{Point, Rect, Size};
use crate::pipeline::{CapturePipeline, CaptureService, ClipboardSink, Delivery, FallbackPresenter};
use crate::prefs::Preferences;
use crate::scene::{self, SceneLayout};
use crate::selection::{BodyClickPolicy, HandleId, InteractionMode, PointerUp, SelectionMachine};
use std::time::Duration;

/// Delay between a draw-ending mouseup and the auto-copy confirm, so the
/// pointer-up finishes propagating before any side effects run.
pub const AUTO_COPY_DELAY: Duration = Duration::from_millis(30);

/// How long the "copied" toast stays up.
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

/// Confirm is refused for selections smaller than this in either dimension.
pub const MIN_CONFIRM_SIZE: f32 = 2.0;

/// Toast shown after a successful clipboard commit.
pub const COPIED_TOAST: &str = "Copied to clipboard";

/// Pointer cursor the scene should show.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Cursor {
    #[default]
    Crosshair,
    Move,
    Resize(HandleId),
    Arrow,
}

impl Cursor {
    /// CSS cursor name, for hosts addressed in web terms.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Move => "move",
            Cursor::Resize(handle) => handle.cursor_name(),
            Cursor::Arrow => "default",
        }
    }
}

/// One frame of overlay state for the scene to draw.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SceneFrame {
    /// Mask/handle/toolbar layout; `None` before the first draw.
    pub layout: Option<SceneLayout>,
    pub toolbar_visible: bool,
    pub cursor: Cursor,
}

impl SceneFrame {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Minimal capability interface the host's rendering surface implements.
///
/// Keeps the state machine and renderer host-agnostic: the controller only
/// ever pushes frames, notices, and toasts through this seam.
pub trait SceneSurface {
    /// Measured toolbar size, needed for toolbar placement.
    fn toolbar_size(&self) -> Size;
    /// Replaces the displayed overlay state.
    fn apply(&mut self, frame: &SceneFrame);
    /// Removes all overlay state; the session is gone.
    fn clear(&mut self);
    /// Transient confirmation message.
    fn show_toast(&mut self, message: &str);
    /// Blocking failure notice; the overlay stays up behind it.
    fn show_notice(&mut self, message: &str);
}

/// Everything the pipeline needs for one confirm, snapshotted at request
/// time. The generation ties the eventual completion back to the session
/// that issued it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfirmTicket {
    pub selection: Rect,
    pub device_pixel_ratio: f32,
    /// Persistent confirms keep the overlay open for re-adjustment.
    pub persistent: bool,
    generation: u64,
}

/// Effect of a pointer-up the host must act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpEffect {
    None,
    /// Run [`SessionController::take_scheduled_confirm`] after `delay`.
    ScheduleAutoCopy { delay: Duration },
}

/// Keys the session reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyInput {
    Escape,
    Enter,
    /// The letter "c", the copy shortcut.
    CopyChar,
}

/// Effect of a key press the host must act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyEffect {
    None,
    /// The session was torn down; remove the overlay.
    TornDown,
    /// Run the capture pipeline for this ticket.
    Confirm(ConfirmTicket),
}

struct Session {
    machine: SelectionMachine,
    auto_copy_on_mouseup: bool,
    copy_in_flight: bool,
    auto_copy_pending: bool,
    toolbar_visible: bool,
}

/// Top-level orchestrator for the overlay session.
pub struct SessionController<S: SceneSurface> {
    scene: S,
    viewport: Size,
    device_pixel_ratio: f32,
    policy: BodyClickPolicy,
    session: Option<Session>,
    generation: u64,
}

impl<S: SceneSurface> SessionController<S> {
    pub fn new(scene: S, viewport: Size, device_pixel_ratio: f32, policy: BodyClickPolicy) -> Self {
        Self {
            scene,
            viewport,
            device_pixel_ratio,
            policy,
            session: None,
            generation: 0,
        }
    }

    pub fn scene(&self) -> &S {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn selection(&self) -> Option<Rect> {
        self.session.as_ref().and_then(|s| s.machine.rect())
    }

    pub fn mode(&self) -> InteractionMode {
        self.session
            .as_ref()
            .map(|s| s.machine.mode())
            .unwrap_or_default()
    }

    pub fn copy_in_flight(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.copy_in_flight)
    }

    /// Starts a session. A start signal while one is live is a no-op
    /// (returns `false`). When the start signal omits the auto-copy flag,
    /// the persisted preference decides.
    pub fn start(&mut self, auto_copy_on_mouseup: Option<bool>) -> bool {
        if self.session.is_some() {
            log::debug!("start signal ignored: session already active");
            return false;
        }
        let auto_copy = auto_copy_on_mouseup
            .unwrap_or_else(|| Preferences::load().auto_copy_on_mouseup);
        self.session = Some(Session {
            machine: SelectionMachine::new(self.viewport, self.policy),
            auto_copy_on_mouseup: auto_copy,
            copy_in_flight: false,
            auto_copy_pending: false,
            toolbar_visible: false,
        });
        log::info!("snip session started (auto-copy: {auto_copy})");
        self.refresh_scene();
        true
    }

    /// Pointer-down on the overlay backdrop, selection, or a handle.
    /// Toolbar clicks must be consumed by the host before this point.
    pub fn pointer_down(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        // The user is interacting again: a scheduled auto-copy is stale.
        session.auto_copy_pending = false;
        session.machine.pointer_down(p);
        if session.machine.mode() == InteractionMode::Drawing {
            session.toolbar_visible = false;
        }
        self.refresh_scene();
    }

    pub fn pointer_move(&mut self, p: Point) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.machine.pointer_move(p).is_some() {
            if matches!(
                session.machine.mode(),
                InteractionMode::Moving | InteractionMode::Resizing
            ) {
                session.toolbar_visible = true;
            }
            self.refresh_scene();
        }
    }

    pub fn pointer_up(&mut self, p: Point) -> UpEffect {
        let Some(session) = self.session.as_mut() else {
            return UpEffect::None;
        };
        let effect = match session.machine.pointer_up(p) {
            PointerUp::FinishedDraw(_) => {
                session.toolbar_visible = true;
                if session.auto_copy_on_mouseup {
                    session.auto_copy_pending = true;
                    UpEffect::ScheduleAutoCopy {
                        delay: AUTO_COPY_DELAY,
                    }
                } else {
                    UpEffect::None
                }
            }
            PointerUp::DiscardedDraw => UpEffect::None,
            PointerUp::FinishedMove(_) | PointerUp::FinishedResize(_) => {
                session.toolbar_visible = true;
                UpEffect::None
            }
            PointerUp::Ignored => UpEffect::None,
        };
        self.refresh_scene();
        effect
    }

    /// Fires the auto-copy scheduled by a draw-ending pointer-up. No-ops
    /// harmlessly when the session was torn down or the user started a new
    /// interaction while the delay ran.
    pub fn take_scheduled_confirm(&mut self) -> Option<ConfirmTicket> {
        let session = self.session.as_mut()?;
        if !session.auto_copy_pending {
            return None;
        }
        session.auto_copy_pending = false;
        // Auto-copy keeps the overlay open for re-adjustment.
        self.request_confirm(true)
    }

    pub fn key_down(&mut self, key: KeyInput) -> KeyEffect {
        match key {
            KeyInput::Escape => {
                if self.session.is_some() {
                    self.teardown();
                    KeyEffect::TornDown
                } else {
                    KeyEffect::None
                }
            }
            KeyInput::Enter | KeyInput::CopyChar => match self.request_confirm(false) {
                Some(ticket) => KeyEffect::Confirm(ticket),
                None => KeyEffect::None,
            },
        }
    }

    /// Issues a confirm ticket for the current selection, or `None` when
    /// there is nothing valid to confirm or a run is already in flight.
    pub fn request_confirm(&mut self, persistent: bool) -> Option<ConfirmTicket> {
        let session = self.session.as_mut()?;
        let selection = session.machine.rect()?;
        if selection.width < MIN_CONFIRM_SIZE || selection.height < MIN_CONFIRM_SIZE {
            return None;
        }
        if session.copy_in_flight {
            log::debug!("confirm ignored: capture already in flight");
            return None;
        }
        session.copy_in_flight = true;
        Some(ConfirmTicket {
            selection,
            device_pixel_ratio: self.device_pixel_ratio,
            persistent,
            generation: self.generation,
        })
    }

    /// Applies a pipeline completion. Completions from a torn-down session
    /// are dropped without touching the scene.
    pub fn finish_confirm(&mut self, ticket: &ConfirmTicket, outcome: &Result<Delivery>) {
        if ticket.generation != self.generation {
            log::debug!("dropping capture completion for a torn-down session");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.copy_in_flight = false;
        match outcome {
            Ok(delivery) => {
                let message = match delivery {
                    Delivery::Clipboard => COPIED_TOAST.to_string(),
                    Delivery::FallbackViewer(destination) => {
                        format!("Clipboard unavailable; {destination}")
                    }
                };
                if !ticket.persistent {
                    self.teardown();
                }
                // Shown after teardown so it survives the scene clear; the
                // host keeps it up while the overlay goes away.
                self.scene.show_toast(&message);
            }
            Err(err) => {
                // Keep the overlay so the user can retry.
                self.scene.show_notice(&err.to_string());
            }
        }
    }

    /// Convenience for drivers that run the pipeline inline: request, run,
    /// finish, all on the calling task.
    pub async fn confirm_now<C, K, F>(
        &mut self,
        pipeline: &mut CapturePipeline<C, K, F>,
        persistent: bool,
    ) where
        C: CaptureService,
        K: ClipboardSink,
        F: FallbackPresenter,
    {
        if let Some(ticket) = self.request_confirm(persistent) {
            let outcome = pipeline
                .run(ticket.selection, ticket.device_pixel_ratio)
                .await;
            self.finish_confirm(&ticket, &outcome);
        }
    }

    /// Explicit cancel (toolbar button); same as Escape.
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            self.teardown();
        }
    }

    /// Cursor for a pointer hovering at `p` with no button held.
    pub fn hover_cursor(&self, p: Point) -> Cursor {
        let Some(session) = self.session.as_ref() else {
            return Cursor::Arrow;
        };
        use crate::selection::PointerTarget;
        match session.machine.mode() {
            InteractionMode::Idle => match session.machine.hit_test(p) {
                PointerTarget::Handle(id) => Cursor::Resize(id),
                PointerTarget::SelectionBody => match self.policy {
                    BodyClickPolicy::MoveSelection => Cursor::Move,
                    BodyClickPolicy::RedrawSelection => Cursor::Crosshair,
                },
                PointerTarget::Backdrop => Cursor::Crosshair,
            },
            InteractionMode::Drawing => Cursor::Crosshair,
            InteractionMode::Moving => Cursor::Move,
            InteractionMode::Resizing => session
                .machine
                .active_handle()
                .map(Cursor::Resize)
                .unwrap_or(Cursor::Arrow),
        }
    }

    fn teardown(&mut self) {
        self.generation += 1;
        self.session = None;
        self.scene.clear();
        log::info!("snip session torn down");
    }

    fn refresh_scene(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let cursor = match session.machine.mode() {
            InteractionMode::Drawing => Cursor::Crosshair,
            InteractionMode::Moving => Cursor::Move,
            InteractionMode::Resizing => session
                .machine
                .active_handle()
                .map(Cursor::Resize)
                .unwrap_or(Cursor::Arrow),
            InteractionMode::Idle => {
                if session.machine.rect().is_some() {
                    Cursor::Arrow
                } else {
                    Cursor::Crosshair
                }
            }
        };
        let layout = session
            .machine
            .rect()
            .map(|r| scene::layout(r, self.viewport, self.scene.toolbar_size()));
        let frame = SceneFrame {
            layout,
            toolbar_visible: session.toolbar_visible && layout.is_some(),
            cursor,
        };
        self.scene.apply(&frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SnipError;
    use crate::pipeline::test_support::{FixedCapture, RecordingClipboard, RecordingFallback};

    #[derive(Default)]
    struct RecordingScene {
        frame: SceneFrame,
        toasts: Vec<String>,
        notices: Vec<String>,
        clears: usize,
    }

    impl SceneSurface for RecordingScene {
        fn toolbar_size(&self) -> Size {
            Size::new(150.0, 40.0)
        }
        fn apply(&mut self, frame: &SceneFrame) {
            self.frame = *frame;
        }
        fn clear(&mut self) {
            self.frame = SceneFrame::empty();
            self.clears += 1;
        }
        fn show_toast(&mut self, message: &str) {
            self.toasts.push(message.to_string());
        }
        fn show_notice(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    fn controller(auto_copy: bool) -> SessionController<RecordingScene> {
        let mut c = SessionController::new(
            RecordingScene::default(),
            Size::new(1000.0, 800.0),
            1.0,
            BodyClickPolicy::MoveSelection,
        );
        assert!(c.start(Some(auto_copy)));
        c
    }

    fn draw(c: &mut SessionController<RecordingScene>, from: Point, to: Point) -> UpEffect {
        c.pointer_down(from);
        c.pointer_move(to);
        c.pointer_up(to)
    }

    #[test]
    fn start_is_idempotent() {
        let mut c = controller(false);
        assert!(!c.start(Some(false)));
        assert!(c.is_active());
    }

    #[test]
    fn draw_produces_layout_and_toolbar() {
        let mut c = controller(false);
        let effect = draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        assert_eq!(effect, UpEffect::None);
        assert_eq!(c.selection(), Some(Rect::new(100.0, 100.0, 200.0, 150.0)));
        let frame = c.scene().frame;
        assert!(frame.toolbar_visible);
        let layout = frame.layout.unwrap();
        assert_eq!(layout.selection, Rect::new(100.0, 100.0, 200.0, 150.0));
        assert_eq!(layout.masks.top.height, 100.0);
    }

    #[test]
    fn tiny_draw_leaves_idle_session_without_selection() {
        let mut c = controller(true);
        let effect = draw(&mut c, Point::new(100.0, 100.0), Point::new(101.0, 150.0));
        assert_eq!(effect, UpEffect::None);
        assert!(c.is_active());
        assert_eq!(c.selection(), None);
        assert_eq!(c.mode(), InteractionMode::Idle);
    }

    #[test]
    fn auto_copy_schedules_then_fires_persistently() {
        let mut c = controller(true);
        let effect = draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        assert_eq!(
            effect,
            UpEffect::ScheduleAutoCopy {
                delay: AUTO_COPY_DELAY
            }
        );
        let ticket = c.take_scheduled_confirm().expect("scheduled confirm");
        assert!(ticket.persistent);
        assert_eq!(ticket.selection, Rect::new(100.0, 100.0, 200.0, 150.0));
        // Guard is now held
        assert!(c.copy_in_flight());
        assert!(c.request_confirm(false).is_none());
        c.finish_confirm(&ticket, &Ok(Delivery::Clipboard));
        // Persistent confirm keeps the overlay open
        assert!(c.is_active());
        assert!(!c.copy_in_flight());
        assert_eq!(c.scene().toasts, vec![COPIED_TOAST.to_string()]);
    }

    #[test]
    fn new_pointer_down_cancels_scheduled_auto_copy() {
        let mut c = controller(true);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        c.pointer_down(Point::new(600.0, 600.0));
        assert!(c.take_scheduled_confirm().is_none());
    }

    #[test]
    fn explicit_confirm_tears_down_on_success() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        let KeyEffect::Confirm(ticket) = c.key_down(KeyInput::Enter) else {
            panic!("expected confirm");
        };
        assert!(!ticket.persistent);
        c.finish_confirm(&ticket, &Ok(Delivery::Clipboard));
        assert!(!c.is_active());
        assert_eq!(c.scene().clears, 1);
        // The toast lands after the clear, so the host can still show it
        assert_eq!(c.scene().toasts, vec![COPIED_TOAST.to_string()]);
    }

    #[test]
    fn copy_char_confirms_like_enter() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        assert!(matches!(c.key_down(KeyInput::CopyChar), KeyEffect::Confirm(_)));
    }

    #[test]
    fn confirm_refused_without_valid_selection() {
        let mut c = controller(false);
        assert_eq!(c.key_down(KeyInput::Enter), KeyEffect::None);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        // Shrink below the confirm threshold via the machine is not possible
        // (resize floor is 1px but confirm needs 2), so check the floor case
        // directly with a fresh tiny selection.
        let mut tiny = controller(false);
        tiny.pointer_down(Point::new(10.0, 10.0));
        tiny.pointer_move(Point::new(14.0, 11.5));
        tiny.pointer_up(Point::new(14.0, 11.5));
        assert_eq!(tiny.selection(), None);
        assert_eq!(tiny.key_down(KeyInput::Enter), KeyEffect::None);
    }

    #[test]
    fn second_confirm_while_in_flight_is_ignored() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        let first = c.request_confirm(false);
        assert!(first.is_some());
        assert!(c.request_confirm(false).is_none());
        assert_eq!(c.key_down(KeyInput::Enter), KeyEffect::None);
    }

    #[test]
    fn escape_tears_down_from_any_mode() {
        // Drawing
        let mut c = controller(false);
        c.pointer_down(Point::new(100.0, 100.0));
        c.pointer_move(Point::new(200.0, 200.0));
        assert_eq!(c.key_down(KeyInput::Escape), KeyEffect::TornDown);
        assert!(!c.is_active());

        // Moving
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        c.pointer_down(Point::new(200.0, 180.0));
        assert_eq!(c.mode(), InteractionMode::Moving);
        assert_eq!(c.key_down(KeyInput::Escape), KeyEffect::TornDown);

        // Resizing
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        c.pointer_down(Point::new(300.0, 175.0));
        assert_eq!(c.mode(), InteractionMode::Resizing);
        assert_eq!(c.key_down(KeyInput::Escape), KeyEffect::TornDown);

        // Idle after confirm request
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        c.request_confirm(false);
        assert_eq!(c.key_down(KeyInput::Escape), KeyEffect::TornDown);
        assert_eq!(c.key_down(KeyInput::Escape), KeyEffect::None);
    }

    #[test]
    fn stale_completion_after_teardown_is_dropped() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        let ticket = c.request_confirm(false).unwrap();
        c.cancel();
        c.finish_confirm(&ticket, &Ok(Delivery::Clipboard));
        assert!(c.scene().toasts.is_empty());
        assert!(!c.is_active());

        // Even a session restarted in the meantime must not see it
        assert!(c.start(Some(false)));
        c.finish_confirm(&ticket, &Ok(Delivery::Clipboard));
        assert!(c.scene().toasts.is_empty());
        assert!(c.is_active());
    }

    #[test]
    fn capture_failure_keeps_session_for_retry() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        let ticket = c.request_confirm(false).unwrap();
        c.finish_confirm(&ticket, &Err(SnipError::capture("tab gone")));
        assert!(c.is_active());
        assert!(!c.copy_in_flight());
        assert_eq!(c.scene().notices.len(), 1);
        assert!(c.scene().notices[0].contains("Capture failed"));
        // Retry works
        assert!(c.request_confirm(false).is_some());
    }

    #[test]
    fn fallback_delivery_is_a_success_path() {
        let mut c = controller(false);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        let ticket = c.request_confirm(false).unwrap();
        let delivery = Delivery::FallbackViewer("image saved to /tmp/shot.png".to_string());
        c.finish_confirm(&ticket, &Ok(delivery));
        assert!(c.scene().notices.is_empty());
        assert!(!c.is_active(), "non-persistent confirm still tears down");
        // The toast names where the image actually went
        assert_eq!(c.scene().toasts.len(), 1);
        assert!(c.scene().toasts[0].contains("/tmp/shot.png"));
    }

    #[test]
    fn hover_cursor_tracks_targets() {
        let mut c = controller(false);
        assert_eq!(c.hover_cursor(Point::new(5.0, 5.0)), Cursor::Crosshair);
        draw(&mut c, Point::new(100.0, 100.0), Point::new(300.0, 250.0));
        assert_eq!(
            c.hover_cursor(Point::new(300.0, 175.0)),
            Cursor::Resize(HandleId::E)
        );
        assert_eq!(c.hover_cursor(Point::new(200.0, 180.0)), Cursor::Move);
        assert_eq!(c.hover_cursor(Point::new(600.0, 600.0)), Cursor::Crosshair);
    }

    #[tokio::test]
    async fn end_to_end_draw_confirm_crops_and_copies() {
        use crate::pipeline::test_support::coordinate_frame;

        let mut c = controller(false);
        let frame = coordinate_frame(1000, 800);
        let capture = FixedCapture::of_image(&frame);
        let requests = capture.requests.clone();
        let clipboard = RecordingClipboard::default();
        let mut pipeline = CapturePipeline::new(
            capture,
            clipboard.clone(),
            RecordingFallback::default(),
        );

        c.pointer_down(Point::new(100.0, 100.0));
        c.pointer_move(Point::new(300.0, 250.0));
        c.pointer_up(Point::new(300.0, 250.0));
        assert_eq!(c.selection(), Some(Rect::new(100.0, 100.0, 200.0, 150.0)));

        c.confirm_now(&mut pipeline, false).await;

        assert_eq!(*requests.lock().unwrap(), 1);
        let written = clipboard.written();
        assert_eq!(written.len(), 1);
        assert_eq!((written[0].width(), written[0].height()), (200, 150));
        assert_eq!(written[0].get_pixel(0, 0), &image::Rgba([100, 100, 7, 255]));
        assert_eq!(c.scene().toasts, vec![COPIED_TOAST.to_string()]);
        assert!(!c.is_active());
    }
}
