//! Fullscreen overlay application.
//!
//! This module contains the `OverlayApp` struct which implements the
//! `eframe::App` trait for the fullscreen selection overlay. It freezes the
//! screen into a background texture, feeds egui input into the
//! [`SessionController`], and runs confirmed captures on a worker thread so
//! the UI loop never blocks on the pipeline.

use super::rendering::{
    BORDER_COLOR, MASK_ALPHA, cursor_icon, draw_handles, draw_mask_panels, draw_selection_border,
    to_point, to_size,
};
use crate::capture::FrozenCapture;
use crate::clipboard::{FilePresenter, SystemClipboard};
use crate::error::{Result, SnipError};
use crate::geometry::Size;
use crate::pipeline::{CapturePipeline, Delivery};
use crate::selection::BodyClickPolicy;
use crate::session::{
    ConfirmTicket, KeyEffect, KeyInput, SceneFrame, SceneSurface, SessionController,
    TOAST_DURATION, UpEffect,
};
use eframe::egui;
use image::DynamicImage;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Instant;

/// Fixed toolbar footprint used for placement.
const TOOLBAR_SIZE: Size = Size {
    width: 150.0,
    height: 40.0,
};

/// Host-side configuration for one overlay run.
#[derive(Clone, Copy, Debug, Default)]
pub struct OverlayOptions {
    /// Overrides the persisted auto-copy preference when set.
    pub auto_copy_on_mouseup: Option<bool>,
    pub body_click_policy: BodyClickPolicy,
}

/// Completion sent back from the pipeline worker thread.
enum PipelineEvent {
    Finished {
        ticket: ConfirmTicket,
        outcome: Result<Delivery>,
    },
}

/// egui-backed implementation of the controller's scene seam.
///
/// Holds the latest frame plus the transient surfaces (toast, notice); the
/// overlay's paint pass reads it back each frame.
#[derive(Default)]
pub(crate) struct EguiScene {
    pub frame: SceneFrame,
    pub toast: Option<(String, Instant)>,
    pub notice: Option<String>,
}

impl SceneSurface for EguiScene {
    fn toolbar_size(&self) -> Size {
        TOOLBAR_SIZE
    }

    fn apply(&mut self, frame: &SceneFrame) {
        self.frame = *frame;
    }

    fn clear(&mut self) {
        self.frame = SceneFrame::empty();
        self.toast = None;
        self.notice = None;
    }

    fn show_toast(&mut self, message: &str) {
        self.toast = Some((message.to_string(), Instant::now()));
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }
}

/// The fullscreen overlay application.
pub struct OverlayApp {
    /// Pre-converted frame for fast texture upload on the first frame.
    color_image: Option<egui::ColorImage>,
    texture: Option<egui::TextureHandle>,
    frozen: FrozenCapture,
    options: OverlayOptions,
    /// Built on the first frame, once the viewport size and pixel ratio are
    /// known.
    controller: Option<SessionController<EguiScene>>,
    auto_copy_deadline: Option<Instant>,
    rx: Receiver<PipelineEvent>,
    tx: Sender<PipelineEvent>,
}

impl OverlayApp {
    /// Creates the overlay over a frozen screen frame.
    pub fn new(screenshot: DynamicImage, options: OverlayOptions) -> Result<Self> {
        let frozen = FrozenCapture::new(&screenshot)?;

        // The expensive conversion happens before the UI loop starts
        let buffer = screenshot.to_rgba8();
        let size = [screenshot.width() as usize, screenshot.height() as usize];
        let pixels = buffer.as_flat_samples();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, pixels.as_slice());

        let (tx, rx) = channel();
        Ok(Self {
            color_image: Some(color_image),
            texture: None,
            frozen,
            options,
            controller: None,
            auto_copy_deadline: None,
            rx,
            tx,
        })
    }

    /// Runs a confirm ticket on a worker thread with its own runtime and
    /// reports the outcome back through the channel.
    fn spawn_confirm(&self, ticket: ConfirmTicket) {
        let tx = self.tx.clone();
        let capture = self.frozen.clone();
        thread::spawn(move || {
            let outcome = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt.block_on(async {
                    let mut pipeline =
                        CapturePipeline::new(capture, SystemClipboard::new(), FilePresenter::new());
                    pipeline
                        .run(ticket.selection, ticket.device_pixel_ratio)
                        .await
                }),
                Err(e) => Err(SnipError::ui(format!("Failed to create async runtime: {e}"))),
            };
            let _ = tx.send(PipelineEvent::Finished { ticket, outcome });
        });
    }

    fn drain_pipeline_events(&mut self, ctx: &egui::Context) {
        while let Ok(event) = self.rx.try_recv() {
            match event {
                PipelineEvent::Finished { ticket, outcome } => {
                    if let Some(controller) = self.controller.as_mut() {
                        controller.finish_confirm(&ticket, &outcome);
                    }
                    ctx.request_repaint();
                }
            }
        }
    }

    fn fire_due_auto_copy(&mut self) {
        let due = self
            .auto_copy_deadline
            .is_some_and(|deadline| Instant::now() >= deadline);
        if !due {
            return;
        }
        self.auto_copy_deadline = None;
        let ticket = self
            .controller
            .as_mut()
            .and_then(|c| c.take_scheduled_confirm());
        if let Some(ticket) = ticket {
            self.spawn_confirm(ticket);
        }
    }

    fn handle_input(&mut self, ctx: &egui::Context) {
        let mut ticket = None;
        let mut schedule = None;

        {
            let Some(controller) = self.controller.as_mut() else {
                return;
            };

            let (escape, enter, copy_key) = ctx.input(|i| {
                (
                    i.key_pressed(egui::Key::Escape),
                    i.key_pressed(egui::Key::Enter),
                    i.key_pressed(egui::Key::C),
                )
            });
            if escape {
                controller.key_down(KeyInput::Escape);
            } else if enter || copy_key {
                let key = if enter {
                    KeyInput::Enter
                } else {
                    KeyInput::CopyChar
                };
                if let KeyEffect::Confirm(t) = controller.key_down(key) {
                    ticket = Some(t);
                }
            }

            let (pos, pressed, down, released) = ctx.input(|i| {
                (
                    i.pointer.latest_pos(),
                    i.pointer.primary_pressed(),
                    i.pointer.primary_down(),
                    i.pointer.primary_released(),
                )
            });

            if let Some(pos) = pos {
                let p = to_point(pos);
                let scene = controller.scene();
                let notice_open = scene.notice.is_some();
                // Toolbar clicks belong to the toolbar buttons, never to
                // the state machine.
                let over_toolbar = scene.frame.toolbar_visible
                    && scene
                        .frame
                        .layout
                        .is_some_and(|layout| layout.toolbar.contains(p));

                if pressed && !notice_open && !over_toolbar {
                    controller.pointer_down(p);
                } else if down {
                    controller.pointer_move(p);
                }
                if released {
                    if let UpEffect::ScheduleAutoCopy { delay } = controller.pointer_up(p) {
                        schedule = Some(delay);
                    }
                }

                let icon = if down {
                    cursor_icon(controller.scene().frame.cursor)
                } else {
                    cursor_icon(controller.hover_cursor(p))
                };
                ctx.set_cursor_icon(icon);
            }
        }

        if let Some(delay) = schedule {
            self.auto_copy_deadline = Some(Instant::now() + delay);
            ctx.request_repaint_after(delay);
        }
        if let Some(ticket) = ticket {
            self.spawn_confirm(ticket);
        }
    }

    fn paint_overlay(&self, painter: &egui::Painter) {
        let Some(controller) = self.controller.as_ref() else {
            return;
        };
        let Some(layout) = controller.scene().frame.layout else {
            return;
        };
        draw_mask_panels(painter, &layout.masks, MASK_ALPHA);
        draw_selection_border(painter, layout.selection, 2.0, BORDER_COLOR);
        draw_handles(painter, &layout.handles);
    }

    fn draw_toolbar(&mut self, ctx: &egui::Context) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let frame = controller.scene().frame;
        let Some(layout) = frame.layout else {
            return;
        };
        if !frame.toolbar_visible {
            return;
        }

        let mut copy_clicked = false;
        let mut cancel_clicked = false;
        egui::Area::new(egui::Id::new("snip_toolbar"))
            .fixed_pos(egui::pos2(layout.toolbar.left, layout.toolbar.top))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgb(0xF3, 0xF3, 0xF3))
                    .inner_margin(6.0)
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.visuals_mut().override_text_color =
                                Some(egui::Color32::from_rgb(0x1F, 0x1F, 0x1F));
                            if ui
                                .button("Copy")
                                .on_hover_text("Copy to clipboard (Enter or C)")
                                .clicked()
                            {
                                copy_clicked = true;
                            }
                            if ui.button("Cancel").on_hover_text("Cancel (Esc)").clicked() {
                                cancel_clicked = true;
                            }
                        });
                    });
            });

        if cancel_clicked {
            controller.cancel();
            return;
        }
        let ticket = if copy_clicked {
            controller.request_confirm(false)
        } else {
            None
        };
        if let Some(ticket) = ticket {
            self.spawn_confirm(ticket);
        }
    }

    fn draw_notice(&mut self, ctx: &egui::Context) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let Some(message) = controller.scene().notice.clone() else {
            return;
        };
        let mut dismissed = false;
        egui::Area::new(egui::Id::new("snip_notice"))
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgb(30, 30, 30))
                    .stroke(egui::Stroke::new(1.0, egui::Color32::GRAY))
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(&message).color(egui::Color32::LIGHT_RED));
                        if ui.button("Dismiss").clicked() {
                            dismissed = true;
                        }
                    });
            });
        if dismissed {
            controller.scene_mut().notice = None;
        }
    }

    fn draw_toast(&mut self, ctx: &egui::Context) {
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let Some((message, since)) = controller.scene().toast.clone() else {
            return;
        };
        if since.elapsed() >= TOAST_DURATION {
            controller.scene_mut().toast = None;
            return;
        }
        egui::Area::new(egui::Id::new("snip_toast"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -28.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style())
                    .fill(egui::Color32::from_rgb(0x2B, 0x2B, 0x2B))
                    .inner_margin(10.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                    });
            });
        ctx.request_repaint_after(TOAST_DURATION - since.elapsed());
    }
}

impl eframe::App for OverlayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(egui::Visuals::dark());

        self.drain_pipeline_events(ctx);

        if self.texture.is_none() {
            if let Some(color_image) = self.color_image.take() {
                self.texture =
                    Some(ctx.load_texture("frozen-screen", color_image, egui::TextureOptions::LINEAR));
            }
        }

        let panel_frame = egui::Frame::default()
            .inner_margin(egui::Margin::same(0))
            .outer_margin(egui::Margin::same(0));

        egui::CentralPanel::default()
            .frame(panel_frame)
            .show(ctx, |ui| {
                let rect = ui.max_rect();

                if self.controller.is_none() {
                    let mut controller = SessionController::new(
                        EguiScene::default(),
                        to_size(rect.size()),
                        ctx.pixels_per_point(),
                        self.options.body_click_policy,
                    );
                    controller.start(self.options.auto_copy_on_mouseup);
                    self.controller = Some(controller);
                }

                if let Some(texture) = &self.texture {
                    ui.painter().image(
                        texture.id(),
                        rect,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }

                self.handle_input(ctx);
                self.fire_due_auto_copy();
                self.paint_overlay(ui.painter());
            });

        self.draw_toolbar(ctx);
        self.draw_notice(ctx);
        self.draw_toast(ctx);

        // An in-flight capture keeps the window alive until its completion
        // is applied. After teardown the window stays up just long enough
        // for a confirmation toast to be seen, then closes.
        let toast_live = self.controller.as_ref().is_some_and(|c| {
            c.scene()
                .toast
                .as_ref()
                .is_some_and(|(_, since)| since.elapsed() < TOAST_DURATION)
        });
        if self.controller.as_ref().is_some_and(|c| !c.is_active()) && !toast_live {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }
}

/// Launches the overlay over the given frozen frame and blocks until the
/// session ends.
pub fn run(screenshot: DynamicImage, options: OverlayOptions) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_decorations(false)
            .with_always_on_top(),
        ..Default::default()
    };

    let app = OverlayApp::new(screenshot, options)?;
    eframe::run_native(
        "snipgrab",
        native_options,
        Box::new(move |_cc| Ok(Box::new(app) as Box<dyn eframe::App>)),
    )
    .map_err(|e| SnipError::ui(format!("Failed to run overlay: {e}")))
}
