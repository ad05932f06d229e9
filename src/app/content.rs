//! Main viewport rendering and input for `CubeApp`.
//!
//! One `update` pass is the widget's animation tick: poll background work,
//! feed pointer events to the rotation controller, ease the angle, render
//! the cube frame, paint it, then ask for the next frame.

use eframe::egui;

use cube_menu::framing::{aspect, camera_distance, ViewportFrame};
use cube_menu::render::cube::render_frame;
use cube_menu::rotation::{ControllerEvent, PointerEvent};

use super::CubeApp;

impl CubeApp {
    /// Recompute camera distance and aspect when the surface size changed,
    /// and once after the initial textures arrive. Idempotent per size.
    fn reframe(&mut self, rect: egui::Rect) {
        let key = (rect.width() as u32, rect.height() as u32);
        if self.framed_for == Some(key) {
            return;
        }
        let frame = ViewportFrame {
            container_width: rect.width(),
            container_height: rect.height(),
            fov_deg: self.config.fov_deg,
            cube_width: self.mesh.width,
            cube_height: self.mesh.height,
            cube_depth: self.mesh.depth,
        };
        self.camera.z = camera_distance(&frame);
        self.camera.aspect = aspect(rect.width(), rect.height());
        self.framed_for = Some(key);
        log::debug!(
            "reframed {}x{}: camera z {:.2}",
            key.0,
            key.1,
            self.camera.z
        );
    }

    /// Translate this frame's raw pointer state into controller events.
    /// The controller, not egui, decides what counts as a click.
    fn pointer_events(&mut self, ctx: &egui::Context, rect: egui::Rect) -> Vec<PointerEvent> {
        let now = ctx.input(|i| i.time);
        let down = ctx.input(|i| i.pointer.primary_down());
        let pos = ctx.input(|i| i.pointer.latest_pos());

        let mut events = Vec::new();
        match (self.pointer_was_down, down, pos) {
            (false, true, Some(p)) => {
                if rect.contains(p) {
                    self.pointer_was_down = true;
                    events.push(PointerEvent::Down {
                        x: p.x,
                        y: p.y,
                        time: now,
                    });
                }
            }
            (true, true, Some(p)) => {
                if rect.contains(p) {
                    events.push(PointerEvent::Move {
                        x: p.x,
                        y: p.y,
                        time: now,
                    });
                } else {
                    // Pointer left the interactive surface mid-drag
                    self.pointer_was_down = false;
                    events.push(PointerEvent::Leave { time: now });
                }
            }
            (true, false, _) => {
                self.pointer_was_down = false;
                events.push(PointerEvent::Up { time: now });
            }
            _ => {}
        }
        events
    }

    /// Render resolution: full surface size normally, halved while
    /// dragging so the interaction stays fluid.
    fn render_size(&self, rect: egui::Rect) -> (usize, usize) {
        let scale = if self.controller.is_dragging() { 0.5 } else { 1.0 };
        let w = (rect.width() * scale).clamp(1.0, 1280.0) as usize;
        let h = (rect.height() * scale).clamp(1.0, 960.0) as usize;
        (w.max(1), h.max(1))
    }
}

impl eframe::App for CubeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.destroyed {
            egui::CentralPanel::default().show(ctx, |_| {});
            return;
        }

        self.check_fetch(ctx);
        self.check_bakes();

        if ctx.input(|i| i.key_pressed(egui::Key::F5)) {
            self.refresh(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let response =
                ui.allocate_response(ui.available_size(), egui::Sense::click_and_drag());
            let rect = response.rect;

            self.reframe(rect);

            for event in self.pointer_events(ctx, rect) {
                if let Some(ControllerEvent::Click) = self.controller.on_pointer(event) {
                    self.resolve_click();
                }
            }

            let now = ctx.input(|i| i.time);
            let angle = self.controller.tick(now);

            let (w, h) = self.render_size(rect);
            let pixels = render_frame(
                &self.mesh,
                &self.materials,
                angle,
                self.config.base_pitch,
                &self.camera,
                w,
                h,
            );
            let image = egui::ColorImage::from_rgba_unmultiplied([w, h], &pixels);
            self.frame_texture =
                Some(ctx.load_texture("cube_view", image, egui::TextureOptions::LINEAR));

            if let Some(ref tex) = self.frame_texture {
                ui.painter().image(
                    tex.id(),
                    rect,
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }

            if let Some(ref error) = self.error {
                ui.painter().text(
                    rect.center(),
                    egui::Align2::CENTER_CENTER,
                    error,
                    egui::FontId::proportional(16.0),
                    egui::Color32::LIGHT_RED,
                );
            } else if !self.setup_complete() {
                // Stands in for the reference's loading element; disappears
                // once the page is loaded and the initial bakes are done
                egui::Area::new(egui::Id::new("cube_loading"))
                    .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
                    .show(ctx, |ui| {
                        ui.add(egui::Spinner::new().size(28.0));
                    });
            }
        });

        // Damping and auto-rotation animate continuously
        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.destroy();
    }
}
