//! Loading, baking, and click resolution for `CubeApp`.
//!
//! Covers the asynchronous lifecycle (`start_load`, `check_fetch`,
//! `spawn_bakes`, `check_bakes`), the `refresh`/`destroy` lifecycle calls,
//! and the navigation side effect on a resolved click.

use std::sync::{mpsc, Arc};

use eframe::egui;

use cube_menu::bake::TextureBaker;
use cube_menu::engine::pipeline::MenuEngine;
use cube_menu::face::{destination_url, resolve_index, sector_face};
use cube_menu::render::FaceTexture;

use super::CubeApp;

impl CubeApp {
    /// Start an async page load. The cube keeps rendering placeholders
    /// while the fetch and the bakes run.
    pub fn start_load(&mut self, ctx: &egui::Context) {
        if self.loading || self.destroyed {
            return;
        }
        self.loading = true;
        self.error = None;

        let (tx, rx) = mpsc::channel();
        self.fetch_rx = Some(rx);

        let url = self.page_url.clone();
        let config = self.config.clone();
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let engine = MenuEngine::new(config);
            let result = engine.load_menu(&url);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the page-load channel; on success schedule the face bakes.
    pub fn check_fetch(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.fetch_rx else { return };
        let Ok(result) = rx.try_recv() else { return };

        self.loading = false;
        self.fetch_rx = None;

        match result {
            Ok(menu) => {
                log::info!(
                    "menu page loaded: {} ({} items)",
                    menu.url,
                    menu.items.len()
                );
                self.items = menu.items;
                self.error = None;
                self.spawn_bakes(ctx);
            }
            Err(e) => {
                log::error!("menu setup failed: {}", e);
                self.error = Some(e.to_string());
                self.items.clear();
            }
        }
    }

    /// Bake one texture per lateral face on background threads, items
    /// cycled across faces with modulo.
    pub fn spawn_bakes(&mut self, ctx: &egui::Context) {
        if self.items.is_empty() || self.destroyed {
            // Nothing to bake; the cube stays on placeholder materials
            return;
        }

        let faces = self.config.faces_per_revolution;
        let (tx, rx) = mpsc::channel();
        self.bake_rx = Some(rx);
        self.baked = Vec::new();
        self.pending_bakes = faces as usize;
        self.textures_ready = false;

        for sector in 0..faces {
            let face = sector_face(sector, faces);
            let item_index = sector as usize % self.items.len();
            let mut fragment = self.items[item_index].fragment.clone();
            let baker = TextureBaker::new(&self.config);
            let cache = Arc::clone(&self.image_cache);
            let tx = tx.clone();
            let ctx = ctx.clone();

            std::thread::spawn(move || {
                let bitmap = baker.bake(Some(&mut fragment), &cache);
                let source = bitmap.as_ref().map(|_| item_index);
                let _ = tx.send((face, source, bitmap));
                ctx.request_repaint();
            });
        }
    }

    /// Poll bake deliveries. The material set is replaced wholesale once
    /// the full face set has arrived, never one face at a time.
    pub fn check_bakes(&mut self) {
        let Some(rx) = &self.bake_rx else { return };

        while let Ok((face, source_item, bitmap)) = rx.try_recv() {
            if self.destroyed {
                // Late result for a torn-down widget: discard
                continue;
            }
            self.baked.push(FaceTexture {
                face,
                bitmap: bitmap.map(Arc::new),
                source_item,
            });
            self.pending_bakes = self.pending_bakes.saturating_sub(1);
        }

        if self.pending_bakes == 0 && self.bake_rx.is_some() && !self.destroyed {
            if !self.baked.is_empty() {
                self.materials.assign(&self.baked);
                log::info!(
                    "face textures assigned: {:?}",
                    self.baked
                        .iter()
                        .map(|t| (t.face, t.source_item))
                        .collect::<Vec<_>>()
                );
            }
            self.bake_rx = None;
            self.textures_ready = true;
            // Texture aspect never feeds the framing; this only forces the
            // one post-bake framing pass the reference does
            self.framed_for = None;
        }
    }

    /// Resolve the item under the viewer and perform the navigation side
    /// effect. Empty registry or empty link is a no-op.
    pub fn resolve_click(&mut self) {
        let angle = self.controller.current_angle();
        let Some(index) = resolve_index(
            angle,
            self.items.len(),
            self.config.faces_per_revolution,
        ) else {
            return;
        };

        let item = &self.items[index];
        log::debug!(
            "click: angle {:.3} resolved item {} (number {}, link {:?})",
            angle,
            index,
            item.number,
            item.link
        );

        let Some(url) = destination_url(&item.link, &self.config.base_path) else {
            return;
        };
        log::info!("navigating to {}", url);
        if let Err(e) = webbrowser::open(&url) {
            log::error!("navigation failed: {}", e);
        }
    }

    /// Reload the page and rebake every face texture.
    pub fn refresh(&mut self, ctx: &egui::Context) {
        self.items.clear();
        self.baked.clear();
        self.bake_rx = None;
        self.pending_bakes = 0;
        self.textures_ready = false;
        self.start_load(ctx);
    }

    /// Tear the widget down: stop scheduling work and discard anything
    /// still in flight.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.fetch_rx = None;
        self.bake_rx = None;
        self.pending_bakes = 0;
    }
}
