//! `CubeApp` — the top-level egui application state.
//!
//! This module declares the `CubeApp` struct and its constructor. All
//! methods are split across the sibling sub-modules:
//!
//! - `navigation` — page loading, bake scheduling, click resolution
//! - `content`    — per-frame tick: input, smoothing, render, paint

pub mod content;
pub mod navigation;

use std::sync::{mpsc, Arc};

use eframe::egui;
use image::RgbaImage;

use cube_menu::config::CubeConfig;
use cube_menu::dom::registry::Item;
use cube_menu::engine::pipeline::{MenuError, MenuResult};
use cube_menu::face::Face;
use cube_menu::net::image::ImageCache;
use cube_menu::render::{Camera, CubeMesh, FaceMaterials, FaceTexture};
use cube_menu::rotation::RotationController;

/// One finished bake: the face it belongs to, the item it came from, and
/// the bitmap (or `None` when the bake resolved empty).
pub type BakeDelivery = (Face, Option<usize>, Option<RgbaImage>);

pub struct CubeApp {
    pub config: CubeConfig,
    pub page_url: String,

    // Page loading
    pub loading: bool,
    pub error: Option<String>,
    pub fetch_rx: Option<mpsc::Receiver<Result<MenuResult, MenuError>>>,
    pub items: Vec<Item>,

    // Texture baking
    pub image_cache: Arc<ImageCache>,
    pub bake_rx: Option<mpsc::Receiver<BakeDelivery>>,
    pub baked: Vec<FaceTexture>,
    pub pending_bakes: usize,
    pub textures_ready: bool,

    // Rendering
    pub mesh: CubeMesh,
    pub camera: Camera,
    pub materials: FaceMaterials,
    pub controller: RotationController,
    pub frame_texture: Option<egui::TextureHandle>,
    /// Surface size the camera was last framed for.
    pub framed_for: Option<(u32, u32)>,

    // Input
    pub pointer_was_down: bool,

    /// Set by `destroy()`: late bake results are discarded and no further
    /// work is scheduled.
    pub destroyed: bool,
}

impl CubeApp {
    pub fn new(config: CubeConfig, page_url: String) -> Self {
        let mesh = CubeMesh {
            width: config.cube_width,
            height: config.cube_height,
            depth: config.cube_depth,
        };
        let camera = Camera {
            z: 6.0,
            aspect: 1.0,
            fov_deg: config.fov_deg,
        };
        let controller = RotationController::new(&config);

        Self {
            config,
            page_url,
            loading: false,
            error: None,
            fetch_rx: None,
            items: Vec::new(),
            image_cache: Arc::new(ImageCache::new()),
            bake_rx: None,
            baked: Vec::new(),
            pending_bakes: 0,
            textures_ready: false,
            mesh,
            camera,
            materials: FaceMaterials::placeholder(),
            controller,
            frame_texture: None,
            framed_for: None,
            pointer_was_down: false,
            destroyed: false,
        }
    }

    /// Setup is complete once the page is loaded and the initial face set
    /// is baked (or there was nothing to bake). Drives the loading overlay.
    pub fn setup_complete(&self) -> bool {
        !self.loading && self.fetch_rx.is_none() && self.pending_bakes == 0
    }
}
