//! Texture baking.
//!
//! Converts one item's markup fragment into a fixed-size RGBA bitmap:
//! settle every marked image (success or failure), composite them cover-fit
//! onto the canvas, then stack the fragment's headings and paragraphs as
//! overlay text. Bakes run on background threads; per-image failure is local
//! and never fails the bake.

pub mod compose;
pub mod font;

use image::RgbaImage;

use crate::config::CubeConfig;
use crate::dom::DomNode;
use crate::net::image::ImageCache;

/// Attributes a paint override may have to lift from a hidden fragment.
const HIDDEN_ATTR: &str = "hidden";
const STYLE_ATTR: &str = "style";

/// RAII presentation override.
///
/// Items are usually hidden in the host page's normal layout. The override
/// strips the suppression for the duration of the bake and restores the
/// original attributes on drop, so every exit path — including an early
/// return — leaves the fragment exactly as found.
pub struct PaintOverride<'a> {
    node: &'a mut DomNode,
    saved_hidden: Option<String>,
    saved_style: Option<String>,
}

impl<'a> PaintOverride<'a> {
    pub fn apply(node: &'a mut DomNode) -> Self {
        let saved_hidden = node.attributes.remove(HIDDEN_ATTR);
        let saved_style = node.attributes.remove(STYLE_ATTR);
        Self {
            node,
            saved_hidden,
            saved_style,
        }
    }

    pub fn fragment(&self) -> &DomNode {
        self.node
    }
}

impl Drop for PaintOverride<'_> {
    fn drop(&mut self) {
        if let Some(hidden) = self.saved_hidden.take() {
            self.node.attributes.insert(HIDDEN_ATTR.into(), hidden);
        }
        if let Some(style) = self.saved_style.take() {
            self.node.attributes.insert(STYLE_ATTR.into(), style);
        }
    }
}

/// Bakes fragments into face bitmaps.
pub struct TextureBaker {
    canvas_width: u32,
    canvas_height: u32,
    text_top_offset: u32,
    text_line_pitch: u32,
    image_attr: String,
}

impl TextureBaker {
    pub fn new(config: &CubeConfig) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            text_top_offset: config.text_top_offset,
            text_line_pitch: config.text_line_pitch,
            image_attr: config.image_attr.clone(),
        }
    }

    /// Bake one fragment. A missing fragment resolves with `None` (the face
    /// keeps its placeholder material); everything else resolves with a
    /// bitmap, images that failed to settle replaced by a fallback label.
    pub fn bake(&self, fragment: Option<&mut DomNode>, cache: &ImageCache) -> Option<RgbaImage> {
        let node = fragment?;
        let guard = PaintOverride::apply(node);

        // Settle phase: every marked image resolves to pixels or a recorded
        // failure before any compositing starts
        let urls = guard.fragment().marked_image_urls(&self.image_attr);
        let settled: Vec<_> = urls.iter().map(|url| cache.settle(url)).collect();

        let mut canvas = compose::blank_canvas(self.canvas_width, self.canvas_height);
        for outcome in &settled {
            match outcome {
                Some(img) => compose::draw_cover_image(&mut canvas, img),
                None => compose::draw_fallback_label(&mut canvas),
            }
        }

        let texts = guard.fragment().overlay_texts();
        compose::draw_overlay_texts(&mut canvas, &texts, self.text_top_offset, self.text_line_pitch);

        log::debug!(
            "baked texture: {} images ({} settled ok), {} text lines",
            urls.len(),
            settled.iter().filter(|s| s.is_some()).count(),
            texts.len()
        );

        Some(canvas)
    }
}
