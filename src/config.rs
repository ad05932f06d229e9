//! Widget configuration.
//!
//! Reserved attribute names, input thresholds, face conventions, and the
//! canvas/cube geometry live in one injected struct so hosts can adapt the
//! widget without code edits.

/// Configuration for a cube menu instance.
#[derive(Debug, Clone)]
pub struct CubeConfig {
    /// Attribute marking an element as a cube item; its value is the
    /// optional ordering number.
    pub item_attr: String,
    /// Attribute on an item element carrying the destination link.
    pub link_attr: String,
    /// Attribute marking an embedded image as eligible for compositing.
    pub image_attr: String,
    /// Prefix prepended to links that carry no recognized scheme or path.
    pub base_path: String,

    /// Lateral sectors per full revolution (3 or 4).
    pub faces_per_revolution: u32,
    /// Cumulative pointer travel (px) before an interaction counts as a drag.
    pub drag_threshold: f32,
    /// Maximum press duration (seconds) for a click.
    pub click_max_secs: f64,
    /// Radians of rotation per horizontal pixel dragged.
    pub drag_sensitivity: f32,
    /// Exponential smoothing factor per tick, in (0, 1).
    pub damping: f32,
    /// Idle auto-rotation: radians added to the target per tick, or `None`.
    pub auto_rotate_speed: Option<f32>,
    /// Seconds without interaction before auto-rotation kicks in.
    pub auto_rotate_delay: f64,
    /// Initial rotation angle (radians).
    pub start_angle: f32,

    /// Baked texture dimensions (px).
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Vertical pitch between stacked overlay text lines (px).
    pub text_line_pitch: u32,
    /// Top offset of the first overlay text line (px).
    pub text_top_offset: u32,

    /// Cube dimensions in world units.
    pub cube_width: f32,
    pub cube_height: f32,
    pub cube_depth: f32,
    /// Fixed downward tilt applied to the cube (radians).
    pub base_pitch: f32,
    /// Vertical field of view (degrees).
    pub fov_deg: f32,
}

impl Default for CubeConfig {
    fn default() -> Self {
        Self {
            item_attr: "data-cube-item".into(),
            link_attr: "data-link".into(),
            image_attr: "data-cube-image".into(),
            base_path: "/listings/".into(),

            faces_per_revolution: 4,
            drag_threshold: 5.0,
            click_max_secs: 0.3,
            drag_sensitivity: 0.01,
            damping: 0.1,
            auto_rotate_speed: Some(-0.0008),
            auto_rotate_delay: 2.0,
            start_angle: -0.6,

            canvas_width: 1024,
            canvas_height: 768,
            text_line_pitch: 40,
            text_top_offset: 50,

            cube_width: 4.5,
            cube_height: 3.375,
            cube_depth: 4.5,
            base_pitch: 0.0,
            fov_deg: 40.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_reference_constants() {
        let cfg = CubeConfig::default();
        assert_eq!(cfg.faces_per_revolution, 4);
        assert!((cfg.drag_threshold - 5.0).abs() < f32::EPSILON);
        assert!((cfg.damping - 0.1).abs() < f32::EPSILON);
        assert_eq!(cfg.canvas_width, 1024);
        assert_eq!(cfg.canvas_height, 768);
        assert!((cfg.cube_height / cfg.cube_width - 0.75).abs() < 1e-6);
    }
}
