//! Responsive framing.
//!
//! Derives the camera distance that keeps the cube fully visible under
//! rotation for any viewport: pick a target on-screen size, shrink it by the
//! cube's diagonal silhouette, then solve the field-of-view triangle for the
//! distance that projects the cube to that size.

/// Inputs of one framing pass. Ephemeral: rebuilt on every resize and once
/// after the initial textures are ready.
#[derive(Debug, Clone, Copy)]
pub struct ViewportFrame {
    pub container_width: f32,
    pub container_height: f32,
    pub fov_deg: f32,
    pub cube_width: f32,
    pub cube_height: f32,
    pub cube_depth: f32,
}

/// Margin factor: the cube targets 90% of the container on each axis.
const FILL: f32 = 0.9;
/// Pushback past the near face to avoid near-plane clipping.
const NEAR_EPSILON: f32 = 0.01;

/// Camera distance along the view axis for a frame.
///
/// A degenerate container height is clamped to 1 so the division never
/// explodes; the result is then merely meaningless, not NaN.
pub fn camera_distance(frame: &ViewportFrame) -> f32 {
    let ratio = frame.cube_height / frame.cube_width;

    // Target on-screen width, bounded by both container axes
    let max_w = frame.container_width * FILL;
    let max_h = frame.container_height * FILL;
    let mut w = max_w.min(max_h / ratio);

    // Diagonal silhouette: mid-rotation the cube is wider than its face
    let safety =
        (frame.cube_width * frame.cube_width + frame.cube_depth * frame.cube_depth).sqrt()
            / frame.cube_width;
    w /= safety;

    let h = w * ratio;

    let view_h = frame.container_height.max(1.0);
    let fov_rad = frame.fov_deg.to_radians();
    let z = (view_h * frame.cube_height) / (2.0 * h * (fov_rad / 2.0).tan());

    z + frame.cube_depth / 2.0 + NEAR_EPSILON
}

/// Aspect ratio for the camera, guarded against a zero-height container.
pub fn aspect(container_width: f32, container_height: f32) -> f32 {
    container_width / container_height.max(1.0)
}
