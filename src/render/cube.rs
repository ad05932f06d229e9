//! Software cube rasterizer.
//!
//! Rotates and projects the box, back-face culls, and rasterizes the
//! visible textured quads with perspective-correct interpolation, one row
//! per rayon task. A convex box never overlaps itself, so culling replaces
//! a depth buffer; the twelve box edges are overdrawn as dark lines for the
//! faces that survived culling.

use rayon::prelude::*;

use crate::face::Face;

use super::{Camera, CubeMesh, FaceMaterial, FaceMaterials, EDGE_COLOR};

const LATERAL_AND_CAPS: [Face; 6] = [
    Face::Front,
    Face::Right,
    Face::Back,
    Face::Left,
    Face::Top,
    Face::Bottom,
];

/// Corners (top-left, top-right, bottom-right, bottom-left as seen from
/// outside, textures upright) and the outward normal of a face.
fn face_corners(face: Face, hw: f32, hh: f32, hd: f32) -> ([[f32; 3]; 4], [f32; 3]) {
    match face {
        Face::Front => (
            [
                [-hw, hh, hd],
                [hw, hh, hd],
                [hw, -hh, hd],
                [-hw, -hh, hd],
            ],
            [0.0, 0.0, 1.0],
        ),
        Face::Back => (
            [
                [hw, hh, -hd],
                [-hw, hh, -hd],
                [-hw, -hh, -hd],
                [hw, -hh, -hd],
            ],
            [0.0, 0.0, -1.0],
        ),
        Face::Left => (
            [
                [-hw, hh, -hd],
                [-hw, hh, hd],
                [-hw, -hh, hd],
                [-hw, -hh, -hd],
            ],
            [-1.0, 0.0, 0.0],
        ),
        Face::Right => (
            [
                [hw, hh, hd],
                [hw, hh, -hd],
                [hw, -hh, -hd],
                [hw, -hh, hd],
            ],
            [1.0, 0.0, 0.0],
        ),
        Face::Top => (
            [
                [-hw, hh, -hd],
                [hw, hh, -hd],
                [hw, hh, hd],
                [-hw, hh, hd],
            ],
            [0.0, 1.0, 0.0],
        ),
        Face::Bottom => (
            [
                [-hw, -hh, hd],
                [hw, -hh, hd],
                [hw, -hh, -hd],
                [-hw, -hh, -hd],
            ],
            [0.0, -1.0, 0.0],
        ),
    }
}

/// Yaw about +y, then pitch about +x.
fn rotate(p: [f32; 3], sin_y: f32, cos_y: f32, sin_p: f32, cos_p: f32) -> [f32; 3] {
    let x = p[0] * cos_y + p[2] * sin_y;
    let z = -p[0] * sin_y + p[2] * cos_y;
    let y = p[1] * cos_p - z * sin_p;
    let z = p[1] * sin_p + z * cos_p;
    [x, y, z]
}

struct ScreenTri {
    pts: [[f32; 2]; 3],
    /// Per-vertex (u/z, v/z, 1/z) for perspective-correct lookup.
    attrs: [[f32; 3]; 3],
    material: Face,
    min_y: f32,
    max_y: f32,
}

fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

fn sample(material: &FaceMaterial, u: f32, v: f32) -> [u8; 4] {
    match material {
        FaceMaterial::Solid(color) => *color,
        FaceMaterial::Bitmap(bitmap) => {
            let tx = (u.clamp(0.0, 1.0) * (bitmap.width() - 1) as f32) as u32;
            let ty = (v.clamp(0.0, 1.0) * (bitmap.height() - 1) as f32) as u32;
            bitmap.get_pixel(tx, ty).0
        }
    }
}

/// Render one frame to straight-alpha RGBA over a transparent background.
pub fn render_frame(
    mesh: &CubeMesh,
    materials: &FaceMaterials,
    angle_y: f32,
    pitch: f32,
    camera: &Camera,
    width: usize,
    height: usize,
) -> Vec<u8> {
    let mut buf = vec![0u8; width * height * 4];
    if width == 0 || height == 0 {
        return buf;
    }

    let (hw, hh, hd) = (mesh.width / 2.0, mesh.height / 2.0, mesh.depth / 2.0);
    let (sin_y, cos_y) = angle_y.sin_cos();
    let (sin_p, cos_p) = pitch.sin_cos();
    let focal = (height as f32 / 2.0) / (camera.fov_deg.to_radians() / 2.0).tan();
    let cam_z = camera.z;

    let project = |p: [f32; 3]| -> ([f32; 2], f32) {
        let depth = (cam_z - p[2]).max(1e-3);
        (
            [
                width as f32 / 2.0 + p[0] * focal / depth,
                height as f32 / 2.0 - p[1] * focal / depth,
            ],
            depth,
        )
    };

    // Cull and project
    let mut tris: Vec<ScreenTri> = Vec::new();
    let mut visible_outlines: Vec<[[f32; 2]; 4]> = Vec::new();

    for face in LATERAL_AND_CAPS {
        let (corners, normal) = face_corners(face, hw, hh, hd);
        let world: Vec<[f32; 3]> = corners
            .iter()
            .map(|&c| rotate(c, sin_y, cos_y, sin_p, cos_p))
            .collect();
        let n = rotate(normal, sin_y, cos_y, sin_p, cos_p);
        let center = [
            (world[0][0] + world[2][0]) / 2.0,
            (world[0][1] + world[2][1]) / 2.0,
            (world[0][2] + world[2][2]) / 2.0,
        ];
        let to_camera = [-center[0], -center[1], cam_z - center[2]];
        let facing = n[0] * to_camera[0] + n[1] * to_camera[1] + n[2] * to_camera[2];
        if facing <= 0.0 {
            continue;
        }

        let uvs = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
        let projected: Vec<([f32; 2], [f32; 3])> = world
            .iter()
            .zip(uvs.iter())
            .map(|(&p, &[u, v])| {
                let (screen, depth) = project(p);
                (screen, [u / depth, v / depth, 1.0 / depth])
            })
            .collect();

        for &(i0, i1, i2) in &[(0usize, 1usize, 2usize), (0, 2, 3)] {
            let pts = [projected[i0].0, projected[i1].0, projected[i2].0];
            let min_y = pts.iter().map(|p| p[1]).fold(f32::INFINITY, f32::min);
            let max_y = pts.iter().map(|p| p[1]).fold(f32::NEG_INFINITY, f32::max);
            tris.push(ScreenTri {
                pts,
                attrs: [projected[i0].1, projected[i1].1, projected[i2].1],
                material: face,
                min_y,
                max_y,
            });
        }

        visible_outlines.push([
            projected[0].0,
            projected[1].0,
            projected[2].0,
            projected[3].0,
        ]);
    }

    // Row-parallel fill
    buf.par_chunks_mut(width * 4).enumerate().for_each(|(row_y, row)| {
        let py = row_y as f32 + 0.5;
        for tri in &tris {
            if py < tri.min_y || py > tri.max_y {
                continue;
            }
            let area = edge(tri.pts[0], tri.pts[1], tri.pts[2]);
            if area.abs() < 1e-6 {
                continue;
            }
            let min_x = tri.pts.iter().map(|p| p[0]).fold(f32::INFINITY, f32::min);
            let max_x = tri.pts.iter().map(|p| p[0]).fold(f32::NEG_INFINITY, f32::max);
            let x0 = (min_x.floor().max(0.0)) as usize;
            let x1 = (max_x.ceil().min(width as f32 - 1.0)) as usize;

            let material = materials.get(tri.material);
            for px in x0..=x1 {
                let p = [px as f32 + 0.5, py];
                // Normalizing by the signed area makes the inside test
                // winding-independent
                let w0 = edge(tri.pts[1], tri.pts[2], p) / area;
                let w1 = edge(tri.pts[2], tri.pts[0], p) / area;
                let w2 = edge(tri.pts[0], tri.pts[1], p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let uz = w0 * tri.attrs[0][0] + w1 * tri.attrs[1][0] + w2 * tri.attrs[2][0];
                let vz = w0 * tri.attrs[0][1] + w1 * tri.attrs[1][1] + w2 * tri.attrs[2][1];
                let iz = w0 * tri.attrs[0][2] + w1 * tri.attrs[1][2] + w2 * tri.attrs[2][2];
                if iz <= 0.0 {
                    continue;
                }
                let color = sample(material, uz / iz, vz / iz);
                row[px * 4..px * 4 + 4].copy_from_slice(&color);
            }
        }
    });

    // Edge pass: outline every visible face
    for outline in &visible_outlines {
        for i in 0..4 {
            let a = outline[i];
            let b = outline[(i + 1) % 4];
            draw_line(&mut buf, width, height, a, b, EDGE_COLOR);
        }
    }

    buf
}

/// Bresenham line with clipping via the per-pixel bounds check.
fn draw_line(buf: &mut [u8], width: usize, height: usize, a: [f32; 2], b: [f32; 2], color: [u8; 4]) {
    let (mut x, mut y) = (a[0].round() as i64, a[1].round() as i64);
    let (x1, y1) = (b[0].round() as i64, b[1].round() as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    let max_steps = (dx - dy) as usize + 1;

    for _ in 0..max_steps {
        if x >= 0 && y >= 0 && (x as usize) < width && (y as usize) < height {
            let idx = (y as usize * width + x as usize) * 4;
            buf[idx..idx + 4].copy_from_slice(&color);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{FaceTexture, PLACEHOLDER_COLOR};
    use image::RgbaImage;
    use std::f32::consts::FRAC_PI_2;
    use std::sync::Arc;

    fn mesh() -> CubeMesh {
        CubeMesh {
            width: 4.5,
            height: 3.375,
            depth: 4.5,
        }
    }

    fn camera() -> Camera {
        Camera {
            z: 10.0,
            aspect: 1.0,
            fov_deg: 40.0,
        }
    }

    fn solid_bitmap(value: u8) -> Arc<RgbaImage> {
        Arc::new(RgbaImage::from_pixel(
            4,
            4,
            image::Rgba([value, value, value, 255]),
        ))
    }

    fn center_pixel(buf: &[u8], w: usize, h: usize) -> [u8; 4] {
        let idx = ((h / 2) * w + w / 2) * 4;
        [buf[idx], buf[idx + 1], buf[idx + 2], buf[idx + 3]]
    }

    #[test]
    fn front_face_fills_center_at_zero_angle() {
        let mut mats = FaceMaterials::placeholder();
        mats.assign(&[FaceTexture {
            face: Face::Front,
            bitmap: Some(solid_bitmap(200)),
            source_item: Some(0),
        }]);

        let buf = render_frame(&mesh(), &mats, 0.0, 0.0, &camera(), 64, 64);
        assert_eq!(center_pixel(&buf, 64, 64)[0], 200);
    }

    #[test]
    fn quarter_turn_brings_left_face_forward() {
        let mut mats = FaceMaterials::placeholder();
        mats.assign(&[
            FaceTexture {
                face: Face::Front,
                bitmap: Some(solid_bitmap(200)),
                source_item: Some(0),
            },
            FaceTexture {
                face: Face::Left,
                bitmap: Some(solid_bitmap(120)),
                source_item: Some(1),
            },
        ]);

        let buf = render_frame(&mesh(), &mats, FRAC_PI_2, 0.0, &camera(), 64, 64);
        assert_eq!(center_pixel(&buf, 64, 64)[0], 120);
    }

    #[test]
    fn background_stays_transparent() {
        let mats = FaceMaterials::placeholder();
        let buf = render_frame(&mesh(), &mats, 0.3, 0.0, &camera(), 64, 64);
        assert_eq!(buf[3], 0, "corner pixel must keep zero alpha");
    }

    #[test]
    fn placeholder_faces_render_with_placeholder_color() {
        let mats = FaceMaterials::placeholder();
        let buf = render_frame(&mesh(), &mats, 0.0, 0.0, &camera(), 64, 64);
        assert_eq!(center_pixel(&buf, 64, 64)[0], PLACEHOLDER_COLOR[0]);
    }

    #[test]
    fn edges_are_drawn() {
        let mats = FaceMaterials::placeholder();
        let buf = render_frame(&mesh(), &mats, 0.4, 0.0, &camera(), 96, 96);
        let edge_pixels = buf
            .chunks_exact(4)
            .filter(|p| p[0] == EDGE_COLOR[0] && p[1] == EDGE_COLOR[1])
            .count();
        assert!(edge_pixels > 0);
    }

    #[test]
    fn empty_surface_renders_nothing() {
        let mats = FaceMaterials::placeholder();
        let buf = render_frame(&mesh(), &mats, 0.0, 0.0, &camera(), 0, 0);
        assert!(buf.is_empty());
    }
}
