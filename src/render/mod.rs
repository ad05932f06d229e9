//! Rendering collaborator.
//!
//! The widget consumes a narrow surface: a box mesh, six assignable face
//! materials, a camera with settable distance/aspect/fov, and a render call
//! producing an RGBA frame. `cube` implements it as a CPU rasterizer.

pub mod cube;

use std::sync::Arc;

use image::RgbaImage;

use crate::face::Face;

/// Solid material used for Top/Bottom and for lateral faces that have no
/// baked texture yet (#332B26).
pub const PLACEHOLDER_COLOR: [u8; 4] = [0x33, 0x2B, 0x26, 230];
/// Box edge line color (#272727).
pub const EDGE_COLOR: [u8; 4] = [0x27, 0x27, 0x27, 255];

/// One face's material.
#[derive(Clone)]
pub enum FaceMaterial {
    Solid([u8; 4]),
    Bitmap(Arc<RgbaImage>),
}

/// A baked texture bound to a physical face.
#[derive(Clone)]
pub struct FaceTexture {
    pub face: Face,
    pub bitmap: Option<Arc<RgbaImage>>,
    /// Index of the item the bitmap was baked from; `None` for placeholder
    /// faces (Top/Bottom, or a bake that resolved empty).
    pub source_item: Option<usize>,
}

/// Assignable material set for all six faces.
#[derive(Clone)]
pub struct FaceMaterials {
    slots: [FaceMaterial; 6],
}

fn slot(face: Face) -> usize {
    match face {
        Face::Front => 0,
        Face::Right => 1,
        Face::Back => 2,
        Face::Left => 3,
        Face::Top => 4,
        Face::Bottom => 5,
    }
}

impl FaceMaterials {
    /// All six faces on the placeholder solid.
    pub fn placeholder() -> Self {
        Self {
            slots: std::array::from_fn(|_| FaceMaterial::Solid(PLACEHOLDER_COLOR)),
        }
    }

    /// Replace the whole material set from baked face textures. Faces
    /// without a bitmap keep the placeholder solid.
    pub fn assign(&mut self, textures: &[FaceTexture]) {
        for tex in textures {
            self.slots[slot(tex.face)] = match &tex.bitmap {
                Some(bitmap) => FaceMaterial::Bitmap(Arc::clone(bitmap)),
                None => FaceMaterial::Solid(PLACEHOLDER_COLOR),
            };
        }
    }

    pub fn get(&self, face: Face) -> &FaceMaterial {
        &self.slots[slot(face)]
    }
}

/// Box mesh dimensions in world units.
#[derive(Debug, Clone, Copy)]
pub struct CubeMesh {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Perspective camera on the +z axis looking at the origin.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    /// Distance from the origin along +z.
    pub z: f32,
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            z: 6.0,
            aspect: 1.0,
            fov_deg: 40.0,
        }
    }
}
