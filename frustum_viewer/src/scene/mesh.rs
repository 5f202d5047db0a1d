/// Box geometry and the mesh instances placed in the scene.

use glam::{Mat4, Quat, Vec3};
use crate::config::Color;
use crate::error::Result;
use crate::engine_bail;
use super::bounds::{AABB, BoundingSphere, BoundingVolume, Bounded};

/// Axis-aligned box centered on its local origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxGeometry {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

/// Outward normal and the two in-plane axes (u, v) of each face,
/// wound counter-clockwise seen from outside.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

impl BoxGeometry {
    pub fn new(width: f32, height: f32, depth: f32) -> Result<Self> {
        let size = Vec3::new(width, height, depth);
        if !size.is_finite() || size.min_element() <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::BoxGeometry",
                "box dimensions must be positive, got {}", size);
        }
        Ok(Self { width, height, depth })
    }

    pub fn size(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth)
    }

    /// Four vertices per face so every face gets its own flat normal.
    pub fn positions(&self) -> Vec<Vec3> {
        let half = self.size() * 0.5;
        FACES
            .iter()
            .flat_map(|&(normal, u, v)| {
                [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
                    .map(|(su, sv): (f32, f32)| (normal + u * su + v * sv) * half)
            })
            .collect()
    }

    /// Per-vertex normals, parallel to `positions()`.
    pub fn normals(&self) -> Vec<Vec3> {
        FACES.iter().flat_map(|&(normal, _, _)| [normal; 4]).collect()
    }

    /// Triangle list indices, two triangles per face.
    pub fn indices(&self) -> Vec<u16> {
        (0..FACES.len() as u16)
            .flat_map(|face| {
                let base = face * 4;
                [base, base + 1, base + 2, base, base + 2, base + 3]
            })
            .collect()
    }

    pub fn local_aabb(&self) -> AABB {
        AABB::from_center_size(Vec3::ZERO, self.size())
    }

    pub fn local_bounding_sphere(&self) -> BoundingSphere {
        self.local_aabb().bounding_sphere()
    }
}

/// A box placed in the world with a flat color.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    geometry: BoxGeometry,
    color: Color,
    position: Vec3,
    rotation: Quat,
    scale: Vec3,
}

impl Mesh {
    pub fn new(name: impl Into<String>, geometry: BoxGeometry, color: Color) -> Self {
        Self {
            name: name.into(),
            geometry,
            color,
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry(&self) -> &BoxGeometry {
        &self.geometry
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Quat {
        self.rotation
    }

    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    pub fn set_position(&mut self, position: Vec3) -> Result<()> {
        if !position.is_finite() {
            engine_bail!(InvalidParameter, "fviewer::Mesh",
                "mesh '{}' position must be finite, got {}", self.name, position);
        }
        self.position = position;
        Ok(())
    }

    pub fn set_rotation(&mut self, rotation: Quat) -> Result<()> {
        if !rotation.is_finite() || rotation.length_squared() == 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Mesh",
                "mesh '{}' rotation must be a finite non-zero quaternion", self.name);
        }
        self.rotation = rotation.normalize();
        Ok(())
    }

    pub fn set_scale(&mut self, scale: Vec3) -> Result<()> {
        if !scale.is_finite() || scale.min_element() <= 0.0 {
            engine_bail!(InvalidParameter, "fviewer::Mesh",
                "mesh '{}' scale must be positive, got {}", self.name, scale);
        }
        self.scale = scale;
        Ok(())
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn world_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    pub fn world_aabb(&self) -> AABB {
        self.geometry.local_aabb().transformed(&self.world_matrix())
    }

    pub fn world_bounding_sphere(&self) -> BoundingSphere {
        self.geometry.local_bounding_sphere().transformed(&self.world_matrix())
    }
}

/// Meshes report their world bounding sphere.
impl Bounded for Mesh {
    fn world_bounding_volume(&self) -> BoundingVolume {
        BoundingVolume::Sphere(self.world_bounding_sphere())
    }
}
