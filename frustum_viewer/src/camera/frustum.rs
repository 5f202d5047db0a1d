/// Frustum - six clipping planes for visibility tests.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing unit normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// Clip space follows the wgpu/Vulkan convention used by glam's `*_rh`
/// projections: x, y in [-1, 1], z in [0, 1].

use glam::{Mat4, Vec3, Vec4};
use crate::scene::{AABB, BoundingSphere, BoundingVolume};

/// One of the six frustum planes, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrustumPlane {
    Left,
    Right,
    Bottom,
    Top,
    Near,
    Far,
}

impl FrustumPlane {
    pub const ALL: [FrustumPlane; 6] = [
        FrustumPlane::Left,
        FrustumPlane::Right,
        FrustumPlane::Bottom,
        FrustumPlane::Top,
        FrustumPlane::Near,
        FrustumPlane::Far,
    ];
}

/// Six frustum planes.
///
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. With a [0, 1] depth range the near
    /// plane is row2 alone (row3 + row2 would describe z = -1).
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        // Normalize each plane so distances are in world units
        for plane in &mut planes {
            let normal_len = Vec3::new(plane.x, plane.y, plane.z).length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Signed distance from a point to one plane (positive = inside).
    #[inline]
    pub fn distance_to_point(&self, plane: FrustumPlane, point: Vec3) -> f32 {
        let plane = self.planes[plane as usize];
        plane.truncate().dot(point) + plane.w
    }

    /// Test if a point lies inside (or on) all six planes.
    pub fn contains_point(&self, point: Vec3) -> bool {
        FrustumPlane::ALL.iter().all(|&plane| self.distance_to_point(plane, point) >= 0.0)
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// Uses the "positive vertex" test: for each plane, find the AABB corner
    /// most in the direction of the plane normal. If that corner is outside,
    /// the AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        for plane in &self.planes {
            let normal = Vec3::new(plane.x, plane.y, plane.z);

            let p_vertex = Vec3::new(
                if normal.x >= 0.0 { aabb.max.x } else { aabb.min.x },
                if normal.y >= 0.0 { aabb.max.y } else { aabb.min.y },
                if normal.z >= 0.0 { aabb.max.z } else { aabb.min.z },
            );

            if normal.dot(p_vertex) + plane.w < 0.0 {
                return false;
            }
        }

        true
    }

    /// Test if a sphere intersects this frustum.
    ///
    /// The sphere is outside as soon as its center lies further than `radius`
    /// behind any plane.
    pub fn intersects_sphere(&self, sphere: &BoundingSphere) -> bool {
        let center = sphere.center.extend(1.0);
        self.planes.iter().all(|plane| plane.dot(center) >= -sphere.radius)
    }

    /// Dispatch on the volume kind.
    pub fn intersects(&self, volume: &BoundingVolume) -> bool {
        match volume {
            BoundingVolume::Box(aabb) => self.intersects_aabb(aabb),
            BoundingVolume::Sphere(sphere) => self.intersects_sphere(sphere),
        }
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
