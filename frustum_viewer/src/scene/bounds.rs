/// Bounding volumes used by the frustum tests.
///
/// Volumes are stored in local space by their owner and transformed by the
/// owner's world matrix when a world-space test is needed.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box centered on `center` with full extents `size`.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self { min: center - half, max: center + half }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Transform this local-space AABB by a matrix, returning a new AABB.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the AABB extents
    /// for an exact (tight) result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this AABB fully contains another AABB.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if this AABB intersects (overlaps or touches) another AABB.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Smallest sphere around the box (center + half diagonal).
    pub fn bounding_sphere(&self) -> BoundingSphere {
        BoundingSphere {
            center: self.center(),
            radius: self.size().length() * 0.5,
        }
    }
}

/// Sphere enclosing an object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Transform by a world matrix. The radius grows with the largest axis scale,
    /// so non-uniform scales stay conservative.
    pub fn transformed(&self, matrix: &Mat4) -> BoundingSphere {
        let max_scale_sq = matrix.x_axis.truncate().length_squared()
            .max(matrix.y_axis.truncate().length_squared())
            .max(matrix.z_axis.truncate().length_squared());

        BoundingSphere {
            center: matrix.transform_point3(self.center),
            radius: self.radius * max_scale_sq.sqrt(),
        }
    }
}

/// World-space volume handed to the frustum tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Box(AABB),
    Sphere(BoundingSphere),
}

/// Anything the visibility monitor can track.
pub trait Bounded {
    /// World-space bounding volume for the current frame.
    fn world_bounding_volume(&self) -> BoundingVolume;
}

impl Bounded for BoundingVolume {
    fn world_bounding_volume(&self) -> BoundingVolume {
        *self
    }
}

impl Bounded for AABB {
    fn world_bounding_volume(&self) -> BoundingVolume {
        BoundingVolume::Box(*self)
    }
}

impl Bounded for BoundingSphere {
    fn world_bounding_volume(&self) -> BoundingVolume {
        BoundingVolume::Sphere(*self)
    }
}

#[cfg(test)]
#[path = "bounds_tests.rs"]
mod tests;
