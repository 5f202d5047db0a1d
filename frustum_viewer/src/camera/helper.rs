/// Wireframe outline of a camera's view volume.

use glam::Vec3;
use super::camera::Camera;

/// Corner order: near plane first (z = 0 in NDC), then far plane (z = 1),
/// each as bottom-left, bottom-right, top-right, top-left.
const NDC_CORNERS: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
    Vec3::new(-1.0, -1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
];

/// Twelve edges as corner index pairs.
const EDGES: [(usize, usize); 12] = [
    // near rectangle
    (0, 1), (1, 2), (2, 3), (3, 0),
    // far rectangle
    (4, 5), (5, 6), (6, 7), (7, 4),
    // sides
    (0, 4), (1, 5), (2, 6), (3, 7),
];

/// World-space frustum corners of a camera, for line drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraHelper {
    corners: [Vec3; 8],
}

impl CameraHelper {
    pub fn from_camera(camera: &Camera) -> Self {
        let mut helper = Self { corners: [Vec3::ZERO; 8] };
        helper.update(camera);
        helper
    }

    /// Recompute the corners after the camera moved or changed projection.
    pub fn update(&mut self, camera: &Camera) {
        let inverse = camera.view_projection_matrix().inverse();
        for (corner, ndc) in self.corners.iter_mut().zip(NDC_CORNERS) {
            *corner = inverse.project_point3(ndc);
        }
    }

    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    /// Edge endpoints, two points per edge (24 points).
    pub fn line_list(&self) -> Vec<Vec3> {
        EDGES
            .iter()
            .flat_map(|&(a, b)| [self.corners[a], self.corners[b]])
            .collect()
    }
}
