/// Orbit controller - rotates, dollies and pans a camera around a focus point.
///
/// Input handlers only accumulate deltas. `update` applies them once per frame,
/// so several pointer events between two frames collapse into one move.

use std::f32::consts::PI;
use glam::Vec3;
use crate::error::Result;
use super::camera::{Camera, MIN_LOOK_DISTANCE};
use super::projection::Projection;

/// Keeps the camera off the poles, where the up vector degenerates.
const POLAR_EPSILON: f32 = 1e-6;
const MOVE_EPSILON: f32 = 1e-6;
/// Smallest orbit radius, kept above the look-at floor so rounding cannot cross it.
const MIN_RADIUS: f32 = MIN_LOOK_DISTANCE * 10.0;

/// Offset from the target in spherical coordinates, +Y up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Polar angle from +Y
    phi: f32,
    /// Azimuth around +Y, measured from +Z
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self { radius, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct OrbitController {
    /// Point the camera orbits around and looks at
    pub target: Vec3,
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    pan_offset: Vec3,
}

impl Default for OrbitController {
    fn default() -> Self {
        Self::new(Vec3::ZERO)
    }
}

impl OrbitController {
    pub fn new(target: Vec3) -> Self {
        Self {
            target,
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            min_distance: 0.0,
            max_distance: f32::INFINITY,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
        }
    }

    /// Rotate around the vertical axis. Positive angles move the camera left.
    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    /// Rotate toward the top pole.
    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    /// Move toward the target. `scale` is in (0, 1); see [`Self::zoom_scale`].
    pub fn dolly_in(&mut self, scale: f32) {
        if self.enable_zoom && scale > 0.0 {
            self.scale *= scale;
        }
    }

    /// Move away from the target.
    pub fn dolly_out(&mut self, scale: f32) {
        if self.enable_zoom && scale > 0.0 {
            self.scale /= scale;
        }
    }

    /// Per-step dolly factor for one wheel notch.
    pub fn zoom_scale(&self) -> f32 {
        0.95f32.powf(self.zoom_speed)
    }

    /// Pointer drag in pixels, mapped to a rotation.
    ///
    /// A drag across the full viewport height is one full turn.
    pub fn on_drag_rotate(&mut self, dx: f32, dy: f32, viewport_height: f32) {
        if !self.enable_rotate || viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(2.0 * PI * dx / viewport_height * self.rotate_speed);
        self.rotate_up(2.0 * PI * dy / viewport_height * self.rotate_speed);
    }

    /// Pointer drag in pixels, mapped to a translation of both camera and
    /// target in the camera's screen plane.
    pub fn pan(&mut self, dx: f32, dy: f32, viewport_height: f32, camera: &Camera) {
        if !self.enable_pan || viewport_height <= 0.0 {
            return;
        }
        let world_per_pixel = match camera.projection() {
            Projection::Perspective(p) => {
                let distance = (camera.position() - self.target).length();
                2.0 * distance * (p.fov_y_degrees.to_radians() / 2.0).tan() / viewport_height
            }
            Projection::Orthographic(p) => (p.top - p.bottom) / viewport_height,
        };
        let world = camera.world_matrix();
        let right = world.x_axis.truncate();
        let up = world.y_axis.truncate();

        self.pan_offset -= right * (dx * world_per_pixel * self.pan_speed);
        self.pan_offset += up * (dy * world_per_pixel * self.pan_speed);
    }

    /// Apply pending input to `camera`. Returns whether the camera moved.
    ///
    /// Pending input is consumed either way. On error the camera and the
    /// target are left untouched.
    pub fn update(&mut self, camera: &mut Camera) -> Result<bool> {
        let old_position = camera.position();
        let old_rotation = camera.rotation();

        let min_radius = self.min_distance.max(MIN_RADIUS);
        let max_radius = self.max_distance.max(min_radius);
        let mut spherical = Spherical::from_offset(old_position - self.target);
        spherical.theta += self.delta_theta;
        spherical.phi = (spherical.phi + self.delta_phi).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        spherical.radius = (spherical.radius * self.scale).clamp(min_radius, max_radius);
        let target = self.target + self.pan_offset;

        self.delta_theta = 0.0;
        self.delta_phi = 0.0;
        self.scale = 1.0;
        self.pan_offset = Vec3::ZERO;

        let mut placed = camera.clone();
        placed.set_position(target + spherical.to_offset())?;
        placed.look_at(target)?;
        *camera = placed;
        self.target = target;

        let moved = camera.position().distance_squared(old_position) > MOVE_EPSILON
            || 8.0 * (1.0 - camera.rotation().dot(old_rotation).abs()) > MOVE_EPSILON;
        Ok(moved)
    }
}

#[cfg(test)]
#[path = "orbit_tests.rs"]
mod tests;
