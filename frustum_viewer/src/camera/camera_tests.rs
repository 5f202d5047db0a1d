use glam::{Mat4, Quat, Vec3, Vec4};
use crate::camera::projection::{OrthographicProjection, PerspectiveProjection, Projection};
use crate::error::Error;
use super::*;

fn create_perspective() -> Camera {
    Camera::new_perspective("perspective", PerspectiveProjection::new(75.0, 16.0 / 9.0, 0.1, 1000.0))
        .unwrap()
}

fn create_orthographic() -> Camera {
    Camera::new_orthographic(
        "orthographic",
        OrthographicProjection::from_frustum_size(10.0, 1.0, 0.1, 100.0),
    )
    .unwrap()
}

fn assert_mat_near(a: &Mat4, b: &Mat4) {
    assert!(a.abs_diff_eq(*b, 1e-5), "matrices differ:\n{:?}\n{:?}", a, b);
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_camera_new_defaults() {
    let camera = create_perspective();

    assert_eq!(camera.name(), "perspective");
    assert_eq!(camera.position(), Vec3::ZERO);
    assert_eq!(camera.rotation(), Quat::IDENTITY);
    assert_eq!(*camera.view_matrix(), Mat4::IDENTITY);
    assert_eq!(
        *camera.projection_matrix(),
        Mat4::perspective_rh(75.0f32.to_radians(), 16.0 / 9.0, 0.1, 1000.0)
    );
}

#[test]
fn test_camera_new_rejects_invalid_projection() {
    let result = Camera::new_perspective("bad", PerspectiveProjection::new(0.0, 1.0, 0.1, 10.0));
    assert!(matches!(result, Err(Error::InvalidParameter(_))));

    let flipped = OrthographicProjection { left: 1.0, right: -1.0, top: 1.0, bottom: -1.0, near: 0.1, far: 10.0 };
    assert!(Camera::new_orthographic("bad", flipped).is_err());
}

#[test]
fn test_orthographic_matrix_matches_glam() {
    let camera = create_orthographic();
    assert_eq!(
        *camera.projection_matrix(),
        Mat4::orthographic_rh(-5.0, 5.0, -5.0, 5.0, 0.1, 100.0)
    );
}

// ============================================================================
// Matrices
// ============================================================================

#[test]
fn test_view_is_inverse_of_world() {
    let mut camera = create_perspective();
    camera.set_position(Vec3::new(2.0, 2.0, 6.0)).unwrap();
    camera.look_at(Vec3::ZERO).unwrap();

    assert_mat_near(&(camera.world_matrix() * *camera.view_matrix()), &Mat4::IDENTITY);
}

#[test]
fn test_view_projection_matrix() {
    let mut camera = create_perspective();
    camera.set_position(Vec3::new(0.0, 0.0, 5.0)).unwrap();

    let expected = *camera.projection_matrix() * *camera.view_matrix();
    assert_eq!(camera.view_projection_matrix(), expected);
}

#[test]
fn test_look_at_matches_glam_look_at() {
    let mut camera = create_perspective();
    let eye = Vec3::new(2.0, 2.0, 6.0);
    camera.set_position(eye).unwrap();
    camera.look_at(Vec3::ZERO).unwrap();

    assert_mat_near(camera.view_matrix(), &Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y));
    assert!(camera.forward().abs_diff_eq(-eye.normalize(), 1e-5));
}

#[test]
fn test_look_at_straight_down() {
    let mut camera = create_perspective();
    camera.set_position(Vec3::new(0.0, 10.0, 0.0)).unwrap();
    camera.look_at(Vec3::ZERO).unwrap();

    assert!(camera.forward().abs_diff_eq(Vec3::NEG_Y, 1e-5));
    assert!(camera.view_matrix().is_finite());
}

#[test]
fn test_look_at_own_position_is_rejected() {
    let mut camera = create_perspective();
    camera.set_position(Vec3::ONE).unwrap();
    let before = *camera.view_matrix();

    assert!(camera.look_at(Vec3::ONE).is_err());
    assert_eq!(*camera.view_matrix(), before);
}

#[test]
fn test_look_at_distance_floor() {
    let mut camera = create_perspective();
    camera.set_position(Vec3::new(0.0, 0.0, MIN_LOOK_DISTANCE * 0.5)).unwrap();
    assert!(camera.look_at(Vec3::ZERO).is_err());

    camera.set_position(Vec3::new(0.0, 0.0, MIN_LOOK_DISTANCE * 2.0)).unwrap();
    camera.look_at(Vec3::ZERO).unwrap();
    assert!(camera.forward().abs_diff_eq(Vec3::NEG_Z, 1e-4));
}

// ============================================================================
// Setters
// ============================================================================

#[test]
fn test_set_position_updates_view() {
    let mut camera = create_orthographic();
    camera.set_position(Vec3::new(0.0, 0.0, 1.0)).unwrap();

    let origin_in_view = *camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
    assert!((origin_in_view.z - -1.0).abs() < 1e-6);
}

#[test]
fn test_set_position_rejects_non_finite() {
    let mut camera = create_orthographic();
    camera.set_position(Vec3::new(1.0, 2.0, 3.0)).unwrap();

    assert!(matches!(
        camera.set_position(Vec3::new(f32::NAN, 0.0, 0.0)),
        Err(Error::InvalidParameter(_))
    ));
    assert!(camera.set_position_axis(Axis::Y, f32::INFINITY).is_err());
    assert_eq!(camera.position(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_set_position_axis() {
    let mut camera = create_orthographic();
    camera.set_position_axis(Axis::X, 4.0).unwrap();
    camera.set_position_axis(Axis::Z, -2.0).unwrap();

    assert_eq!(camera.position(), Vec3::new(4.0, 0.0, -2.0));
}

#[test]
fn test_set_rotation_normalizes() {
    let mut camera = create_perspective();
    camera.set_rotation(Quat::from_xyzw(0.0, 2.0, 0.0, 0.0)).unwrap();

    assert!((camera.rotation().length() - 1.0).abs() < 1e-6);
    assert!(camera.set_rotation(Quat::from_xyzw(0.0, 0.0, 0.0, 0.0)).is_err());
}

#[test]
fn test_set_projection_validates() {
    let mut camera = create_perspective();
    let before = *camera.projection_matrix();

    let invalid = Projection::Perspective(PerspectiveProjection::new(75.0, 1.0, 10.0, 1.0));
    assert!(camera.set_projection(invalid).is_err());
    assert_eq!(*camera.projection_matrix(), before);

    let wider = Projection::Perspective(PerspectiveProjection::new(75.0, 2.0, 0.1, 1000.0));
    camera.set_projection(wider).unwrap();
    assert_ne!(*camera.projection_matrix(), before);
    assert_eq!(*camera.projection(), wider);
}

#[test]
fn test_axis_helpers() {
    assert_eq!(Axis::ALL.map(Axis::index), [0, 1, 2]);
    assert_eq!(Axis::ALL.map(Axis::label), ["x", "y", "z"]);
}
