use glam::{Mat4, Quat, Vec3};
use super::*;

fn unit_box() -> AABB {
    AABB::from_center_size(Vec3::ZERO, Vec3::ONE)
}

#[test]
fn test_from_center_size() {
    let aabb = AABB::from_center_size(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 0.0));
    assert_eq!(aabb.max, Vec3::new(2.0, 4.0, 6.0));
    assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
}

#[test]
fn test_transformed_by_translation() {
    let moved = unit_box().transformed(&Mat4::from_translation(Vec3::new(1000.0, 0.0, 0.0)));
    assert_eq!(moved.min, Vec3::new(999.5, -0.5, -0.5));
    assert_eq!(moved.max, Vec3::new(1000.5, 0.5, 0.5));
}

#[test]
fn test_transformed_by_rotation_grows_box() {
    let rotated = unit_box().transformed(&Mat4::from_quat(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4)));
    let half_diag = std::f32::consts::FRAC_1_SQRT_2;
    assert!((rotated.max.x - half_diag).abs() < 1e-5);
    assert!((rotated.max.z - half_diag).abs() < 1e-5);
    assert!((rotated.max.y - 0.5).abs() < 1e-5);
}

#[test]
fn test_contains_and_intersects() {
    let big = AABB::from_center_size(Vec3::ZERO, Vec3::splat(10.0));
    let small = unit_box();
    let far = AABB::from_center_size(Vec3::new(20.0, 0.0, 0.0), Vec3::ONE);

    assert!(big.contains(&small));
    assert!(!small.contains(&big));
    assert!(big.intersects(&small));
    assert!(!big.intersects(&far));
}

#[test]
fn test_unit_box_bounding_sphere() {
    let sphere = unit_box().bounding_sphere();
    assert_eq!(sphere.center, Vec3::ZERO);
    assert!((sphere.radius - 3.0f32.sqrt() * 0.5).abs() < 1e-6);
}

#[test]
fn test_sphere_transformed_uses_largest_scale() {
    let sphere = BoundingSphere::new(Vec3::ZERO, 1.0);
    let matrix = Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, 3.0, 2.0),
        Quat::IDENTITY,
        Vec3::new(0.0, 5.0, 0.0),
    );
    let world = sphere.transformed(&matrix);

    assert_eq!(world.center, Vec3::new(0.0, 5.0, 0.0));
    assert!((world.radius - 3.0).abs() < 1e-5);
}

#[test]
fn test_bounded_impls_wrap_volume() {
    let aabb = unit_box();
    assert_eq!(aabb.world_bounding_volume(), BoundingVolume::Box(aabb));

    let sphere = BoundingSphere::new(Vec3::X, 2.0);
    assert_eq!(sphere.world_bounding_volume(), BoundingVolume::Sphere(sphere));
}
