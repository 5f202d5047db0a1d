use frustum_viewer::fviewer::scene::BoxGeometry;
use frustum_viewer::glam::{Mat4, Vec3};
use super::*;

#[test]
fn test_vertex_sizes_match_layouts() {
    assert_eq!(core::mem::size_of::<MeshVertex>(), 24);
    assert_eq!(MeshVertex::layout().array_stride, 24);
    assert_eq!(core::mem::size_of::<LineVertex>(), 12);
    assert_eq!(LineVertex::layout().array_stride, 12);
}

#[test]
fn test_uniform_sizes_are_16_byte_aligned() {
    assert_eq!(core::mem::size_of::<CameraUbo>(), 64);
    assert_eq!(core::mem::size_of::<ObjectUbo>(), 80);
    assert_eq!(core::mem::size_of::<ObjectUbo>() % 16, 0);
}

#[test]
fn test_box_vertices_interleave_geometry() {
    let geometry = BoxGeometry::new(2.0, 2.0, 2.0).unwrap();
    let vertices = box_vertices(&geometry);

    assert_eq!(vertices.len(), 24);
    assert_eq!(vertices[0].normal, Vec3::X.to_array());
    assert_eq!(vertices[0].pos, geometry.positions()[0].to_array());
    assert!(vertices.iter().all(|v| v.pos.iter().all(|c| c.abs() == 1.0)));
}

#[test]
fn test_object_ubo_is_column_major() {
    let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
    let ubo = ObjectUbo::new(model, [1.0, 0.5, 0.0, 1.0]);

    assert_eq!(ubo.model[3], [1.0, 2.0, 3.0, 1.0]);
    assert_eq!(ubo.color, [1.0, 0.5, 0.0, 1.0]);
}
