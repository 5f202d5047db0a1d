//! Scene module
//!
//! Meshes, their bounding volumes, and the slot-map keyed scene that owns them.

mod bounds;
mod mesh;
mod scene;

pub use bounds::{AABB, BoundingSphere, BoundingVolume, Bounded};
pub use mesh::{BoxGeometry, Mesh};
pub use scene::{MeshKey, Scene};
