/// GPU-side vertex types and per-mesh buffers.

use bytemuck::{Pod, Zeroable};
use rustc_hash::FxHashMap;
use frustum_viewer::fviewer::scene::{BoxGeometry, Mesh, MeshKey, Scene};
use frustum_viewer::glam::Mat4;
use crate::wgpu;
use crate::wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct MeshVertex {
    pub pos: [f32; 3],
    pub normal: [f32; 3],
}

pub(crate) const MESH_VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

impl MeshVertex {
    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: core::mem::size_of::<MeshVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_VERTEX_ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub(crate) struct LineVertex {
    pub pos: [f32; 3],
}

pub(crate) const LINE_VERTEX_ATTRS: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];

impl LineVertex {
    pub(crate) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: core::mem::size_of::<LineVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &LINE_VERTEX_ATTRS,
        }
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct CameraUbo {
    pub vp: [[f32; 4]; 4],
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(crate) struct ObjectUbo {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
}

impl ObjectUbo {
    pub(crate) fn new(model: Mat4, color: [f32; 4]) -> Self {
        Self { model: model.to_cols_array_2d(), color }
    }
}

/// Interleave box positions and normals.
pub(crate) fn box_vertices(geometry: &BoxGeometry) -> Vec<MeshVertex> {
    geometry
        .positions()
        .into_iter()
        .zip(geometry.normals())
        .map(|(pos, normal)| MeshVertex { pos: pos.to_array(), normal: normal.to_array() })
        .collect()
}

/// Uploaded buffers of one scene mesh.
pub(crate) struct GpuMesh {
    geometry: BoxGeometry,
    vbuf: wgpu::Buffer,
    ibuf: wgpu::Buffer,
    index_count: u32,
    obj_buf: wgpu::Buffer,
    obj_bg: wgpu::BindGroup,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, obj_layout: &wgpu::BindGroupLayout, mesh: &Mesh) -> Self {
        let geometry = *mesh.geometry();
        let vertices = box_vertices(&geometry);
        let indices = geometry.indices();

        let vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_vbuf"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_ibuf"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let obj_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("mesh_obj_buf"),
            contents: bytemuck::bytes_of(&ObjectUbo::new(mesh.world_matrix(), mesh.color())),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let obj_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("mesh_obj_bg"),
            layout: obj_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: obj_buf.as_entire_binding(),
            }],
        });

        Self {
            geometry,
            vbuf,
            ibuf,
            index_count: indices.len() as u32,
            obj_buf,
            obj_bg,
        }
    }

    pub(crate) fn draw(&self, rp: &mut wgpu::RenderPass<'_>) {
        rp.set_bind_group(1, &self.obj_bg, &[]);
        rp.set_vertex_buffer(0, self.vbuf.slice(..));
        rp.set_index_buffer(self.ibuf.slice(..), wgpu::IndexFormat::Uint16);
        rp.draw_indexed(0..self.index_count, 0, 0..1);
    }

    pub(crate) fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }
}

/// Scene meshes uploaded to the GPU, keyed by scene key.
#[derive(Default)]
pub(crate) struct GpuMeshCache {
    meshes: FxHashMap<MeshKey, GpuMesh>,
}

impl GpuMeshCache {
    /// Upload new meshes, refresh transforms and colors, drop removed ones.
    pub(crate) fn sync(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        obj_layout: &wgpu::BindGroupLayout,
        scene: &Scene,
    ) {
        self.meshes.retain(|key, _| scene.get(*key).is_some());

        for (key, mesh) in scene.iter() {
            let stale = self
                .meshes
                .get(&key)
                .map_or(true, |gpu| gpu.geometry != *mesh.geometry());
            if stale {
                self.meshes.insert(key, GpuMesh::upload(device, obj_layout, mesh));
            } else if let Some(gpu) = self.meshes.get(&key) {
                let ubo = ObjectUbo::new(mesh.world_matrix(), mesh.color());
                queue.write_buffer(&gpu.obj_buf, 0, bytemuck::bytes_of(&ubo));
            }
        }
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &GpuMesh> {
        self.meshes.values()
    }

    pub(crate) fn len(&self) -> usize {
        self.meshes.len()
    }
}

#[cfg(test)]
#[path = "wgpu_mesh_tests.rs"]
mod tests;
