//! CPU-side geometry for the wgpu backend.
//!
//! Meshes are built once per distinct [`Shape`] and cached on the GPU;
//! helper lines are rebuilt every frame since they are tiny.

use std::f32::consts::PI;

use glam::Vec3;

use crate::scene::Shape;
use crate::types::{LineVertex, MeshVertex};

/// Indexed triangle list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Tessellate a shape; degenerate dimensions produce an empty mesh
pub fn build_shape(shape: &Shape) -> MeshData {
    match *shape {
        Shape::Cuboid {
            width,
            height,
            depth,
        } => cuboid(width, height, depth),
        Shape::Sphere {
            radius,
            width_segments,
            height_segments,
        } => uv_sphere(radius, width_segments, height_segments),
    }
}

/// Axis-aligned box centred on the origin, four vertices per face
pub fn cuboid(width: f32, height: f32, depth: f32) -> MeshData {
    if !(width > 0.0 && height > 0.0 && depth > 0.0) {
        return MeshData::default();
    }

    let half = Vec3::new(width, height, depth) * 0.5;
    // (normal, u, v) with u x v == normal so corners wind counter-clockwise
    let faces = [
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
    ];
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

    let mut mesh = MeshData {
        vertices: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (normal, u, v) in faces {
        let base = mesh.vertices.len() as u32;
        mesh.vertices.extend(corners.iter().map(|&(su, sv)| {
            let position = (normal + u * su + v * sv) * half;
            MeshVertex::new(position.to_array(), normal.to_array())
        }));
        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}

/// Latitude/longitude sphere; at least 3 slices and 2 stacks are used
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    if !(radius > 0.0) {
        return MeshData::default();
    }

    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let row = ws + 1;

    let vertices = (0..=hs)
        .flat_map(|iy| {
            let v = iy as f32 / hs as f32;
            (0..=ws).map(move |ix| {
                let u = ix as f32 / ws as f32;
                let normal = Vec3::new(
                    -(u * 2.0 * PI).cos() * (v * PI).sin(),
                    (v * PI).cos(),
                    (u * 2.0 * PI).sin() * (v * PI).sin(),
                );
                MeshVertex::new((normal * radius).to_array(), normal.to_array())
            })
        })
        .collect::<Vec<_>>();

    let mut indices = Vec::with_capacity((ws * hs * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;

            // Pole rows collapse to a single triangle per quad
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    MeshData { vertices, indices }
}

/// Line-list vertices for an axes helper of the given length
pub fn axes_lines(size: f32) -> Vec<LineVertex> {
    [
        (Vec3::X, [1.0, 0.0, 0.0]),
        (Vec3::Y, [0.0, 1.0, 0.0]),
        (Vec3::Z, [0.0, 0.0, 1.0]),
    ]
    .into_iter()
    .flat_map(|(axis, color)| {
        [
            LineVertex::new([0.0; 3], color),
            LineVertex::new((axis * size).to_array(), color),
        ]
    })
    .collect()
}

/// Line-list vertices for a wireframe octahedron around `center`
pub fn light_marker(center: Vec3, size: f32, color: [f32; 3]) -> Vec<LineVertex> {
    let ring = [Vec3::X, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Z];
    let point = |offset: Vec3| LineVertex::new((center + offset * size).to_array(), color);

    let mut lines = Vec::with_capacity(24);
    for (i, &r) in ring.iter().enumerate() {
        let next = ring[(i + 1) % ring.len()];
        lines.extend_from_slice(&[
            point(r),
            point(next),
            point(r),
            point(Vec3::Y),
            point(r),
            point(Vec3::NEG_Y),
        ]);
    }
    lines
}
