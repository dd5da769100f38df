use glam::{DMat4, DQuat, DVec3, EulerRot};

use crate::math::Color;
use crate::palette::pick_color;
use crate::random::RandomSource;

/// Geometric form of a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Cuboid {
        width: f32,
        height: f32,
        depth: f32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
}

impl Shape {
    pub fn cube(size: f32) -> Self {
        Shape::Cuboid {
            width: size,
            height: size,
            depth: size,
        }
    }

    pub fn sphere(radius: f32, segments: u32) -> Self {
        Shape::Sphere {
            radius,
            width_segments: segments,
            height_segments: segments,
        }
    }
}

/// Diffuse (Lambert) material; only the colour is configurable
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
}

/// A mesh placed in the world
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    pub shape: Shape,
    pub material: Material,
    pub position: DVec3,
    /// Euler angles in radians, applied in XYZ order
    pub rotation: DVec3,
}

impl SceneObject {
    pub fn new(shape: Shape, material: Material) -> Self {
        Self {
            shape,
            material,
            position: DVec3::ZERO,
            rotation: DVec3::ZERO,
        }
    }

    /// Add `delta` radians to every rotation axis
    pub fn rotate_all(&mut self, delta: f64) {
        self.rotation += DVec3::splat(delta);
    }

    pub fn model_matrix(&self) -> DMat4 {
        let orientation = DQuat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        );
        DMat4::from_rotation_translation(orientation, self.position)
    }
}

/// Cube with edge `size` and a freshly drawn palette colour
pub fn make_cube<R: RandomSource + ?Sized>(rng: &mut R, size: f32) -> SceneObject {
    SceneObject::new(
        Shape::cube(size),
        Material {
            color: pick_color(rng),
        },
    )
}

/// UV sphere with `segments` slices and stacks and a freshly drawn palette colour
pub fn make_sphere<R: RandomSource + ?Sized>(rng: &mut R, radius: f32, segments: u32) -> SceneObject {
    SceneObject::new(
        Shape::sphere(radius, segments),
        Material {
            color: pick_color(rng),
        },
    )
}
