use glam::DVec3;

use crate::math::Color;

/// Omnidirectional light without distance falloff
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub color: Color,
    pub intensity: f32,
    pub position: DVec3,
}

impl PointLight {
    pub fn new(color: Color, intensity: f32) -> Self {
        Self {
            color,
            intensity,
            position: DVec3::ZERO,
        }
    }

    /// Colour premultiplied by intensity, in linear space
    pub fn radiance(&self) -> [f32; 3] {
        self.color.to_linear().map(|c| c * self.intensity)
    }
}
