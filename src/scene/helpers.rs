use super::graph::NodeId;

/// Three coloured lines from the origin: X red, Y green, Z blue
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesHelper {
    pub size: f32,
}

impl AxesHelper {
    pub fn new(size: f32) -> Self {
        Self { size }
    }
}

/// Wireframe marker drawn at a point light's position in the light's colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLightHelper {
    pub light: NodeId,
    pub sphere_size: f32,
}

impl PointLightHelper {
    pub fn new(light: NodeId) -> Self {
        Self {
            light,
            sphere_size: 1.0,
        }
    }
}
