use crate::math::Color;
use crate::scene::{Camera, SceneGraph};

/// Host surface metrics: size in physical pixels and device pixel density
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            pixel_ratio,
        }
    }

    /// Width over height; a zero height counts as one pixel
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height.max(1))
    }
}

/// How the render surface should be configured
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderTargetDescriptor {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
    pub clear_color: Color,
    pub antialias: bool,
}

/// Something that can draw a scene graph from a camera's viewpoint
pub trait RenderTarget {
    /// Draw the current state of `graph` as seen from `camera`
    fn render(&mut self, graph: &SceneGraph, camera: &Camera) -> anyhow::Result<()>;

    /// Adapt to a new surface size in physical pixels
    fn resize(&mut self, _width: u32, _height: u32) {}
}
