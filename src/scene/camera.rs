use glam::{DMat4, DVec3};

/// Perspective camera looking from `position` towards `target`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_y: f64,
    pub aspect: f64,
    pub near: f64,
    pub far: f64,
    pub position: DVec3,
    pub target: DVec3,
}

impl Camera {
    pub fn new(fov_y: f64, aspect: f64, near: f64, far: f64) -> Self {
        Self {
            fov_y,
            aspect,
            near,
            far,
            position: DVec3::ZERO,
            target: DVec3::NEG_Z,
        }
    }

    pub fn look_at(&mut self, target: DVec3) {
        self.target = target;
    }

    /// Aspect ratio from a pixel size; a zero height counts as one pixel
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = f64::from(width) / f64::from(height.max(1));
    }

    pub fn view_matrix(&self) -> DMat4 {
        DMat4::look_at_rh(self.position, self.target, DVec3::Y)
    }

    pub fn projection_matrix(&self) -> DMat4 {
        DMat4::perspective_rh(self.fov_y.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> DMat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
