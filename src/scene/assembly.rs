use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::camera::Camera;
use super::graph::{NodeId, SceneGraph};
use super::helpers::{AxesHelper, PointLightHelper};
use super::light::PointLight;
use super::object::{make_cube, make_sphere};
use crate::display::{RenderTargetDescriptor, Viewport};
use crate::math::Color;
use crate::random::RandomSource;

pub const CAMERA_FOV_Y: f64 = 45.0;
pub const CAMERA_NEAR: f64 = 0.1;
pub const CAMERA_FAR: f64 = 1000.0;
pub const CAMERA_POSITION: DVec3 = DVec3::new(-30.0, 40.0, 30.0);
pub const AXES_SIZE: f32 = 40.0;
pub const CUBE_SIZE: f32 = 4.0;
pub const SPHERE_RADIUS: f32 = 4.0;
pub const SPHERE_SEGMENTS: u32 = 30;
pub const SPHERE_OFFSET_X: f64 = 20.0;
pub const LIGHT_INTENSITY: f32 = 1.2;
pub const LIGHT_POSITION: DVec3 = DVec3::new(10.0, 10.0, 10.0);

/// Nodes every scene holds besides the random batch: axes helper, cube,
/// sphere, light, light helper and camera
pub const FIXED_NODE_COUNT: usize = 6;

/// Tunables for scene construction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of randomly placed cubes
    pub cube_count: usize,
    /// Half extent of the cube the batch is scattered in
    pub spread: f64,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            cube_count: 500,
            spread: 200.0,
        }
    }
}

/// Everything the frame loop needs, owned by one controller
#[derive(Debug, Clone)]
pub struct SceneState {
    pub graph: SceneGraph,
    pub target: RenderTargetDescriptor,
    pub camera: NodeId,
    pub axes: NodeId,
    pub cube: NodeId,
    pub sphere: NodeId,
    pub light: NodeId,
    pub light_helper: NodeId,
    pub batch: Vec<NodeId>,
}

impl SceneState {
    pub fn camera(&self) -> anyhow::Result<&Camera> {
        self.graph
            .camera(self.camera)
            .ok_or_else(|| anyhow::anyhow!("node {:?} is not a camera", self.camera))
    }

    /// Track a new surface size: render target and camera aspect
    pub fn resize(&mut self, width: u32, height: u32) {
        self.target.width = width;
        self.target.height = height;
        if let Some(camera) = self.graph.camera_mut(self.camera) {
            camera.set_viewport(width, height);
        }
    }

    /// Rotate the primary cube forward and every batch cube backward by `step` radians
    pub fn spin(&mut self, step: f64) {
        if let Some(cube) = self.graph.object_mut(self.cube) {
            cube.rotate_all(step);
        }
        for &id in &self.batch {
            if let Some(cube) = self.graph.object_mut(id) {
                cube.rotate_all(-step);
            }
        }
    }
}

/// Build the full scene: camera, helpers, primary meshes, light and the random cube batch
pub fn build_scene<R: RandomSource + ?Sized>(
    config: &SceneConfig,
    viewport: Viewport,
    rng: &mut R,
) -> SceneState {
    let target = RenderTargetDescriptor {
        width: viewport.width,
        height: viewport.height,
        pixel_ratio: viewport.pixel_ratio,
        clear_color: Color::EIGENGRAU,
        antialias: true,
    };

    let mut graph = SceneGraph::with_capacity(FIXED_NODE_COUNT + config.cube_count);

    let mut camera = Camera::new(CAMERA_FOV_Y, viewport.aspect(), CAMERA_NEAR, CAMERA_FAR);
    camera.position = CAMERA_POSITION;
    camera.look_at(DVec3::ZERO);

    let axes_helper = AxesHelper::new(AXES_SIZE);
    let cube = make_cube(rng, CUBE_SIZE);
    let mut sphere = make_sphere(rng, SPHERE_RADIUS, SPHERE_SEGMENTS);
    let mut light = PointLight::new(Color::WHITE, LIGHT_INTENSITY);

    light.position = LIGHT_POSITION;
    sphere.position.x = SPHERE_OFFSET_X;

    let axes = graph.add(axes_helper);
    let cube = graph.add(cube);
    let sphere = graph.add(sphere);
    let light = graph.add(light);
    let light_helper = graph.add(PointLightHelper::new(light));
    let camera = graph.add(camera);

    let spread = config.spread.abs();
    let batch = (0..config.cube_count)
        .map(|_| {
            let mut cube = make_cube(rng, CUBE_SIZE);
            cube.position = DVec3::new(
                rng.range(-spread, spread),
                rng.range(-spread, spread),
                rng.range(-spread, spread),
            );
            graph.add(cube)
        })
        .collect::<Vec<_>>();

    log::info!(
        "Scene built: {} nodes ({} random cubes), viewport {}x{} @{:.2}x",
        graph.len(),
        batch.len(),
        viewport.width,
        viewport.height,
        viewport.pixel_ratio
    );

    SceneState {
        graph,
        target,
        camera,
        axes,
        cube,
        sphere,
        light,
        light_helper,
        batch,
    }
}
