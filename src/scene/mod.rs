mod assembly;
mod camera;
mod graph;
mod helpers;
mod light;
mod object;

pub use assembly::*;
pub use camera::Camera;
pub use graph::{NodeId, SceneGraph, SceneNode};
pub use helpers::{AxesHelper, PointLightHelper};
pub use light::PointLight;
pub use object::{make_cube, make_sphere, Material, SceneObject, Shape};
