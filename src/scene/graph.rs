use super::camera::Camera;
use super::helpers::{AxesHelper, PointLightHelper};
use super::light::PointLight;
use super::object::SceneObject;

/// Position of a node in its graph, assigned on insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Anything that can live under the scene root
#[derive(Debug, Clone, PartialEq)]
pub enum SceneNode {
    Mesh(SceneObject),
    PointLight(PointLight),
    AxesHelper(AxesHelper),
    PointLightHelper(PointLightHelper),
    Camera(Camera),
}

impl SceneNode {
    pub fn kind(&self) -> &'static str {
        match self {
            SceneNode::Mesh(_) => "mesh",
            SceneNode::PointLight(_) => "point_light",
            SceneNode::AxesHelper(_) => "axes_helper",
            SceneNode::PointLightHelper(_) => "point_light_helper",
            SceneNode::Camera(_) => "camera",
        }
    }
}

impl From<SceneObject> for SceneNode {
    fn from(object: SceneObject) -> Self {
        SceneNode::Mesh(object)
    }
}

impl From<PointLight> for SceneNode {
    fn from(light: PointLight) -> Self {
        SceneNode::PointLight(light)
    }
}

impl From<AxesHelper> for SceneNode {
    fn from(helper: AxesHelper) -> Self {
        SceneNode::AxesHelper(helper)
    }
}

impl From<PointLightHelper> for SceneNode {
    fn from(helper: PointLightHelper) -> Self {
        SceneNode::PointLightHelper(helper)
    }
}

impl From<Camera> for SceneNode {
    fn from(camera: Camera) -> Self {
        SceneNode::Camera(camera)
    }
}

/// Flat scene root owning every node eligible for rendering
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub fn add(&mut self, node: impl Into<SceneNode>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node.into());
        id
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &SceneNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    pub fn object(&self, id: NodeId) -> Option<&SceneObject> {
        match self.get(id)? {
            SceneNode::Mesh(object) => Some(object),
            _ => None,
        }
    }

    pub fn object_mut(&mut self, id: NodeId) -> Option<&mut SceneObject> {
        match self.get_mut(id)? {
            SceneNode::Mesh(object) => Some(object),
            _ => None,
        }
    }

    pub fn light(&self, id: NodeId) -> Option<&PointLight> {
        match self.get(id)? {
            SceneNode::PointLight(light) => Some(light),
            _ => None,
        }
    }

    pub fn camera(&self, id: NodeId) -> Option<&Camera> {
        match self.get(id)? {
            SceneNode::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn camera_mut(&mut self, id: NodeId) -> Option<&mut Camera> {
        match self.get_mut(id)? {
            SceneNode::Camera(camera) => Some(camera),
            _ => None,
        }
    }

    pub fn meshes(&self) -> impl Iterator<Item = &SceneObject> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Mesh(object) => Some(object),
            _ => None,
        })
    }

    pub fn point_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::PointLight(light) => Some(light),
            _ => None,
        })
    }
}
