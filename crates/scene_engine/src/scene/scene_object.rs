//! Renderable objects and composite groups

use crate::foundation::math::{Transform, Vec3};
use crate::render::{GeometryHandle, MaterialHandle};

/// What a scene object draws
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectContent {
    /// A single geometry drawn with a single material
    Mesh {
        /// Geometry to draw
        geometry: GeometryHandle,
        /// Material to draw it with
        material: MaterialHandle,
    },
    /// Children positioned relative to this object
    Group(Vec<SceneObject>),
}

/// Node of the scene graph
///
/// Renderable objects are created once at startup, mutated every frame
/// (rotation, occasionally material color) and released at teardown.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Name used for lookups and logs
    pub name: String,
    /// Transform relative to the parent
    pub transform: Transform,
    /// Mesh or child group
    pub content: ObjectContent,
    /// Angular rate (radians per second per axis); `None` for static objects
    pub spin: Option<Vec3>,
    /// Whether periodic recoloring applies to this object's materials
    pub recolorable: bool,
}

impl SceneObject {
    /// Create a mesh object at the origin
    pub fn mesh(name: impl Into<String>, geometry: GeometryHandle, material: MaterialHandle) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            content: ObjectContent::Mesh { geometry, material },
            spin: None,
            recolorable: false,
        }
    }

    /// Create a group object at the origin
    pub fn group(name: impl Into<String>, children: Vec<SceneObject>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::identity(),
            content: ObjectContent::Group(children),
            spin: None,
            recolorable: false,
        }
    }

    /// Replace the local transform
    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Spin at `rates` radians per second (zero rates leave the object static)
    #[must_use]
    pub fn with_spin(mut self, rates: Vec3) -> Self {
        self.spin = if rates == Vec3::zeros() { None } else { Some(rates) };
        self
    }

    /// Opt in or out of periodic recoloring
    #[must_use]
    pub fn with_recolor(mut self, recolorable: bool) -> Self {
        self.recolorable = recolorable;
        self
    }

    /// Child objects (empty for meshes)
    pub fn children(&self) -> &[SceneObject] {
        match &self.content {
            ObjectContent::Group(children) => children,
            ObjectContent::Mesh { .. } => &[],
        }
    }

    /// Mutable child objects (empty for meshes)
    pub fn children_mut(&mut self) -> &mut [SceneObject] {
        match &mut self.content {
            ObjectContent::Group(children) => children,
            ObjectContent::Mesh { .. } => &mut [],
        }
    }

    /// Depth-first search by name, including `self`
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        if self.name == name {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(name))
    }

    /// Mutable depth-first search by name, including `self`
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        if self.name == name {
            return Some(self);
        }
        self.children_mut().iter_mut().find_map(|child| child.find_mut(name))
    }

    /// Number of meshes in this subtree
    pub fn mesh_count(&self) -> usize {
        match &self.content {
            ObjectContent::Mesh { .. } => 1,
            ObjectContent::Group(children) => children.iter().map(Self::mesh_count).sum(),
        }
    }
}
