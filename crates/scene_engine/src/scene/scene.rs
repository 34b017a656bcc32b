//! Scene root container

use std::collections::HashSet;

use super::{ObjectContent, SceneObject};
use crate::foundation::math::Mat4;
use crate::render::{Color, GeometryHandle, LightingEnvironment, MaterialHandle, ResourceRegistry};

/// One mesh draw with its composed world matrix
#[derive(Debug, Clone)]
pub struct DrawItem<'a> {
    /// Name of the mesh object
    pub name: &'a str,
    /// Parent transforms composed with the object's own
    pub world_matrix: Mat4,
    /// Geometry to draw
    pub geometry: GeometryHandle,
    /// Material to draw with
    pub material: MaterialHandle,
}

/// Resources released by [`Scene::release_resources`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Geometries released by this call
    pub geometries: usize,
    /// Materials released by this call
    pub materials: usize,
}

/// Root container owning the renderable objects, lights and their resources
///
/// Lifetime is the application session; exactly one object set exists per
/// scene.
#[derive(Debug)]
pub struct Scene {
    /// Clear color
    pub background: Color,
    /// Top-level objects (unattached until added)
    pub objects: Vec<SceneObject>,
    /// Lights
    pub lighting: LightingEnvironment,
    /// Geometry and material storage
    pub resources: ResourceRegistry,
}

impl Scene {
    /// Create an empty scene
    pub fn new(background: Color, lighting: LightingEnvironment, resources: ResourceRegistry) -> Self {
        Self {
            background,
            objects: Vec::new(),
            lighting,
            resources,
        }
    }

    /// Attach a top-level object
    pub fn add(&mut self, object: SceneObject) {
        log::debug!("Added '{}' to scene ({} meshes)", object.name, object.mesh_count());
        self.objects.push(object);
    }

    /// Find an object anywhere in the graph
    pub fn find(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find_map(|object| object.find(name))
    }

    /// Mutable lookup anywhere in the graph
    pub fn find_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find_map(|object| object.find_mut(name))
    }

    /// Total number of meshes
    pub fn mesh_count(&self) -> usize {
        self.objects.iter().map(SceneObject::mesh_count).sum()
    }

    /// Visit every object depth-first, parents before children
    pub fn traverse(&self, mut visit: impl FnMut(&SceneObject)) {
        fn walk(object: &SceneObject, visit: &mut impl FnMut(&SceneObject)) {
            visit(object);
            for child in object.children() {
                walk(child, visit);
            }
        }
        for object in &self.objects {
            walk(object, &mut visit);
        }
    }

    /// Visit every object mutably, parents before children
    pub fn traverse_mut(&mut self, mut visit: impl FnMut(&mut SceneObject)) {
        fn walk(object: &mut SceneObject, visit: &mut impl FnMut(&mut SceneObject)) {
            visit(object);
            for child in object.children_mut() {
                walk(child, visit);
            }
        }
        for object in &mut self.objects {
            walk(object, &mut visit);
        }
    }

    /// Every mesh with its world matrix, in traversal order
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        fn collect<'a>(object: &'a SceneObject, parent: &Mat4, out: &mut Vec<DrawItem<'a>>) {
            let world = parent * object.transform.to_matrix();
            match &object.content {
                ObjectContent::Mesh { geometry, material } => out.push(DrawItem {
                    name: &object.name,
                    world_matrix: world,
                    geometry: *geometry,
                    material: *material,
                }),
                ObjectContent::Group(children) => {
                    for child in children {
                        collect(child, &world, out);
                    }
                }
            }
        }

        let mut items = Vec::with_capacity(self.mesh_count());
        for object in &self.objects {
            collect(object, &Mat4::identity(), &mut items);
        }
        items
    }

    /// Materials subject to periodic recoloring, deduplicated, in traversal order
    ///
    /// A recolorable group makes every material below it recolorable.
    pub fn recolorable_materials(&self) -> Vec<MaterialHandle> {
        fn collect(object: &SceneObject, inherited: bool, seen: &mut HashSet<MaterialHandle>, out: &mut Vec<MaterialHandle>) {
            let recolorable = inherited || object.recolorable;
            match &object.content {
                ObjectContent::Mesh { material, .. } => {
                    if recolorable && seen.insert(*material) {
                        out.push(*material);
                    }
                }
                ObjectContent::Group(children) => {
                    for child in children {
                        collect(child, recolorable, seen, out);
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for object in &self.objects {
            collect(object, false, &mut seen, &mut out);
        }
        out
    }

    /// Release every geometry and material reachable from the root
    ///
    /// Shared resources are released once. Calling this again releases
    /// nothing and returns an empty report.
    pub fn release_resources(&mut self) -> ReleaseReport {
        let mut geometries = HashSet::new();
        let mut materials = HashSet::new();
        self.traverse(|object| {
            if let ObjectContent::Mesh { geometry, material } = &object.content {
                geometries.insert(*geometry);
                materials.insert(*material);
            }
        });

        let mut report = ReleaseReport::default();
        for handle in geometries {
            if self.resources.release_geometry(handle) {
                report.geometries += 1;
            }
        }
        for handle in materials {
            if self.resources.release_material(handle) {
                report.materials += 1;
            }
        }

        log::info!(
            "Released {} geometries and {} materials",
            report.geometries,
            report.materials
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::{Point3, Transform, Vec3};
    use crate::render::{GeometryDescriptor, Material};
    use approx::assert_relative_eq;

    fn scene_with_shared_material() -> Scene {
        let mut resources = ResourceRegistry::new();
        let shared = resources.allocate_material(Material::new());
        let a = resources.allocate_geometry(GeometryDescriptor::cube(1.0));
        let b = resources.allocate_geometry(GeometryDescriptor::sphere(1.0, 8, 8));
        let child = SceneObject::mesh("child", b, shared)
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.0, 0.0)));
        let group = SceneObject::group("group", vec![SceneObject::mesh("first", a, shared), child])
            .with_transform(Transform::from_position(Vec3::new(2.0, 0.0, 0.0)))
            .with_recolor(true);

        let mut scene = Scene::new(Color::from_hex(0x111111), LightingEnvironment::new(), resources);
        scene.add(group);
        scene
    }

    #[test]
    fn draw_list_composes_parent_transforms() {
        let scene = scene_with_shared_material();
        let draws = scene.draw_list();
        assert_eq!(draws.len(), 2);

        let child = draws.iter().find(|d| d.name == "child").unwrap();
        let origin = child.world_matrix.transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(2.0, 1.0, 0.0));
    }

    #[test]
    fn shared_material_is_listed_and_released_once() {
        let mut scene = scene_with_shared_material();
        assert_eq!(scene.recolorable_materials().len(), 1);

        let report = scene.release_resources();
        assert_eq!(report, ReleaseReport { geometries: 2, materials: 1 });
        assert!(scene.resources.stats().is_balanced());

        assert_eq!(scene.release_resources(), ReleaseReport::default());
    }

    #[test]
    fn traverse_visits_parents_first() {
        let scene = scene_with_shared_material();
        let mut names = Vec::new();
        scene.traverse(|object| names.push(object.name.clone()));
        assert_eq!(names, vec!["group", "first", "child"]);
    }
}
