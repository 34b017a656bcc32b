//! Scene graph construction
//!
//! One configurable builder covers every scene variant. Construction only
//! allocates geometry and material resources; objects come back unattached
//! and are added to the root by [`SceneBuilder::build`].

use super::{CubeConfig, HumanoidConfig, Scene, SceneConfig, SceneObject, SceneVariant, SphereConfig, SurfaceConfig};
use crate::foundation::math::{constants::PI, Transform, Vec3};
use crate::render::{GeometryDescriptor, LightingEnvironment, Material, MaterialHandle, ResourceRegistry};

/// One part of the humanoid figure
struct BodyPart {
    name: &'static str,
    geometry: GeometryDescriptor,
    position: Vec3,
    roll: f32,
}

/// Head, body, two arms and two legs, in figure-local units (feet at y = 0)
fn humanoid_parts() -> [BodyPart; 6] {
    let arm = GeometryDescriptor::cylinder(0.08, 0.08, 0.7, 16);
    let leg = GeometryDescriptor::cylinder(0.12, 0.1, 0.8, 16);
    [
        BodyPart {
            name: "head",
            geometry: GeometryDescriptor::sphere(0.25, 32, 32),
            position: Vec3::new(0.0, 1.7, 0.0),
            roll: 0.0,
        },
        BodyPart {
            name: "body",
            geometry: GeometryDescriptor::cylinder(0.25, 0.3, 0.8, 32),
            position: Vec3::new(0.0, 1.15, 0.0),
            roll: 0.0,
        },
        BodyPart {
            name: "left_arm",
            geometry: arm,
            position: Vec3::new(-0.4, 1.15, 0.0),
            roll: -PI / 6.0,
        },
        BodyPart {
            name: "right_arm",
            geometry: arm,
            position: Vec3::new(0.4, 1.15, 0.0),
            roll: PI / 6.0,
        },
        BodyPart {
            name: "left_leg",
            geometry: leg,
            position: Vec3::new(-0.2, 0.4, 0.0),
            roll: 0.0,
        },
        BodyPart {
            name: "right_leg",
            geometry: leg,
            position: Vec3::new(0.2, 0.4, 0.0),
            roll: 0.0,
        },
    ]
}

/// Allocates primitives into a [`ResourceRegistry`]
pub struct SceneBuilder<'a> {
    resources: &'a mut ResourceRegistry,
}

impl<'a> SceneBuilder<'a> {
    /// Build into `resources`
    pub fn new(resources: &'a mut ResourceRegistry) -> Self {
        Self { resources }
    }

    fn material(&mut self, name: &str, surface: &SurfaceConfig) -> MaterialHandle {
        self.resources.allocate_material(
            Material::new()
                .with_color(surface.color)
                .with_metalness(surface.metalness)
                .with_roughness(surface.roughness)
                .with_name(name),
        )
    }

    /// A box of edge `size`
    pub fn cube(&mut self, config: &CubeConfig) -> SceneObject {
        let descriptor = GeometryDescriptor::cube(config.size);
        debug_assert!(descriptor.is_valid(), "invalid cube: {descriptor:?}");

        let geometry = self.resources.allocate_geometry(descriptor);
        let material = self.material("cube", &config.surface);
        SceneObject::mesh("cube", geometry, material)
            .with_transform(Transform::from_position(config.position))
            .with_spin(config.spin)
            .with_recolor(config.recolor)
    }

    /// A UV sphere
    pub fn sphere(&mut self, config: &SphereConfig) -> SceneObject {
        let descriptor = GeometryDescriptor::sphere(config.radius, config.width_segments, config.height_segments);
        debug_assert!(descriptor.is_valid(), "invalid sphere: {descriptor:?}");

        let geometry = self.resources.allocate_geometry(descriptor);
        let material = self.material("sphere", &config.surface);
        SceneObject::mesh("sphere", geometry, material)
            .with_transform(Transform::from_position(config.position))
            .with_spin(config.spin)
            .with_recolor(config.recolor)
    }

    /// Composite figure; all six parts share one material
    pub fn humanoid(&mut self, config: &HumanoidConfig) -> SceneObject {
        debug_assert!(config.scale > 0.0, "invalid humanoid scale: {}", config.scale);

        let material = self.material("humanoid", &config.surface);
        let parts = humanoid_parts()
            .into_iter()
            .map(|part| {
                debug_assert!(part.geometry.is_valid());
                let geometry = self.resources.allocate_geometry(part.geometry);
                SceneObject::mesh(part.name, geometry, material).with_transform(Transform::from_position_rotation(
                    part.position,
                    Vec3::new(0.0, 0.0, part.roll),
                ))
            })
            .collect();

        SceneObject::group("humanoid", parts)
            .with_transform(Transform::from_position(config.position).with_uniform_scale(config.scale))
            .with_spin(config.spin)
            .with_recolor(config.recolor)
    }

    /// Build the complete scene for `config.variant`, lights included
    pub fn build(config: &SceneConfig) -> Scene {
        let mut resources = ResourceRegistry::new();
        let objects = {
            let mut builder = SceneBuilder::new(&mut resources);
            match config.variant {
                SceneVariant::Cube => vec![builder.cube(&config.cube)],
                SceneVariant::CubeAndSphere => vec![builder.cube(&config.cube), builder.sphere(&config.sphere)],
                SceneVariant::Humanoid => vec![builder.humanoid(&config.humanoid)],
            }
        };

        let mut scene = Scene::new(config.background, LightingEnvironment::from_config(&config.lighting), resources);
        for object in objects {
            scene.add(object);
        }

        log::info!(
            "Built {:?} scene: {} meshes, {} geometries, {} materials",
            config.variant,
            scene.mesh_count(),
            scene.resources.geometry_count(),
            scene.resources.material_count()
        );
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Color;
    use approx::assert_relative_eq;

    fn build(variant: SceneVariant) -> Scene {
        SceneBuilder::build(&SceneConfig { variant, ..SceneConfig::default() })
    }

    #[test]
    fn humanoid_has_six_parts_sharing_one_material() {
        let scene = build(SceneVariant::Humanoid);
        assert_eq!(scene.objects.len(), 1);
        assert_eq!(scene.mesh_count(), 6);
        assert_eq!(scene.resources.geometry_count(), 6);
        assert_eq!(scene.resources.material_count(), 1);

        let material = scene.draw_list()[0].material;
        assert_eq!(scene.resources.material(material).unwrap().color, Color::from_hex(0x3498db));
    }

    #[test]
    fn humanoid_arms_are_tilted_outwards() {
        let scene = build(SceneVariant::Humanoid);
        let left = scene.find("left_arm").unwrap();
        let right = scene.find("right_arm").unwrap();
        assert_relative_eq!(left.transform.rotation.z, -PI / 6.0);
        assert_relative_eq!(right.transform.rotation.z, PI / 6.0);
        assert_relative_eq!(left.transform.position, Vec3::new(-0.4, 1.15, 0.0));
    }

    #[test]
    fn cube_and_sphere_variant_builds_two_spinning_meshes() {
        let scene = build(SceneVariant::CubeAndSphere);
        assert_eq!(scene.mesh_count(), 2);
        assert!(scene.find("cube").unwrap().spin.is_some());
        assert!(scene.find("sphere").unwrap().spin.is_some());
        assert_eq!(scene.recolorable_materials().len(), 2);
    }

    #[test]
    fn build_adds_configured_lights_and_background() {
        let scene = build(SceneVariant::Cube);
        assert_eq!(scene.background, Color::from_hex(0x111111));
        assert_relative_eq!(scene.lighting.ambient_intensity, 0.5);
        assert_eq!(scene.lighting.lights.len(), 1);
        assert_relative_eq!(scene.lighting.lights[0].intensity, 1.0);
    }

    #[test]
    fn builder_objects_are_unattached() {
        let mut resources = ResourceRegistry::new();
        let cube = SceneBuilder::new(&mut resources).cube(&CubeConfig::default());
        assert_eq!(cube.name, "cube");
        assert_eq!(resources.geometry_count(), 1);
        assert_eq!(resources.material_count(), 1);
    }
}
