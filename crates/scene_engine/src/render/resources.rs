//! Resource registry for geometries and materials
//!
//! Every geometry and material the scene builder creates is allocated here
//! and addressed through a generational handle. Releasing a handle removes
//! the entry; releasing it again is a no-op, so teardown can walk a scene
//! that shares one material between several meshes without double-freeing.

use slotmap::{new_key_type, SlotMap};

use super::{GeometryDescriptor, Material, Mesh};

new_key_type! {
    /// Handle to an allocated geometry
    pub struct GeometryHandle;

    /// Handle to an allocated material
    pub struct MaterialHandle;
}

/// Allocated geometry: the descriptor plus its tessellated mesh
#[derive(Debug, Clone)]
pub struct Geometry {
    /// Parametric description
    pub descriptor: GeometryDescriptor,
    /// Vertex and index data derived from the descriptor
    pub mesh: Mesh,
}

/// Allocation and release counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResourceStats {
    /// Geometries ever allocated
    pub geometries_allocated: usize,
    /// Geometries released
    pub geometries_released: usize,
    /// Materials ever allocated
    pub materials_allocated: usize,
    /// Materials released
    pub materials_released: usize,
}

impl ResourceStats {
    /// Number of geometries still alive
    pub fn live_geometries(&self) -> usize {
        self.geometries_allocated - self.geometries_released
    }

    /// Number of materials still alive
    pub fn live_materials(&self) -> usize {
        self.materials_allocated - self.materials_released
    }

    /// Whether everything allocated has been released
    pub fn is_balanced(&self) -> bool {
        self.live_geometries() == 0 && self.live_materials() == 0
    }
}

/// Central store for scene resources
#[derive(Debug, Default)]
pub struct ResourceRegistry {
    geometries: SlotMap<GeometryHandle, Geometry>,
    materials: SlotMap<MaterialHandle, Material>,
    stats: ResourceStats,
}

impl ResourceRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a geometry and tessellate its mesh
    pub fn allocate_geometry(&mut self, descriptor: GeometryDescriptor) -> GeometryHandle {
        let mesh = Mesh::from_descriptor(&descriptor);
        log::debug!(
            "Allocated {} geometry ({} vertices, {} triangles)",
            descriptor.kind(),
            mesh.vertices.len(),
            mesh.triangle_count()
        );
        self.stats.geometries_allocated += 1;
        self.geometries.insert(Geometry { descriptor, mesh })
    }

    /// Allocate a material
    pub fn allocate_material(&mut self, material: Material) -> MaterialHandle {
        self.stats.materials_allocated += 1;
        self.materials.insert(material)
    }

    /// Look up a geometry
    pub fn geometry(&self, handle: GeometryHandle) -> Option<&Geometry> {
        self.geometries.get(handle)
    }

    /// Look up a material
    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    /// Mutable material access (used for recoloring)
    pub fn material_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle)
    }

    /// Release a geometry; returns `false` when it was already released
    pub fn release_geometry(&mut self, handle: GeometryHandle) -> bool {
        match self.geometries.remove(handle) {
            Some(geometry) => {
                self.stats.geometries_released += 1;
                log::debug!("Released {} geometry", geometry.descriptor.kind());
                true
            }
            None => false,
        }
    }

    /// Release a material; returns `false` when it was already released
    pub fn release_material(&mut self, handle: MaterialHandle) -> bool {
        match self.materials.remove(handle) {
            Some(material) => {
                self.stats.materials_released += 1;
                log::debug!("Released material {}", material.name.as_deref().unwrap_or("<unnamed>"));
                true
            }
            None => false,
        }
    }

    /// Allocation and release counters
    pub fn stats(&self) -> ResourceStats {
        self.stats
    }

    /// Number of live geometries
    pub fn geometry_count(&self) -> usize {
        self.geometries.len()
    }

    /// Number of live materials
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}
