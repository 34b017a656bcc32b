//! Triangle meshes tessellated from geometry descriptors
//!
//! The output surface is opaque to the scene core, but a real surface needs
//! vertex data. Meshes are generated once, when a geometry is allocated.

use std::f32::consts::{PI, TAU};

use super::{GeometryDescriptor, MAX_SEGMENTS};

/// Vertex data structure with position, normal, and texture coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: [f32; 3],

    /// Normal vector
    pub normal: [f32; 3],

    /// Texture coordinates
    pub tex_coord: [f32; 2],
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: [f32; 3], normal: [f32; 3], tex_coord: [f32; 2]) -> Self {
        Self { position, normal, tex_coord }
    }
}

/// 3D mesh containing vertices and indices for rendering
///
/// Backend-agnostic geometry storage: a surface uploads these buffers however
/// it likes and releases them when the owning geometry is released.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex data
    pub vertices: Vec<Vertex>,

    /// Index data for triangles
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create a new mesh
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Number of triangles
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Tessellate a geometry descriptor
    pub fn from_descriptor(descriptor: &GeometryDescriptor) -> Self {
        match *descriptor {
            GeometryDescriptor::Box { width, height, depth } => Self::cuboid(width, height, depth),
            GeometryDescriptor::Sphere { radius, width_segments, height_segments } => {
                Self::uv_sphere(radius, width_segments, height_segments)
            }
            GeometryDescriptor::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                Self::cylinder(radius_top, radius_bottom, height, radial_segments)
            }
        }
    }

    /// Box centered at the origin, four vertices per face so normals stay flat
    ///
    /// 24 vertices, 36 indices.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width * 0.5, height * 0.5, depth * 0.5);
        // (normal, u axis, v axis) for +X, -X, +Y, -Y, +Z, -Z
        let faces: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
            ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
            ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
            ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
            ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
            ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
            ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ];
        let half = [hx, hy, hz];

        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, u, v) in faces {
            let base = u32::try_from(vertices.len()).unwrap_or(u32::MAX);
            for (su, sv, tex) in [(-1.0, -1.0, [0.0, 0.0]), (1.0, -1.0, [1.0, 0.0]), (1.0, 1.0, [1.0, 1.0]), (-1.0, 1.0, [0.0, 1.0])] {
                let mut position = [0.0; 3];
                for axis in 0..3 {
                    position[axis] = (normal[axis] + u[axis] * su + v[axis] * sv) * half[axis];
                }
                vertices.push(Vertex::new(position, normal, tex));
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        Self::new(vertices, indices)
    }

    /// UV sphere with `(width_segments + 1) * (height_segments + 1)` vertices
    ///
    /// Segment counts are clamped to `3..=MAX_SEGMENTS` around and
    /// `2..=MAX_SEGMENTS` from pole to pole.
    #[allow(clippy::cast_precision_loss)]
    pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let width_segments = width_segments.clamp(3, MAX_SEGMENTS);
        let height_segments = height_segments.clamp(2, MAX_SEGMENTS);
        let vertex_count = (width_segments as usize + 1) * (height_segments as usize + 1);
        let mut vertices = Vec::with_capacity(vertex_count);
        let mut indices = Vec::new();

        for y in 0..=height_segments {
            let v = y as f32 / height_segments as f32;
            let theta = v * PI;
            for x in 0..=width_segments {
                let u = x as f32 / width_segments as f32;
                let phi = u * TAU;
                let normal = [-phi.cos() * theta.sin(), theta.cos(), phi.sin() * theta.sin()];
                let position = [normal[0] * radius, normal[1] * radius, normal[2] * radius];
                vertices.push(Vertex::new(position, normal, [u, 1.0 - v]));
            }
        }

        let row = width_segments + 1;
        for y in 0..height_segments {
            for x in 0..width_segments {
                let a = y * row + x + 1;
                let b = y * row + x;
                let c = (y + 1) * row + x;
                let d = (y + 1) * row + x + 1;
                // The pole rows collapse to a point, skip their degenerate triangles
                if y != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if y != height_segments - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        Self::new(vertices, indices)
    }

    /// Capped cylinder along Y, with `radial_segments` clamped to `3..=MAX_SEGMENTS`
    #[allow(clippy::cast_precision_loss)]
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let radial_segments = radial_segments.clamp(3, MAX_SEGMENTS);
        let half_height = height * 0.5;
        let slope = (radius_bottom - radius_top) / height;
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        // Side: two rings (top, bottom) with a seam vertex
        for (y, radius, v) in [(half_height, radius_top, 1.0), (-half_height, radius_bottom, 0.0)] {
            for x in 0..=radial_segments {
                let u = x as f32 / radial_segments as f32;
                let angle = u * TAU;
                let (sin, cos) = angle.sin_cos();
                let len = (1.0 + slope * slope).sqrt();
                let normal = [sin / len, slope / len, cos / len];
                vertices.push(Vertex::new([radius * sin, y, radius * cos], normal, [u, v]));
            }
        }
        let row = radial_segments + 1;
        for x in 0..radial_segments {
            let (a, b, c, d) = (x, row + x, row + x + 1, x + 1);
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }

        // Caps: center vertex plus a ring, skipped when the radius is zero
        for (top, radius) in [(true, radius_top), (false, radius_bottom)] {
            if radius <= 0.0 {
                continue;
            }
            let (y, ny) = if top { (half_height, 1.0) } else { (-half_height, -1.0) };
            let center = u32::try_from(vertices.len()).unwrap_or(u32::MAX);
            vertices.push(Vertex::new([0.0, y, 0.0], [0.0, ny, 0.0], [0.5, 0.5]));
            for x in 0..=radial_segments {
                let angle = x as f32 / radial_segments as f32 * TAU;
                let (sin, cos) = angle.sin_cos();
                vertices.push(Vertex::new([radius * sin, y, radius * cos], [0.0, ny, 0.0], [0.5 + 0.5 * sin, 0.5 + 0.5 * cos]));
            }
            for x in 0..radial_segments {
                let (i, j) = (center + 1 + x, center + 2 + x);
                if top {
                    indices.extend_from_slice(&[i, j, center]);
                } else {
                    indices.extend_from_slice(&[j, i, center]);
                }
            }
        }

        Self::new(vertices, indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn cube_has_flat_faces() {
        let mesh = Mesh::from_descriptor(&GeometryDescriptor::cube(2.0));
        assert_eq!(mesh.vertices.len(), 24);
        assert_eq!(mesh.indices.len(), 36);
        for vertex in &mesh.vertices {
            for axis in 0..3 {
                assert_relative_eq!(vertex.position[axis].abs(), 1.0);
            }
        }
    }

    #[test]
    fn sphere_vertices_lie_on_radius() {
        let mesh = Mesh::from_descriptor(&GeometryDescriptor::sphere(0.25, 32, 32));
        assert_eq!(mesh.vertices.len(), 33 * 33);
        for vertex in &mesh.vertices {
            let [x, y, z] = vertex.position;
            assert_relative_eq!((x * x + y * y + z * z).sqrt(), 0.25, epsilon = 1e-5);
        }
        // Two triangles per quad minus one per pole quad
        assert_eq!(mesh.triangle_count(), 32 * 32 * 2 - 2 * 32);
    }

    #[test]
    fn cylinder_indices_stay_in_bounds() {
        let mesh = Mesh::from_descriptor(&GeometryDescriptor::cylinder(0.25, 0.3, 0.8, 16));
        let count = u32::try_from(mesh.vertices.len()).unwrap();
        assert!(mesh.indices.iter().all(|&i| i < count));
        // side (2 per segment) + two caps (1 per segment each)
        assert_eq!(mesh.triangle_count(), 16 * 4);
    }

    #[test]
    fn oversized_segment_counts_are_capped() {
        let mesh = Mesh::uv_sphere(1.0, u32::MAX, 2);
        let side = MAX_SEGMENTS as usize + 1;
        assert_eq!(mesh.vertices.len(), side * 3);
        let count = u32::try_from(mesh.vertices.len()).unwrap();
        assert!(mesh.indices.iter().all(|&i| i < count));

        let degenerate = Mesh::uv_sphere(1.0, 0, 0);
        assert_eq!(degenerate.vertices.len(), 4 * 3);
        assert!(degenerate.vertices.iter().all(|v| v.position.iter().all(|c| c.is_finite())));
    }

    #[test]
    fn cone_skips_degenerate_cap() {
        let mesh = Mesh::cylinder(0.0, 0.5, 1.0, 8);
        assert_eq!(mesh.triangle_count(), 8 * 3);
    }
}
