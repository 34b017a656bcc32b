//! Geometry descriptors for the primitive shapes the scene is built from

/// Upper bound on tessellation segments along any one direction
pub const MAX_SEGMENTS: u32 = 512;

/// Parametric description of a primitive shape
///
/// Descriptors are what the scene builder allocates; the vertex data is
/// derived from them on allocation (see [`super::Mesh::from_descriptor`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeometryDescriptor {
    /// Axis-aligned box centered on the origin
    Box {
        /// Extent along X
        width: f32,
        /// Extent along Y
        height: f32,
        /// Extent along Z
        depth: f32,
    },
    /// UV sphere centered on the origin
    Sphere {
        /// Sphere radius
        radius: f32,
        /// Segments around the equator
        width_segments: u32,
        /// Segments from pole to pole
        height_segments: u32,
    },
    /// Capped cylinder along Y, centered on the origin
    Cylinder {
        /// Radius of the top cap
        radius_top: f32,
        /// Radius of the bottom cap
        radius_bottom: f32,
        /// Extent along Y
        height: f32,
        /// Segments around the circumference
        radial_segments: u32,
    },
}

impl GeometryDescriptor {
    /// Cube with equal edges
    pub fn cube(size: f32) -> Self {
        Self::Box { width: size, height: size, depth: size }
    }

    /// Sphere with the given tessellation
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        Self::Sphere { radius, width_segments, height_segments }
    }

    /// Cylinder (or truncated cone) along Y
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        Self::Cylinder { radius_top, radius_bottom, height, radial_segments }
    }

    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Box { .. } => "box",
            Self::Sphere { .. } => "sphere",
            Self::Cylinder { .. } => "cylinder",
        }
    }

    /// Whether every dimension is positive and finite and tessellation is usable
    pub fn is_valid(&self) -> bool {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        match *self {
            Self::Box { width, height, depth } => positive(width) && positive(height) && positive(depth),
            Self::Sphere { radius, width_segments, height_segments } => {
                positive(radius)
                    && (3..=MAX_SEGMENTS).contains(&width_segments)
                    && (2..=MAX_SEGMENTS).contains(&height_segments)
            }
            Self::Cylinder { radius_top, radius_bottom, height, radial_segments } => {
                radius_top.is_finite()
                    && radius_bottom.is_finite()
                    && radius_top >= 0.0
                    && radius_bottom >= 0.0
                    && (radius_top > 0.0 || radius_bottom > 0.0)
                    && positive(height)
                    && (3..=MAX_SEGMENTS).contains(&radial_segments)
            }
        }
    }
}
