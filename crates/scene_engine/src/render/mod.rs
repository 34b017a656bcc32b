//! Rendering data and the output surface seam
//!
//! Everything the scene needs to describe what gets drawn: camera state,
//! lights, materials, geometry descriptors and their meshes, and the
//! registry that owns them. Actual drawing happens behind
//! [`OutputSurface`], which the host provides.
//!
//! ## Ownership
//!
//! ```text
//! Scene ──owns──▶ ResourceRegistry ──owns──▶ Geometry (descriptor + Mesh)
//!   │                               └─owns──▶ Material
//!   └─ SceneObject ──handles──▶ GeometryHandle / MaterialHandle
//! ```

pub mod camera;
pub mod color;
pub mod geometry;
pub mod headless;
pub mod lighting;
pub mod material;
pub mod mesh;
pub mod resources;
pub mod surface;

pub use camera::{Camera, CameraConfig};
pub use color::Color;
pub use geometry::{GeometryDescriptor, MAX_SEGMENTS};
pub use headless::{FrameRecord, HeadlessSurface};
pub use lighting::{Light, LightingConfig, LightingEnvironment};
pub use material::Material;
pub use mesh::{Mesh, Vertex};
pub use resources::{Geometry, GeometryHandle, MaterialHandle, ResourceRegistry, ResourceStats};
pub use surface::{OutputSurface, RenderError, RenderResult};
