//! Scene graph: objects, the root container and its builder
//!
//! ```text
//! SceneConfig ──SceneBuilder::build──▶ Scene
//!                                       ├─ objects: cube / sphere / humanoid group
//!                                       ├─ lighting
//!                                       └─ resources (geometries + materials)
//! ```

mod builder;
mod config;
#[allow(clippy::module_inception)]
mod scene;
mod scene_object;

pub use builder::SceneBuilder;
pub use config::{CubeConfig, HumanoidConfig, SceneConfig, SceneVariant, SphereConfig, SurfaceConfig};
pub use scene::{DrawItem, ReleaseReport, Scene};
pub use scene_object::{ObjectContent, SceneObject};
