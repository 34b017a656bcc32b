//! Animation loop
//!
//! ```text
//! host callback ─▶ AnimationLoop::begin_frame ─▶ FrameTime
//!                                                   │
//!                        SceneAnimator::apply ◀─────┘
//!                          ├─ rotation = elapsed * spin
//!                          └─ ColorCycler (new bucket ⇒ new colors)
//! ```

mod animator;
mod color_cycle;
mod frame_loop;

pub use animator::{AnimationReport, SceneAnimator};
pub use color_cycle::{color_for, ColorCycler};
pub use frame_loop::{AnimationLoop, FrameTime, LoopState};

use serde::{Deserialize, Serialize};

use crate::config::{ensure, ConfigError};

/// Animation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds between color changes
    pub color_interval: f32,
    /// Seed for the recoloring palette
    pub color_seed: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            color_interval: 1.0,
            color_seed: 0x5EED,
        }
    }
}

impl AnimationConfig {
    /// The color interval must be positive
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.color_interval.is_finite() && self.color_interval > 0.0, || {
            format!("color_interval must be positive, got {}", self.color_interval)
        })
    }
}
