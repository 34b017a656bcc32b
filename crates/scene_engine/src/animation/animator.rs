//! Per-frame scene mutation

use super::{AnimationConfig, ColorCycler};
use crate::scene::Scene;

/// What one [`SceneAnimator::apply`] call changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationReport {
    /// Objects whose rotation was written
    pub rotated: usize,
    /// Materials that received a new color
    pub recolored: usize,
    /// Color bucket entered during this frame, if any
    pub color_bucket: Option<u64>,
}

/// Applies time-driven transforms and recoloring
#[derive(Debug, Clone)]
pub struct SceneAnimator {
    colors: ColorCycler,
}

impl SceneAnimator {
    /// Create an animator from settings
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            colors: ColorCycler::new(config.color_interval, config.color_seed),
        }
    }

    /// Bring `scene` to its state at `elapsed` seconds
    ///
    /// Rotations are absolute (`elapsed * rate`), so the result does not
    /// depend on how many frames were skipped.
    pub fn apply(&mut self, scene: &mut Scene, elapsed: f32) -> AnimationReport {
        let mut report = AnimationReport::default();

        scene.traverse_mut(|object| {
            if let Some(rates) = object.spin {
                object.transform.rotation = rates * elapsed;
                report.rotated += 1;
            }
        });

        if let Some(bucket) = self.colors.advance(elapsed) {
            for (index, handle) in scene.recolorable_materials().into_iter().enumerate() {
                if let Some(material) = scene.resources.material_mut(handle) {
                    material.color = self.colors.color(bucket, index);
                    report.recolored += 1;
                }
            }
            report.color_bucket = Some(bucket);
            log::debug!("Color bucket {}: recolored {} materials", bucket, report.recolored);
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::color_for;
    use crate::foundation::math::Vec3;
    use crate::scene::{CubeConfig, SceneBuilder, SceneConfig, SceneVariant};
    use approx::assert_relative_eq;

    fn two_unit_cube(spin: Vec3) -> Scene {
        let config = SceneConfig {
            variant: SceneVariant::Cube,
            cube: CubeConfig { size: 2.0, position: Vec3::zeros(), spin, ..CubeConfig::default() },
            ..SceneConfig::default()
        };
        SceneBuilder::build(&config)
    }

    #[test]
    fn rotation_is_elapsed_times_rate() {
        let mut scene = two_unit_cube(Vec3::new(0.5, 0.5, 0.0));
        let mut animator = SceneAnimator::new(&AnimationConfig::default());

        animator.apply(&mut scene, 2.0);
        let cube = scene.find("cube").unwrap();
        assert_relative_eq!(cube.transform.rotation.x, 1.0);
        assert_relative_eq!(cube.transform.rotation.y, 1.0);
    }

    #[test]
    fn rotation_does_not_depend_on_frame_history() {
        let mut stepped = two_unit_cube(Vec3::new(0.3, 0.0, 0.0));
        let mut animator = SceneAnimator::new(&AnimationConfig::default());
        for i in 0..=50 {
            animator.apply(&mut stepped, i as f32 * 0.1);
        }

        let mut direct = two_unit_cube(Vec3::new(0.3, 0.0, 0.0));
        SceneAnimator::new(&AnimationConfig::default()).apply(&mut direct, 5.0);

        assert_relative_eq!(
            stepped.find("cube").unwrap().transform.rotation,
            direct.find("cube").unwrap().transform.rotation,
            epsilon = 1e-5
        );
    }

    #[test]
    fn recolor_uses_the_seeded_palette() {
        let mut scene = two_unit_cube(Vec3::zeros());
        let config = AnimationConfig::default();
        let mut animator = SceneAnimator::new(&config);

        assert_eq!(animator.apply(&mut scene, 0.5).recolored, 0);
        let report = animator.apply(&mut scene, 1.0);
        assert_eq!(report.recolored, 1);
        assert_eq!(report.color_bucket, Some(1));

        let handle = scene.recolorable_materials()[0];
        let color = scene.resources.material(handle).unwrap().color;
        assert_eq!(color, color_for(config.color_seed, 1, 0));
    }

    #[test]
    fn static_objects_are_not_rotated() {
        let mut scene = two_unit_cube(Vec3::zeros());
        let report = SceneAnimator::new(&AnimationConfig::default()).apply(&mut scene, 3.0);
        assert_eq!(report.rotated, 0);
        assert_eq!(scene.find("cube").unwrap().transform.rotation, Vec3::zeros());
    }
}
