//! Periodic recoloring
//!
//! Time is split into buckets of `interval` seconds. Entering a new bucket
//! recolors every recolorable material, and the color each one gets depends
//! only on the seed, the bucket number and the material's position in
//! traversal order. Replaying the same clock yields the same colors.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::Color;

const BUCKET_MIX: u64 = 0x9E37_79B9_7F4A_7C15;
const INDEX_MIX: u64 = 0xC2B2_AE3D_27D4_EB4F;

/// Color for material `index` during `bucket`
pub fn color_for(seed: u64, bucket: u64, index: usize) -> Color {
    let stream = seed
        ^ bucket.wrapping_add(1).wrapping_mul(BUCKET_MIX)
        ^ (index as u64).wrapping_add(1).wrapping_mul(INDEX_MIX);
    let mut rng = StdRng::seed_from_u64(stream);
    Color::rgb(rng.gen(), rng.gen(), rng.gen())
}

/// Tracks which time bucket was last colored
#[derive(Debug, Clone)]
pub struct ColorCycler {
    interval: f32,
    seed: u64,
    last_bucket: u64,
}

impl ColorCycler {
    /// `interval` must be positive; bucket 0 keeps the configured colors
    pub fn new(interval: f32, seed: u64) -> Self {
        debug_assert!(interval > 0.0, "color interval must be positive");
        Self {
            interval,
            seed,
            last_bucket: 0,
        }
    }

    /// Seconds per bucket
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Bucket containing `elapsed`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn bucket(&self, elapsed: f32) -> u64 {
        (elapsed.max(0.0) / self.interval).floor() as u64
    }

    /// Returns the new bucket when `elapsed` has moved past the last one
    ///
    /// Several skipped buckets (a stalled host) collapse into one change.
    pub fn advance(&mut self, elapsed: f32) -> Option<u64> {
        let bucket = self.bucket(elapsed);
        if bucket > self.last_bucket {
            self.last_bucket = bucket;
            Some(bucket)
        } else {
            None
        }
    }

    /// Color for material `index` in `bucket`
    pub fn color(&self, bucket: u64, index: usize) -> Color {
        color_for(self.seed, bucket, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_happen_on_interval_multiples() {
        let mut cycler = ColorCycler::new(1.0, 7);
        assert_eq!(cycler.advance(0.0), None);
        assert_eq!(cycler.advance(0.99), None);
        assert_eq!(cycler.advance(1.0), Some(1));
        assert_eq!(cycler.advance(1.5), None);
        assert_eq!(cycler.advance(2.01), Some(2));
    }

    #[test]
    fn stalled_host_changes_color_once() {
        let mut cycler = ColorCycler::new(0.5, 7);
        assert_eq!(cycler.advance(3.2), Some(6));
        assert_eq!(cycler.advance(3.3), None);
    }

    #[test]
    fn colors_are_reproducible_and_valid() {
        for bucket in 0..20 {
            for index in 0..3 {
                let color = color_for(0x5EED, bucket, index);
                assert_eq!(color, color_for(0x5EED, bucket, index));
                assert!(color.is_valid());
            }
        }
        assert_ne!(color_for(0x5EED, 1, 0), color_for(0x5EED, 2, 0));
        assert_ne!(color_for(0x5EED, 1, 0), color_for(0x5EED, 1, 1));
    }
}
