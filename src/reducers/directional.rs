// Copyright @yucwang 2026

use crate::core::error::BakeError;
use crate::core::reducer::SHReducer;
use crate::core::rng::LcgRng;
use crate::math::constants::{Float, Vector3f, Vector4f};
use crate::math::sh::SHSample;
use crate::math::warp::sample_uniform_sphere;

/// Monte Carlo average of the SH function over the sphere.
///
/// Unbiased, but the result carries sampling noise and depends on the random
/// stream, so two bakes only match when they use the same seed.
pub struct DirectionalSamplingReducer {
    samples: u32,
}

impl DirectionalSamplingReducer {
    pub fn new(samples: u32) -> Result<Self, BakeError> {
        if samples == 0 {
            return Err(BakeError::InvalidSampleCount);
        }
        Ok(Self { samples })
    }

    pub fn samples(&self) -> u32 {
        self.samples
    }
}

impl SHReducer for DirectionalSamplingReducer {
    fn reduce(&self, sample: &SHSample, rng: &mut LcgRng) -> Vector4f {
        let mut sum = Vector3f::zeros();
        for _ in 0..self.samples {
            let d = sample_uniform_sphere(rng.next_2d());
            sum += sample.eval(&d);
        }
        let mean = sum / (self.samples as Float);
        Vector4f::new(mean.x, mean.y, mean.z, 1.0)
    }

    fn is_deterministic(&self) -> bool {
        false
    }

    fn name(&self) -> String {
        format!("directional ({} samples)", self.samples)
    }
}
