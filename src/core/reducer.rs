// Copyright @yucwang 2026

use crate::core::rng::LcgRng;
use crate::math::constants::Vector4f;
use crate::math::sh::SHSample;

/// Collapses an SH sample to a single RGBA value.
pub trait SHReducer: Sync {
    fn reduce(&self, sample: &SHSample, rng: &mut LcgRng) -> Vector4f;

    // false when the result depends on the random stream.
    fn is_deterministic(&self) -> bool;

    fn name(&self) -> String;
}
