// Copyright @yucwang 2026

use crate::core::reducer::SHReducer;
use crate::core::rng::LcgRng;
use crate::math::constants::Vector4f;
use crate::math::sh::SHSample;

/// Uses the DC term as the voxel colour. Ignores any directional variation.
pub struct DirectTermReducer;

impl DirectTermReducer {
    pub fn new() -> Self {
        Self
    }
}

impl SHReducer for DirectTermReducer {
    fn reduce(&self, sample: &SHSample, _rng: &mut LcgRng) -> Vector4f {
        let dc = sample.dc();
        Vector4f::new(dc.x, dc.y, dc.z, 1.0)
    }

    fn is_deterministic(&self) -> bool {
        true
    }

    fn name(&self) -> String {
        String::from("direct")
    }
}
