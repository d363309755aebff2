// Copyright @yucwang 2026

use crate::math::constants::Float;

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Independent stream for one item of a larger job, e.g. one voxel of a bake.
    pub fn for_stream(seed: u64, stream: u64) -> Self {
        let mut rng = Self::new(seed ^ stream.wrapping_mul(0x9E3779B97F4A7C15));
        rng.next_u32();
        rng
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        (self.next_u32() as Float) / (u32::MAX as Float)
    }

    pub fn next_2d(&mut self) -> (Float, Float) {
        let u = self.next_f32();
        let v = self.next_f32();
        (u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rng_same_seed_same_sequence() {
        let mut a = LcgRng::new(7);
        let mut b = LcgRng::new(7);
        for _ in 0..32 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
    }

    #[test]
    fn rng_streams_differ() {
        let mut a = LcgRng::for_stream(1, 0);
        let mut b = LcgRng::for_stream(1, 1);
        let same = (0..16).filter(|_| a.next_u32() == b.next_u32()).count();
        assert!(same < 16);
    }

    #[test]
    fn rng_unit_interval() {
        let mut rng = LcgRng::new(123);
        for _ in 0..1000 {
            let v = rng.next_f32();
            assert!((0.0..=1.0).contains(&v));
        }
    }
}
