// Copyright @yucwang 2026

pub mod grid;
pub mod volume_texture;

use crate::math::constants::Vector3f;

// Volume lookups clamp to the edge texels.
pub(crate) fn clamp_coord3(value: Vector3f) -> Vector3f {
    value.map(|v| v.clamp(0.0, 1.0))
}

pub(crate) fn clamp_index(idx: isize, size: usize) -> usize {
    idx.clamp(0, size as isize - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_to_edge() {
        assert_eq!(clamp_coord3(Vector3f::new(1.5, -0.5, 0.25)), Vector3f::new(1.0, 0.0, 0.25));
        assert_eq!(clamp_index(-1, 4), 0);
        assert_eq!(clamp_index(5, 4), 3);
        assert_eq!(clamp_index(2, 4), 2);
    }
}
