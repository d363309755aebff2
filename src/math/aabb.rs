// Copyright 2020 @TwoCookingMice

use super::constants::{ Float, Vector3f };

// Axes thinner than this are treated as collapsed.
pub const DEGENERATE_EXTENT: Float = 1e-5;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct AABB {
    pub p_min: Vector3f,
    pub p_max: Vector3f
}

impl AABB {
    pub fn new(p_min: Vector3f, p_max: Vector3f) -> Self {
        let mut min = Vector3f::new(0.0, 0.0, 0.0);
        let mut max = Vector3f::new(0.0, 0.0, 0.0);
        for idx in 0..3 {
            min[idx] = p_min[idx].min(p_max[idx]);
            max[idx] = p_max[idx].max(p_min[idx]);
        }
        Self { p_min: min, p_max: max }
    }

    /// Zero-size box sitting on a single point.
    pub fn from_point(p: Vector3f) -> Self {
        Self { p_min: p, p_max: p }
    }

    pub fn center(&self) -> Vector3f {
        0.5f32 * self.p_min + 0.5f32 * self.p_max
    }

    pub fn expand_by_point(&mut self, p: &Vector3f) {
        for idx in 0..3 {
            self.p_min[idx] = self.p_min[idx].min(p[idx]);
            self.p_max[idx] = self.p_max[idx].max(p[idx]);
        }
    }

    /// Grow every face outward by `amount` on its axis, keeping the center fixed.
    pub fn expand_symmetric(&mut self, amount: &Vector3f) {
        for idx in 0..3 {
            self.p_min[idx] -= amount[idx];
            self.p_max[idx] += amount[idx];
        }
    }

    pub fn diagnal(&self) -> Vector3f {
        self.p_max - self.p_min
    }

    pub fn contains(&self, p: &Vector3f) -> bool {
        (0..3).all(|idx| p[idx] >= self.p_min[idx] && p[idx] <= self.p_max[idx])
    }

    /// Strict containment on every axis that has non-zero extent in `other`.
    pub fn strictly_contains(&self, other: &AABB) -> bool {
        (0..3).all(|idx| {
            let strict = self.p_min[idx] < other.p_min[idx] && self.p_max[idx] > other.p_max[idx];
            let flat = (other.p_max[idx] - other.p_min[idx]) < DEGENERATE_EXTENT
                && self.p_min[idx] <= other.p_min[idx]
                && self.p_max[idx] >= other.p_max[idx];
            strict || flat
        })
    }

    pub fn is_degenerate(&self) -> bool {
        let diagnal = self.diagnal();
        (0..3).any(|idx| diagnal[idx] < DEGENERATE_EXTENT)
    }

    /// Finite corners with `min <= max` on every axis.
    pub fn is_valid(&self) -> bool {
        (0..3).all(|idx| {
            self.p_min[idx].is_finite() && self.p_max[idx].is_finite() && self.p_min[idx] <= self.p_max[idx]
        })
    }
}

/* Test for AABB */
#[cfg(test)]
mod tests {
    use super::AABB;
    use super::{ Float, Vector3f };

    #[test]
    fn test_aabb_geometry() {
        let min = Vector3f::new(1.0, 7.0, 3.0);
        let max = Vector3f::new(4.0, 4.0, 4.0);
        let mut bbox: AABB = AABB::new(min, max);

        let center = bbox.center();
        assert!((center[0] - 2.5f32).abs() < 1e-6);
        assert!((center[1] - 5.5f32).abs() < 1e-6);
        assert!((center[2] - 3.5f32).abs() < 1e-6);
        assert!(bbox.is_valid());

        bbox.expand_by_point(&Vector3f::new(-1.0, 5.0, 6.0));
        assert_eq!(bbox.p_min[0], -1.0);
        assert_eq!(bbox.p_max[2], 6.0);
    }

    #[test]
    fn test_aabb_invalid() {
        let inverted = AABB { p_min: Vector3f::new(1.0, 0.0, 0.0), p_max: Vector3f::new(0.0, 1.0, 1.0) };
        assert!(!inverted.is_valid());
        let nan = AABB { p_min: Vector3f::new(Float::NAN, 0.0, 0.0), p_max: Vector3f::new(1.0, 1.0, 1.0) };
        assert!(!nan.is_valid());
        let unbounded = AABB { p_min: Vector3f::new(Float::NEG_INFINITY, 0.0, 0.0), p_max: Vector3f::new(1.0, 1.0, 1.0) };
        assert!(!unbounded.is_valid());
        assert!(AABB::from_point(Vector3f::zeros()).is_valid());
    }

    #[test]
    fn test_aabb_expand_symmetric() {
        let mut bbox = AABB::new(Vector3f::new(0.0, 0.0, 0.0), Vector3f::new(2.0, 4.0, 0.0));
        let before = bbox;
        bbox.expand_symmetric(&Vector3f::new(1.0, 1.0, 0.0));
        assert_eq!(bbox.center(), before.center());
        assert_eq!(bbox.diagnal(), Vector3f::new(4.0, 6.0, 0.0));
        assert!(bbox.is_degenerate());
        assert!(bbox.strictly_contains(&before));
        assert!(!before.strictly_contains(&bbox));
    }

    #[test]
    fn test_aabb_contains() {
        let bbox = AABB::new(Vector3f::new(-1.0, -1.0, -1.0), Vector3f::new(1.0, 1.0, 1.0));
        assert!(bbox.contains(&Vector3f::new(1.0, 0.0, -1.0)));
        assert!(!bbox.contains(&Vector3f::new(1.1, 0.0, 0.0)));
        assert!(!bbox.is_degenerate());
    }
}
