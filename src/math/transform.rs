// Copyright 2020 @TwoCookingMice

use super::constants::{ Vector3f, Matrix4f };

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    matrix: Matrix4f
}

impl Default for Transform {
    fn default() -> Self {
        Self { matrix: Matrix4f::identity() }
    }
}

impl Transform {
    pub fn new(matrix: Matrix4f) -> Self {
        Self { matrix: matrix }
    }

    pub fn from_translation(t: Vector3f) -> Self {
        Self::new(Matrix4f::new_translation(&t))
    }

    /// Apply `t` after this transform.
    pub fn then_translate(&self, t: &Vector3f) -> Self {
        Self::new(Matrix4f::new_translation(t) * self.matrix)
    }

    /// Apply a per-axis scale after this transform.
    pub fn then_scale(&self, s: &Vector3f) -> Self {
        Self::new(Matrix4f::new_nonuniform_scaling(s) * self.matrix)
    }

    pub fn apply_point(&self, p: Vector3f) -> Vector3f {
        let x = p[0] * self.matrix[(0, 0)] + p[1] * self.matrix[(0, 1)] +
            p[2] * self.matrix[(0, 2)] + self.matrix[(0, 3)];
        let y = p[0] * self.matrix[(1, 0)] + p[1] * self.matrix[(1, 1)] +
            p[2] * self.matrix[(1, 2)] + self.matrix[(1, 3)];
        let z = p[0] * self.matrix[(2, 0)] + p[1] * self.matrix[(2, 1)] +
            p[2] * self.matrix[(2, 2)] + self.matrix[(2, 3)];
        let w = p[0] * self.matrix[(3, 0)] + p[1] * self.matrix[(3, 1)] +
            p[2] * self.matrix[(3, 2)] + self.matrix[(3, 3)];

        Vector3f::new(x / w, y / w, z / w)
    }
}
