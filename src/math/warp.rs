// Copyright @yucwang 2023

use super::constants::{ PI, Float, Vector3f };

// `u` is a pair of uniform variates in [0, 1].
pub fn sample_uniform_sphere(u: (Float, Float)) -> Vector3f {
    let z: Float = 1. - 2. * u.0;
    let r: Float = (1. - z * z).max(0.).sqrt();
    let phi: Float = 2. * PI * u.1;

    return Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}
