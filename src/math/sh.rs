// Copyright @yucwang 2026

//! Order-2 (nine term) spherical harmonics for RGB irradiance.
//!
//! Coefficients are stored in the L0-normalised convention: every real SH basis
//! function is divided by Y00, so the constant band evaluates to 1 and the DC
//! coefficient equals the average of the function over the sphere.

use super::constants::{ Float, Vector3f };

pub const SH_COEFFICIENTS: usize = 9;

const SH_L1: Float = 1.7320508;  // sqrt(3)
const SH_L2_XY: Float = 3.8729833;  // sqrt(15)
const SH_L2_ZZ: Float = 1.1180340;  // sqrt(5) / 2
const SH_L2_XX_YY: Float = 1.9364917;  // sqrt(15) / 2

/// Basis values for a unit direction, ordered
/// `1, y, z, x, xy, yz, 3z^2 - 1, xz, x^2 - y^2`.
pub fn sh_basis(d: &Vector3f) -> [Float; SH_COEFFICIENTS] {
    [
        1.0,
        SH_L1 * d.y,
        SH_L1 * d.z,
        SH_L1 * d.x,
        SH_L2_XY * d.x * d.y,
        SH_L2_XY * d.y * d.z,
        SH_L2_ZZ * (3.0 * d.z * d.z - 1.0),
        SH_L2_XY * d.x * d.z,
        SH_L2_XX_YY * (d.x * d.x - d.y * d.y),
    ]
}

#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct SHSample {
    // coefficients[channel][term]
    pub coefficients: [[Float; SH_COEFFICIENTS]; 3],
}

impl SHSample {
    pub fn new(r: [Float; SH_COEFFICIENTS], g: [Float; SH_COEFFICIENTS], b: [Float; SH_COEFFICIENTS]) -> Self {
        Self { coefficients: [r, g, b] }
    }

    /// Constant irradiance in every direction.
    pub fn isotropic(rgb: Vector3f) -> Self {
        let mut sample = Self::default();
        for channel in 0..3 {
            sample.coefficients[channel][0] = rgb[channel];
        }
        sample
    }

    pub fn dc(&self) -> Vector3f {
        Vector3f::new(self.coefficients[0][0], self.coefficients[1][0], self.coefficients[2][0])
    }

    pub fn eval(&self, d: &Vector3f) -> Vector3f {
        let basis = sh_basis(d);
        let mut rgb = Vector3f::zeros();
        for channel in 0..3 {
            rgb[channel] = self.coefficients[channel]
                .iter()
                .zip(basis.iter())
                .map(|(c, b)| c * b)
                .sum();
        }
        rgb
    }

    pub fn add_weighted(&mut self, other: &SHSample, weight: Float) {
        for channel in 0..3 {
            for term in 0..SH_COEFFICIENTS {
                self.coefficients[channel][term] += other.coefficients[channel][term] * weight;
            }
        }
    }

    pub fn scale(&mut self, s: Float) {
        for row in self.coefficients.iter_mut() {
            for c in row.iter_mut() {
                *c *= s;
            }
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficients.iter().all(|row| row.iter().all(|c| *c == 0.0))
    }
}
