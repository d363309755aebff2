// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::sh::SHSample;

/// Interpolated SH lookup over a fixed probe snapshot.
///
/// Implementations must return the same coefficients for the same position for the
/// lifetime of a bake, and must be safe to query from several threads at once.
pub trait ProbeField: Send + Sync {
    fn interpolate(&self, p_world: &Vector3f) -> SHSample;
    fn probe_count(&self) -> usize;
}
