// Copyright @yucwang 2026

use crate::core::probe_field::ProbeField;
use crate::math::constants::{Float, Vector3f};
use crate::math::sh::SHSample;
use crate::probes::probe_group::ProbeGroup;

const SNAP_DISTANCE: Float = 1e-6;

/// Inverse-distance weighted blend of every probe in the snapshot.
pub struct InterpolatedProbeField {
    positions: Vec<Vector3f>,
    samples: Vec<SHSample>,
    power: Float,
    max_distance: Option<Float>,
}

impl InterpolatedProbeField {
    pub fn new(groups: &[ProbeGroup]) -> Self {
        let mut positions = Vec::new();
        let mut samples = Vec::new();
        for group in groups {
            for (p, sh) in group.world_probes() {
                positions.push(p);
                samples.push(sh);
            }
        }
        log::debug!("InterpolatedProbeField: {} probes", positions.len());
        Self { positions, samples, power: 2.0, max_distance: None }
    }

    pub fn with_power(mut self, power: Float) -> Self {
        self.power = power;
        self
    }

    // Probes further than this do not contribute.
    pub fn with_max_distance(mut self, max_distance: Option<Float>) -> Self {
        self.max_distance = max_distance;
        self
    }
}

impl ProbeField for InterpolatedProbeField {
    fn interpolate(&self, p_world: &Vector3f) -> SHSample {
        let mut acc = SHSample::default();
        let mut total_weight = 0.0;

        for (p, sh) in self.positions.iter().zip(self.samples.iter()) {
            let dist = (p - p_world).norm();
            if dist < SNAP_DISTANCE {
                return *sh;
            }
            if let Some(max_distance) = self.max_distance {
                if dist > max_distance {
                    continue;
                }
            }
            let weight = 1.0 / dist.powf(self.power);
            acc.add_weighted(sh, weight);
            total_weight += weight;
        }

        if total_weight > 0.0 {
            acc.scale(1.0 / total_weight);
        }
        acc
    }

    fn probe_count(&self) -> usize {
        self.positions.len()
    }
}
