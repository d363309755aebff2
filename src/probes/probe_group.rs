// Copyright @yucwang 2026

use crate::math::constants::Vector3f;
use crate::math::sh::SHSample;
use crate::math::transform::Transform;

/// A set of probes sharing one local frame.
#[derive(Debug, Clone, Default)]
pub struct ProbeGroup {
    pub name: Option<String>,
    pub to_world: Transform,
    positions: Vec<Vector3f>,
    coefficients: Vec<SHSample>,
}

impl ProbeGroup {
    pub fn new(to_world: Transform) -> Self {
        Self { to_world, ..Default::default() }
    }

    pub fn with_name(mut self, name: String) -> Self {
        self.name = Some(name);
        self
    }

    pub fn add_probe(&mut self, local_position: Vector3f, sh: SHSample) {
        self.positions.push(local_position);
        self.coefficients.push(sh);
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn world_positions(&self) -> impl Iterator<Item = Vector3f> + '_ {
        self.positions.iter().map(move |p| self.to_world.apply_point(*p))
    }

    pub fn world_probes(&self) -> impl Iterator<Item = (Vector3f, SHSample)> + '_ {
        self.world_positions().zip(self.coefficients.iter().copied())
    }
}

pub fn collect_world_positions(groups: &[ProbeGroup]) -> Vec<Vector3f> {
    groups.iter().flat_map(|g| g.world_positions()).collect()
}
