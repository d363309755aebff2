// Copyright @yucwang 2026

use crate::core::error::BakeError;
use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f, Vector4f};

/// How lattice indices map onto the normalised [0, 1] span of the bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridMapping {
    /// `t = i / (N - 1)`: first and last index sit on the min and max faces.
    Inclusive,
    /// `t = i / N`: the max face is never sampled.
    Exclusive,
}

impl Default for GridMapping {
    fn default() -> Self {
        GridMapping::Inclusive
    }
}

impl GridMapping {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "inclusive" => Some(GridMapping::Inclusive),
            "exclusive" => Some(GridMapping::Exclusive),
            _ => None,
        }
    }

    pub fn to_unit(&self, index: usize, resolution: usize) -> Float {
        match self {
            GridMapping::Inclusive => {
                if resolution <= 1 {
                    0.0
                } else {
                    index as Float / (resolution - 1) as Float
                }
            }
            GridMapping::Exclusive => index as Float / resolution as Float,
        }
    }

    /// Inverse of `to_unit`, as a continuous texel coordinate.
    pub fn from_unit(&self, t: Float, resolution: usize) -> Float {
        match self {
            GridMapping::Inclusive => t * (resolution.max(1) - 1) as Float,
            GridMapping::Exclusive => t * resolution as Float,
        }
    }

    pub fn voxel_position(&self, bounds: &AABB, resolution: usize, x: usize, y: usize, z: usize) -> Vector3f {
        let t = Vector3f::new(
            self.to_unit(x, resolution),
            self.to_unit(y, resolution),
            self.to_unit(z, resolution),
        );
        bounds.p_min + t.component_mul(&bounds.diagnal())
    }
}

/// `N^3`, or `None` when it does not fit in `usize`.
pub fn voxel_count(resolution: usize) -> Option<usize> {
    resolution.checked_mul(resolution)?.checked_mul(resolution)
}

#[inline]
pub fn linear_index(resolution: usize, x: usize, y: usize, z: usize) -> usize {
    (z * resolution + y) * resolution + x
}

/// A fully written N x N x N colour lattice.
#[derive(Debug, Clone)]
pub struct VoxelGrid {
    resolution: usize,
    bounds: AABB,
    mapping: GridMapping,
    cells: Vec<Vector4f>,
}

impl VoxelGrid {
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn mapping(&self) -> GridMapping {
        self.mapping
    }

    pub fn get(&self, x: usize, y: usize, z: usize) -> Vector4f {
        self.cells[linear_index(self.resolution, x, y, z)]
    }

    pub fn cells(&self) -> &[Vector4f] {
        &self.cells
    }

    pub fn voxel_position(&self, x: usize, y: usize, z: usize) -> Vector3f {
        self.mapping.voxel_position(&self.bounds, self.resolution, x, y, z)
    }
}

/// Collects voxel results in any order; only hands out a grid once every cell is set.
pub struct VoxelGridBuilder {
    resolution: usize,
    bounds: AABB,
    mapping: GridMapping,
    cells: Vec<Option<Vector4f>>,
}

impl VoxelGridBuilder {
    pub fn new(resolution: usize, bounds: AABB, mapping: GridMapping) -> Result<Self, BakeError> {
        let count = match voxel_count(resolution) {
            Some(count) if count > 0 => count,
            _ => return Err(BakeError::InvalidResolution(resolution)),
        };
        Ok(Self { resolution, bounds, mapping, cells: vec![None; count] })
    }

    pub fn set(&mut self, x: usize, y: usize, z: usize, value: Vector4f) {
        let idx = linear_index(self.resolution, x, y, z);
        debug_assert!(self.cells[idx].is_none(), "voxel ({}, {}, {}) written twice", x, y, z);
        self.cells[idx] = Some(value);
    }

    /// Store one z-slice laid out x fastest.
    pub fn set_slice(&mut self, z: usize, slice: &[Vector4f]) {
        let n = self.resolution;
        debug_assert_eq!(slice.len(), n * n);
        for y in 0..n {
            for x in 0..n {
                self.set(x, y, z, slice[x + n * y]);
            }
        }
    }

    pub fn written(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn finish(self) -> Result<VoxelGrid, BakeError> {
        let expected = self.cells.len();
        let written = self.written();
        if written != expected {
            return Err(BakeError::IncompleteGrid { written, expected });
        }

        let cells = self.cells.into_iter().flatten().collect();
        Ok(VoxelGrid {
            resolution: self.resolution,
            bounds: self.bounds,
            mapping: self.mapping,
            cells,
        })
    }
}
