// Copyright @yucwang 2026

pub mod bounds;
pub mod pipeline;
pub mod voxel;
