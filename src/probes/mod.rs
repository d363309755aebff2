// Copyright @yucwang 2026

pub mod interpolated;
pub mod probe_group;
