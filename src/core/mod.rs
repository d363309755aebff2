// Copyright @yucwang 2021

pub mod binding;
pub mod error;
pub mod material;
pub mod probe_field;
pub mod reducer;
pub mod rng;
pub mod scene_loader;
