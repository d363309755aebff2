// Copyright 2020 @TwoCookingMice

pub mod aabb;
pub mod constants;
pub mod sh;
pub mod transform;
pub mod warp;
