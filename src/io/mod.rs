// Copyright 2020 @TwoCookingMice

pub mod exr_utils;
pub mod preview;
pub mod volume_asset;
