// Copyright @yucwang 2026

use crate::core::error::BakeError;
use crate::math::constants::Vector4f;
use crate::volumes::volume_texture::VolumeTexture;
use std::path::PathBuf;
use std::sync::Arc;

pub const LIGHT_PROBE_TEXTURE: &str = "_LightProbeTexture";
pub const LIGHT_PROBE_BOUNDS: &str = "_LightProbeBounds";
pub const LIGHT_PROBE_ROOT: &str = "_LightProbeRoot";

#[derive(Debug, Clone, PartialEq)]
pub enum AssetHandle {
    File(PathBuf),
    Memory(String),
}

/// Durable storage for a baked volume.
pub trait AssetSink {
    fn store(&mut self, texture: &VolumeTexture) -> Result<AssetHandle, BakeError>;
}

/// Shader-side destination for the baked volume and its bounds vectors.
pub trait MaterialBinder {
    fn set_texture(&mut self, name: &str, texture: Arc<VolumeTexture>);
    fn set_vector(&mut self, name: &str, value: Vector4f);
}
