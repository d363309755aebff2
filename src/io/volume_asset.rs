// Copyright @yucwang 2026

//! Volume textures on disk as an EXR slice atlas: N pixels wide, N * N tall, with
//! slice z occupying rows `z * N .. (z + 1) * N`.
//!
//! Only mip level 0 is stored, always as f32 channels. Texels already carry the
//! quantisation of the texture's format, so the values match what was bound.

use crate::core::binding::{AssetHandle, AssetSink};
use crate::core::error::BakeError;
use crate::io::exr_utils::{read_rgba_from_file, write_rgba_to_file};
use crate::math::constants::Vector4f;
use crate::volumes::volume_texture::{TextureFormat, VolumeTexture};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ASSET_FOLDER: &str = "generated_light_probes";
pub const DEFAULT_ASSET_NAME: &str = "light_probe_volume.exr";

/// Writes baked volumes into a folder, creating it on first use.
pub struct ExrAssetSink {
    folder: PathBuf,
    file_name: String,
}

impl Default for ExrAssetSink {
    fn default() -> Self {
        Self::new(DEFAULT_ASSET_FOLDER, DEFAULT_ASSET_NAME)
    }
}

impl ExrAssetSink {
    pub fn new<P: AsRef<Path>>(folder: P, file_name: &str) -> Self {
        Self {
            folder: folder.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
        }
    }

    /// Sink writing to exactly `path`.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let folder = path.parent().unwrap_or_else(|| Path::new(".")).to_path_buf();
        let file_name = path
            .file_name()
            .map(|f| f.to_string_lossy().to_string())
            .unwrap_or_else(|| DEFAULT_ASSET_NAME.to_string());
        Self { folder, file_name }
    }

    pub fn path(&self) -> PathBuf {
        self.folder.join(&self.file_name)
    }
}

impl AssetSink for ExrAssetSink {
    fn store(&mut self, texture: &VolumeTexture) -> Result<AssetHandle, BakeError> {
        if !self.folder.as_os_str().is_empty() {
            fs::create_dir_all(&self.folder)?;
        }
        let path = self.path();
        let path_str = path
            .to_str()
            .ok_or_else(|| BakeError::Asset(format!("non-utf8 asset path: {:?}", path)))?;
        write_volume_atlas(texture, path_str)?;
        Ok(AssetHandle::File(path))
    }
}

pub fn write_volume_atlas(texture: &VolumeTexture, file_path: &str) -> Result<(), BakeError> {
    let n = texture.resolution();
    if texture.mip_count() > 1 {
        log::warn!("Volume atlas {} keeps level 0 only; {} mip levels are not written.",
                   file_path, texture.mip_count() - 1);
    }
    if texture.format() != TextureFormat::Rgba32Float {
        log::warn!("Volume atlas {} is stored as f32; {:?} is not preserved in the file.",
                   file_path, texture.format());
    }
    // linear layout (z * N + y) * N + x already matches atlas rows
    write_rgba_to_file(texture.texels(), n, n * n, file_path)
}

/// Returns the resolution and texels (x fastest, then y, then z).
pub fn read_volume_atlas(file_path: &str) -> Result<(usize, Vec<Vector4f>), BakeError> {
    let pixels = read_rgba_from_file(file_path)?;
    let n = pixels.width;
    if n == 0 || pixels.height != n * n {
        return Err(BakeError::Asset(format!(
            "{} is not a volume atlas: {}x{}", file_path, pixels.width, pixels.height)));
    }
    Ok((n, pixels.data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::aabb::AABB;
    use crate::math::constants::{Float, Vector3f};
    use crate::volumes::grid::{GridMapping, VoxelGridBuilder};

    fn test_texture(n: usize, format: TextureFormat) -> VolumeTexture {
        let bounds = AABB::new(Vector3f::zeros(), Vector3f::new(1.0, 1.0, 1.0));
        let mut builder = VoxelGridBuilder::new(n, bounds, GridMapping::Inclusive).unwrap();
        for z in 0..n {
            for y in 0..n {
                for x in 0..n {
                    let v = Vector4f::new(x as Float, y as Float * 0.5, z as Float - 1.0, 1.0);
                    builder.set(x, y, z, v);
                }
            }
        }
        VolumeTexture::assemble(builder.finish().unwrap(), format)
    }

    #[test]
    fn volume_atlas_round_trip() {
        let mut folder = std::env::temp_dir();
        folder.push("probevol_atlas_round_trip");
        let mut sink = ExrAssetSink::new(&folder, "volume.exr");
        let texture = test_texture(3, TextureFormat::Rgba32Float);

        let handle = sink.store(&texture).expect("store volume");
        let path = match handle {
            AssetHandle::File(path) => path,
            other => panic!("unexpected handle {:?}", other),
        };
        assert_eq!(path, folder.join("volume.exr"));

        let (n, texels) = read_volume_atlas(path.to_str().unwrap()).expect("read volume");
        assert_eq!(n, 3);
        assert_eq!(texels.as_slice(), texture.texels());
        assert_eq!(texels[2 * 9 + 1 * 3 + 2], Vector4f::new(2.0, 0.5, 1.0, 1.0));
    }

    #[test]
    fn volume_atlas_stores_quantised_level_zero() {
        let mut folder = std::env::temp_dir();
        folder.push("probevol_atlas_level_zero");
        let mut sink = ExrAssetSink::new(&folder, "volume_unorm.exr");
        let texture = test_texture(4, TextureFormat::Rgba8Unorm).with_mips();
        assert_eq!(texture.mip_count(), 3);

        sink.store(&texture).expect("store volume");
        let (n, texels) = read_volume_atlas(sink.path().to_str().unwrap()).expect("read volume");
        assert_eq!(n, 4);
        assert_eq!(texels.as_slice(), texture.texels());
        assert!(texels.iter().all(|c| c.iter().all(|v| (0.0..=1.0).contains(v))));
    }

    #[test]
    fn volume_atlas_rejects_plain_image() {
        let mut path = std::env::temp_dir();
        path.push("probevol_not_a_volume.exr");
        let data = vec![Vector4f::zeros(); 4 * 3];
        write_rgba_to_file(&data, 4, 3, path.to_str().unwrap()).expect("write exr");
        assert!(matches!(read_volume_atlas(path.to_str().unwrap()), Err(BakeError::Asset(_))));
    }

    #[test]
    fn sink_for_file_splits_path() {
        let sink = ExrAssetSink::for_file("out/bakes/hall.exr");
        assert_eq!(sink.path(), PathBuf::from("out/bakes/hall.exr"));
        assert_eq!(ExrAssetSink::default().path(),
                   PathBuf::from(DEFAULT_ASSET_FOLDER).join(DEFAULT_ASSET_NAME));
    }
}
