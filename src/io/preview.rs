// Copyright @yucwang 2026

use crate::core::error::BakeError;
use crate::math::constants::Float;
use crate::volumes::volume_texture::VolumeTexture;

fn linear_to_srgb(v: Float) -> Float {
    if v <= 0.0031308 {
        v * 12.92
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

// Reinhard, then sRGB encode.
fn tonemap(v: Float) -> u8 {
    let v = v.max(0.0);
    let mapped = linear_to_srgb(v / (1.0 + v));
    (mapped.clamp(0.0, 1.0) * 255.0).round() as u8
}

pub fn preview_image(texture: &VolumeTexture) -> image::RgbaImage {
    let n = texture.resolution() as u32;
    image::RgbaImage::from_fn(n, n * n, |x, y| {
        let c = texture.texels()[(y * n + x) as usize];
        image::Rgba([tonemap(c.x), tonemap(c.y), tonemap(c.z), 255])
    })
}

/// Tonemapped 8-bit copy of the slice atlas, for eyeballing a bake.
pub fn write_preview_png(texture: &VolumeTexture, file_path: &str) -> Result<(), BakeError> {
    log::info!("Writing volume preview: {}.", file_path);
    preview_image(texture).save(file_path)?;
    Ok(())
}
