/* Copyright 2020 @TwoCookingMice */

use crate::core::error::BakeError;
use crate::math::constants::{Float, Vector4f};

use exr::prelude::*;
use std::result::Result;

#[derive(Debug)]
pub struct RgbaPixels {
    pub width: usize,
    pub height: usize,
    pub data: Vec<Vector4f>,
}

// Read the first RGBA layer of an EXR file
pub fn read_rgba_from_file(file_path: &str) -> Result<RgbaPixels, BakeError> {
    log::info!("Starting reading OpenEXR image from: {}.", file_path);

    let image = read()
        .no_deep_data()
        .largest_resolution_level()
        .rgba_channels(
            |resolution, _| RgbaPixels {
                width: resolution.width(),
                height: resolution.height(),
                data: vec![Vector4f::zeros(); resolution.width() * resolution.height()],
            },
            |image, position, (r, g, b, a): (f32, f32, f32, f32)| {
                let idx = position.y() * image.width + position.x();
                image.data[idx] = Vector4f::new(r, g, b, a);
            },
        )
        .first_valid_layer()
        .all_attributes()
        .from_file(file_path)?;

    let pixels = image.layer_data.channel_data.pixels;
    log::info!("OpenEXR loaded, width = {}, height = {}.", pixels.width, pixels.height);
    Ok(pixels)
}

// Write EXR Image to file
pub fn write_rgba_to_file(image: &[Vector4f],
                          width: usize,
                          height: usize,
                          file_path: &str) -> Result<(), BakeError> {
    log::info!("Starting writing openexr images: {}.", file_path);

    write_rgba_file(file_path, width, height, |x, y| {
        let c = image[y * width + x];
        (c.x as Float, c.y as Float, c.z as Float, c.w as Float)
    })?;
    log::info!("EXR written to: {}.", file_path);
    Ok(())
}
