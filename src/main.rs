// Copyright 2020 TwoCookingMice

use probevol::bakers::pipeline::bake_volume;
use probevol::core::binding::MaterialBinder;
use probevol::core::error::BakeError;
use probevol::core::material::Material;
use probevol::core::scene_loader::load_scene;
use probevol::io::preview::write_preview_png;
use probevol::io::volume_asset::ExrAssetSink;
use probevol::probes::interpolated::InterpolatedProbeField;
use probevol::reducers::ReducerKind;
use probevol::volumes::grid::GridMapping;
use probevol::volumes::volume_texture::TextureFormat;

use std::env;

fn main() {
    env::set_var("RUST_LOG", "info");
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <scene.xml> <output.exr> [--resolution N] [--padding F] [--samples N] [--seed N] \
                   [--reducer direct|directional] [--mapping inclusive|exclusive] \
                   [--format rgba32f|rgba16f|rgba8] [--preview out.png]", args[0]);
        std::process::exit(1);
    }

    let input_path = &args[1];
    let output_path = &args[2];
    let mut resolution_override: Option<usize> = None;
    let mut padding_override: Option<f32> = None;
    let mut samples_override: Option<u32> = None;
    let mut seed_override: Option<u64> = None;
    let mut reducer_override: Option<String> = None;
    let mut mapping_override: Option<GridMapping> = None;
    let mut format_override: Option<TextureFormat> = None;
    let mut preview_path: Option<String> = None;

    let mut i = 3;
    while i < args.len() {
        match args[i].as_str() {
            "--resolution" => {
                i += 1;
                resolution_override = args.get(i).and_then(|v| v.parse::<usize>().ok());
            }
            "--padding" => {
                i += 1;
                padding_override = args.get(i).and_then(|v| v.parse::<f32>().ok());
            }
            "--samples" => {
                i += 1;
                samples_override = args.get(i).and_then(|v| v.parse::<u32>().ok());
            }
            "--seed" => {
                i += 1;
                seed_override = args.get(i).and_then(|v| v.parse::<u64>().ok());
            }
            "--reducer" => {
                i += 1;
                reducer_override = args.get(i).cloned();
            }
            "--mapping" => {
                i += 1;
                mapping_override = args.get(i).and_then(|v| GridMapping::parse(v));
            }
            "--format" => {
                i += 1;
                format_override = args.get(i).and_then(|v| TextureFormat::parse(v));
            }
            "--preview" => {
                i += 1;
                preview_path = args.get(i).cloned();
            }
            other => log::warn!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    let load_result = match load_scene(input_path) {
        Ok(result) => result,
        Err(e) => {
            log::error!("Failed to load {}: {}", input_path, e);
            std::process::exit(1);
        }
    };

    let mut settings = load_result.settings;
    settings.show_progress = true;
    if let Some(resolution) = resolution_override {
        settings.resolution = resolution;
    }
    if let Some(padding) = padding_override {
        settings.padding = padding;
    }
    if let Some(seed) = seed_override {
        settings.seed = seed;
    }
    if let Some(mapping) = mapping_override {
        settings.mapping = mapping;
    }
    if let Some(format) = format_override {
        settings.format = format;
    }
    if let Some(name) = reducer_override {
        match ReducerKind::parse(&name, samples_override) {
            Some(kind) => settings.reducer = kind,
            None => {
                log::error!("Unsupported reducer: {}", name);
                std::process::exit(1);
            }
        }
    } else if let (Some(samples), ReducerKind::Directional { .. }) = (samples_override, settings.reducer) {
        settings.reducer = ReducerKind::Directional { samples };
    }

    let groups = load_result.groups;
    let mut field = InterpolatedProbeField::new(&groups).with_max_distance(load_result.max_distance);
    if let Some(power) = load_result.power {
        field = field.with_power(power);
    }
    let mut material = load_result.material.as_deref().map(Material::new);
    let mut sink = ExrAssetSink::for_file(output_path);

    let binder = material.as_mut().map(|m| m as &mut dyn MaterialBinder);
    let output = match bake_volume(&groups, &field, &settings, &mut sink, binder) {
        Ok(output) => output,
        Err(BakeError::NoInputData) => {
            log::warn!("Nothing to bake; no texture written.");
            return;
        }
        Err(e) => {
            log::error!("Bake failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(material) = &material {
        log::info!("Bound light probe volume to material {}.", material.name());
    }

    if let Some(path) = preview_path {
        if let Err(e) = write_preview_png(&output.texture, &path) {
            log::error!("Failed to write preview {}: {}", path, e);
            std::process::exit(1);
        }
        log::info!("Wrote preview to {}.", path);
    }
}
