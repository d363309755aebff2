// Copyright @yucwang 2026

use crate::bakers::bounds::{aggregate_bounds, BoundsSeed, DEFAULT_PADDING};
use crate::bakers::voxel::{VoxelGridBaker, DEFAULT_RESOLUTION};
use crate::core::binding::{AssetHandle, AssetSink, MaterialBinder,
                           LIGHT_PROBE_BOUNDS, LIGHT_PROBE_ROOT, LIGHT_PROBE_TEXTURE};
use crate::core::error::BakeError;
use crate::core::probe_field::ProbeField;
use crate::math::constants::{Float, Vector4f};
use crate::probes::probe_group::{collect_world_positions, ProbeGroup};
use crate::reducers::ReducerKind;
use crate::volumes::grid::GridMapping;
use crate::volumes::volume_texture::{TextureFormat, VolumeTexture};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct BakeSettings {
    pub resolution: usize,
    pub padding: Float,
    pub reducer: ReducerKind,
    pub mapping: GridMapping,
    pub format: TextureFormat,
    pub bounds_seed: BoundsSeed,
    pub seed: u64,
    pub generate_mips: bool,
    pub show_progress: bool,
}

impl Default for BakeSettings {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            padding: DEFAULT_PADDING,
            reducer: ReducerKind::Direct,
            mapping: GridMapping::Inclusive,
            format: TextureFormat::Rgba32Float,
            bounds_seed: BoundsSeed::Origin,
            seed: 0,
            generate_mips: true,
            show_progress: false,
        }
    }
}

pub struct BakedVolume {
    pub texture: VolumeTexture,
    // true when the probe bounds collapsed on at least one axis
    pub degenerate: bool,
}

pub struct BakeOutput {
    pub texture: Arc<VolumeTexture>,
    pub asset: AssetHandle,
    pub degenerate: bool,
}

/// Bounds, voxel grid and texture assembly, without persistence or binding.
pub fn bake_texture(groups: &[ProbeGroup],
                    field: &dyn ProbeField,
                    settings: &BakeSettings) -> Result<BakedVolume, BakeError> {
    let points = collect_world_positions(groups);
    if points.is_empty() {
        log::warn!("No light probe groups found in the scene.");
        return Err(BakeError::NoInputData);
    }

    if !settings.padding.is_finite() || settings.padding < 0.0 {
        log::error!("Padding must be a finite, non-negative fraction, got {}.", settings.padding);
        return Err(BakeError::InvalidPadding(settings.padding));
    }

    let bounds = aggregate_bounds(&points, settings.padding, settings.bounds_seed);
    if !bounds.is_valid() {
        return Err(BakeError::InvalidBounds);
    }
    log::info!("Combined light probe bounds: min ({}, {}, {}), max ({}, {}, {}).",
               bounds.p_min.x, bounds.p_min.y, bounds.p_min.z,
               bounds.p_max.x, bounds.p_max.y, bounds.p_max.z);

    let degenerate = bounds.is_degenerate();
    if degenerate {
        log::warn!("Light probe bounds are degenerate (size {:?}); shader extent will be floored.",
                   bounds.diagnal().as_slice());
    }

    let reducer = settings.reducer.build()?;
    if !reducer.is_deterministic() {
        log::warn!("{} reducer is stochastic; output only reproduces with seed {}.",
                   reducer.name(), settings.seed);
    }

    let grid = VoxelGridBaker::new(settings.resolution, settings.mapping, settings.seed)
        .with_progress(settings.show_progress)
        .bake(&bounds, field, reducer.as_ref())?;

    let mut texture = VolumeTexture::assemble(grid, settings.format);
    if settings.generate_mips {
        texture = texture.with_mips();
    }

    Ok(BakedVolume { texture, degenerate })
}

/// Full bake: texture, persisted asset and material uniforms.
pub fn bake_volume(groups: &[ProbeGroup],
                   field: &dyn ProbeField,
                   settings: &BakeSettings,
                   sink: &mut dyn AssetSink,
                   binder: Option<&mut dyn MaterialBinder>) -> Result<BakeOutput, BakeError> {
    if groups.iter().all(|g| g.is_empty()) {
        log::warn!("No light probe groups found in the scene.");
        return Err(BakeError::NoInputData);
    }
    let binder = match binder {
        Some(binder) => binder,
        None => {
            log::error!("No material assigned.");
            return Err(BakeError::MissingBindingTarget);
        }
    };

    let baked = bake_texture(groups, field, settings)?;
    let texture = Arc::new(baked.texture);
    let asset = sink.store(&texture)?;
    log::info!("Stored light probe volume as {:?}.", asset);

    let extent = texture.shader_extent();
    let root = texture.root();
    binder.set_texture(LIGHT_PROBE_TEXTURE, Arc::clone(&texture));
    binder.set_vector(LIGHT_PROBE_BOUNDS, Vector4f::new(extent.x, extent.y, extent.z, 0.0));
    binder.set_vector(LIGHT_PROBE_ROOT, Vector4f::new(root.x, root.y, root.z, 0.0));

    Ok(BakeOutput {
        texture,
        asset,
        degenerate: baked.degenerate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::material::Material;
    use crate::math::constants::Vector3f;
    use crate::math::sh::SHSample;
    use crate::math::transform::Transform;
    use crate::probes::interpolated::InterpolatedProbeField;

    #[derive(Default)]
    struct MemorySink {
        stored: usize,
    }

    impl AssetSink for MemorySink {
        fn store(&mut self, _texture: &VolumeTexture) -> Result<AssetHandle, BakeError> {
            self.stored += 1;
            Ok(AssetHandle::Memory(format!("volume_{}", self.stored)))
        }
    }

    fn line_group() -> ProbeGroup {
        let mut group = ProbeGroup::new(Transform::default());
        group.add_probe(Vector3f::new(0.0, 0.0, 0.0), SHSample::isotropic(Vector3f::new(1.0, 0.0, 0.0)));
        group.add_probe(Vector3f::new(10.0, 0.0, 0.0), SHSample::isotropic(Vector3f::new(0.0, 1.0, 0.0)));
        group
    }

    fn box_group() -> ProbeGroup {
        let mut group = ProbeGroup::new(Transform::from_translation(Vector3f::new(2.0, 1.0, -1.0)));
        for i in 0..8 {
            let p = Vector3f::new((i & 1) as Float, ((i >> 1) & 1) as Float, ((i >> 2) & 1) as Float) * 4.0;
            group.add_probe(p, SHSample::isotropic(Vector3f::new(0.2 * i as Float, 0.5, 1.0)));
        }
        group
    }

    #[test]
    fn pipeline_two_probe_scenario() {
        let groups = vec![line_group()];
        let field = InterpolatedProbeField::new(&groups);
        let settings = BakeSettings { resolution: 2, padding: 0.0, ..Default::default() };

        let baked = bake_texture(&groups, &field, &settings).unwrap();
        let tex = &baked.texture;
        assert!(baked.degenerate);
        assert_eq!(tex.root(), Vector3f::new(0.0, 0.0, 0.0));
        assert_eq!(tex.extent(), Vector3f::new(10.0, 0.0, 0.0));
        assert_eq!(tex.texel(0, 0, 0), Vector4f::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(tex.texel(1, 0, 0), Vector4f::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(tex.texel(1, 1, 1), Vector4f::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn pipeline_zero_groups_is_no_input() {
        let field = InterpolatedProbeField::new(&[]);
        let mut sink = MemorySink::default();
        let mut material = Material::new("volumetric");
        let result = bake_volume(&[], &field, &BakeSettings::default(), &mut sink, Some(&mut material));
        assert!(matches!(result, Err(BakeError::NoInputData)));
        assert_eq!(sink.stored, 0);
        assert!(material.texture(LIGHT_PROBE_TEXTURE).is_none());
    }

    #[test]
    fn pipeline_empty_groups_is_no_input() {
        let groups = vec![ProbeGroup::default()];
        let field = InterpolatedProbeField::new(&groups);
        assert!(matches!(bake_texture(&groups, &field, &BakeSettings::default()),
                         Err(BakeError::NoInputData)));
    }

    #[test]
    fn pipeline_rejects_bad_padding() {
        let mut group = ProbeGroup::default();
        group.add_probe(Vector3f::new(0.0, 0.0, 0.0), SHSample::isotropic(Vector3f::new(1.0, 1.0, 1.0)));
        group.add_probe(Vector3f::new(10.0, 10.0, 10.0), SHSample::isotropic(Vector3f::new(0.0, 0.0, 0.0)));
        let groups = vec![group];
        let field = InterpolatedProbeField::new(&groups);

        for padding in [-0.75, -0.1, Float::NAN, Float::INFINITY] {
            let settings = BakeSettings { resolution: 2, padding, ..Default::default() };
            assert!(matches!(bake_texture(&groups, &field, &settings), Err(BakeError::InvalidPadding(_))),
                    "padding {}", padding);
        }

        let mut sink = MemorySink::default();
        let mut material = Material::new("volumetric");
        let settings = BakeSettings { resolution: 2, padding: -0.75, ..Default::default() };
        let result = bake_volume(&groups, &field, &settings, &mut sink, Some(&mut material));
        assert!(matches!(result, Err(BakeError::InvalidPadding(_))));
        assert_eq!(sink.stored, 0);
        assert!(material.vector(LIGHT_PROBE_BOUNDS).is_none());
    }

    #[test]
    fn pipeline_rejects_non_finite_probes() {
        let mut group = ProbeGroup::default();
        group.add_probe(Vector3f::new(Float::INFINITY, 0.0, 0.0), SHSample::default());
        group.add_probe(Vector3f::new(1.0, 1.0, 1.0), SHSample::default());
        let groups = vec![group];
        let field = InterpolatedProbeField::new(&groups);
        assert!(matches!(bake_texture(&groups, &field, &BakeSettings::default()),
                         Err(BakeError::InvalidBounds)));
    }

    #[test]
    fn pipeline_missing_binder() {
        let groups = vec![line_group()];
        let field = InterpolatedProbeField::new(&groups);
        let mut sink = MemorySink::default();
        let result = bake_volume(&groups, &field, &BakeSettings::default(), &mut sink, None);
        assert!(matches!(result, Err(BakeError::MissingBindingTarget)));
        assert_eq!(sink.stored, 0);
    }

    #[test]
    fn pipeline_binds_texture_and_vectors() {
        let groups = vec![box_group()];
        let field = InterpolatedProbeField::new(&groups);
        let settings = BakeSettings {
            resolution: 6,
            bounds_seed: BoundsSeed::FirstPoint,
            ..Default::default()
        };
        let mut sink = MemorySink::default();
        let mut material = Material::new("volumetric");

        let output = bake_volume(&groups, &field, &settings, &mut sink, Some(&mut material)).unwrap();
        assert!(!output.degenerate);
        assert_eq!(output.asset, AssetHandle::Memory("volume_1".to_string()));

        // probes span (2, 1, -1)..(6, 5, 3); 10% padding per side
        let root = material.vector(LIGHT_PROBE_ROOT).unwrap();
        let bounds = material.vector(LIGHT_PROBE_BOUNDS).unwrap();
        assert!((root - Vector4f::new(1.6, 0.6, -1.4, 0.0)).norm() < 1e-5);
        assert!((bounds - Vector4f::new(4.8, 4.8, 4.8, 0.0)).norm() < 1e-5);

        let bound = material.texture(LIGHT_PROBE_TEXTURE).unwrap();
        assert!(Arc::ptr_eq(bound, &output.texture));
        assert_eq!(bound.resolution(), 6);
        assert_eq!(bound.mip_count(), 4);
        assert!(bound.texels().iter().all(|c| c.iter().all(|v| v.is_finite())));
    }

    #[test]
    fn pipeline_directional_settings() {
        let groups = vec![box_group()];
        let field = InterpolatedProbeField::new(&groups);
        let settings = BakeSettings {
            resolution: 3,
            reducer: ReducerKind::Directional { samples: 8 },
            seed: 5,
            generate_mips: false,
            ..Default::default()
        };
        let a = bake_texture(&groups, &field, &settings).unwrap().texture;
        let b = bake_texture(&groups, &field, &settings).unwrap().texture;
        assert_eq!(a.texels(), b.texels());
        assert_eq!(a.mip_count(), 1);

        let bad = BakeSettings { reducer: ReducerKind::Directional { samples: 0 }, ..settings };
        assert!(matches!(bake_texture(&groups, &field, &bad), Err(BakeError::InvalidSampleCount)));
    }
}
