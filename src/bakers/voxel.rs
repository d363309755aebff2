// Copyright @yucwang 2021

use crate::core::error::BakeError;
use crate::core::probe_field::ProbeField;
use crate::core::reducer::SHReducer;
use crate::core::rng::LcgRng;
use crate::math::aabb::AABB;
use crate::math::constants::Vector4f;
use crate::volumes::grid::{linear_index, voxel_count, GridMapping, VoxelGrid, VoxelGridBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

pub const DEFAULT_RESOLUTION: usize = 64;

/// Samples a probe field over an N^3 lattice, one z-slice per work item.
pub struct VoxelGridBaker {
    resolution: usize,
    mapping: GridMapping,
    seed: u64,
    show_progress: bool,
}

impl VoxelGridBaker {
    pub fn new(resolution: usize, mapping: GridMapping, seed: u64) -> Self {
        Self {
            resolution,
            mapping,
            seed,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn bake(&self, bounds: &AABB, field: &dyn ProbeField, reducer: &dyn SHReducer) -> Result<VoxelGrid, BakeError> {
        let n = self.resolution;
        if n == 0 || voxel_count(n).is_none() {
            return Err(BakeError::InvalidResolution(n));
        }
        if field.probe_count() == 0 {
            return Err(BakeError::NoInputData);
        }

        log::info!("Baking {}^3 voxels with {} reducer.", n, reducer.name());

        let progress = if self.show_progress {
            let bar = ProgressBar::new(n as u64);
            bar.set_style(
                ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} slices")
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
            );
            bar
        } else {
            ProgressBar::hidden()
        };

        let next_slice = Arc::new(AtomicUsize::new(0));
        let thread_count = thread::available_parallelism()
            .map(|v| v.get())
            .unwrap_or(1)
            .min(n);
        let (tx, rx) = mpsc::channel::<(usize, Vec<Vector4f>)>();
        let mut builder = VoxelGridBuilder::new(n, *bounds, self.mapping)?;
        let mapping = self.mapping;
        let seed = self.seed;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_slice = Arc::clone(&next_slice);
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let z = next_slice.fetch_add(1, Ordering::Relaxed);
                        if z >= n {
                            break;
                        }

                        let mut slice = Vec::with_capacity(n * n);
                        for y in 0..n {
                            for x in 0..n {
                                let p = mapping.voxel_position(bounds, n, x, y, z);
                                let sh = field.interpolate(&p);
                                let mut rng = LcgRng::for_stream(seed, linear_index(n, x, y, z) as u64);
                                slice.push(reducer.reduce(&sh, &mut rng));
                            }
                        }
                        if tx.send((z, slice)).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for (z, slice) in rx.iter() {
                builder.set_slice(z, &slice);
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        builder.finish()
    }
}
