// Copyright @yucwang 2026

use crate::math::constants::Float;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BakeError {
    #[error("no light probes found, nothing to bake")]
    NoInputData,
    #[error("no material binding target assigned")]
    MissingBindingTarget,
    #[error("voxel grid incomplete: {written} of {expected} cells written")]
    IncompleteGrid { written: usize, expected: usize },
    #[error("invalid grid resolution: {0}")]
    InvalidResolution(usize),
    #[error("invalid bounds padding: {0}")]
    InvalidPadding(Float),
    #[error("probe bounds are not finite")]
    InvalidBounds,
    #[error("directional sampling needs at least one sample")]
    InvalidSampleCount,
    #[error("asset error: {0}")]
    Asset(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("exr error: {0}")]
    Exr(#[from] exr::error::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}
