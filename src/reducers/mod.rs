// Copyright @yucwang 2026

pub mod direct;
pub mod directional;

use crate::core::error::BakeError;
use crate::core::reducer::SHReducer;
use self::direct::DirectTermReducer;
use self::directional::DirectionalSamplingReducer;

pub const DEFAULT_DIRECTIONAL_SAMPLES: u32 = 64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReducerKind {
    Direct,
    Directional { samples: u32 },
}

impl Default for ReducerKind {
    fn default() -> Self {
        ReducerKind::Direct
    }
}

impl ReducerKind {
    pub fn parse(name: &str, samples: Option<u32>) -> Option<Self> {
        match name {
            "direct" | "dc" => Some(ReducerKind::Direct),
            "directional" | "sampled" => Some(ReducerKind::Directional {
                samples: samples.unwrap_or(DEFAULT_DIRECTIONAL_SAMPLES),
            }),
            _ => None,
        }
    }

    pub fn build(&self) -> Result<Box<dyn SHReducer>, BakeError> {
        match *self {
            ReducerKind::Direct => Ok(Box::new(DirectTermReducer::new())),
            ReducerKind::Directional { samples } => {
                Ok(Box::new(DirectionalSamplingReducer::new(samples)?))
            }
        }
    }
}
