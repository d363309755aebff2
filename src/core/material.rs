// Copyright @yucwang 2026

use crate::core::binding::MaterialBinder;
use crate::math::constants::Vector4f;
use crate::volumes::volume_texture::VolumeTexture;
use std::collections::HashMap;
use std::sync::Arc;

/// Named uniform table standing in for a shader material.
#[derive(Default)]
pub struct Material {
    name: String,
    textures: HashMap<String, Arc<VolumeTexture>>,
    vectors: HashMap<String, Vector4f>,
}

impl Material {
    pub fn new(name: &str) -> Self {
        Self { name: name.to_string(), ..Default::default() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn texture(&self, name: &str) -> Option<&Arc<VolumeTexture>> {
        self.textures.get(name)
    }

    pub fn vector(&self, name: &str) -> Option<Vector4f> {
        self.vectors.get(name).copied()
    }
}

impl MaterialBinder for Material {
    fn set_texture(&mut self, name: &str, texture: Arc<VolumeTexture>) {
        log::debug!("{}: binding texture {}", self.name, name);
        self.textures.insert(name.to_string(), texture);
    }

    fn set_vector(&mut self, name: &str, value: Vector4f) {
        log::debug!("{}: {} = ({}, {}, {}, {})", self.name, name, value.x, value.y, value.z, value.w);
        self.vectors.insert(name.to_string(), value);
    }
}
