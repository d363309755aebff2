// Copyright @yucwang 2026

use crate::math::aabb::AABB;
use crate::math::constants::{Float, Vector3f, Vector4f};
use crate::volumes::grid::{linear_index, GridMapping, VoxelGrid};
use crate::volumes::{clamp_coord3, clamp_index};

// Smallest extent handed to shaders, so (p - root) / extent stays finite.
pub const MIN_SHADER_EXTENT: Float = 1e-3;

const HALF_MAX: Float = 65504.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextureFormat {
    Rgba32Float,
    Rgba16Float,
    Rgba8Unorm,
}

impl Default for TextureFormat {
    fn default() -> Self {
        TextureFormat::Rgba32Float
    }
}

impl TextureFormat {
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "rgba32f" | "rgba32float" => Some(TextureFormat::Rgba32Float),
            "rgba16f" | "rgba16float" => Some(TextureFormat::Rgba16Float),
            "rgba8" | "rgba8unorm" => Some(TextureFormat::Rgba8Unorm),
            _ => None,
        }
    }

    /// Round a value to what the format can store.
    pub fn quantize(&self, v: Float) -> Float {
        match self {
            TextureFormat::Rgba32Float => v,
            TextureFormat::Rgba16Float => {
                half::f16::from_f32(v.clamp(-HALF_MAX, HALF_MAX)).to_f32()
            }
            TextureFormat::Rgba8Unorm => (v.clamp(0.0, 1.0) * 255.0).round() / 255.0,
        }
    }

    fn quantize4(&self, c: &Vector4f) -> Vector4f {
        c.map(|v| self.quantize(v))
    }
}

/// One level of the mip chain.
#[derive(Debug, Clone)]
pub struct MipLevel {
    pub resolution: usize,
    pub texels: Vec<Vector4f>,
}

/// A baked, shader-ready 3D texture plus the mapping back to world space.
///
/// Lookups are always trilinear with clamp-to-edge wrapping.
#[derive(Debug, Clone)]
pub struct VolumeTexture {
    resolution: usize,
    texels: Vec<Vector4f>,
    format: TextureFormat,
    mapping: GridMapping,
    bounds: AABB,
    mips: Vec<MipLevel>,
}

impl VolumeTexture {
    pub fn assemble(grid: VoxelGrid, format: TextureFormat) -> Self {
        let texels = grid.cells().iter().map(|c| format.quantize4(c)).collect();
        log::info!("Assembled {}^3 volume texture ({:?}).", grid.resolution(), format);

        Self {
            resolution: grid.resolution(),
            texels,
            format,
            mapping: grid.mapping(),
            bounds: *grid.bounds(),
            mips: Vec::new(),
        }
    }

    /// Build box-filtered levels down to 1^3. Odd sizes round up.
    pub fn with_mips(mut self) -> Self {
        let mut mips = Vec::new();
        let mut src_res = self.resolution;
        let mut src = self.texels.clone();
        while src_res > 1 {
            let dst_res = (src_res + 1) / 2;
            let mut dst = Vec::with_capacity(dst_res * dst_res * dst_res);
            for z in 0..dst_res {
                for y in 0..dst_res {
                    for x in 0..dst_res {
                        let mut sum = Vector4f::zeros();
                        let mut count: Float = 0.0;
                        for dz in 0..2 {
                            for dy in 0..2 {
                                for dx in 0..2 {
                                    let (sx, sy, sz) = (2 * x + dx, 2 * y + dy, 2 * z + dz);
                                    if sx < src_res && sy < src_res && sz < src_res {
                                        sum += src[linear_index(src_res, sx, sy, sz)];
                                        count += 1.0;
                                    }
                                }
                            }
                        }
                        dst.push(self.format.quantize4(&(sum / count)));
                    }
                }
            }
            mips.push(MipLevel { resolution: dst_res, texels: dst.clone() });
            src_res = dst_res;
            src = dst;
        }
        self.mips = mips;
        self
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn format(&self) -> TextureFormat {
        self.format
    }

    pub fn mapping(&self) -> GridMapping {
        self.mapping
    }

    pub fn bounds(&self) -> &AABB {
        &self.bounds
    }

    pub fn texels(&self) -> &[Vector4f] {
        &self.texels
    }

    pub fn mips(&self) -> &[MipLevel] {
        &self.mips
    }

    pub fn mip_count(&self) -> usize {
        self.mips.len() + 1
    }

    pub fn root(&self) -> Vector3f {
        self.bounds.p_min
    }

    pub fn extent(&self) -> Vector3f {
        self.bounds.diagnal()
    }

    pub fn shader_extent(&self) -> Vector3f {
        self.extent().map(|v| v.max(MIN_SHADER_EXTENT))
    }

    pub fn texel(&self, x: usize, y: usize, z: usize) -> Vector4f {
        self.texels[linear_index(self.resolution, x, y, z)]
    }

    pub fn world_to_uvw(&self, p_world: &Vector3f) -> Vector3f {
        (p_world - self.root()).component_div(&self.shader_extent())
    }

    pub fn sample(&self, p_world: &Vector3f) -> Vector4f {
        self.sample_uvw(self.world_to_uvw(p_world))
    }

    pub fn sample_uvw(&self, uvw: Vector3f) -> Vector4f {
        if self.texels.is_empty() {
            return Vector4f::zeros();
        }

        self.sample_trilinear(clamp_coord3(uvw))
    }

    fn texel_coord(&self, p: Vector3f) -> Vector3f {
        p.map(|v| self.mapping.from_unit(v, self.resolution))
    }

    fn fetch(&self, idx: (isize, isize, isize)) -> Vector4f {
        let n = self.resolution;
        self.texel(clamp_index(idx.0, n), clamp_index(idx.1, n), clamp_index(idx.2, n))
    }

    fn sample_trilinear(&self, p: Vector3f) -> Vector4f {
        let c = self.texel_coord(p);

        let x0 = c.x.floor() as isize;
        let y0 = c.y.floor() as isize;
        let z0 = c.z.floor() as isize;
        let x1 = x0 + 1;
        let y1 = y0 + 1;
        let z1 = z0 + 1;

        let tx = c.x - x0 as Float;
        let ty = c.y - y0 as Float;
        let tz = c.z - z0 as Float;

        let c000 = self.fetch((x0, y0, z0));
        let c100 = self.fetch((x1, y0, z0));
        let c010 = self.fetch((x0, y1, z0));
        let c110 = self.fetch((x1, y1, z0));
        let c001 = self.fetch((x0, y0, z1));
        let c101 = self.fetch((x1, y0, z1));
        let c011 = self.fetch((x0, y1, z1));
        let c111 = self.fetch((x1, y1, z1));

        let c00 = c000 * (1.0 - tx) + c100 * tx;
        let c10 = c010 * (1.0 - tx) + c110 * tx;
        let c01 = c001 * (1.0 - tx) + c101 * tx;
        let c11 = c011 * (1.0 - tx) + c111 * tx;

        let c0 = c00 * (1.0 - ty) + c10 * ty;
        let c1 = c01 * (1.0 - ty) + c11 * ty;

        c0 * (1.0 - tz) + c1 * tz
    }
}
