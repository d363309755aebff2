/* Copyright 2020 @Yuchen Wong */

use nalgebra as na;

pub type Float = f32;

pub type Vector3f = na::Vector3<Float>;
pub type Vector4f = na::Vector4<Float>;
pub type Matrix4f = na::Matrix4<Float>;

pub const PI: Float = 3.14159265359;
