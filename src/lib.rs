// Copyright @yucwang 2021

pub extern crate nalgebra as na;

pub mod bakers;
pub mod core;
pub mod io;
pub mod math;
pub mod probes;
pub mod reducers;
pub mod volumes;
