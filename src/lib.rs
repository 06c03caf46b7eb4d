#![doc = include_str!("../README.md")]
//!
//! ## Feature flags
#![doc = document_features::document_features!()]

pub use convolution::weights::*;
pub use convolution::{separable5, symmetric3, symmetric5, Convolver, MAX_RADIUS};
pub use cpu_extensions::CpuExtensions;
pub use errors::*;
#[cfg(feature = "image")]
pub use image_crate::GrayF32Image;
pub use neighbors::{mirror_index, Neighbors};
pub use plane::{Plane, PlaneRowsMut};
pub use rect::Rect;
pub use threading::ThreadPool;

mod convolution;
mod cpu_extensions;
mod errors;
#[cfg(feature = "image")]
mod image_crate;
mod neighbors;
#[cfg(target_arch = "aarch64")]
mod neon_utils;
mod plane;
mod rect;
#[cfg(any(test, feature = "for_testing"))]
pub mod reference;
mod simd;
#[cfg(target_arch = "x86_64")]
mod simd_utils;
#[cfg(any(test, feature = "for_testing"))]
pub mod testing;
mod threading;
