use std::arch::aarch64::*;

use crate::neon_utils;

use super::{F32Vector, Lanes};

#[derive(Debug, Clone, Copy)]
pub(crate) struct F32x4Neon(float32x4_t);

impl F32x4Neon {
    /// `[v3, v2, v1, v0]`
    #[inline(always)]
    unsafe fn reversed(self) -> float32x4_t {
        let swapped_pairs = vrev64q_f32(self.0);
        vextq_f32::<2>(swapped_pairs, swapped_pairs)
    }
}

impl Lanes for F32x4Neon {
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports NEON.
        unsafe { Self(vaddq_f32(self.0, other.0)) }
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports NEON.
        unsafe { Self(vmulq_f32(self.0, other.0)) }
    }
}

impl F32Vector for F32x4Neon {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(vdupq_n_f32(value))
    }

    #[inline(always)]
    unsafe fn load(src: &[f32], index: usize) -> Self {
        Self(neon_utils::load_f32x4(src, index))
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32], index: usize) {
        neon_utils::store_f32x4(dst, index, self.0);
    }

    #[inline(always)]
    unsafe fn first_l1(self) -> Self {
        // [v0, v0, v1, v2]
        Self(vextq_f32::<3>(vdupq_laneq_f32::<0>(self.0), self.0))
    }

    #[inline(always)]
    unsafe fn first_l2(self) -> Self {
        // [v1, v0, v0, v1]
        Self(vextq_f32::<2>(self.reversed(), self.0))
    }

    #[inline(always)]
    unsafe fn first_l3(self) -> Self {
        // [v2, v1, v0, v0]
        Self(vextq_f32::<1>(self.reversed(), self.0))
    }

    #[inline(always)]
    unsafe fn last_r1(self) -> Self {
        // [v1, v2, v3, v3]
        Self(vextq_f32::<1>(self.0, vdupq_laneq_f32::<3>(self.0)))
    }

    #[inline(always)]
    unsafe fn last_r2(self) -> Self {
        // [v2, v3, v3, v2]
        Self(vextq_f32::<2>(self.0, self.reversed()))
    }

    #[inline(always)]
    unsafe fn last_r3(self) -> Self {
        // [v3, v3, v2, v1]
        Self(vextq_f32::<3>(self.0, self.reversed()))
    }
}
