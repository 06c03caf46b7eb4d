use std::arch::x86_64::*;

use crate::simd_utils;

use super::{F32Vector, Lanes};

#[derive(Debug, Clone, Copy)]
pub(crate) struct F32x4Sse(__m128);

// Shuffle masks as `_MM_SHUFFLE(z, y, x, w)`: lanes of result are
// `[src[w], src[x], src[y], src[z]]`.
const FIRST_L1: i32 = 0b10_01_00_00; // [0, 0, 1, 2]
const FIRST_L2: i32 = 0b01_00_00_01; // [1, 0, 0, 1]
const FIRST_L3: i32 = 0b00_00_01_10; // [2, 1, 0, 0]
const LAST_R1: i32 = 0b11_11_10_01; // [1, 2, 3, 3]
const LAST_R2: i32 = 0b10_11_11_10; // [2, 3, 3, 2]
const LAST_R3: i32 = 0b01_10_11_11; // [3, 3, 2, 1]

impl Lanes for F32x4Sse {
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports SSE4.1.
        unsafe { Self(_mm_add_ps(self.0, other.0)) }
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports SSE4.1.
        unsafe { Self(_mm_mul_ps(self.0, other.0)) }
    }
}

impl F32Vector for F32x4Sse {
    const LANES: usize = 4;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(_mm_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn load(src: &[f32], index: usize) -> Self {
        Self(simd_utils::loadu_ps(src, index))
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32], index: usize) {
        simd_utils::storeu_ps(dst, index, self.0);
    }

    #[inline(always)]
    unsafe fn first_l1(self) -> Self {
        Self(_mm_shuffle_ps::<FIRST_L1>(self.0, self.0))
    }

    #[inline(always)]
    unsafe fn first_l2(self) -> Self {
        Self(_mm_shuffle_ps::<FIRST_L2>(self.0, self.0))
    }

    #[inline(always)]
    unsafe fn first_l3(self) -> Self {
        Self(_mm_shuffle_ps::<FIRST_L3>(self.0, self.0))
    }

    #[inline(always)]
    unsafe fn last_r1(self) -> Self {
        Self(_mm_shuffle_ps::<LAST_R1>(self.0, self.0))
    }

    #[inline(always)]
    unsafe fn last_r2(self) -> Self {
        Self(_mm_shuffle_ps::<LAST_R2>(self.0, self.0))
    }

    #[inline(always)]
    unsafe fn last_r3(self) -> Self {
        Self(_mm_shuffle_ps::<LAST_R3>(self.0, self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpuExtensions;

    #[target_feature(enable = "sse4.1")]
    unsafe fn check() {
        crate::simd::check_neighbors::<F32x4Sse, 4>();
    }

    #[test]
    fn permutations_match_portable() {
        if !CpuExtensions::Sse4_1.is_supported() {
            return;
        }
        unsafe { check() }
    }
}
