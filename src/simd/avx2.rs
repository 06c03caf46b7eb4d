use std::arch::x86_64::*;

use crate::simd_utils;

use super::{F32Vector, Lanes};

#[derive(Debug, Clone, Copy)]
pub(crate) struct F32x8Avx2(__m256);

impl F32x8Avx2 {
    #[inline(always)]
    unsafe fn permute(self, indexes: [i32; 8]) -> Self {
        let [i0, i1, i2, i3, i4, i5, i6, i7] = indexes;
        let idx = _mm256_setr_epi32(i0, i1, i2, i3, i4, i5, i6, i7);
        Self(_mm256_permutevar8x32_ps(self.0, idx))
    }
}

impl Lanes for F32x8Avx2 {
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports AVX2.
        unsafe { Self(_mm256_add_ps(self.0, other.0)) }
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        // Values of the type exist only if CPU supports AVX2.
        unsafe { Self(_mm256_mul_ps(self.0, other.0)) }
    }
}

impl F32Vector for F32x8Avx2 {
    const LANES: usize = 8;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self(_mm256_set1_ps(value))
    }

    #[inline(always)]
    unsafe fn load(src: &[f32], index: usize) -> Self {
        Self(simd_utils::loadu_ps256(src, index))
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32], index: usize) {
        simd_utils::storeu_ps256(dst, index, self.0);
    }

    #[inline(always)]
    unsafe fn first_l1(self) -> Self {
        self.permute([0, 0, 1, 2, 3, 4, 5, 6])
    }

    #[inline(always)]
    unsafe fn first_l2(self) -> Self {
        self.permute([1, 0, 0, 1, 2, 3, 4, 5])
    }

    #[inline(always)]
    unsafe fn first_l3(self) -> Self {
        self.permute([2, 1, 0, 0, 1, 2, 3, 4])
    }

    #[inline(always)]
    unsafe fn last_r1(self) -> Self {
        self.permute([1, 2, 3, 4, 5, 6, 7, 7])
    }

    #[inline(always)]
    unsafe fn last_r2(self) -> Self {
        self.permute([2, 3, 4, 5, 6, 7, 7, 6])
    }

    #[inline(always)]
    unsafe fn last_r3(self) -> Self {
        self.permute([3, 4, 5, 6, 7, 7, 6, 5])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpuExtensions;

    #[target_feature(enable = "avx2")]
    unsafe fn check() {
        crate::simd::check_neighbors::<F32x8Avx2, 8>();
    }

    #[test]
    fn permutations_match_portable() {
        if !CpuExtensions::Avx2.is_supported() {
            return;
        }
        unsafe { check() }
    }
}
