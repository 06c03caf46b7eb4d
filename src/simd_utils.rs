use std::arch::x86_64::*;

#[inline(always)]
pub unsafe fn loadu_ps(buf: &[f32], index: usize) -> __m128 {
    debug_assert!(index + 4 <= buf.len());
    _mm_loadu_ps(buf.get_unchecked(index..).as_ptr())
}

#[inline(always)]
pub unsafe fn loadu_ps256(buf: &[f32], index: usize) -> __m256 {
    debug_assert!(index + 8 <= buf.len());
    _mm256_loadu_ps(buf.get_unchecked(index..).as_ptr())
}

#[inline(always)]
pub unsafe fn storeu_ps(buf: &mut [f32], index: usize, v: __m128) {
    debug_assert!(index + 4 <= buf.len());
    _mm_storeu_ps(buf.get_unchecked_mut(index..).as_mut_ptr(), v)
}

#[inline(always)]
pub unsafe fn storeu_ps256(buf: &mut [f32], index: usize, v: __m256) {
    debug_assert!(index + 8 <= buf.len());
    _mm256_storeu_ps(buf.get_unchecked_mut(index..).as_mut_ptr(), v)
}
