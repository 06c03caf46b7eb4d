use std::arch::aarch64::*;

#[inline(always)]
pub unsafe fn load_f32x4(buf: &[f32], index: usize) -> float32x4_t {
    debug_assert!(index + 4 <= buf.len());
    vld1q_f32(buf.get_unchecked(index..).as_ptr())
}

#[inline(always)]
pub unsafe fn store_f32x4(buf: &mut [f32], index: usize, v: float32x4_t) {
    debug_assert!(index + 4 <= buf.len());
    vst1q_f32(buf.get_unchecked_mut(index..).as_mut_ptr(), v)
}
