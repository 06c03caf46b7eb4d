use crate::Neighbors;

use super::{F32Vector, Lanes};

pub(crate) const LANES: usize = 8;

/// Portable vector. Compiler turns operations with it
/// into SIMD instructions available for the target by itself.
#[derive(Debug, Clone, Copy)]
pub(crate) struct F32x8([f32; LANES]);

impl Lanes for F32x8 {
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] + other.0[i]))
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        Self(std::array::from_fn(|i| self.0[i] * other.0[i]))
    }
}

impl F32Vector for F32x8 {
    const LANES: usize = LANES;

    #[inline(always)]
    unsafe fn splat(value: f32) -> Self {
        Self([value; LANES])
    }

    #[inline(always)]
    unsafe fn load(src: &[f32], index: usize) -> Self {
        debug_assert!(index + LANES <= src.len());
        Self(std::ptr::read_unaligned(
            src.as_ptr().add(index) as *const [f32; LANES]
        ))
    }

    #[inline(always)]
    unsafe fn store(self, dst: &mut [f32], index: usize) {
        debug_assert!(index + LANES <= dst.len());
        std::ptr::write_unaligned(dst.as_mut_ptr().add(index) as *mut [f32; LANES], self.0);
    }

    #[inline(always)]
    unsafe fn first_l1(self) -> Self {
        Self(Neighbors::<LANES>::first_l1(self.0))
    }

    #[inline(always)]
    unsafe fn first_l2(self) -> Self {
        Self(Neighbors::<LANES>::first_l2(self.0))
    }

    #[inline(always)]
    unsafe fn first_l3(self) -> Self {
        Self(Neighbors::<LANES>::first_l3(self.0))
    }

    #[inline(always)]
    unsafe fn last_r1(self) -> Self {
        Self(Neighbors::<LANES>::last_r1(self.0))
    }

    #[inline(always)]
    unsafe fn last_r2(self) -> Self {
        Self(Neighbors::<LANES>::last_r2(self.0))
    }

    #[inline(always)]
    unsafe fn last_r3(self) -> Self {
        Self(Neighbors::<LANES>::last_r3(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutations_match_portable() {
        unsafe { crate::simd::check_neighbors::<F32x8, LANES>() }
    }
}
