//! Vector types used by convolution kernels.
//!
//! Every kernel is written once, generic over [F32Vector], and instantiated
//! inside of functions compiled with target features of a backend.

#[cfg(target_arch = "x86_64")]
pub(crate) mod avx2;
pub(crate) mod native;
#[cfg(target_arch = "aarch64")]
pub(crate) mod neon;
#[cfg(target_arch = "x86_64")]
pub(crate) mod sse4;

/// Max count of lanes among all backends.
pub(crate) const MAX_LANES: usize = 8;

/// Arithmetic shared by scalars and vectors.
///
/// Kernels use the same expressions for vectors and for scalar border
/// pixels, so both produce bit-identical values.
pub(crate) trait Lanes: Copy {
    fn add(self, other: Self) -> Self;

    fn mul(self, other: Self) -> Self;
}

impl Lanes for f32 {
    #[inline(always)]
    fn add(self, other: Self) -> Self {
        self + other
    }

    #[inline(always)]
    fn mul(self, other: Self) -> Self {
        self * other
    }
}

/// A vector of `LANES` values of `f32`.
///
/// For safety, it is necessary to ensure the following conditions:
/// - CPU supports extension used by the implementation;
/// - `index + LANES <= slice.len()` for `load()` and `store()`.
///
/// Values are created only by `splat()` and `load()`, so methods of
/// [Lanes] may rely on the supported extension.
pub(crate) trait F32Vector: Lanes {
    const LANES: usize;

    unsafe fn splat(value: f32) -> Self;

    unsafe fn load(src: &[f32], index: usize) -> Self;

    unsafe fn store(self, dst: &mut [f32], index: usize);

    /// Values at `x - 1` for a window that starts at the left edge of a row.
    unsafe fn first_l1(self) -> Self;

    /// Values at `x - 2` for a window that starts at the left edge of a row.
    unsafe fn first_l2(self) -> Self;

    /// Values at `x - 3` for a window that starts at the left edge of a row.
    unsafe fn first_l3(self) -> Self;

    /// Values at `x + 1` for a window that ends at the right edge of a row.
    unsafe fn last_r1(self) -> Self;

    /// Values at `x + 2` for a window that ends at the right edge of a row.
    unsafe fn last_r2(self) -> Self;

    /// Values at `x + 3` for a window that ends at the right edge of a row.
    unsafe fn last_r3(self) -> Self;
}

/// Checks permutations of a vector type against portable [Neighbors].
///
/// [Neighbors]: crate::Neighbors
#[cfg(test)]
#[inline(always)]
pub(crate) unsafe fn check_neighbors<V: F32Vector, const N: usize>() {
    use crate::Neighbors;

    assert_eq!(V::LANES, N);
    let src: [f32; N] = std::array::from_fn(|i| i as f32 * 1.5 - 3.);
    let v = V::load(&src, 0);
    let permutations: [(fn(V) -> V, fn([f32; N]) -> [f32; N], &str); 6] = [
        (|v| v.first_l1(), Neighbors::<N>::first_l1, "first_l1"),
        (|v| v.first_l2(), Neighbors::<N>::first_l2, "first_l2"),
        (|v| v.first_l3(), Neighbors::<N>::first_l3, "first_l3"),
        (|v| v.last_r1(), Neighbors::<N>::last_r1, "last_r1"),
        (|v| v.last_r2(), Neighbors::<N>::last_r2, "last_r2"),
        (|v| v.last_r3(), Neighbors::<N>::last_r3, "last_r3"),
    ];
    for (vector_fn, portable_fn, name) in permutations {
        let mut actual = [0f32; N];
        vector_fn(v).store(&mut actual, 0);
        assert_eq!(actual, portable_fn(src), "{name}");
    }
}
