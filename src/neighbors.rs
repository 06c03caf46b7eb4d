//! Mirrored neighbors of pixels at the edges of rows.
//!
//! Out-of-range coordinates are reflected back across the edge without
//! repeating the edge pixel: `-1 -> 0`, `-2 -> 1`, `len -> len - 1`.

/// Reflects `index` into `0..len`.
///
/// # Panics
/// Panics if `len` is zero.
#[inline]
pub fn mirror_index(index: isize, len: usize) -> usize {
    assert!(len > 0, "can't mirror index into empty range");
    let len = len as isize;
    let mut index = index;
    while index < 0 || index >= len {
        if index < 0 {
            index = -index - 1;
        } else {
            index = 2 * len - 1 - index;
        }
    }
    index as usize
}

/// Lane permutations that produce mirrored neighbors of a window
/// of `N` values.
///
/// `first_*` functions expect a window that starts at the left edge of a row
/// and return the window shifted left by 1, 2 or 3 positions.
/// `last_*` functions expect a window that ends at the right edge of a row
/// and return the window shifted right by 1, 2 or 3 positions.
///
/// Permutations are constants evaluated at compile time for every `N`.
pub struct Neighbors<const N: usize>;

impl<const N: usize> Neighbors<N> {
    const FIRST_L1: [usize; N] = first_permutation::<N>(1);
    const FIRST_L2: [usize; N] = first_permutation::<N>(2);
    const FIRST_L3: [usize; N] = first_permutation::<N>(3);
    const LAST_R1: [usize; N] = last_permutation::<N>(1);
    const LAST_R2: [usize; N] = last_permutation::<N>(2);
    const LAST_R3: [usize; N] = last_permutation::<N>(3);

    #[inline(always)]
    pub fn first_l1(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::FIRST_L1)
    }

    #[inline(always)]
    pub fn first_l2(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::FIRST_L2)
    }

    #[inline(always)]
    pub fn first_l3(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::FIRST_L3)
    }

    #[inline(always)]
    pub fn last_r1(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::LAST_R1)
    }

    #[inline(always)]
    pub fn last_r2(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::LAST_R2)
    }

    #[inline(always)]
    pub fn last_r3(v: [f32; N]) -> [f32; N] {
        permute(v, &Self::LAST_R3)
    }
}

#[inline(always)]
fn permute<const N: usize>(v: [f32; N], indexes: &[usize; N]) -> [f32; N] {
    std::array::from_fn(|i| v[indexes[i]])
}

const fn first_permutation<const N: usize>(shift: usize) -> [usize; N] {
    assert!(shift <= N, "window is too narrow for the shift");
    let mut res = [0; N];
    let mut i = 0;
    while i < N {
        res[i] = if i >= shift { i - shift } else { shift - 1 - i };
        i += 1;
    }
    res
}

const fn last_permutation<const N: usize>(shift: usize) -> [usize; N] {
    assert!(shift <= N, "window is too narrow for the shift");
    let mut res = [0; N];
    let mut i = 0;
    while i < N {
        let j = i + shift;
        res[i] = if j < N { j } else { 2 * N - 1 - j };
        i += 1;
    }
    res
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota<const N: usize>() -> [f32; N] {
        std::array::from_fn(|i| i as f32)
    }

    #[test]
    fn mirror_index_reflects_without_repeat() {
        assert_eq!(mirror_index(-1, 5), 0);
        assert_eq!(mirror_index(-2, 5), 1);
        assert_eq!(mirror_index(-3, 5), 2);
        assert_eq!(mirror_index(0, 5), 0);
        assert_eq!(mirror_index(4, 5), 4);
        assert_eq!(mirror_index(5, 5), 4);
        assert_eq!(mirror_index(6, 5), 3);
        assert_eq!(mirror_index(7, 5), 2);
        // Far outside of a short range.
        assert_eq!(mirror_index(-3, 2), 1);
        assert_eq!(mirror_index(3, 1), 0);
    }

    #[test]
    fn first_neighbors_of_ramp() {
        let v = iota::<16>();
        let mut expected = [0f32; 16];

        expected[0] = 0.;
        expected[1..].iter_mut().enumerate().for_each(|(i, e)| *e = i as f32);
        assert_eq!(Neighbors::<16>::first_l1(v), expected);

        expected[0] = 1.;
        expected[1] = 0.;
        expected[2..].iter_mut().enumerate().for_each(|(i, e)| *e = i as f32);
        assert_eq!(Neighbors::<16>::first_l2(v), expected);

        expected[0] = 2.;
        expected[1] = 1.;
        expected[2] = 0.;
        expected[3..].iter_mut().enumerate().for_each(|(i, e)| *e = i as f32);
        assert_eq!(Neighbors::<16>::first_l3(v), expected);
    }

    #[test]
    fn last_neighbors_of_ramp() {
        let v = iota::<8>();
        assert_eq!(Neighbors::<8>::last_r1(v), [1., 2., 3., 4., 5., 6., 7., 7.]);
        assert_eq!(Neighbors::<8>::last_r2(v), [2., 3., 4., 5., 6., 7., 7., 6.]);
        assert_eq!(Neighbors::<8>::last_r3(v), [3., 4., 5., 6., 7., 7., 6., 5.]);
    }

    #[test]
    fn permutations_match_mirror_index() {
        // A window that covers the whole row sees the same values
        // as mirrored scalar reads.
        const N: usize = 4;
        let v = iota::<N>();
        let shifted = |shift: isize| -> [f32; N] {
            std::array::from_fn(|i| mirror_index(i as isize + shift, N) as f32)
        };
        assert_eq!(Neighbors::<N>::first_l1(v), shifted(-1));
        assert_eq!(Neighbors::<N>::first_l2(v), shifted(-2));
        assert_eq!(Neighbors::<N>::first_l3(v), shifted(-3));
        assert_eq!(Neighbors::<N>::last_r1(v), shifted(1));
        assert_eq!(Neighbors::<N>::last_r2(v), shifted(2));
        assert_eq!(Neighbors::<N>::last_r3(v), shifted(3));
    }
}
