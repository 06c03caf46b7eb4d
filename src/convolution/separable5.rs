use crate::convolution::taps::{splat_all, sweep_row, Taps5};
use crate::simd::{F32Vector, Lanes};

const RADIUS: usize = 2;

/// `taps` are values at `x - 2 ..= x + 2` of one row.
#[inline(always)]
fn horizontal_kernel<V: Lanes>(w: &[V; 3], taps: &Taps5<V>) -> V {
    w[0].mul(taps.c)
        .add(w[1].mul(taps.l1.add(taps.r1)))
        .add(w[2].mul(taps.l2.add(taps.r2)))
}

/// `column` are values at `y - 2 ..= y + 2` of one column.
#[inline(always)]
fn vertical_kernel<V: Lanes>(w: &[V; 3], column: [V; 5]) -> V {
    let [r0, r1, r2, r3, r4] = column;
    w[0].mul(r2)
        .add(w[1].mul(r1.add(r3)))
        .add(w[2].mul(r0.add(r4)))
}

/// For safety, it is necessary to ensure the following conditions:
/// - `src.len() == dst.len()`;
/// - CPU supports the extension used by `V`.
#[inline(always)]
unsafe fn horizontal_row_generic<V: F32Vector>(src: &[f32], dst: &mut [f32], taps: [f32; 3]) {
    let width = dst.len();
    debug_assert_eq!(src.len(), width);
    let rows = [src];

    if width < V::LANES + RADIUS {
        let w = taps;
        for (x, dst_value) in dst.iter_mut().enumerate() {
            *dst_value = horizontal_kernel(&w, &Taps5::<f32>::mirrored(&rows, x));
        }
        return;
    }

    let w = splat_all::<V, 3>(taps);
    sweep_row::<V>(width, RADIUS, |x, edge| {
        horizontal_kernel(&w, &Taps5::<V>::load(&rows, x, edge)).store(dst, x);
    });
}

/// For safety, it is necessary to ensure the following conditions:
/// - length of all rows in `rows` is equal to `dst.len()`;
/// - CPU supports the extension used by `V`.
#[inline(always)]
unsafe fn vertical_row_generic<V: F32Vector>(
    rows: [&[f32]; 5],
    dst: &mut [f32],
    taps: [f32; 3],
) {
    let width = dst.len();
    debug_assert!(rows.iter().all(|row| row.len() == width));

    if width < V::LANES {
        let w = taps;
        for (x, dst_value) in dst.iter_mut().enumerate() {
            *dst_value = vertical_kernel(&w, rows.map(|row| row[x]));
        }
        return;
    }

    let w = splat_all::<V, 3>(taps);
    let mut convolve_at = |x: usize| {
        vertical_kernel(&w, rows.map(|row| V::load(row, x))).store(dst, x);
    };
    let mut x = 0;
    while x + V::LANES <= width {
        convolve_at(x);
        x += V::LANES;
    }
    if x < width {
        convolve_at(width - V::LANES);
    }
}

dispatch_by_cpu! {
    /// Convolves one row with the horizontal 1D kernel.
    pub(crate) fn horizontal_row(
        src: &[f32],
        dst: &mut [f32],
        taps: [f32; 3],
    ) => horizontal_row_generic
}

dispatch_by_cpu! {
    /// Convolves one row with the vertical 1D kernel.
    /// `rows` are rows at `y - 2 ..= y + 2` after mirroring.
    pub(crate) fn vertical_row(
        rows: [&[f32]; 5],
        dst: &mut [f32],
        taps: [f32; 3],
    ) => vertical_row_generic
}
