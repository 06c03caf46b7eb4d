use crate::convolution::taps::{splat_all, sweep_row, Taps5};
use crate::simd::{F32Vector, Lanes};
use crate::{Symmetric5Class, WeightsSymmetric5};

const RADIUS: usize = 2;

/// Weights in order of [Symmetric5Class::ALL].
fn weights_array(weights: &WeightsSymmetric5) -> [f32; 6] {
    Symmetric5Class::ALL.map(|class| weights[class])
}

/// Value of one output pixel (or one vector of pixels).
///
/// `mid` holds taps of the source row, `near` holds taps of the sum of
/// rows at distance 1 and `far` of rows at distance 2.
#[inline(always)]
fn kernel<V: Lanes>(w: &[V; 6], mid: &Taps5<V>, near: &Taps5<V>, far: &Taps5<V>) -> V {
    let orthogonal1 = mid.l1.add(mid.r1).add(near.c);
    let orthogonal2 = mid.l2.add(mid.r2).add(far.c);
    let diagonal1 = near.l1.add(near.r1);
    let diagonal2 = far.l2.add(far.r2);
    let knight = near.l2.add(near.r2).add(far.l1.add(far.r1));
    w[0].mul(mid.c)
        .add(w[1].mul(orthogonal1))
        .add(w[2].mul(orthogonal2))
        .add(w[3].mul(diagonal1))
        .add(w[4].mul(diagonal2))
        .add(w[5].mul(knight))
}

/// For safety, it is necessary to ensure the following conditions:
/// - length of all rows in `rows` is equal to `dst.len()`;
/// - CPU supports the extension used by `V`.
#[inline(always)]
unsafe fn convolve_row_generic<V: F32Vector>(
    rows: [&[f32]; 5],
    dst: &mut [f32],
    weights: &WeightsSymmetric5,
) {
    let width = dst.len();
    debug_assert!(rows.iter().all(|row| row.len() == width));
    let [r0, r1, r2, r3, r4] = rows;
    let mid = [r2];
    let near = [r1, r3];
    let far = [r0, r4];

    if width < V::LANES + RADIUS {
        let w = weights_array(weights);
        for (x, dst_value) in dst.iter_mut().enumerate() {
            *dst_value = kernel(
                &w,
                &Taps5::<f32>::mirrored(&mid, x),
                &Taps5::<f32>::mirrored(&near, x),
                &Taps5::<f32>::mirrored(&far, x),
            );
        }
        return;
    }

    let w = splat_all::<V, 6>(weights_array(weights));
    sweep_row::<V>(width, RADIUS, |x, edge| {
        let value = kernel(
            &w,
            &Taps5::<V>::load(&mid, x, edge),
            &Taps5::<V>::load(&near, x, edge),
            &Taps5::<V>::load(&far, x, edge),
        );
        value.store(dst, x);
    });
}

dispatch_by_cpu! {
    /// Convolves one row. `rows` are the source rows at `y - 2 ..= y + 2`
    /// after mirroring, clipped to the processed rect.
    pub(crate) fn convolve_row(
        rows: [&[f32]; 5],
        dst: &mut [f32],
        weights: &WeightsSymmetric5,
    ) => convolve_row_generic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpuExtensions;

    #[test]
    fn all_backends_produce_identical_rows() {
        let weights = WeightsSymmetric5::new(0.3, 0.1, 0.04, 0.05, 0.01, 0.02);
        for width in [1, 2, 3, 5, 6, 9, 10, 11, 16, 18, 33] {
            let rows: Vec<Vec<f32>> = (0..5)
                .map(|y| (0..width).map(|x| ((x * 7 + y * 13) % 11) as f32 * 0.1).collect())
                .collect();
            let rows: [&[f32]; 5] = std::array::from_fn(|i| rows[i].as_slice());

            let mut expected = vec![0.; width];
            convolve_row(CpuExtensions::None, rows, &mut expected, &weights);
            for &cpu_extensions in CpuExtensions::all() {
                if !cpu_extensions.is_supported() {
                    continue;
                }
                let mut actual = vec![0.; width];
                convolve_row(cpu_extensions, rows, &mut actual, &weights);
                assert_eq!(actual, expected, "{cpu_extensions:?}, width={width}");
            }
        }
    }

    #[test]
    fn impulse_spreads_weights_by_class() {
        let weights = WeightsSymmetric5::new(0.3, 0.1, 0.04, 0.05, 0.01, 0.02);
        let width = 21;
        let zeros = vec![0.; width];
        let mut impulse = vec![0.; width];
        impulse[10] = 1.;

        // Impulse two rows above the output row.
        let zeros = zeros.as_slice();
        let rows = [impulse.as_slice(), zeros, zeros, zeros, zeros];
        let mut dst = vec![0.; width];
        convolve_row(CpuExtensions::default(), rows, &mut dst, &weights);
        assert_eq!(dst[10], 0.04);
        assert_eq!(dst[9], 0.02);
        assert_eq!(dst[11], 0.02);
        assert_eq!(dst[8], 0.01);
        assert_eq!(dst[12], 0.01);
        assert_eq!(dst[7], 0.);
    }
}
