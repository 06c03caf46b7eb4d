use crate::convolution::taps::{splat_all, sweep_row, Taps3};
use crate::simd::{F32Vector, Lanes};
use crate::{Symmetric3Class, WeightsSymmetric3};

const RADIUS: usize = 1;

/// `[center, orthogonal, diagonal]`
fn weights_array(weights: &WeightsSymmetric3) -> [f32; 3] {
    Symmetric3Class::ALL.map(|class| weights[class])
}

/// Value of one output pixel (or one vector of pixels).
///
/// `mid` holds taps of the source row, `sides` holds taps of
/// the sum of the rows above and below it.
#[inline(always)]
fn kernel<V: Lanes>(w: &[V; 3], mid: &Taps3<V>, sides: &Taps3<V>) -> V {
    let orthogonal = mid.l1.add(mid.r1).add(sides.c);
    let diagonal = sides.l1.add(sides.r1);
    w[0].mul(mid.c)
        .add(w[1].mul(orthogonal))
        .add(w[2].mul(diagonal))
}

/// For safety, it is necessary to ensure the following conditions:
/// - length of all rows in `rows` is equal to `dst.len()`;
/// - CPU supports the extension used by `V`.
#[inline(always)]
unsafe fn convolve_row_generic<V: F32Vector>(
    rows: [&[f32]; 3],
    dst: &mut [f32],
    weights: &WeightsSymmetric3,
) {
    let width = dst.len();
    let [top, mid, bottom] = rows;
    debug_assert!(top.len() == width && mid.len() == width && bottom.len() == width);
    let sides = [top, bottom];

    if width < V::LANES + RADIUS {
        let w = weights_array(weights);
        for (x, dst_value) in dst.iter_mut().enumerate() {
            let mid_taps = Taps3::<f32>::mirrored(&[mid], x);
            let side_taps = Taps3::<f32>::mirrored(&sides, x);
            *dst_value = kernel(&w, &mid_taps, &side_taps);
        }
        return;
    }

    let w = splat_all::<V, 3>(weights_array(weights));
    sweep_row::<V>(width, RADIUS, |x, edge| {
        let mid_taps = Taps3::<V>::load(&[mid], x, edge);
        let side_taps = Taps3::<V>::load(&sides, x, edge);
        kernel(&w, &mid_taps, &side_taps).store(dst, x);
    });
}

dispatch_by_cpu! {
    /// Convolves one row. `rows` are the source rows at `y - 1`, `y`, `y + 1`
    /// after mirroring, clipped to the processed rect.
    pub(crate) fn convolve_row(
        rows: [&[f32]; 3],
        dst: &mut [f32],
        weights: &WeightsSymmetric3,
    ) => convolve_row_generic
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CpuExtensions;

    fn ramp(width: usize, seed: f32) -> Vec<f32> {
        (0..width)
            .map(|x| ((x as f32 + seed) * 0.37).sin() + 1.)
            .collect()
    }

    #[test]
    fn all_backends_produce_identical_rows() {
        let weights = WeightsSymmetric3::new(0.5, 0.1, 0.025);
        for width in [1, 2, 3, 4, 5, 8, 9, 12, 15, 16, 17, 31] {
            let rows = [ramp(width, 0.), ramp(width, 1.5), ramp(width, 3.)];
            let rows = [rows[0].as_slice(), rows[1].as_slice(), rows[2].as_slice()];

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
    fn scalar_kernel_at_left_edge() {
        let weights = WeightsSymmetric3::new(0.5, 0.1, 0.025);
        let top = [1f32, 2., 3.];
        let mid = [4f32, 5., 6.];
        let bottom = [7f32, 8., 9.];
        let mid_taps = Taps3::<f32>::mirrored(&[mid.as_slice()], 0);
        let side_taps = Taps3::<f32>::mirrored(&[top.as_slice(), bottom.as_slice()], 0);
        // Left neighbor of the first value is the value itself.
        assert_eq!(mid_taps.l1, 4.);
        assert_eq!(side_taps.l1, 1. + 7.);

        let value = kernel(&weights_array(&weights), &mid_taps, &side_taps);
        let expected: f32 = 0.5 * 4. + 0.1 * (4. + 5. + (1. + 7.)) + 0.025 * ((1. + 7.) + (2. + 8.));
        assert!((value - expected).abs() < 1e-6, "{value} != {expected}");
    }

    #[test]
    fn constant_row_keeps_dc() {
        let weights = WeightsSymmetric3::lowpass();
        let row = vec![2.; 20];
        let mut dst = vec![0.; 20];
        convolve_row(CpuExtensions::default(), [row.as_slice(); 3], &mut dst, &weights);
        for value in dst {
            assert!((value - 2.).abs() < 1e-5, "{value}");
        }
    }
}
