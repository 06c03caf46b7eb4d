//! Slow scalar convolution used to check results of fast paths.
//!
//! Every output pixel is a sum over the dense window of the kernel
//! with mirrored coordinates. Functions have the same signatures and
//! preconditions as the fast ones.

use crate::convolution::check_preconditions;
use crate::threading::process_rows;
use crate::{
    mirror_index, ConvolveError, Plane, Rect, ThreadPool, WeightsSeparable5, WeightsSymmetric3,
    WeightsSymmetric5,
};

pub fn slow_symmetric3(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSymmetric3,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    slow_convolve(src, rect, 1, |dx, dy| weights.weight_at(dx, dy), pool, dst)
}

pub fn slow_symmetric5(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSymmetric5,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    slow_convolve(src, rect, 2, |dx, dy| weights.weight_at(dx, dy), pool, dst)
}

pub fn slow_separable5(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSeparable5,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    slow_convolve(src, rect, 2, |dx, dy| weights.weight_at(dx, dy), pool, dst)
}

fn slow_convolve<W>(
    src: &Plane,
    rect: Rect,
    radius: u32,
    weight_at: W,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError>
where
    W: Fn(i32, i32) -> f32 + Sync + Send,
{
    check_preconditions(src, rect, radius, dst)?;
    let radius = radius as i32;
    let width = rect.width as usize;
    let height = rect.height as usize;

    process_rows(dst, radius as u32, pool, |y, dst_row| {
        for (x, dst_value) in dst_row.iter_mut().enumerate() {
            let mut sum = 0f32;
            for dy in -radius..=radius {
                let src_y = mirror_index(y as isize + dy as isize, height);
                let src_row = rect.row(src, src_y);
                for dx in -radius..=radius {
                    let src_x = mirror_index(x as isize + dx as isize, width);
                    sum += weight_at(dx, dy) * src_row[src_x];
                }
            }
            *dst_value = sum;
        }
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_reproduces_kernel() {
        let weights = WeightsSeparable5::new([0.5, 0.2, 0.05], [0.6, 0.15, 0.05]);
        let mut src = Plane::new(9, 9);
        src.set(4, 4, 1.);
        let mut dst = Plane::new(9, 9);
        slow_separable5(&src, Rect::from_plane(&src), &weights, None, &mut dst).unwrap();
        let dense = weights.dense();
        for y in 0..9u32 {
            for x in 0..9u32 {
                let (dx, dy) = (x as i32 - 4, y as i32 - 4);
                let expected = if dx.abs() <= 2 && dy.abs() <= 2 {
                    // Mirror kernel around the impulse.
                    dense[(2 - dy) as usize][(2 - dx) as usize]
                } else {
                    0.
                };
                assert_eq!(dst.get(x, y), expected, "({x}, {y})");
            }
        }
    }

    #[test]
    fn edges_are_mirrored() {
        let src = Plane::from_vec(3, 2, vec![1., 2., 3., 4., 5., 6.]).unwrap();
        let mut dst = Plane::new(3, 2);
        let weights = WeightsSymmetric3::new(0., 1., 0.);
        slow_symmetric3(&src, Rect::from_plane(&src), &weights, None, &mut dst).unwrap();
        // Sum of 4 orthogonal neighbors, the neighbor out of the plane
        // is the pixel itself.
        assert_eq!(dst.get(0, 0), 1. + 2. + 1. + 4.);
        assert_eq!(dst.get(1, 1), 4. + 6. + 2. + 5.);
    }
}
