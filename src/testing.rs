//! Helpers to compare results of convolution.

use thiserror::Error;

use crate::Plane;

#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MismatchError {
    #[error("Expected plane is {expected:?}, actual one is {actual:?}")]
    DifferentDimensions {
        expected: (u32, u32),
        actual: (u32, u32),
    },
    #[error(
        "Pixel ({x}, {y}) is {actual}, expected {expected} \
        (L1 error {l1}, relative error {relative})"
    )]
    Pixel {
        x: u32,
        y: u32,
        expected: f32,
        actual: f32,
        l1: f32,
        relative: f32,
    },
}

/// Checks that `actual` is close to `expected`.
///
/// A pixel mismatches if both its absolute error is greater than
/// `threshold_l1` and its error relative to the expected value is greater
/// than `threshold_relative`. Relative error is not used for expected values
/// close to zero. NaN matches only NaN.
///
/// Returns the mismatching pixel with the greatest absolute error.
pub fn verify_relative_error(
    expected: &Plane,
    actual: &Plane,
    threshold_l1: f32,
    threshold_relative: f32,
) -> Result<(), MismatchError> {
    check_dimensions(expected, actual)?;

    let mut worst: Option<MismatchError> = None;
    let mut worst_l1 = -1f32;
    for (y, (expected_row, actual_row)) in expected.rows().zip(actual.rows()).enumerate() {
        for (x, (&e, &a)) in expected_row.iter().zip(actual_row).enumerate() {
            let (l1, relative) = match (e.is_nan(), a.is_nan()) {
                (true, true) => continue,
                (false, false) => {
                    let l1 = (e - a).abs();
                    let relative = if e.abs() < 1e-10 {
                        f32::INFINITY
                    } else {
                        l1 / e.abs()
                    };
                    (l1, relative)
                }
                _ => (f32::INFINITY, f32::INFINITY),
            };
            if l1 > threshold_l1 && relative > threshold_relative && l1 > worst_l1 {
                worst_l1 = l1;
                worst = Some(MismatchError::Pixel {
                    x: x as u32,
                    y: y as u32,
                    expected: e,
                    actual: a,
                    l1,
                    relative,
                });
            }
        }
    }
    match worst {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Max absolute difference between pixels of two planes.
///
/// NaN pixels are ignored.
pub fn max_abs_difference(expected: &Plane, actual: &Plane) -> Result<f32, MismatchError> {
    check_dimensions(expected, actual)?;
    let max = expected
        .rows()
        .zip(actual.rows())
        .flat_map(|(e, a)| e.iter().zip(a).map(|(e, a)| (e - a).abs()))
        .filter(|d| !d.is_nan())
        .fold(0f32, f32::max);
    Ok(max)
}

fn check_dimensions(expected: &Plane, actual: &Plane) -> Result<(), MismatchError> {
    let expected_size = (expected.width(), expected.height());
    let actual_size = (actual.width(), actual.height());
    if expected_size != actual_size {
        return Err(MismatchError::DifferentDimensions {
            expected: expected_size,
            actual: actual_size,
        });
    }
    Ok(())
}
