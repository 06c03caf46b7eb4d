//! Convolution of planes with small symmetric kernels.

use crate::threading::process_rows;
use crate::{
    mirror_index, ConvolveError, CpuExtensions, Plane, Rect, ThreadPool, WeightsSeparable5,
    WeightsSymmetric3, WeightsSymmetric5,
};

#[macro_use]
mod macros;

mod separable5;
mod symmetric3;
mod symmetric5;
mod taps;
pub(crate) mod weights;

/// Max radius of supported kernels.
pub const MAX_RADIUS: u32 = 2;

/// Convolves planes using the selected SIMD extension of CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Convolver {
    cpu_extensions: CpuExtensions,
}

impl Default for Convolver {
    fn default() -> Self {
        Self::new()
    }
}

impl Convolver {
    /// Creates an instance of `Convolver`.
    ///
    /// By default, an instance of `Convolver` uses the best
    /// SIMD extension supported by your CPU.
    pub fn new() -> Self {
        Self {
            cpu_extensions: CpuExtensions::default(),
        }
    }

    #[inline(always)]
    pub fn cpu_extensions(&self) -> CpuExtensions {
        self.cpu_extensions
    }

    /// # Safety
    /// This is unsafe because this method allows you to set a CPU extension
    /// that is not supported by your CPU.
    pub unsafe fn set_cpu_extensions(&mut self, extensions: CpuExtensions) {
        self.cpu_extensions = extensions;
    }

    /// Convolves `rect` of `src` with a 3x3 symmetric kernel.
    ///
    /// Edges of `rect` are mirrored, pixels outside of it are never read.
    /// Dimensions of `dst` must be equal to dimensions of `rect`.
    pub fn symmetric3(
        &self,
        src: &Plane,
        rect: Rect,
        weights: &WeightsSymmetric3,
        pool: Option<&ThreadPool>,
        dst: &mut Plane,
    ) -> Result<(), ConvolveError> {
        const RADIUS: u32 = 1;
        check_preconditions(src, rect, RADIUS, dst)?;
        log::debug!(
            "symmetric3: rect={rect:?}, cpu_extensions={:?} ({} lanes)",
            self.cpu_extensions,
            self.cpu_extensions.lanes()
        );

        let cpu_extensions = self.cpu_extensions;
        process_rows(dst, RADIUS, pool, |y, dst_row| {
            let rows = window_rows::<3>(src, rect, y);
            symmetric3::convolve_row(cpu_extensions, rows, dst_row, weights);
        });
        Ok(())
    }

    /// Convolves `rect` of `src` with a 5x5 symmetric kernel.
    ///
    /// Edges of `rect` are mirrored, pixels outside of it are never read.
    /// Dimensions of `dst` must be equal to dimensions of `rect`.
    pub fn symmetric5(
        &self,
        src: &Plane,
        rect: Rect,
        weights: &WeightsSymmetric5,
        pool: Option<&ThreadPool>,
        dst: &mut Plane,
    ) -> Result<(), ConvolveError> {
        const RADIUS: u32 = 2;
        check_preconditions(src, rect, RADIUS, dst)?;
        log::debug!(
            "symmetric5: rect={rect:?}, cpu_extensions={:?} ({} lanes)",
            self.cpu_extensions,
            self.cpu_extensions.lanes()
        );

        let cpu_extensions = self.cpu_extensions;
        process_rows(dst, RADIUS, pool, |y, dst_row| {
            let rows = window_rows::<5>(src, rect, y);
            symmetric5::convolve_row(cpu_extensions, rows, dst_row, weights);
        });
        Ok(())
    }

    /// Convolves `rect` of `src` with a 5x5 separable kernel.
    ///
    /// Rows are convolved with the horizontal kernel into
    /// a temporary plane, then columns of it with the vertical one.
    pub fn separable5(
        &self,
        src: &Plane,
        rect: Rect,
        weights: &WeightsSeparable5,
        pool: Option<&ThreadPool>,
        dst: &mut Plane,
    ) -> Result<(), ConvolveError> {
        const RADIUS: u32 = 2;
        check_preconditions(src, rect, RADIUS, dst)?;
        log::debug!(
            "separable5: rect={rect:?}, cpu_extensions={:?} ({} lanes)",
            self.cpu_extensions,
            self.cpu_extensions.lanes()
        );

        let cpu_extensions = self.cpu_extensions;
        let mut temp = Plane::new(rect.width, rect.height);
        let horizontal = weights.horizontal();
        process_rows(&mut temp, RADIUS, pool, |y, temp_row| {
            separable5::horizontal_row(cpu_extensions, rect.row(src, y), temp_row, horizontal);
        });

        let temp_rect = Rect::from_plane(&temp);
        let vertical = weights.vertical();
        process_rows(dst, RADIUS, pool, |y, dst_row| {
            let rows = window_rows::<5>(&temp, temp_rect, y);
            separable5::vertical_row(cpu_extensions, rows, dst_row, vertical);
        });
        Ok(())
    }
}

/// Convolves `rect` of `src` with a 3x3 symmetric kernel
/// using the best SIMD extension of CPU.
///
/// See [Convolver::symmetric3].
pub fn symmetric3(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSymmetric3,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    Convolver::new().symmetric3(src, rect, weights, pool, dst)
}

/// Convolves `rect` of `src` with a 5x5 symmetric kernel
/// using the best SIMD extension of CPU.
///
/// See [Convolver::symmetric5].
pub fn symmetric5(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSymmetric5,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    Convolver::new().symmetric5(src, rect, weights, pool, dst)
}

/// Convolves `rect` of `src` with a 5x5 separable kernel
/// using the best SIMD extension of CPU.
///
/// See [Convolver::separable5].
pub fn separable5(
    src: &Plane,
    rect: Rect,
    weights: &WeightsSeparable5,
    pool: Option<&ThreadPool>,
    dst: &mut Plane,
) -> Result<(), ConvolveError> {
    Convolver::new().separable5(src, rect, weights, pool, dst)
}

/// Checks arguments of a convolution before any pixel is written.
pub(crate) fn check_preconditions(
    src: &Plane,
    rect: Rect,
    radius: u32,
    dst: &Plane,
) -> Result<(), ConvolveError> {
    rect.check_inside(src)?;
    if rect.width <= radius || rect.height <= radius {
        return Err(ConvolveError::RectTooSmall {
            width: rect.width,
            height: rect.height,
            radius,
        });
    }
    if dst.width() != rect.width || dst.height() != rect.height {
        return Err(ConvolveError::DifferentDimensions);
    }
    Ok(())
}

/// Rows of `rect` at `y - ROWS / 2 ..= y + ROWS / 2` with mirrored indexes.
#[inline]
pub(crate) fn window_rows<const ROWS: usize>(
    plane: &Plane,
    rect: Rect,
    y: usize,
) -> [&[f32]; ROWS] {
    let radius = (ROWS / 2) as isize;
    let height = rect.height as usize;
    std::array::from_fn(|i| {
        let src_y = mirror_index(y as isize + i as isize - radius, height);
        rect.row(plane, src_y)
    })
}
