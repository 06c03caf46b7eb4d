use std::num::NonZeroU32;

use crate::PlaneBufferError;

/// Rows of planes created by [Plane::new] are padded up to
/// a multiple of this count of values.
const STRIDE_ALIGNMENT: usize = 16;

/// Single-channel image with `f32` values.
///
/// Rows are stored one after another, each one `stride` values long.
/// The tail of a row after `width` values is padding and
/// is never used by convolution.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    width: u32,
    height: u32,
    stride: usize,
    buffer: Vec<f32>,
}

impl Plane {
    /// Creates a zero-filled plane with rows aligned for SIMD loads.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).next_multiple_of(STRIDE_ALIGNMENT);
        Self {
            width,
            height,
            stride,
            buffer: vec![0.; stride * height as usize],
        }
    }

    /// Creates a plane from rows stored without padding.
    pub fn from_vec(width: u32, height: u32, buffer: Vec<f32>) -> Result<Self, PlaneBufferError> {
        Self::from_vec_with_stride(width, height, width as usize, buffer)
    }

    pub fn from_vec_with_stride(
        width: u32,
        height: u32,
        stride: usize,
        buffer: Vec<f32>,
    ) -> Result<Self, PlaneBufferError> {
        if stride < width as usize {
            return Err(PlaneBufferError::InvalidStride);
        }
        if buffer.len() < required_buffer_len(width, height, stride) {
            return Err(PlaneBufferError::InvalidBufferSize);
        }
        Ok(Self {
            width,
            height,
            stride,
            buffer,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance in values between starts of two adjacent rows.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Underlying buffer, including padding of rows.
    pub fn buffer(&self) -> &[f32] {
        &self.buffer
    }

    /// # Panics
    /// Panics if `y` is out of the plane.
    #[inline]
    pub fn row(&self, y: usize) -> &[f32] {
        assert!(y < self.height as usize, "row {y} is out of the plane");
        let start = y * self.stride;
        &self.buffer[start..start + self.width as usize]
    }

    /// # Panics
    /// Panics if `y` is out of the plane.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [f32] {
        assert!(y < self.height as usize, "row {y} is out of the plane");
        let start = y * self.stride;
        &mut self.buffer[start..start + self.width as usize]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        (0..self.height as usize).map(move |y| self.row(y))
    }

    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut [f32]> {
        let width = self.width as usize;
        self.buffer
            .chunks_mut(self.stride.max(1))
            .take(self.height as usize)
            .map(move |row| &mut row[..width])
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        self.row(y as usize)[x as usize]
    }

    #[inline]
    pub fn set(&mut self, x: u32, y: u32, value: f32) {
        self.row_mut(y as usize)[x as usize] = value;
    }

    pub fn fill(&mut self, value: f32) {
        self.rows_mut().for_each(|row| row.fill(value));
    }

    /// Splits rows of the plane into `num_parts` disjoint views.
    ///
    /// Heights of parts differ by one row at most.
    /// Count of parts is limited by the height of the plane.
    pub fn split_rows_mut(&mut self, num_parts: NonZeroU32) -> Vec<PlaneRowsMut<'_>> {
        let width = self.width;
        let height = self.height;
        let stride = self.stride;
        let num_parts = num_parts.get().min(height.max(1));

        let mut res = Vec::with_capacity(num_parts as usize);
        let step = height / num_parts;
        let mut modulo = height % num_parts;
        let mut top = 0;
        let mut remains = self.buffer.as_mut_slice();
        for _ in 0..num_parts {
            let mut part_height = step;
            if modulo > 0 {
                part_height += 1;
                modulo -= 1;
            }
            let part_len = (part_height as usize * stride).min(remains.len());
            let (part, rest) = std::mem::take(&mut remains).split_at_mut(part_len);
            res.push(PlaneRowsMut {
                top,
                width,
                height: part_height,
                stride,
                buffer: part,
            });
            remains = rest;
            top += part_height;
        }
        res
    }
}

fn required_buffer_len(width: u32, height: u32, stride: usize) -> usize {
    match height {
        0 => 0,
        h => stride * (h as usize - 1) + width as usize,
    }
}

/// Mutable view of consecutive rows of a [Plane].
#[derive(Debug)]
pub struct PlaneRowsMut<'a> {
    top: u32,
    width: u32,
    height: u32,
    stride: usize,
    buffer: &'a mut [f32],
}

impl PlaneRowsMut<'_> {
    /// Index of the first row of the view inside of the plane.
    #[inline]
    pub fn top(&self) -> u32 {
        self.top
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Iterates over rows of the view together with
    /// their indexes inside of the plane.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = (usize, &mut [f32])> {
        let width = self.width as usize;
        let top = self.top as usize;
        self.buffer
            .chunks_mut(self.stride.max(1))
            .take(self.height as usize)
            .enumerate()
            .map(move |(i, row)| (top + i, &mut row[..width]))
    }
}
