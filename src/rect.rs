use crate::{Plane, RectError};

/// A rectangular region of a plane.
///
/// Convolution treats the rect as the whole image: pixels outside of it
/// are never read, and the edges of the rect are mirrored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x0: u32,
    pub y0: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x0: u32, y0: u32, width: u32, height: u32) -> Self {
        Self {
            x0,
            y0,
            width,
            height,
        }
    }

    /// Rect that covers the whole plane.
    pub fn from_plane(plane: &Plane) -> Self {
        Self::new(0, 0, plane.width(), plane.height())
    }

    /// Exclusive right boundary.
    #[inline]
    pub fn x1(&self) -> u64 {
        self.x0 as u64 + self.width as u64
    }

    /// Exclusive bottom boundary.
    #[inline]
    pub fn y1(&self) -> u64 {
        self.y0 as u64 + self.height as u64
    }

    pub fn check_inside(&self, plane: &Plane) -> Result<(), RectError> {
        let plane_width = plane.width();
        let plane_height = plane.height();
        if self.x0 >= plane_width || self.y0 >= plane_height {
            return Err(RectError::PositionIsOutOfPlaneBoundaries);
        }
        if self.x1() > plane_width as u64 || self.y1() > plane_height as u64 {
            return Err(RectError::SizeIsOutOfPlaneBoundaries);
        }
        Ok(())
    }

    /// Returns a row of the plane clipped to the horizontal extent of the rect.
    ///
    /// `y` is relative to the top of the rect.
    #[inline]
    pub(crate) fn row<'a>(&self, plane: &'a Plane, y: usize) -> &'a [f32] {
        let x0 = self.x0 as usize;
        &plane.row(self.y0 as usize + y)[x0..x0 + self.width as usize]
    }
}
