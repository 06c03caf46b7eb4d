use image::{DynamicImage, ImageBuffer, Luma};

use crate::Plane;

/// Single-channel image of the `image` crate with `f32` values.
pub type GrayF32Image = ImageBuffer<Luma<f32>, Vec<f32>>;

impl From<&GrayF32Image> for Plane {
    fn from(image: &GrayF32Image) -> Self {
        let mut plane = Plane::new(image.width(), image.height());
        let width = image.width() as usize;
        if width > 0 {
            for (dst_row, src_row) in plane.rows_mut().zip(image.as_raw().chunks_exact(width)) {
                dst_row.copy_from_slice(src_row);
            }
        }
        plane
    }
}

impl From<&DynamicImage> for Plane {
    /// Converts luminance of the image into a plane.
    fn from(image: &DynamicImage) -> Self {
        Plane::from(&image.to_luma32f())
    }
}

impl From<&Plane> for GrayF32Image {
    fn from(plane: &Plane) -> Self {
        ImageBuffer::from_fn(plane.width(), plane.height(), |x, y| {
            Luma([plane.get(x, y)])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plane_from_image_and_back() {
        let image = GrayF32Image::from_fn(19, 5, |x, y| Luma([x as f32 * 0.5 - y as f32]));
        let plane = Plane::from(&image);
        assert_eq!((plane.width(), plane.height()), (19, 5));
        assert_eq!(plane.get(18, 4), 5.);
        assert_eq!(GrayF32Image::from(&plane), image);
    }

    #[test]
    fn luma_of_dynamic_image() {
        let image = DynamicImage::ImageLuma8(image::GrayImage::from_pixel(4, 3, Luma([255])));
        let plane = Plane::from(&image);
        assert!(plane.rows().flatten().all(|&v| (v - 1.).abs() < 1e-6));
    }
}
