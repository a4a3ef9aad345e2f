//! 2D drawing surfaces.
//!
//! The field only needs two primitives from its host: filling a circle and
//! setting an affine transform. [`Surface`] captures exactly that, so the same
//! simulation can draw into a window ([`GpuSurface`](crate::GpuSurface)) or
//! into memory ([`Canvas`]).
//!
//! Coordinates passed to [`Surface::fill_circle`] are mapped through the
//! current transform into device pixels. The field sets a pixel-ratio scale
//! composed with each particle's displacement before drawing it.

use glam::{Affine2, UVec2, Vec2, Vec4};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::Path;

/// A raster target supporting filled circles under an affine transform.
pub trait Surface {
    /// Resize the backing store to `width x height` device pixels.
    ///
    /// Clears the contents and resets the transform to identity.
    fn resize(&mut self, width: u32, height: u32);

    /// Backing store size in device pixels.
    fn size(&self) -> UVec2;

    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Replace the current transform.
    fn set_transform(&mut self, transform: Affine2);

    /// Fill a circle with straight (non-premultiplied) RGBA in `0..=1`.
    ///
    /// `center` and `radius` are transformed by the current transform; the
    /// radius scales with the length of the transform's x axis.
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4);
}

/// Map a circle through `transform`, returning its device-space center and radius.
pub(crate) fn transform_circle(transform: &Affine2, center: Vec2, radius: f32) -> (Vec2, f32) {
    (
        transform.transform_point2(center),
        radius * transform.matrix2.x_axis.length(),
    )
}

/// Software raster over an RGBA8 image.
///
/// Circles are anti-aliased by distance to the edge and blended source-over.
/// Used for headless snapshots and tests.
#[derive(Debug, Clone)]
pub struct Canvas {
    image: RgbaImage,
    transform: Affine2,
}

impl Canvas {
    /// Transparent canvas of the given device-pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
            transform: Affine2::IDENTITY,
        }
    }

    /// The rendered image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// RGBA of one pixel, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x < self.image.width() && y < self.image.height() {
            Some(self.image.get_pixel(x, y).0)
        } else {
            None
        }
    }

    /// Current transform.
    pub fn transform(&self) -> Affine2 {
        self.transform
    }

    /// Number of pixels with any coverage.
    pub fn painted_pixels(&self) -> usize {
        self.image.pixels().filter(|p| p.0[3] > 0).count()
    }

    /// Write the canvas as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.image.save_with_format(path, ImageFormat::Png)
    }

    fn blend(&mut self, x: u32, y: u32, color: Vec4, coverage: f32) {
        let src_a = color.w * coverage;
        if src_a <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel(x, y).0;
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let channel = |src: f32, dst: u8| -> u8 {
            let dst = dst as f32 / 255.0;
            let out = (src * src_a + dst * dst_a * (1.0 - src_a)) / out_a;
            (out * 255.0).round().clamp(0.0, 255.0) as u8
        };

        let blended = Rgba([
            channel(color.x, dst[0]),
            channel(color.y, dst[1]),
            channel(color.z, dst[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
        self.image.put_pixel(x, y, blended);
    }
}

impl Surface for Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.image = RgbaImage::new(width, height);
        self.transform = Affine2::IDENTITY;
    }

    fn size(&self) -> UVec2 {
        UVec2::new(self.image.width(), self.image.height())
    }

    fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = Rgba([0, 0, 0, 0]);
        }
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Vec4) {
        let (center, radius) = transform_circle(&self.transform, center, radius);
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 || radius <= 0.0 || color.w <= 0.0 {
            return;
        }

        let reach = radius + 1.0;
        let x0 = (center.x - reach).floor().max(0.0) as u32;
        let y0 = (center.y - reach).floor().max(0.0) as u32;
        let x1 = (center.x + reach).ceil().min(width as f32);
        let y1 = (center.y + reach).ceil().min(height as f32);
        if x1 <= 0.0 || y1 <= 0.0 {
            return;
        }
        let (x1, y1) = (x1 as u32, y1 as u32);

        // Sub-pixel dots get proportionally less coverage.
        let thin = (radius * 2.0).min(1.0);

        for y in y0..y1 {
            for x in x0..x1 {
                let sample = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (radius + 0.5 - sample.distance(center)).clamp(0.0, 1.0) * thin;
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_starts_transparent() {
        let canvas = Canvas::new(4, 3);
        assert_eq!(canvas.size(), UVec2::new(4, 3));
        assert_eq!(canvas.painted_pixels(), 0);
        assert_eq!(canvas.pixel(4, 0), None);
    }

    #[test]
    fn test_fill_circle_paints_center() {
        let mut canvas = Canvas::new(20, 20);
        canvas.fill_circle(Vec2::new(10.0, 10.0), 4.0, Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(canvas.pixel(10, 10), Some([255, 0, 0, 255]));
        assert_eq!(canvas.pixel(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_transform_scales_and_translates() {
        let mut canvas = Canvas::new(40, 40);
        let transform = Affine2::from_scale(Vec2::splat(2.0)) * Affine2::from_translation(Vec2::new(5.0, 0.0));
        canvas.set_transform(transform);
        // (5, 10) + (5, 0) = (10, 10), scaled by 2 -> (20, 20)
        canvas.fill_circle(Vec2::new(5.0, 10.0), 2.0, Vec4::ONE);
        assert_eq!(canvas.pixel(20, 20), Some([255, 255, 255, 255]));
        assert_eq!(canvas.pixel(10, 20), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_zero_alpha_draws_nothing() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 3.0, Vec4::new(1.0, 1.0, 1.0, 0.0));
        assert_eq!(canvas.painted_pixels(), 0);
    }

    #[test]
    fn test_half_alpha_blends_over_transparent() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 3.0, Vec4::new(0.0, 0.0, 1.0, 0.5));
        let [r, g, b, a] = canvas.pixel(5, 5).unwrap();
        assert_eq!((r, g, b), (0, 0, 255));
        assert_eq!(a, 128);
    }

    #[test]
    fn test_clear_and_resize() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(5.0, 5.0), 3.0, Vec4::ONE);
        canvas.clear();
        assert_eq!(canvas.painted_pixels(), 0);

        canvas.set_transform(Affine2::from_scale(Vec2::splat(3.0)));
        canvas.resize(30, 15);
        assert_eq!(canvas.size(), UVec2::new(30, 15));
        assert_eq!(canvas.transform(), Affine2::IDENTITY);
    }

    #[test]
    fn test_circle_off_canvas_is_clipped() {
        let mut canvas = Canvas::new(10, 10);
        canvas.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Vec4::ONE);
        canvas.fill_circle(Vec2::new(50.0, 50.0), 3.0, Vec4::ONE);
        assert_eq!(canvas.painted_pixels(), 0);
    }
}
