//! Pen-indexed framebuffer shared by the simulator and test panels.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Row-major grid of `Gray4` pens. Writes outside the grid are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<Gray4>,
}

impl Framebuffer {
    /// Create a framebuffer filled with the background pen.
    // SAFETY: width * height is a pixel count bounded by display dimensions,
    // so the product fits in u32 and the cast to usize is lossless on 32-bit+.
    #[allow(clippy::arithmetic_side_effects)]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Gray4::BLACK; (width * height) as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw pixels, row-major.
    pub fn pixels(&self) -> &[Gray4] {
        &self.pixels
    }

    // SAFETY: x < width and y < height are checked first; y * width + x is
    // bounded by width * height.
    #[allow(clippy::arithmetic_side_effects)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    /// Pixel at (x, y), `None` outside the grid.
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Gray4> {
        self.index(x, y).and_then(|i| self.pixels.get(i).copied())
    }

    /// Set pixel at (x, y); out-of-range writes are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Gray4) {
        if let Some(slot) = self.index(x, y).and_then(|i| self.pixels.get_mut(i)) {
            *slot = color;
        }
    }

    /// Fill the whole grid.
    pub fn fill(&mut self, color: Gray4) {
        self.pixels.fill(color);
    }

    /// Copy another framebuffer of the same size into this one.
    pub fn copy_from(&mut self, other: &Framebuffer) {
        if self.width == other.width && self.height == other.height {
            self.pixels.copy_from_slice(&other.pixels);
        }
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for Framebuffer {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        // Clip first so oversized rectangles never walk off-screen points.
        let clipped = area.intersection(&self.bounding_box());
        for point in clipped.points() {
            self.set_pixel(point.x, point.y, color);
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill(color);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn new_is_background() {
        let fb = Framebuffer::new(4, 3);
        assert_eq!(fb.pixels().len(), 12);
        assert!(fb.pixels().iter().all(|p| *p == Gray4::BLACK));
    }

    #[test]
    fn out_of_range_writes_are_dropped() {
        let mut fb = Framebuffer::new(4, 4);
        fb.set_pixel(-1, 0, Gray4::WHITE);
        fb.set_pixel(4, 0, Gray4::WHITE);
        fb.set_pixel(0, 100, Gray4::WHITE);
        assert!(fb.pixels().iter().all(|p| *p == Gray4::BLACK));
        assert_eq!(fb.get_pixel(-1, -1), None);
    }

    #[test]
    fn fill_solid_clips_to_bounds() {
        let mut fb = Framebuffer::new(8, 8);
        fb.fill_solid(
            &Rectangle::new(Point::new(-100, -100), Size::new(10_000, 10_000)),
            Gray4::WHITE,
        )
        .unwrap();
        assert!(fb.pixels().iter().all(|p| *p == Gray4::WHITE));
    }

    #[test]
    fn copy_from_ignores_size_mismatch() {
        let mut a = Framebuffer::new(2, 2);
        let mut b = Framebuffer::new(2, 2);
        b.fill(Gray4::WHITE);
        a.copy_from(&b);
        assert_eq!(a, b);

        let c = Framebuffer::new(3, 3);
        a.copy_from(&c);
        assert_eq!(a.get_pixel(0, 0), Some(Gray4::WHITE));
    }
}
