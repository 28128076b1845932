//! Simulated display surface.
//!
//! Drawing goes into a back buffer through the shared platform rasterizer;
//! `update()` copies it to the visible frame and presents it in the window.

use std::path::Path;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::{GrayImage, Luma};
use platform::{DisplayError, DisplaySurface, Font, Framebuffer, Panel, PanelDisplay, Pen};

use crate::error::SimError;

#[cfg(not(feature = "headless"))]
use std::{cell::RefCell, rc::Rc};

/// Back buffer plus the last presented frame.
pub struct SimPanel {
    back: Framebuffer,
    visible: Framebuffer,
    flushes: u64,
    #[cfg(not(feature = "headless"))]
    window: Option<Rc<RefCell<crate::window::Window>>>,
}

impl SimPanel {
    /// Panel with no host window.
    pub fn headless(width: u32, height: u32) -> Self {
        Self {
            back: Framebuffer::new(width, height),
            visible: Framebuffer::new(width, height),
            flushes: 0,
            #[cfg(not(feature = "headless"))]
            window: None,
        }
    }

    /// Panel presenting into `window`.
    #[cfg(not(feature = "headless"))]
    pub fn windowed(width: u32, height: u32, window: Rc<RefCell<crate::window::Window>>) -> Self {
        Self {
            window: Some(window),
            ..Self::headless(width, height)
        }
    }

    /// Buffer currently being drawn into.
    pub fn back_buffer(&self) -> &Framebuffer {
        &self.back
    }

    /// Last frame made visible by a flush.
    pub fn visible(&self) -> &Framebuffer {
        &self.visible
    }

    /// Number of flushes so far.
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }
}

impl OriginDimensions for SimPanel {
    fn size(&self) -> Size {
        self.back.size()
    }
}

impl DrawTarget for SimPanel {
    type Color = Gray4;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.back.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.back.fill_solid(area, color)
    }
}

impl Panel for SimPanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        tracing::debug!(
            width = self.back.width(),
            height = self.back.height(),
            "simulated panel init"
        );
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        #[cfg(not(feature = "headless"))]
        if let Some(window) = &self.window {
            let mut window = window.borrow_mut();
            if window.is_closed() {
                return Err(DisplayError::Closed);
            }
            if let Err(e) = window.present(&self.back) {
                tracing::warn!(error = %e, "present failed");
                return Err(DisplayError::Communication);
            }
            if window.is_closed() {
                return Err(DisplayError::Closed);
            }
        }
        self.visible.copy_from(&self.back);
        self.flushes = self.flushes.saturating_add(1);
        Ok(())
    }
}

/// Desktop [`DisplaySurface`] with screenshot support.
pub struct SimDisplay {
    inner: PanelDisplay<SimPanel>,
}

impl SimDisplay {
    /// Wrap a panel.
    pub fn new(panel: SimPanel) -> Self {
        Self {
            inner: PanelDisplay::new(panel),
        }
    }

    /// Display with no window, for tests and CI.
    pub fn headless(width: u32, height: u32) -> Self {
        Self::new(SimPanel::headless(width, height))
    }

    /// Underlying panel.
    pub fn panel(&self) -> &SimPanel {
        self.inner.panel()
    }

    /// Pen of a visible pixel, `None` outside the display.
    pub fn visible_pixel(&self, x: i32, y: i32) -> Option<Pen> {
        self.panel().visible().get_pixel(x, y).map(Pen::from)
    }

    /// Save the logical back buffer as an 8-bit grayscale PNG; pen `p`
    /// becomes gray `p * 17`.
    pub fn save_screenshot(&self, path: impl AsRef<Path>) -> Result<(), SimError> {
        let fb = self.panel().back_buffer();
        let img = GrayImage::from_fn(fb.width(), fb.height(), |x, y| {
            let pen = i32::try_from(x)
                .ok()
                .zip(i32::try_from(y).ok())
                .and_then(|(x, y)| fb.get_pixel(x, y))
                .map_or(Pen::BG, Pen::from);
            Luma([pen.gray_level()])
        });
        img.save(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "screenshot saved");
        Ok(())
    }
}

impl DisplaySurface for SimDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.inner.init()
    }

    fn bounds(&self) -> (u32, u32) {
        self.inner.bounds()
    }

    fn set_pen(&mut self, pen: Pen) {
        self.inner.set_pen(pen);
    }

    fn pen(&self) -> Pen {
        self.inner.pen()
    }

    fn set_font(&mut self, font: Font) {
        self.inner.set_font(font);
    }

    fn font(&self) -> Font {
        self.inner.font()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    fn fill(&mut self, pen: Pen) {
        self.inner.fill(pen);
    }

    fn pixel(&mut self, x: i32, y: i32, pen: Option<Pen>) {
        self.inner.pixel(x, y, pen);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pen: Option<Pen>) {
        self.inner.line(x0, y0, x1, y1, pen);
    }

    fn rectangle(&mut self, x: i32, y: i32, w: u32, h: u32) {
        self.inner.rectangle(x, y, w, h);
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, pen: Pen, fill: bool) {
        self.inner.rect(x, y, w, h, pen, fill);
    }

    fn circle(&mut self, cx: i32, cy: i32, r: u32) {
        self.inner.circle(cx, cy, r);
    }

    fn text(&mut self, s: &str, x: i32, y: i32, max_width: Option<u32>, scale: u32) {
        self.inner.text(s, x, y, max_width, scale);
    }

    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, pens: &[u8]) {
        self.inner.blit(x, y, w, h, pens);
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        self.inner.update()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn drawing_is_invisible_until_update() {
        let mut d = SimDisplay::headless(16, 16);
        d.set_pen(Pen::INK);
        d.rectangle(0, 0, 4, 4);
        assert_eq!(d.visible_pixel(1, 1), Some(Pen::BG));
        d.update().unwrap();
        assert_eq!(d.visible_pixel(1, 1), Some(Pen::INK));
        assert_eq!(d.panel().flush_count(), 1);
    }

    #[test]
    fn default_pen_is_ink() {
        let d = SimDisplay::headless(8, 8);
        assert_eq!(d.pen(), Pen::INK);
        assert_eq!(d.bounds(), (8, 8));
    }

    #[test]
    fn visible_pixel_outside_is_none() {
        let d = SimDisplay::headless(8, 8);
        assert_eq!(d.visible_pixel(8, 0), None);
        assert_eq!(d.visible_pixel(-1, 0), None);
    }
}
