//! Display abstraction layer
//!
//! [`DisplaySurface`] is the object-safe drawing contract screens use.
//! Backends implement the much smaller [`Panel`] trait (a `Gray4` draw target
//! plus `init`/`flush`) and get the full surface from [`PanelDisplay`].

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;

use crate::canvas::{self, Font};
use crate::error::DisplayError;
use crate::pen::Pen;

/// Drawing surface with a stateful pen.
///
/// Invariants every implementation upholds:
/// - out-of-bounds coordinates are clipped, never an error;
/// - only [`set_pen`](Self::set_pen) changes the pen;
/// - nothing drawn is visible until [`update`](Self::update).
pub trait DisplaySurface {
    /// Bring the panel up. Called once by the platform factory.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Logical (width, height) in pixels.
    fn bounds(&self) -> (u32, u32);

    /// Select the pen used by `clear`, `rectangle`, `circle`, `text` and
    /// pen-less `pixel`/`line` calls.
    fn set_pen(&mut self, pen: Pen);

    /// Current pen.
    fn pen(&self) -> Pen;

    /// Select the font used by `text`.
    fn set_font(&mut self, font: Font);

    /// Current font.
    fn font(&self) -> Font;

    /// Fill the whole surface with the current pen.
    fn clear(&mut self);

    /// Fill the whole surface with `pen`.
    fn fill(&mut self, pen: Pen);

    /// Set one pixel.
    fn pixel(&mut self, x: i32, y: i32, pen: Option<Pen>);

    /// One-pixel line between two inclusive endpoints.
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pen: Option<Pen>);

    /// Filled rectangle in the current pen.
    fn rectangle(&mut self, x: i32, y: i32, w: u32, h: u32);

    /// Rectangle in an explicit pen; a one-pixel outline unless `fill`.
    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, pen: Pen, fill: bool);

    /// Filled circle in the current pen.
    fn circle(&mut self, cx: i32, cy: i32, r: u32);

    /// Text with its top-left at (x, y). Wraps on spaces at `max_width`
    /// pixels and magnifies by `scale`. Without `max_width` the wrap width
    /// is the rest of the row, `width - x`, not the full display width.
    fn text(&mut self, s: &str, x: i32, y: i32, max_width: Option<u32>, scale: u32);

    /// Pixel width `s` would occupy in the current font.
    fn measure_text(&self, s: &str, scale: u32) -> u32 {
        canvas::measure(s, self.font(), scale)
    }

    /// Copy a row-major block of pen bytes.
    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, pens: &[u8]);

    /// Make everything drawn since the last update visible.
    fn update(&mut self) -> Result<(), DisplayError>;
}

/// Low-level panel: a `Gray4` draw target that can be initialized and
/// flushed to the glass.
pub trait Panel: DrawTarget<Color = Gray4, Error = Infallible> {
    /// Power-on / reset sequence.
    fn init(&mut self) -> Result<(), DisplayError>;

    /// Push the buffered frame to the visible output.
    fn flush(&mut self) -> Result<(), DisplayError>;
}

fn drawn(result: Result<(), Infallible>) {
    match result {
        Ok(()) => {}
        Err(never) => match never {},
    }
}

fn default_wrap(width: u32, x: i32) -> u32 {
    let x = u32::try_from(x).unwrap_or(0);
    width.saturating_sub(x).max(1)
}

/// [`DisplaySurface`] over any [`Panel`].
pub struct PanelDisplay<P> {
    panel: P,
    pen: Pen,
    font: Font,
}

impl<P: Panel> PanelDisplay<P> {
    /// Wrap a panel. The pen starts at [`Pen::INK`], the font at `bitmap8`.
    pub fn new(panel: P) -> Self {
        Self {
            panel,
            pen: Pen::INK,
            font: Font::default(),
        }
    }

    /// Borrow the panel.
    pub fn panel(&self) -> &P {
        &self.panel
    }

    /// Mutably borrow the panel.
    pub fn panel_mut(&mut self) -> &mut P {
        &mut self.panel
    }

    /// Unwrap the panel.
    pub fn into_panel(self) -> P {
        self.panel
    }
}

impl<P: Panel> DisplaySurface for PanelDisplay<P> {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.panel.init()
    }

    fn bounds(&self) -> (u32, u32) {
        let size = self.panel.bounding_box().size;
        (size.width, size.height)
    }

    fn set_pen(&mut self, pen: Pen) {
        self.pen = pen;
    }

    fn pen(&self) -> Pen {
        self.pen
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn font(&self) -> Font {
        self.font
    }

    fn clear(&mut self) {
        self.fill(self.pen);
    }

    fn fill(&mut self, pen: Pen) {
        drawn(self.panel.clear(Gray4::from(pen)));
    }

    fn pixel(&mut self, x: i32, y: i32, pen: Option<Pen>) {
        drawn(canvas::pixel(&mut self.panel, x, y, pen.unwrap_or(self.pen)));
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, pen: Option<Pen>) {
        let pen = pen.unwrap_or(self.pen);
        drawn(canvas::line(&mut self.panel, x0, y0, x1, y1, pen));
    }

    fn rectangle(&mut self, x: i32, y: i32, w: u32, h: u32) {
        drawn(canvas::fill_rect(&mut self.panel, x, y, w, h, self.pen));
    }

    fn rect(&mut self, x: i32, y: i32, w: u32, h: u32, pen: Pen, fill: bool) {
        if fill {
            drawn(canvas::fill_rect(&mut self.panel, x, y, w, h, pen));
        } else {
            drawn(canvas::outline_rect(&mut self.panel, x, y, w, h, pen));
        }
    }

    fn circle(&mut self, cx: i32, cy: i32, r: u32) {
        drawn(canvas::circle(&mut self.panel, cx, cy, r, self.pen));
    }

    fn text(&mut self, s: &str, x: i32, y: i32, max_width: Option<u32>, scale: u32) {
        let (width, _) = self.bounds();
        let max_width = max_width.unwrap_or_else(|| default_wrap(width, x));
        drawn(canvas::text(
            &mut self.panel,
            s,
            x,
            y,
            max_width,
            scale,
            self.font,
            self.pen,
        ));
    }

    fn blit(&mut self, x: i32, y: i32, w: u32, h: u32, pens: &[u8]) {
        drawn(canvas::blit(&mut self.panel, x, y, w, h, pens));
    }

    fn update(&mut self) -> Result<(), DisplayError> {
        self.panel.flush()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::mocks::mock_display;

    #[test]
    fn explicit_color_ops_leave_pen_alone() {
        let mut d = mock_display(32, 32);
        d.set_pen(Pen::new(5));
        d.rect(0, 0, 4, 4, Pen::INK, true);
        d.rect(0, 0, 4, 4, Pen::BG, false);
        d.pixel(1, 1, Some(Pen::new(9)));
        d.line(0, 0, 3, 3, Some(Pen::new(2)));
        d.fill(Pen::BG);
        assert_eq!(d.pen(), Pen::new(5));
    }

    #[test]
    fn clear_uses_current_pen() {
        let mut d = mock_display(4, 4);
        d.set_pen(Pen::new(7));
        d.clear();
        assert!(d.panel().framebuffer().pixels().iter().all(|p| *p == Gray4::new(7)));
    }

    #[test]
    fn drawing_outside_is_clipped() {
        let mut d = mock_display(8, 8);
        d.set_pen(Pen::INK);
        d.pixel(-1, -1, None);
        d.pixel(100, 3, None);
        d.rectangle(-10, -10, 5, 5);
        d.circle(1000, 1000, 3);
        d.text("hi", 500, 500, None, 2);
        d.rectangle(i32::MAX - 2, 0, 10, 10);
        d.rect(i32::MAX - 2, 0, 10, 10, Pen::INK, false);
        d.rect(0, i32::MIN, u32::MAX, 10, Pen::INK, true);
        d.circle(i32::MAX, 0, 5);
        d.circle(i32::MIN, i32::MIN, 5);
        d.line(0, -1, i32::MIN, i32::MIN, None);
        d.line(i32::MAX, 0, i32::MAX, i32::MAX, None);
        d.text("hello", i32::MAX - 3, 0, None, 1);
        d.text("hello", i32::MAX - 3, 0, None, 2);
        d.text("hello", 0, i32::MAX, None, 3);
        d.blit(i32::MAX, i32::MAX, u32::MAX, u32::MAX, &[15; 16]);
        assert_eq!(d.panel().lit_count(), 0);
    }

    #[test]
    fn oversized_shapes_cover_only_the_panel() {
        let mut d = mock_display(8, 8);
        d.set_pen(Pen::INK);
        d.rectangle(5, 5, u32::MAX, 3);
        assert_eq!(d.panel().lit_count(), 3 * 3);

        let mut d = mock_display(8, 8);
        d.set_pen(Pen::INK);
        d.circle(0, 0, u32::MAX);
        assert_eq!(d.panel().lit_count(), 64);

        let mut d = mock_display(8, 8);
        d.set_pen(Pen::INK);
        d.line(0, 0, i32::MIN, i32::MIN, None);
        assert_eq!(d.panel().lit_count(), 1);
    }

    #[test]
    fn nothing_flushed_until_update() {
        let mut d = mock_display(8, 8);
        d.rectangle(0, 0, 8, 8);
        assert_eq!(d.panel().flush_count(), 0);
        d.update().unwrap();
        assert_eq!(d.panel().flush_count(), 1);
    }

    #[test]
    fn default_wrap_uses_remaining_row() {
        assert_eq!(default_wrap(128, 28), 100);
        assert_eq!(default_wrap(128, -4), 128);
        assert_eq!(default_wrap(128, 400), 1);
    }
}
