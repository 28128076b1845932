//! Small drawing helpers shared by screens.
//!
//! Every helper leaves the pen at [`Pen::INK`].

use alloc::string::String;

use platform::{DisplaySurface, Pen};

/// Height of the [`header`] bar.
pub const HEADER_HEIGHT: u32 = 10;

/// Longest title [`header`] shows.
pub const HEADER_MAX_CHARS: usize = 16;

/// Blank the screen to [`Pen::BG`].
pub fn clear_screen(display: &mut dyn DisplaySurface) {
    display.set_pen(Pen::BG);
    display.clear();
    display.set_pen(Pen::INK);
}

/// Inverted title bar across the top of the screen.
pub fn header(display: &mut dyn DisplaySurface, title: &str) {
    let (width, _) = display.bounds();
    display.set_pen(Pen::INK);
    display.rectangle(0, 0, width, HEADER_HEIGHT);
    display.set_pen(Pen::BG);
    let shown: String = title.chars().take(HEADER_MAX_CHARS).collect();
    display.text(&shown, 2, 1, Some(width), 1);
    display.set_pen(Pen::INK);
}

/// Hollow rectangle with a `thickness`-pixel border.
pub fn frame(display: &mut dyn DisplaySurface, x: i32, y: i32, w: u32, h: u32, thickness: u32) {
    display.set_pen(Pen::INK);
    display.rectangle(x, y, w, h);
    let inset = i32::try_from(thickness).unwrap_or(i32::MAX);
    let double = thickness.saturating_mul(2);
    display.set_pen(Pen::BG);
    display.rectangle(
        x.saturating_add(inset),
        y.saturating_add(inset),
        w.saturating_sub(double),
        h.saturating_sub(double),
    );
    display.set_pen(Pen::INK);
}

/// Circle outline `thickness` pixels wide (at least 1).
pub fn ring(display: &mut dyn DisplaySurface, cx: i32, cy: i32, r: u32, thickness: u32) {
    display.set_pen(Pen::INK);
    display.circle(cx, cy, r);
    let inner = r.saturating_sub(thickness.max(1));
    if inner > 0 {
        display.set_pen(Pen::BG);
        display.circle(cx, cy, inner);
    }
    display.set_pen(Pen::INK);
}
