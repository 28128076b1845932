//! Rasterization of the display primitives onto any `Gray4` draw target.
//!
//! Every backend funnels its drawing through these functions so the simulated
//! and real surfaces produce identical framebuffers for identical calls.
//! Coordinates are clipped to the target here, in 64-bit arithmetic, before
//! anything reaches embedded-graphics; no `i32`/`u32` input can overflow.

// Shape math runs in i64 (i128 for squared distances) over i32/u32 inputs,
// which cannot overflow.
#![allow(clippy::arithmetic_side_effects)]

use alloc::string::String;
use alloc::vec::Vec;

use embedded_graphics::mono_font::ascii::{
    FONT_4X6, FONT_5X8, FONT_6X12, FONT_6X13_ITALIC, FONT_7X14_BOLD,
};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};

use crate::pen::Pen;

/// Bitmap fonts available to `text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Font {
    /// 4×6 pixel glyphs
    Bitmap6,
    /// 5×8 pixel glyphs
    #[default]
    Bitmap8,
    /// 7×14 heavy glyphs
    Bitmap14Outline,
    /// 6×12 proportional-looking glyphs
    Sans,
    /// 6×13 italic glyphs
    Cursive,
}

impl Font {
    /// Resolve a device font name (`"bitmap8"`, `"sans"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "bitmap6" => Some(Self::Bitmap6),
            "bitmap8" => Some(Self::Bitmap8),
            "bitmap14_outline" => Some(Self::Bitmap14Outline),
            "sans" => Some(Self::Sans),
            "cursive" => Some(Self::Cursive),
            _ => None,
        }
    }

    /// Device name of this font.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bitmap6 => "bitmap6",
            Self::Bitmap8 => "bitmap8",
            Self::Bitmap14Outline => "bitmap14_outline",
            Self::Sans => "sans",
            Self::Cursive => "cursive",
        }
    }

    /// Glyph table backing this font.
    pub fn mono(self) -> &'static MonoFont<'static> {
        match self {
            Self::Bitmap6 => &FONT_4X6,
            Self::Bitmap8 => &FONT_5X8,
            Self::Bitmap14Outline => &FONT_7X14_BOLD,
            Self::Sans => &FONT_6X12,
            Self::Cursive => &FONT_6X13_ITALIC,
        }
    }

    /// Horizontal advance per character at `scale`.
    pub fn advance(self, scale: u32) -> u32 {
        let font = self.mono();
        let glyph = font.character_size.width;
        glyph
            .saturating_add(font.character_spacing)
            .saturating_mul(scale.max(1))
    }

    /// Line height at `scale`.
    pub fn line_height(self, scale: u32) -> u32 {
        self.mono().character_size.height.saturating_mul(scale.max(1))
    }
}

fn color(pen: Pen) -> Gray4 {
    Gray4::from(pen)
}

/// Half-open pixel box `[x0, x1) × [y0, y1)` in 64-bit coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Area {
    x0: i64,
    y0: i64,
    x1: i64,
    y1: i64,
}

impl Area {
    fn new(x: i64, y: i64, w: i64, h: i64) -> Self {
        Self {
            x0: x,
            y0: y,
            x1: x + w,
            y1: y + h,
        }
    }

    fn of<D: Dimensions>(target: &D) -> Self {
        let bb = target.bounding_box();
        Self::new(
            i64::from(bb.top_left.x),
            i64::from(bb.top_left.y),
            i64::from(bb.size.width),
            i64::from(bb.size.height),
        )
    }

    fn intersect(self, other: Area) -> Option<Area> {
        let a = Area {
            x0: self.x0.max(other.x0),
            y0: self.y0.max(other.y0),
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
        };
        (a.x0 < a.x1 && a.y0 < a.y1).then_some(a)
    }

    fn contains(self, x: i64, y: i64) -> bool {
        (self.x0..self.x1).contains(&x) && (self.y0..self.y1).contains(&y)
    }

    fn rectangle(self) -> Option<Rectangle> {
        let top_left = point(self.x0, self.y0)?;
        let size = Size::new(
            u32::try_from(self.x1 - self.x0).ok()?,
            u32::try_from(self.y1 - self.y0).ok()?,
        );
        Some(Rectangle::new(top_left, size))
    }
}

fn point(x: i64, y: i64) -> Option<Point> {
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Fill whatever part of `area` lies on the target.
fn fill_area<D>(target: &mut D, area: Area, c: Gray4) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    match Area::of(&*target).intersect(area).and_then(Area::rectangle) {
        Some(rect) => target.fill_solid(&rect, c),
        None => Ok(()),
    }
}

/// Set one pixel.
pub fn pixel<D>(target: &mut D, x: i32, y: i32, pen: Pen) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    Pixel(Point::new(x, y), color(pen)).draw(target)
}

const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const ABOVE: u8 = 4;
const BELOW: u8 = 8;

fn outcode(clip: Area, x: i64, y: i64) -> u8 {
    let mut code = INSIDE;
    if x < clip.x0 {
        code |= LEFT;
    } else if x >= clip.x1 {
        code |= RIGHT;
    }
    if y < clip.y0 {
        code |= ABOVE;
    } else if y >= clip.y1 {
        code |= BELOW;
    }
    code
}

/// Cohen–Sutherland clip of the segment to `clip`; `None` when it misses.
fn clip_line(clip: Area, mut p0: (i64, i64), mut p1: (i64, i64)) -> Option<(Point, Point)> {
    if clip.x0 >= clip.x1 || clip.y0 >= clip.y1 {
        return None;
    }
    let (xmax, ymax) = (clip.x1 - 1, clip.y1 - 1);
    let mut c0 = outcode(clip, p0.0, p0.1);
    let mut c1 = outcode(clip, p1.0, p1.1);
    loop {
        if c0 | c1 == INSIDE {
            return Some((point(p0.0, p0.1)?, point(p1.0, p1.1)?));
        }
        if c0 & c1 != INSIDE {
            return None;
        }
        let out = if c0 != INSIDE { c0 } else { c1 };
        let (x0, y0) = (i128::from(p0.0), i128::from(p0.1));
        let (dx, dy) = (i128::from(p1.0) - x0, i128::from(p1.1) - y0);
        // The divisor is non-zero: the outcode bit implies the endpoints
        // straddle that edge.
        let at_y = |y: i64| {
            let x = x0 + dx * (i128::from(y) - y0) / dy;
            (i64::try_from(x).unwrap_or(i64::MAX), y)
        };
        let at_x = |x: i64| {
            let y = y0 + dy * (i128::from(x) - x0) / dx;
            (x, i64::try_from(y).unwrap_or(i64::MAX))
        };
        let moved = if out & ABOVE != 0 {
            at_y(clip.y0)
        } else if out & BELOW != 0 {
            at_y(ymax)
        } else if out & RIGHT != 0 {
            at_x(xmax)
        } else {
            at_x(clip.x0)
        };
        if out == c0 {
            p0 = moved;
            c0 = outcode(clip, p0.0, p0.1);
        } else {
            p1 = moved;
            c1 = outcode(clip, p1.0, p1.1);
        }
    }
}

/// One-pixel line, both endpoints inclusive.
pub fn line<D>(target: &mut D, x0: i32, y0: i32, x1: i32, y1: i32, pen: Pen) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let from = (i64::from(x0), i64::from(y0));
    let to = (i64::from(x1), i64::from(y1));
    let Some((start, end)) = clip_line(Area::of(&*target), from, to) else {
        return Ok(());
    };
    Line::new(start, end)
        .into_styled(PrimitiveStyle::with_stroke(color(pen), 1))
        .draw(target)
}

/// Filled rectangle, clipped to the target before rasterizing.
pub fn fill_rect<D>(
    target: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    pen: Pen,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let area = Area::new(i64::from(x), i64::from(y), i64::from(w), i64::from(h));
    fill_area(target, area, color(pen))
}

/// One-pixel rectangle outline drawn inside the given area.
pub fn outline_rect<D>(
    target: &mut D,
    x: i32,
    y: i32,
    w: u32,
    h: u32,
    pen: Pen,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    if w == 0 || h == 0 {
        return Ok(());
    }
    let (x, y, w, h) = (i64::from(x), i64::from(y), i64::from(w), i64::from(h));
    let c = color(pen);
    fill_area(target, Area::new(x, y, w, 1), c)?;
    if h > 1 {
        fill_area(target, Area::new(x, y + h - 1, w, 1), c)?;
    }
    if h > 2 {
        fill_area(target, Area::new(x, y + 1, 1, h - 2), c)?;
        if w > 1 {
            fill_area(target, Area::new(x + w - 1, y + 1, 1, h - 2), c)?;
        }
    }
    Ok(())
}

/// Filled circle of radius `r` centered on (cx, cy).
///
/// A pixel is inside when `4 * (dx² + dy²)` is below the threshold of the
/// `2r + 1` diameter, the same test embedded-graphics applies, so small
/// circles keep their familiar shape.
pub fn circle<D>(target: &mut D, cx: i32, cy: i32, r: u32, pen: Pen) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let (cx, cy, r) = (i64::from(cx), i64::from(cy), i64::from(r));
    let bbox = Area::new(cx - r, cy - r, 2 * r + 1, 2 * r + 1);
    let Some(area) = Area::of(&*target).intersect(bbox) else {
        return Ok(());
    };
    let diameter = i128::from(2 * r + 1);
    let threshold = if diameter <= 4 {
        diameter * diameter - diameter / 2
    } else {
        diameter * diameter
    };
    let c = color(pen);
    let pixels = (area.y0..area.y1)
        .flat_map(move |y| (area.x0..area.x1).map(move |x| (x, y)))
        .filter(move |&(x, y)| {
            let (dx, dy) = (i128::from(x - cx), i128::from(y - cy));
            4 * (dx * dx + dy * dy) < threshold
        })
        .filter_map(move |(x, y)| Some(Pixel(point(x, y)?, c)));
    target.draw_iter(pixels)
}

/// Copy a row-major block of pen bytes; stops early if `pens` is short.
pub fn blit<D>(target: &mut D, x: i32, y: i32, w: u32, h: u32, pens: &[u8]) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    if w == 0 {
        return Ok(());
    }
    let clip = Area::of(&*target);
    let (x, y, w64) = (i64::from(x), i64::from(y), i64::from(w));
    let count = usize::try_from(u64::from(w) * u64::from(h)).unwrap_or(usize::MAX);
    let placed = pens.iter().take(count).enumerate();
    let pixels = placed.filter_map(move |(i, &b)| {
        let i = i64::try_from(i).ok()?;
        let (px, py) = (x + i % w64, y + i / w64);
        if !clip.contains(px, py) {
            return None;
        }
        Some(Pixel(point(px, py)?, color(Pen::new(b))))
    });
    target.draw_iter(pixels)
}

/// Greedy word wrap.
///
/// Lines break on spaces so that `chars * advance <= max_width` where
/// possible; a single word wider than the limit stands on its own line.
/// Explicit `\n` always breaks.
pub fn wrap(text: &str, max_width: u32, advance: u32) -> Vec<String> {
    let max_chars = if advance == 0 {
        usize::MAX
    } else {
        usize::try_from(max_width / advance).unwrap_or(usize::MAX).max(1)
    };

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split(' ') {
            let word_len = word.chars().count();
            let cur_len = current.chars().count();
            if cur_len == 0 {
                current.push_str(word);
            } else if cur_len.saturating_add(1).saturating_add(word_len) <= max_chars {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(core::mem::take(&mut current));
                current.push_str(word);
            }
        }
        lines.push(current);
    }
    lines
}

/// Draw `s` with its top-left corner at (x, y), wrapping at `max_width`
/// pixels and upscaling each glyph pixel to a `scale`×`scale` block.
///
/// Lines that fall wholly outside the target are skipped before layout.
#[allow(clippy::too_many_arguments)]
pub fn text<D>(
    target: &mut D,
    s: &str,
    x: i32,
    y: i32,
    max_width: u32,
    scale: u32,
    font: Font,
    pen: Pen,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray4>,
{
    let scale = scale.max(1);
    let style = MonoTextStyle::new(font.mono(), color(pen));
    let clip = Area::of(&*target);
    let line_height = i64::from(font.line_height(scale));

    let mut top = i64::from(y);
    for line in wrap(s, max_width, font.advance(scale)) {
        if top >= clip.y1 {
            break;
        }
        let width = i64::from(measure(&line, font, scale));
        let visible = !line.is_empty()
            && top + line_height > clip.y0
            && i64::from(x) < clip.x1
            && i64::from(x) + width > clip.x0;
        if visible {
            if let Some(origin) = point(i64::from(x), top) {
                if scale == 1 {
                    Text::with_baseline(&line, origin, style, Baseline::Top).draw(target)?;
                } else {
                    let mut scaled = ScaledTarget::new(target, origin, scale);
                    Text::with_baseline(&line, origin, style, Baseline::Top).draw(&mut scaled)?;
                }
            }
        }
        top += line_height;
    }
    Ok(())
}

/// Pixel width of the longest line `s` renders as, without wrapping.
pub fn measure(s: &str, font: Font, scale: u32) -> u32 {
    let longest = s.split('\n').map(|l| l.chars().count()).max().unwrap_or(0);
    u32::try_from(longest)
        .unwrap_or(u32::MAX)
        .saturating_mul(font.advance(scale))
}

/// Draw-target adapter that magnifies everything drawn through it by an
/// integer factor around `origin`.
pub struct ScaledTarget<'a, D> {
    inner: &'a mut D,
    origin: Point,
    scale: u32,
}

impl<'a, D> ScaledTarget<'a, D>
where
    D: DrawTarget<Color = Gray4>,
{
    /// Wrap `inner`; points drawn at `origin` stay at `origin`.
    pub fn new(inner: &'a mut D, origin: Point, scale: u32) -> Self {
        Self {
            inner,
            origin,
            scale: scale.max(1),
        }
    }

    /// Top-left of the block a source pixel lands on. Anything beyond
    /// `FAR` is off every target, so it is clamped there.
    fn map(&self, p: Point) -> (i64, i64) {
        const FAR: i64 = 1 << 40;
        let s = i64::from(self.scale);
        let axis = |v: i32, o: i32| {
            let d = (i64::from(v) - i64::from(o)).saturating_mul(s);
            (i64::from(o) + d).clamp(-FAR, FAR)
        };
        (axis(p.x, self.origin.x), axis(p.y, self.origin.y))
    }
}

impl<D> Dimensions for ScaledTarget<'_, D>
where
    D: DrawTarget<Color = Gray4>,
{
    fn bounding_box(&self) -> Rectangle {
        self.inner.bounding_box()
    }
}

impl<D> DrawTarget for ScaledTarget<'_, D>
where
    D: DrawTarget<Color = Gray4>,
{
    type Color = Gray4;
    type Error = D::Error;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let side = i64::from(self.scale);
        for Pixel(p, c) in pixels {
            let (x, y) = self.map(p);
            let block = Area::new(x, y, side, side);
            fill_area(self.inner, block, c)?;
        }
        Ok(())
    }
}
