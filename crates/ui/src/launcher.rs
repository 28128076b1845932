//! Home screen: a paged grid of app tiles.
//!
//! Tiles are laid out 3×2 per page and centered on the display. Arrows move
//! the selection, `.`/`L` and `,`/`H` flip pages, Enter opens the selected
//! app, Esc/`q` pops (a no-op when the launcher is home).

// Tile geometry is a handful of small constants and display sizes fit in
// i32, so the layout arithmetic cannot overflow.
#![allow(clippy::cast_possible_wrap, clippy::arithmetic_side_effects)]

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use platform::{DisplaySurface, Font, Key, Pen};

use crate::app::{App, DrawOutcome, Icon, Navigation};
use crate::context::Context;
use crate::widgets::{clear_screen, frame};

/// Tile columns per page.
pub const COLS: usize = 3;
/// Tile rows per page.
pub const ROWS: usize = 2;
/// Tiles per page.
pub const PER_PAGE: usize = COLS * ROWS;
/// Tile width in pixels.
pub const TILE_W: u32 = 40;
/// Tile height in pixels.
pub const TILE_H: u32 = 28;
/// Gap between tiles.
pub const GAP: u32 = 2;
/// Label band at the bottom of a tile.
const LABEL_H: u32 = 8;
/// Longest label shown under a tile.
pub const LABEL_CHARS: usize = 8;

const GRID_W: u32 = COLS as u32 * TILE_W + (COLS as u32 - 1) * GAP;
const GRID_H: u32 = ROWS as u32 * TILE_H + (ROWS as u32 - 1) * GAP;

/// Builds a fresh app each time its tile is opened.
pub type AppFactory = Box<dyn Fn() -> Box<dyn App>>;

/// One launcher tile.
pub struct LauncherEntry {
    name: String,
    factory: AppFactory,
    icon: Option<Box<dyn Icon>>,
}

impl LauncherEntry {
    /// Tile without artwork.
    pub fn new<F>(name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn App> + 'static,
    {
        Self {
            name: name.into(),
            factory: Box::new(factory),
            icon: None,
        }
    }

    /// Add artwork drawn above the label.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Icon + 'static) -> Self {
        self.icon = Some(Box::new(icon));
        self
    }

    /// Tile name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True if the tile has artwork.
    pub fn has_icon(&self) -> bool {
        self.icon.is_some()
    }

    fn label(&self) -> String {
        self.name.chars().take(LABEL_CHARS).collect()
    }
}

/// The icon-grid home app.
pub struct Launcher {
    entries: Vec<LauncherEntry>,
    page: usize,
    sel: usize,
}

impl Launcher {
    /// Launcher over `entries`, first tile selected.
    pub fn new(entries: Vec<LauncherEntry>) -> Self {
        Self {
            entries,
            page: 0,
            sel: 0,
        }
    }

    /// Number of pages, at least 1.
    pub fn pages(&self) -> usize {
        self.entries.len().div_ceil(PER_PAGE).max(1)
    }

    /// Current page, from 0.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Index of the selected entry across all pages.
    pub fn selected(&self) -> usize {
        self.page * PER_PAGE + self.sel
    }

    /// Entries on the current page.
    pub fn page_entries(&self) -> &[LauncherEntry] {
        let start = self.page * PER_PAGE;
        let end = (start + PER_PAGE).min(self.entries.len());
        self.entries.get(start..end).unwrap_or(&[])
    }

    fn turn_page(&mut self, page: usize) {
        self.page = page;
        self.sel = 0;
    }

    fn draw_tile(
        display: &mut dyn DisplaySurface,
        entry: &LauncherEntry,
        x: i32,
        y: i32,
        selected: bool,
    ) {
        let (width, _) = display.bounds();
        frame(display, x, y, TILE_W, TILE_H, 1);
        if let Some(icon) = &entry.icon {
            icon.draw_icon(display, x + 1, y + 1, TILE_W - 2, TILE_H - 12);
        }

        let label = entry.label();
        let label_w = display.measure_text(&label, 1) as i32;
        let lx = x + (TILE_W as i32 - label_w) / 2;
        let ly = y + (TILE_H - LABEL_H) as i32;
        display.text(&label, lx, ly, Some(width), 1);

        if selected {
            display.set_pen(Pen::INK);
            display.rectangle(x, ly, TILE_W, LABEL_H);
            display.set_pen(Pen::BG);
            display.text(&label, lx, ly + 1, Some(width), 1);
            display.set_pen(Pen::INK);
        }
    }
}

impl App for Launcher {
    fn title(&self) -> &str {
        "Menu"
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        let display = &mut *ctx.display;
        clear_screen(display);
        let (width, height) = display.bounds();
        let base_x = (width as i32 - GRID_W as i32) / 2;
        let base_y = (height as i32 - GRID_H as i32) / 2;

        let font = display.font();
        display.set_font(Font::Bitmap6);
        for (i, entry) in self.page_entries().iter().enumerate() {
            let col = (i % COLS) as i32;
            let row = (i / COLS) as i32;
            let x = base_x + col * (TILE_W + GAP) as i32;
            let y = base_y + row * (TILE_H + GAP) as i32;
            Self::draw_tile(display, entry, x, y, i == self.sel);
        }
        display.set_font(font);
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, _ctx: &mut Context<'_>, key: Key) -> Navigation {
        let len = self.entries.len();
        let abs = self.selected();
        match key {
            Key::ESCAPE => return Navigation::Pop,
            Key::LEFT => {
                if self.sel > 0 {
                    self.sel -= 1;
                }
            }
            Key::RIGHT => {
                if abs + 1 < len {
                    if self.sel + 1 < PER_PAGE {
                        self.sel += 1;
                    } else {
                        self.turn_page(self.page + 1);
                    }
                }
            }
            Key::UP => {
                if self.sel >= COLS {
                    self.sel -= COLS;
                }
            }
            Key::DOWN => {
                if self.sel + COLS < PER_PAGE && abs + COLS < len {
                    self.sel += COLS;
                }
            }
            Key::ENTER => {
                if let Some(entry) = self.entries.get(abs) {
                    tracing::debug!(name = entry.name(), "launch");
                    return Navigation::Push((entry.factory)());
                }
            }
            _ => match key.as_char() {
                Some('q') => return Navigation::Pop,
                Some('.' | 'L') if self.page + 1 < self.pages() => self.turn_page(self.page + 1),
                Some(',' | 'H') if self.page > 0 => self.turn_page(self.page - 1),
                _ => {}
            },
        }
        Navigation::Stay
    }
}
