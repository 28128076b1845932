//! Pocket Organizer on the desktop
//!
//! Opens the simulator window and runs the launcher with a few small apps.
//! Run with: cargo run -p firmware --example simulator --features emulator
//!
//! Keys: arrows move, Enter opens, Esc goes back. `RUST_LOG=debug` shows
//! stack transitions.

#![allow(missing_docs)]
#![allow(clippy::arithmetic_side_effects)]

use anyhow::Context as _;
use tracing_subscriber::EnvFilter;

use firmware::{HardwareHandles, PlatformFactory};
use platform::config::{APP_NAME, APP_VERSION};
use platform::{DisplaySurface, Key, Mode, PlatformConfig, Rgbw};
use ui::widgets::{clear_screen, header, ring};
use ui::{
    prompt_input, App, AppRuntime, Context, DrawOutcome, Icon, Launcher, LauncherEntry, Navigation,
};

const MEMO_PATH: &str = "memo.txt";

// ---------------------------------------------------------------------------
// Uptime
// ---------------------------------------------------------------------------

/// Seconds since the clock started, redrawn once a second.
struct Uptime;

impl App for Uptime {
    fn title(&self) -> &str {
        "Uptime"
    }

    fn tick_ms(&self) -> u32 {
        1000
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        let secs = ctx.clock.ticks_ms() / 1000;
        clear_screen(ctx.display);
        header(ctx.display, "Uptime");
        let line = format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60);
        ctx.display.text(&line, 4, 20, None, 2);
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, _ctx: &mut Context<'_>, key: Key) -> Navigation {
        match key {
            Key::ESCAPE => Navigation::Pop,
            _ => Navigation::Stay,
        }
    }
}

struct ClockIcon;

impl Icon for ClockIcon {
    fn draw_icon(&self, display: &mut dyn DisplaySurface, x: i32, y: i32, w: u32, h: u32) {
        let r = w.min(h) / 2;
        let (cx, cy) = (x + (w / 2) as i32, y + (h / 2) as i32);
        ring(display, cx, cy, r.saturating_sub(1), 1);
        display.line(cx, cy, cx, cy - r as i32 + 3, None);
        display.line(cx, cy, cx + 3, cy, None);
    }
}

// ---------------------------------------------------------------------------
// Keys
// ---------------------------------------------------------------------------

/// Shows the code of every key pressed. Esc twice leaves.
#[derive(Default)]
struct KeyTester {
    count: u32,
    last: Option<Key>,
    armed: bool,
}

impl App for KeyTester {
    fn title(&self) -> &str {
        "Keys"
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        clear_screen(ctx.display);
        header(ctx.display, "Keys");
        ctx.display.text(&format!("count {}", self.count), 0, 14, None, 1);
        if let Some(key) = self.last {
            ctx.display.text(&format!("code 0x{:02X}", key.code()), 0, 24, None, 1);
            if let Some(c) = key.as_char() {
                ctx.display.text(&format!("char {c}"), 0, 34, None, 1);
            }
        }
        if self.armed {
            ctx.display.text("Esc again to leave", 0, 50, None, 1);
        }
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, _ctx: &mut Context<'_>, key: Key) -> Navigation {
        if key == Key::ESCAPE && self.armed {
            return Navigation::Pop;
        }
        self.armed = key == Key::ESCAPE;
        self.count = self.count.saturating_add(1);
        self.last = Some(key);
        Navigation::Stay
    }
}

// ---------------------------------------------------------------------------
// Memo
// ---------------------------------------------------------------------------

/// One persisted line of text. Enter edits it, Del erases it.
#[derive(Default)]
struct Memo {
    text: Option<String>,
    loaded: bool,
}

impl Memo {
    fn load(&mut self, ctx: &mut Context<'_>) {
        if self.loaded {
            return;
        }
        self.loaded = true;
        self.text = match ctx.storage.read(MEMO_PATH) {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(e) => {
                tracing::debug!(error = %e, "no memo yet");
                None
            }
        };
    }
}

impl App for Memo {
    fn title(&self) -> &str {
        "Memo"
    }

    fn tick_ms(&self) -> u32 {
        500
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        self.load(ctx);
        clear_screen(ctx.display);
        header(ctx.display, "Memo");
        let body = self.text.as_deref().unwrap_or("(empty) Enter to write");
        ctx.display.text(body, 0, 14, None, 1);
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, key: Key) -> Navigation {
        match key {
            Key::ESCAPE => return Navigation::Pop,
            Key::ENTER => {
                if let Some(text) = prompt_input(ctx, "New memo", 40) {
                    match ctx.storage.write(MEMO_PATH, text.as_bytes()) {
                        Ok(()) => self.text = Some(text),
                        Err(e) => tracing::warn!(error = %e, "memo not saved"),
                    }
                }
            }
            Key::DELETE => {
                if let Err(e) = ctx.storage.remove(MEMO_PATH) {
                    tracing::warn!(error = %e, "memo not removed");
                }
                self.text = None;
            }
            _ => {}
        }
        Navigation::Stay
    }
}

// ---------------------------------------------------------------------------
// Light
// ---------------------------------------------------------------------------

/// Backlight presets; Left/Right pick one, the pick closes the app.
struct Light {
    index: usize,
    chosen: bool,
}

const PRESETS: [(&str, Rgbw); 4] = [
    ("White", Rgbw::WHITE),
    ("Warm", Rgbw::new(255, 120, 0, 80)),
    ("Night", Rgbw::new(60, 0, 0, 0)),
    ("Off", Rgbw::OFF),
];

impl App for Light {
    fn title(&self) -> &str {
        "Light"
    }

    fn draw(&mut self, ctx: &mut Context<'_>) -> DrawOutcome {
        if self.chosen {
            return DrawOutcome::RequestPop;
        }
        clear_screen(ctx.display);
        header(ctx.display, "Light");
        for (row, (name, _)) in PRESETS.iter().enumerate() {
            let marker = if row == self.index { ">" } else { " " };
            let y = 14 + 10 * row as i32;
            ctx.display.text(&format!("{marker} {name}"), 0, y, None, 1);
        }
        DrawOutcome::Continue
    }

    fn handle_input(&mut self, ctx: &mut Context<'_>, key: Key) -> Navigation {
        match key {
            Key::UP => self.index = self.index.saturating_sub(1),
            Key::DOWN => self.index = (self.index + 1).min(PRESETS.len() - 1),
            Key::ENTER => {
                if let Some((name, color)) = PRESETS.get(self.index) {
                    match ctx.backlight.set_backlight(*color) {
                        Ok(()) => tracing::info!(preset = name, "backlight"),
                        Err(e) => tracing::warn!(error = %e, "backlight"),
                    }
                }
                self.chosen = true;
            }
            Key::ESCAPE => return Navigation::Pop,
            _ => {}
        }
        Navigation::Stay
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    tracing::info!("{APP_NAME} v{APP_VERSION}");

    let config = PlatformConfig {
        storage_root: std::env::var("ORGANIZER_DATA").unwrap_or_else(|_| String::from(".")),
        ..PlatformConfig::default()
    };
    let hal = PlatformFactory::new(Mode::Simulated, config, HardwareHandles::new())
        .build()
        .context("building simulator backends")?;

    let launcher = Launcher::new(vec![
        LauncherEntry::new("Uptime", || Box::new(Uptime)).with_icon(ClockIcon),
        LauncherEntry::new("Keys", || Box::<KeyTester>::default()),
        LauncherEntry::new("Memo", || Box::<Memo>::default()),
        LauncherEntry::new("Light", || {
            Box::new(Light {
                index: 0,
                chosen: false,
            })
        }),
    ]);

    let mut runtime = AppRuntime::new(hal, Box::new(launcher));
    let exit = runtime.run();
    tracing::info!(?exit, "shutting down");
    Ok(())
}
