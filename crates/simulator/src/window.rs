//! Isolated window management layer
//!
//! Based on softbuffer pattern: https://github.com/rust-windowing/softbuffer
//! All platform-specific code lives here. The event loop is never run; it is
//! pumped with a zero timeout from `SimInput` and on every present, so the
//! single-threaded runtime stays in control of timing.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use platform::{DisplayConfig, Framebuffer, Pen};
use softbuffer::{Context, Surface};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::{Window as WinitWindow, WindowAttributes, WindowId};

use crate::error::SimError;
use crate::input::{map_key, KeyQueue};

type WindowSurface = Surface<Arc<WinitWindow>, Arc<WinitWindow>>;

/// Pen → 0x00RRGGBB, 16 evenly spaced grays.
fn pen_rgb(pen: Pen) -> u32 {
    let level = u32::from(pen.gray_level());
    (level << 16) | (level << 8) | level
}

/// Nearest-neighbour upscale of a pen framebuffer into an RGB buffer of
/// `fb.width() * scale` columns.
pub(crate) fn upscale(fb: &Framebuffer, scale: u32, out: &mut [u32]) {
    let scale = scale.max(1);
    let Ok(src_w) = usize::try_from(fb.width()) else {
        return;
    };
    let Ok(s) = usize::try_from(scale) else {
        return;
    };
    let Some(dst_w) = src_w.checked_mul(s) else {
        return;
    };
    if src_w == 0 {
        return;
    }
    for (src_row, dst_rows) in fb
        .pixels()
        .chunks_exact(src_w)
        .zip(out.chunks_mut(dst_w.saturating_mul(s)))
    {
        for dst_row in dst_rows.chunks_exact_mut(dst_w) {
            for (px, block) in src_row.iter().zip(dst_row.chunks_exact_mut(s)) {
                block.fill(pen_rgb(Pen::from(*px)));
            }
        }
    }
}

/// Internal handler for pumped events
struct EventHandler<'a> {
    queue: &'a KeyQueue,
    shift: &'a mut bool,
    closed: &'a mut bool,
}

impl ApplicationHandler for EventHandler<'_> {
    fn resumed(&mut self, _event_loop: &ActiveEventLoop) {
        // Window is already created before the loop is pumped
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                *self.closed = true;
                event_loop.exit();
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                *self.shift = modifiers.state().shift_key();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(key) = map_key(code, *self.shift) {
                        tracing::trace!(code = key.code(), "key");
                        self.queue.push(key);
                    }
                }
            }
            _ => {}
        }
    }
}

/// Host window presenting the simulated display.
pub struct Window {
    event_loop: EventLoop<()>,
    window: Arc<WinitWindow>,
    surface: WindowSurface,
    scale: u32,
    window_size: (u32, u32),
    pixels: Vec<u32>,
    queue: KeyQueue,
    shift: bool,
    closed: bool,
}

impl Window {
    /// Open a non-resizable window sized `display.width * scale` by
    /// `display.height * scale`, feeding key presses into `queue`.
    pub fn new(display: &DisplayConfig, title: &str, queue: KeyQueue) -> Result<Self, SimError> {
        let mut event_loop = EventLoop::new().map_err(|e| SimError::Window(e.to_string()))?;

        let (scaled_w, scaled_h) = display.window_size();
        let window_attributes = WindowAttributes::default()
            .with_title(title)
            .with_inner_size(winit::dpi::PhysicalSize::new(scaled_w, scaled_h))
            .with_resizable(false);

        // Window creation must happen inside resumed(); pump once to get there.
        struct WindowCreator {
            window_attributes: Option<WindowAttributes>,
            created: Option<Result<(Arc<WinitWindow>, WindowSurface), SimError>>,
        }

        impl ApplicationHandler for WindowCreator {
            fn resumed(&mut self, event_loop: &ActiveEventLoop) {
                let Some(attrs) = self.window_attributes.take() else {
                    return;
                };
                let result = event_loop
                    .create_window(attrs)
                    .map_err(|e| SimError::Window(e.to_string()))
                    .and_then(|window| {
                        let window = Arc::new(window);
                        let context = Context::new(window.clone())
                            .map_err(|e| SimError::Surface(e.to_string()))?;
                        let surface = Surface::new(&context, window.clone())
                            .map_err(|e| SimError::Surface(e.to_string()))?;
                        Ok((window, surface))
                    });
                self.created = Some(result);
            }

            fn window_event(&mut self, _: &ActiveEventLoop, _: WindowId, _: WindowEvent) {}
        }

        let mut creator = WindowCreator {
            window_attributes: Some(window_attributes),
            created: None,
        };
        let _ = event_loop.pump_app_events(Some(Duration::from_millis(1)), &mut creator);

        let (window, mut surface) = creator
            .created
            .unwrap_or_else(|| Err(SimError::Window(String::from("window was never resumed"))))?;

        let (Some(w), Some(h)) = (NonZeroU32::new(scaled_w), NonZeroU32::new(scaled_h)) else {
            return Err(SimError::Surface(String::from("zero-sized display")));
        };
        // Resize once; the window is not resizable.
        surface
            .resize(w, h)
            .map_err(|e| SimError::Surface(e.to_string()))?;

        tracing::info!(width = scaled_w, height = scaled_h, "simulator window open");

        let pixel_count = usize::try_from(u64::from(scaled_w).saturating_mul(u64::from(scaled_h)))
            .unwrap_or(0);
        Ok(Self {
            event_loop,
            window,
            surface,
            scale: display.scale.max(1),
            window_size: (scaled_w, scaled_h),
            pixels: vec![0; pixel_count],
            queue,
            shift: false,
            closed: false,
        })
    }

    /// Process pending host events without blocking.
    pub fn pump(&mut self) {
        if self.closed {
            return;
        }
        let mut handler = EventHandler {
            queue: &self.queue,
            shift: &mut self.shift,
            closed: &mut self.closed,
        };
        let status = self
            .event_loop
            .pump_app_events(Some(Duration::ZERO), &mut handler);
        if let PumpStatus::Exit(_) = status {
            self.closed = true;
        }
        if self.closed {
            tracing::info!("simulator window closed");
        }
    }

    /// True once the user has closed the window.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Present a frame, upscaled by the configured factor.
    pub fn present(&mut self, fb: &Framebuffer) -> Result<(), SimError> {
        self.pump();
        if self.closed {
            return Ok(());
        }
        upscale(fb, self.scale, &mut self.pixels);

        let mut buffer = self
            .surface
            .buffer_mut()
            .map_err(|e| SimError::Surface(e.to_string()))?;
        if buffer.len() == self.pixels.len() {
            buffer.copy_from_slice(&self.pixels);
        }
        buffer
            .present()
            .map_err(|e| SimError::Surface(e.to_string()))?;
        self.window.request_redraw();
        Ok(())
    }

    /// Replace the window title.
    pub fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    /// Physical window size in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.window_size
    }
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::{Gray4, GrayColor};

    #[test]
    fn pen_rgb_is_gray() {
        assert_eq!(pen_rgb(Pen::BG), 0x000000);
        assert_eq!(pen_rgb(Pen::INK), 0xFFFFFF);
        assert_eq!(pen_rgb(Pen::new(1)), 0x111111);
    }

    #[test]
    fn upscale_fills_blocks() {
        let mut fb = Framebuffer::new(2, 1);
        fb.set_pixel(1, 0, Gray4::WHITE);
        let mut out = vec![0u32; 2 * 3 * 3];
        upscale(&fb, 3, &mut out);
        // first row: 3 black then 3 white
        assert_eq!(&out[0..6], &[0, 0, 0, 0xFFFFFF, 0xFFFFFF, 0xFFFFFF]);
        // every row identical
        assert_eq!(out[0..6], out[6..12]);
        assert_eq!(out[0..6], out[12..18]);
    }
}
