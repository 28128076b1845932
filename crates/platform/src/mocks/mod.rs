//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits for use
//! in unit and integration tests. Every mock is a cheap handle around shared
//! state, so a test can keep a clone after boxing the original into a `Hal`
//! and still script or inspect it.

#![cfg(any(test, feature = "std"))]

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::convert::Infallible;

use embedded_graphics::pixelcolor::Gray4;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::backlight::{BacklightController, Rgbw};
use crate::clock::{ticks_add, ClockSource, Ticks};
use crate::display::{Panel, PanelDisplay};
use crate::error::{BacklightError, DisplayError, InputError, StorageError};
use crate::framebuffer::Framebuffer;
use crate::hal::Hal;
use crate::input::InputSource;
use crate::key::Key;
use crate::storage::StorageBackend;

// ── Display ──────────────────────────────────────────────────────────────────

/// In-memory panel that counts flushes.
pub struct MockPanel {
    framebuffer: Framebuffer,
    flushes: Rc<Cell<usize>>,
    inits: usize,
    close_after: Option<usize>,
    fail_init: bool,
}

impl MockPanel {
    /// Create a blank panel.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            framebuffer: Framebuffer::new(width, height),
            flushes: Rc::new(Cell::new(0)),
            inits: 0,
            close_after: None,
            fail_init: false,
        }
    }

    /// Report [`DisplayError::Closed`] from every flush after the first `n`.
    #[must_use]
    pub fn closing_after(mut self, n: usize) -> Self {
        self.close_after = Some(n);
        self
    }

    /// Make `init` fail with [`DisplayError::Communication`].
    #[must_use]
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Buffered pixels.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Number of successful flushes.
    pub fn flush_count(&self) -> usize {
        self.flushes.get()
    }

    /// Shared flush counter that outlives moving the panel into a `Hal`.
    pub fn flush_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.flushes)
    }

    /// Number of `init` calls.
    pub fn init_count(&self) -> usize {
        self.inits
    }

    /// Pixels with a non-zero pen.
    pub fn lit_count(&self) -> usize {
        self.framebuffer
            .pixels()
            .iter()
            .filter(|p| p.luma() != 0)
            .count()
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        self.framebuffer.size()
    }
}

impl DrawTarget for MockPanel {
    type Color = Gray4;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        self.framebuffer.fill_solid(area, color)
    }
}

impl Panel for MockPanel {
    fn init(&mut self) -> Result<(), DisplayError> {
        self.inits = self.inits.saturating_add(1);
        if self.fail_init {
            Err(DisplayError::Communication)
        } else {
            Ok(())
        }
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if self.close_after.is_some_and(|n| self.flushes.get() >= n) {
            return Err(DisplayError::Closed);
        }
        self.flushes.set(self.flushes.get().saturating_add(1));
        Ok(())
    }
}

/// Display surface over a [`MockPanel`].
pub type MockDisplay = PanelDisplay<MockPanel>;

/// Blank mock display of the given size.
pub fn mock_display(width: u32, height: u32) -> MockDisplay {
    PanelDisplay::new(MockPanel::new(width, height))
}

// ── Input ────────────────────────────────────────────────────────────────────

const MOCK_QUEUE_DEPTH: usize = 64;

/// Scripted keypad. Clones share one queue.
#[derive(Clone, Default)]
pub struct MockInput {
    queue: Rc<RefCell<heapless::Deque<Result<Key, InputError>, MOCK_QUEUE_DEPTH>>>,
    reads: Rc<Cell<usize>>,
}

impl MockInput {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a key; dropped silently when the queue is full.
    pub fn push_key(&self, key: Key) {
        let _ = self.queue.borrow_mut().push_back(Ok(key));
    }

    /// Queue several keys.
    pub fn push_keys(&self, keys: &[Key]) {
        for &k in keys {
            self.push_key(k);
        }
    }

    /// Queue a bus error.
    pub fn push_error(&self, error: InputError) {
        let _ = self.queue.borrow_mut().push_back(Err(error));
    }

    /// Events not yet consumed.
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    /// Number of `read_key` calls so far.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl InputSource for MockInput {
    fn poll(&mut self) -> Result<Vec<Key>, InputError> {
        let mut queue = self.queue.borrow_mut();
        let mut keys = Vec::new();
        while let Some(event) = queue.pop_front() {
            match event {
                Ok(key) => keys.push(key),
                Err(err) if keys.is_empty() => return Err(err),
                Err(_) => break,
            }
        }
        Ok(keys)
    }

    fn read_key(&mut self) -> Result<Option<Key>, InputError> {
        self.reads.set(self.reads.get().saturating_add(1));
        self.queue.borrow_mut().pop_front().transpose()
    }
}

// ── Clock ────────────────────────────────────────────────────────────────────

/// Clock whose time only moves when told to (or when slept on).
#[derive(Clone, Default)]
pub struct ScriptedClock {
    now: Rc<Cell<Ticks>>,
    sleeps: Rc<RefCell<Vec<u32>>>,
    frozen: bool,
}

impl ScriptedClock {
    /// Start at tick `start`.
    pub fn new(start: Ticks) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
            ..Self::default()
        }
    }

    /// Like [`ScriptedClock::new`], but `sleep_ms` does not advance time.
    pub fn frozen(start: Ticks) -> Self {
        Self {
            frozen: true,
            ..Self::new(start)
        }
    }

    /// Jump to an absolute tick.
    pub fn set(&self, t: Ticks) {
        self.now.set(t);
    }

    /// Move time forward by `ms`, wrapping at the tick period.
    pub fn advance(&self, ms: u32) {
        let delta = i32::try_from(ms).unwrap_or(i32::MAX);
        self.now.set(ticks_add(self.now.get(), delta));
    }

    /// Every `sleep_ms` argument seen so far.
    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

impl ClockSource for ScriptedClock {
    fn sleep_ms(&mut self, ms: u32) {
        self.sleeps.borrow_mut().push(ms);
        if !self.frozen {
            self.advance(ms);
        }
    }

    fn ticks_ms(&self) -> Ticks {
        self.now.get()
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Map-backed blob store. Clones share contents.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    blobs: Rc<RefCell<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.blobs.borrow().keys().cloned().collect()
    }
}

impl StorageBackend for MemoryStorage {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        self.blobs
            .borrow()
            .get(path)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        if path.is_empty() {
            return Err(StorageError::InvalidPath);
        }
        self.blobs.borrow_mut().insert(String::from(path), data.to_vec());
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        self.blobs.borrow().contains_key(path)
    }

    fn remove(&mut self, path: &str) -> Result<(), StorageError> {
        self.blobs.borrow_mut().remove(path);
        Ok(())
    }
}

// ── Backlight ────────────────────────────────────────────────────────────────

/// Records the last color set.
#[derive(Clone, Default)]
pub struct MockBacklight {
    last: Rc<Cell<Option<Rgbw>>>,
    fail: bool,
}

impl MockBacklight {
    /// Fresh backlight with nothing applied yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Backlight whose every call fails.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    /// Last applied color.
    pub fn last(&self) -> Option<Rgbw> {
        self.last.get()
    }
}

impl BacklightController for MockBacklight {
    fn set_backlight(&mut self, color: Rgbw) -> Result<(), BacklightError> {
        if self.fail {
            return Err(BacklightError::Pwm);
        }
        self.last.set(Some(color));
        Ok(())
    }
}

// ── Bundle ───────────────────────────────────────────────────────────────────

/// Handles onto a mock [`Hal`] for scripting and inspection.
#[derive(Clone)]
pub struct MockHandles {
    /// Keypad script
    pub input: MockInput,
    /// Clock control
    pub clock: ScriptedClock,
    /// Stored blobs
    pub storage: MemoryStorage,
    /// Backlight log
    pub backlight: MockBacklight,
    /// Successful display flushes
    pub flushes: Rc<Cell<usize>>,
}

/// Build a `Hal` of mocks around `panel`, clock starting at `start`.
pub fn mock_hal(panel: MockPanel, start: Ticks) -> (Hal, MockHandles) {
    let handles = MockHandles {
        input: MockInput::new(),
        clock: ScriptedClock::new(start),
        storage: MemoryStorage::new(),
        backlight: MockBacklight::new(),
        flushes: panel.flush_counter(),
    };
    let hal = Hal::new(
        Box::new(PanelDisplay::new(panel)),
        Box::new(handles.input.clone()),
        Box::new(handles.clock.clone()),
        Box::new(handles.storage.clone()),
        Box::new(handles.backlight.clone()),
    );
    (hal, handles)
}
