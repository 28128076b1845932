//! Keyboard input for the desktop simulator.
//!
//! The winit window pushes mapped keys into a [`KeyQueue`]; [`SimInput`]
//! drains it. Headless tests feed the same queue through a [`KeyInjector`].
//!
//! # Key mapping
//!
//! | Host key                  | Keypad code            |
//! |---------------------------|------------------------|
//! | ← ↑ ↓ →                   | `0xB4` `0xB5` `0xB6` `0xB7` |
//! | Enter                     | 13                     |
//! | Backspace / Delete        | 8 / 127                |
//! | Esc, Tab, Space           | 27, 9, 32              |
//! | F1–F6                     | `0xF1`–`0xF6`          |
//! | A–Z                       | `a`–`z`, `A`–`Z` with Shift |
//! | 0–9 `. , / ; ' [ ] \ - =` | the character itself   |

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use platform::{InputError, InputSource, Key};
use winit::keyboard::KeyCode;

/// Maximum number of unread keys buffered; newer keys are dropped when full.
pub const QUEUE_CAP: usize = 64;

/// Shared FIFO between the window (producer) and [`SimInput`] (consumer).
#[derive(Clone, Default)]
pub struct KeyQueue {
    keys: Rc<RefCell<VecDeque<Key>>>,
}

impl KeyQueue {
    /// Empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a key. Silently drops it if the queue is full.
    pub fn push(&self, key: Key) {
        let mut keys = self.keys.borrow_mut();
        if keys.len() < QUEUE_CAP {
            keys.push_back(key);
        }
    }

    /// Oldest key, if any.
    pub fn pop(&self) -> Option<Key> {
        self.keys.borrow_mut().pop_front()
    }

    /// Everything queued, oldest first.
    pub fn drain(&self) -> Vec<Key> {
        self.keys.borrow_mut().drain(..).collect()
    }

    /// Number of queued keys.
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// True when nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }
}

/// Programmatic key source for headless runs and tests.
#[derive(Clone)]
pub struct KeyInjector {
    queue: KeyQueue,
}

impl KeyInjector {
    pub(crate) fn new(queue: KeyQueue) -> Self {
        Self { queue }
    }

    /// Inject one keystroke.
    pub fn press(&self, key: Key) {
        self.queue.push(key);
    }

    /// Inject each byte of `text` as a keystroke.
    pub fn type_text(&self, text: &str) {
        for b in text.bytes() {
            if let Some(k) = Key::from_byte(b) {
                self.queue.push(k);
            }
        }
    }
}

/// [`InputSource`] backed by the host keyboard.
pub struct SimInput {
    queue: KeyQueue,
    #[cfg(not(feature = "headless"))]
    window: Option<Rc<RefCell<crate::window::Window>>>,
}

impl SimInput {
    /// Input fed only through the queue (no window events).
    pub fn detached(queue: KeyQueue) -> Self {
        Self {
            queue,
            #[cfg(not(feature = "headless"))]
            window: None,
        }
    }

    /// Input that pumps `window` events before reading the queue.
    #[cfg(not(feature = "headless"))]
    pub fn windowed(queue: KeyQueue, window: Rc<RefCell<crate::window::Window>>) -> Self {
        Self {
            queue,
            window: Some(window),
        }
    }

    fn pump(&mut self) {
        #[cfg(not(feature = "headless"))]
        if let Some(window) = &self.window {
            window.borrow_mut().pump();
        }
    }
}

impl InputSource for SimInput {
    fn poll(&mut self) -> Result<Vec<Key>, InputError> {
        self.pump();
        Ok(self.queue.drain())
    }

    fn read_key(&mut self) -> Result<Option<Key>, InputError> {
        self.pump();
        Ok(self.queue.pop())
    }
}

fn letter(code: KeyCode) -> Option<u8> {
    let c = match code {
        KeyCode::KeyA => b'a',
        KeyCode::KeyB => b'b',
        KeyCode::KeyC => b'c',
        KeyCode::KeyD => b'd',
        KeyCode::KeyE => b'e',
        KeyCode::KeyF => b'f',
        KeyCode::KeyG => b'g',
        KeyCode::KeyH => b'h',
        KeyCode::KeyI => b'i',
        KeyCode::KeyJ => b'j',
        KeyCode::KeyK => b'k',
        KeyCode::KeyL => b'l',
        KeyCode::KeyM => b'm',
        KeyCode::KeyN => b'n',
        KeyCode::KeyO => b'o',
        KeyCode::KeyP => b'p',
        KeyCode::KeyQ => b'q',
        KeyCode::KeyR => b'r',
        KeyCode::KeyS => b's',
        KeyCode::KeyT => b't',
        KeyCode::KeyU => b'u',
        KeyCode::KeyV => b'v',
        KeyCode::KeyW => b'w',
        KeyCode::KeyX => b'x',
        KeyCode::KeyY => b'y',
        KeyCode::KeyZ => b'z',
        _ => return None,
    };
    Some(c)
}

fn punctuation(code: KeyCode) -> Option<u8> {
    let c = match code {
        KeyCode::Digit0 => b'0',
        KeyCode::Digit1 => b'1',
        KeyCode::Digit2 => b'2',
        KeyCode::Digit3 => b'3',
        KeyCode::Digit4 => b'4',
        KeyCode::Digit5 => b'5',
        KeyCode::Digit6 => b'6',
        KeyCode::Digit7 => b'7',
        KeyCode::Digit8 => b'8',
        KeyCode::Digit9 => b'9',
        KeyCode::Period => b'.',
        KeyCode::Comma => b',',
        KeyCode::Slash => b'/',
        KeyCode::Semicolon => b';',
        KeyCode::Quote => b'\'',
        KeyCode::BracketLeft => b'[',
        KeyCode::BracketRight => b']',
        KeyCode::Backslash => b'\\',
        KeyCode::Minus => b'-',
        KeyCode::Equal => b'=',
        _ => return None,
    };
    Some(c)
}

/// Map a physical host key to the keypad code space.
///
/// Returns `None` for keys that have no keypad equivalent.
pub fn map_key(code: KeyCode, shift: bool) -> Option<Key> {
    let key = match code {
        KeyCode::ArrowLeft => Key::LEFT,
        KeyCode::ArrowUp => Key::UP,
        KeyCode::ArrowDown => Key::DOWN,
        KeyCode::ArrowRight => Key::RIGHT,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::ENTER,
        KeyCode::Backspace => Key::BACKSPACE,
        KeyCode::Delete => Key::DELETE,
        KeyCode::Escape => Key::ESCAPE,
        KeyCode::Tab => Key::TAB,
        KeyCode::Space => Key::SPACE,
        KeyCode::F1 => Key::F1,
        KeyCode::F2 => Key::F2,
        KeyCode::F3 => Key::F3,
        KeyCode::F4 => Key::F4,
        KeyCode::F5 => Key::F5,
        KeyCode::F6 => Key::F6,
        other => {
            if let Some(c) = letter(other) {
                return Some(Key::new(if shift { c.to_ascii_uppercase() } else { c }));
            }
            return punctuation(other).map(Key::new);
        }
    };
    Some(key)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn arrows_map_to_extended_codes() {
        assert_eq!(map_key(KeyCode::ArrowLeft, false), Some(Key::new(0xB4)));
        assert_eq!(map_key(KeyCode::ArrowUp, false), Some(Key::new(0xB5)));
        assert_eq!(map_key(KeyCode::ArrowDown, false), Some(Key::new(0xB6)));
        assert_eq!(map_key(KeyCode::ArrowRight, false), Some(Key::new(0xB7)));
    }

    #[test]
    fn control_keys() {
        assert_eq!(map_key(KeyCode::Enter, false), Some(Key::new(13)));
        assert_eq!(map_key(KeyCode::Backspace, false), Some(Key::new(8)));
        assert_eq!(map_key(KeyCode::Escape, false), Some(Key::new(27)));
        assert_eq!(map_key(KeyCode::Tab, false), Some(Key::new(9)));
        assert_eq!(map_key(KeyCode::Space, true), Some(Key::new(32)));
        assert_eq!(map_key(KeyCode::F3, false), Some(Key::new(0xF3)));
    }

    #[test]
    fn shift_uppercases_letters_only() {
        assert_eq!(map_key(KeyCode::KeyQ, false), Some(Key::new(b'q')));
        assert_eq!(map_key(KeyCode::KeyQ, true), Some(Key::new(b'Q')));
        assert_eq!(map_key(KeyCode::Digit7, true), Some(Key::new(b'7')));
        assert_eq!(map_key(KeyCode::Backslash, false), Some(Key::new(b'\\')));
    }

    #[test]
    fn unmapped_keys_return_none() {
        assert_eq!(map_key(KeyCode::F11, false), None);
        assert_eq!(map_key(KeyCode::ShiftLeft, false), None);
        assert_eq!(map_key(KeyCode::CapsLock, false), None);
    }

    #[test]
    fn queue_is_fifo() {
        let queue = KeyQueue::new();
        let mut input = SimInput::detached(queue.clone());
        let injector = KeyInjector::new(queue);
        injector.type_text("ab");
        assert_eq!(input.read_key().unwrap(), Some(Key::new(b'a')));
        assert_eq!(input.read_key().unwrap(), Some(Key::new(b'b')));
        assert_eq!(input.read_key().unwrap(), None);
    }

    #[test]
    fn queue_capacity_limit() {
        let queue = KeyQueue::new();
        for _ in 0..QUEUE_CAP + 10 {
            queue.push(Key::ENTER);
        }
        assert_eq!(queue.len(), QUEUE_CAP);
        let mut input = SimInput::detached(queue);
        assert_eq!(input.poll().unwrap().len(), QUEUE_CAP);
        assert_eq!(input.poll().unwrap().len(), 0);
    }
}
