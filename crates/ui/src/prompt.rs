//! Modal one-line text entry.

use alloc::string::String;

use platform::{DisplayError, Key};

use crate::context::Context;
use crate::widgets::{clear_screen, header};

/// Length limit used by most callers.
pub const DEFAULT_PROMPT_LEN: usize = 24;

/// Idle pause between keypad reads.
pub const PROMPT_IDLE_MS: u32 = 10;

/// Ask for a line of text.
///
/// Runs its own loop on `ctx` until Enter (returns the text) or Esc
/// (returns `None`). Backspace and Delete erase the last character;
/// printable ASCII is appended while shorter than `max_len`. A closed host
/// window also returns `None`.
pub fn prompt_input(ctx: &mut Context<'_>, label: &str, max_len: usize) -> Option<String> {
    let mut text = String::new();
    loop {
        clear_screen(ctx.display);
        header(ctx.display, label);
        ctx.display.text(&text, 0, 16, None, 1);
        if let Err(DisplayError::Closed) = ctx.display.update() {
            return None;
        }

        let Some(key) = ctx.read_key() else {
            ctx.clock.sleep_ms(PROMPT_IDLE_MS);
            continue;
        };

        match key {
            Key::ENTER => return Some(text),
            Key::ESCAPE => return None,
            k if k.is_erase() => {
                text.pop();
            }
            k => {
                if let Some(ch) = k.as_char() {
                    if text.len() < max_len {
                        text.push(ch);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use platform::mocks::{mock_hal, MockPanel};

    fn typed(s: &str) -> alloc::vec::Vec<Key> {
        s.bytes().map(Key::new).collect()
    }

    #[test]
    fn enter_returns_text() {
        let (mut hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
        handles.input.push_keys(&typed("hi"));
        handles.input.push_key(Key::ENTER);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(prompt_input(&mut ctx, "Name", 24).as_deref(), Some("hi"));
    }

    #[test]
    fn escape_cancels() {
        let (mut hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
        handles.input.push_keys(&typed("abc"));
        handles.input.push_key(Key::ESCAPE);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(prompt_input(&mut ctx, "Name", 24), None);
    }

    #[test]
    fn erase_and_limit() {
        let (mut hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
        handles.input.push_keys(&typed("abcd"));
        handles.input.push_keys(&[Key::BACKSPACE, Key::new(b'x'), Key::DELETE, Key::DELETE]);
        handles.input.push_keys(&typed("zz"));
        handles.input.push_keys(&[Key::LEFT, Key::ENTER]);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(prompt_input(&mut ctx, "Memo", 3).as_deref(), Some("azz"));
    }

    #[test]
    fn idle_reads_sleep() {
        let (mut hal, handles) = mock_hal(MockPanel::new(128, 64), 0);
        handles.input.push_error(platform::InputError::Bus);
        handles.input.push_key(Key::ENTER);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(prompt_input(&mut ctx, "x", 4).as_deref(), Some(""));
        assert_eq!(handles.clock.sleeps(), [PROMPT_IDLE_MS]);
    }

    #[test]
    fn closed_window_gives_up() {
        let (mut hal, _handles) = mock_hal(MockPanel::new(32, 16).closing_after(0), 0);
        let mut ctx = Context::new(&mut hal);
        assert_eq!(prompt_input(&mut ctx, "x", 4), None);
    }
}
