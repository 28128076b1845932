//! Keypad input abstraction

use alloc::vec::Vec;

use crate::error::InputError;
use crate::key::Key;

/// Non-blocking key source.
///
/// Both calls return immediately. Errors are transient: the caller may treat
/// them as "no key" and try again next iteration.
pub trait InputSource {
    /// All key-down events that arrived since the previous call, oldest first.
    ///
    /// An error after some keys were read ends the drain and returns those
    /// keys; `Err` means nothing was read.
    fn poll(&mut self) -> Result<Vec<Key>, InputError>;

    /// The oldest pending key, or `None` if nothing is waiting.
    fn read_key(&mut self) -> Result<Option<Key>, InputError>;
}

impl<I: InputSource + ?Sized> InputSource for &mut I {
    fn poll(&mut self) -> Result<Vec<Key>, InputError> {
        (**self).poll()
    }

    fn read_key(&mut self) -> Result<Option<Key>, InputError> {
        (**self).read_key()
    }
}
