//! Fixed-slot blob store over NOR flash.
//!
//! The flash region is split into [`SLOT_SIZE`] slots. Each slot holds one
//! named blob behind a small header:
//!
//! ```text
//! 0      4         5     8          12     16            48
//! +------+---------+-----+----------+------+-------------+---------+
//! | magic| name_len| pad | data_len | crc32| name[32]    | data... |
//! +------+---------+-----+----------+------+-------------+---------+
//! ```
//!
//! The CRC covers name and data. A write stores the data before the header,
//! so a torn write leaves either the old header invalidated or a header whose
//! CRC fails; both read back as missing or [`StorageError::Corrupt`].

// Slot offsets are bounded by the flash capacity, which fits in u32, and
// header field offsets are constants below SLOT_SIZE.
#![allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]

use alloc::vec;
use alloc::vec::Vec;

use embedded_storage::{ReadStorage, Storage};

use platform::{StorageBackend, StorageError};

/// Bytes per slot (one 4 KiB erase sector).
pub const SLOT_SIZE: usize = 4096;

/// Header length in front of the data.
pub const HEADER_SIZE: usize = 48;

/// Longest accepted path, in bytes.
pub const MAX_NAME_LEN: usize = 32;

/// Largest blob a slot can hold.
pub const MAX_DATA_LEN: usize = SLOT_SIZE - HEADER_SIZE;

/// "POKT"
const MAGIC: u32 = 0x504F_4B54;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Header {
    name_len: usize,
    data_len: usize,
    crc: u32,
    name: [u8; MAX_NAME_LEN],
}

impl Header {
    fn new(name: &[u8], data: &[u8]) -> Option<Self> {
        let mut padded = [0u8; MAX_NAME_LEN];
        padded.get_mut(..name.len())?.copy_from_slice(name);
        Some(Self {
            name_len: name.len(),
            data_len: data.len(),
            crc: checksum(name, data),
            name: padded,
        })
    }

    fn name(&self) -> &[u8] {
        self.name.get(..self.name_len).unwrap_or(&[])
    }

    fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let (magic, rest) = out.split_at_mut(4);
        magic.copy_from_slice(&MAGIC.to_le_bytes());
        let (len, rest) = rest.split_at_mut(4);
        len.copy_from_slice(&[self.name_len as u8, 0, 0, 0]);
        let (data_len, rest) = rest.split_at_mut(4);
        data_len.copy_from_slice(&(self.data_len as u32).to_le_bytes());
        let (crc, name) = rest.split_at_mut(4);
        crc.copy_from_slice(&self.crc.to_le_bytes());
        name.copy_from_slice(&self.name);
        out
    }

    /// `None` for a free slot (no magic) or a header that cannot be valid.
    fn decode(raw: &[u8; HEADER_SIZE]) -> Option<Self> {
        let word = |at: usize| -> Option<u32> {
            let bytes: [u8; 4] = raw.get(at..at + 4)?.try_into().ok()?;
            Some(u32::from_le_bytes(bytes))
        };
        if word(0)? != MAGIC {
            return None;
        }
        let name_len = usize::from(*raw.get(4)?);
        let data_len = word(8)? as usize;
        if name_len == 0 || name_len > MAX_NAME_LEN || data_len > MAX_DATA_LEN {
            return None;
        }
        let name: [u8; MAX_NAME_LEN] = raw.get(16..HEADER_SIZE)?.try_into().ok()?;
        Some(Self {
            name_len,
            data_len,
            crc: word(12)?,
            name,
        })
    }
}

fn checksum(name: &[u8], data: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(name);
    hasher.update(data);
    hasher.finalize()
}

fn validate_path(path: &str) -> Result<&[u8], StorageError> {
    let name = path.as_bytes();
    if name.is_empty() || name.len() > MAX_NAME_LEN {
        return Err(StorageError::InvalidPath);
    }
    Ok(name)
}

/// [`StorageBackend`] over any [`embedded_storage::Storage`] region.
pub struct FlashStorage<F> {
    flash: F,
    slots: usize,
}

impl<F: Storage> FlashStorage<F> {
    /// Use the whole region as slots. A trailing partial slot is ignored.
    pub fn new(flash: F) -> Self {
        let slots = flash.capacity() / SLOT_SIZE;
        tracing::info!(slots, "flash storage mounted");
        Self { flash, slots }
    }

    /// Number of slots (maximum number of stored blobs).
    pub fn slot_count(&self) -> usize {
        self.slots
    }

    /// Give the flash back.
    pub fn release(self) -> F {
        self.flash
    }

    fn slot_offset(slot: usize) -> u32 {
        (slot * SLOT_SIZE) as u32
    }

    fn read_header(&mut self, slot: usize) -> Result<Option<Header>, StorageError> {
        let mut raw = [0u8; HEADER_SIZE];
        self.flash
            .read(Self::slot_offset(slot), &mut raw)
            .map_err(|_| StorageError::Backend)?;
        Ok(Header::decode(&raw))
    }

    /// Slot holding `name`, plus the first free slot seen on the way.
    fn scan(
        &mut self,
        name: &[u8],
    ) -> Result<(Option<(usize, Header)>, Option<usize>), StorageError> {
        let mut free = None;
        for slot in 0..self.slots {
            match self.read_header(slot)? {
                Some(header) if header.name() == name => return Ok((Some((slot, header)), free)),
                Some(_) => {}
                None => {
                    free.get_or_insert(slot);
                }
            }
        }
        Ok((None, free))
    }

    fn invalidate(&mut self, slot: usize) -> Result<(), StorageError> {
        self.flash
            .write(Self::slot_offset(slot), &[0u8; 4])
            .map_err(|_| StorageError::Backend)
    }
}

impl<F: Storage> StorageBackend for FlashStorage<F> {
    fn read(&mut self, path: &str) -> Result<Vec<u8>, StorageError> {
        let name = validate_path(path)?;
        let (found, _) = self.scan(name)?;
        let (slot, header) = found.ok_or(StorageError::NotFound)?;

        let mut data = vec![0u8; header.data_len];
        self.flash
            .read(Self::slot_offset(slot) + HEADER_SIZE as u32, &mut data)
            .map_err(|_| StorageError::Backend)?;

        if checksum(name, &data) != header.crc {
            tracing::warn!(path, slot, "flash slot checksum mismatch");
            return Err(StorageError::Corrupt);
        }
        Ok(data)
    }

    fn write(&mut self, path: &str, data: &[u8]) -> Result<(), StorageError> {
        let name = validate_path(path)?;
        if data.len() > MAX_DATA_LEN {
            return Err(StorageError::TooLarge);
        }
        let header = Header::new(name, data).ok_or(StorageError::InvalidPath)?;

        let slot = match self.scan(name)? {
            (Some((slot, _)), _) => {
                self.invalidate(slot)?;
                slot
            }
            (None, Some(free)) => free,
            (None, None) => return Err(StorageError::NoSpace),
        };

        let base = Self::slot_offset(slot);
        self.flash
            .write(base + HEADER_SIZE as u32, data)
            .map_err(|_| StorageError::Backend)?;
        self.flash
            .write(base, &header.encode())
            .map_err(|_| StorageError::Backend)?;
        tracing::debug!(path, slot, len = data.len(), "flash blob written");
        Ok(())
    }

    fn exists(&mut self, path: &str) -> bool {
        let Ok(name) = validate_path(path) else {
            return false;
        };
        matches!(self.scan(name), Ok((Some(_), _)))
    }

    fn remove(&mut self, path: &str) -> Result<(), StorageError> {
        let name = validate_path(path)?;
        match self.scan(name)? {
            (Some((slot, _)), _) => self.invalidate(slot),
            (None, _) => Ok(()),
        }
    }
}
