//! Property-based tests for the flash slot table.
//! Any sequence of writes, overwrites and removals must read back like a map,
//! and survive remounting the same flash.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::arithmetic_side_effects)]

use std::collections::BTreeMap;

use embedded_storage::{ReadStorage, Storage};
use firmware::storage::{FlashStorage, SLOT_SIZE};
use platform::{StorageBackend, StorageError};
use proptest::prelude::*;

const SLOTS: usize = 4;

/// Erased RAM standing in for a NOR region.
struct RamFlash(Vec<u8>);

#[derive(Debug)]
struct OutOfRange;

impl RamFlash {
    fn span(&self, offset: u32, len: usize) -> Result<std::ops::Range<usize>, OutOfRange> {
        let start = usize::try_from(offset).map_err(|_| OutOfRange)?;
        let end = start.checked_add(len).ok_or(OutOfRange)?;
        if end > self.0.len() {
            return Err(OutOfRange);
        }
        Ok(start..end)
    }
}

impl ReadStorage for RamFlash {
    type Error = OutOfRange;

    fn read(&mut self, offset: u32, bytes: &mut [u8]) -> Result<(), Self::Error> {
        let span = self.span(offset, bytes.len())?;
        bytes.copy_from_slice(&self.0[span]);
        Ok(())
    }

    fn capacity(&self) -> usize {
        self.0.len()
    }
}

impl Storage for RamFlash {
    fn write(&mut self, offset: u32, bytes: &[u8]) -> Result<(), Self::Error> {
        let span = self.span(offset, bytes.len())?;
        self.0[span].copy_from_slice(bytes);
        Ok(())
    }
}

#[derive(Debug, Clone)]
enum Op {
    Write(usize, Vec<u8>),
    Remove(usize),
    Read(usize),
}

/// More names than slots, so the table fills up.
const NAMES: [&str; 6] = ["memos", "todo", "a", "settings/led", "x1", "scores"];

fn op() -> impl Strategy<Value = Op> {
    let name = 0..NAMES.len();
    prop_oneof![
        3 => (name.clone(), proptest::collection::vec(any::<u8>(), 0..96))
            .prop_map(|(n, data)| Op::Write(n, data)),
        1 => name.clone().prop_map(Op::Remove),
        2 => name.prop_map(Op::Read),
    ]
}

proptest! {
    #[test]
    fn slot_table_behaves_like_a_map(ops in proptest::collection::vec(op(), 1..40)) {
        let mut store = FlashStorage::new(RamFlash(vec![0xFF; SLOTS * SLOT_SIZE]));
        let mut model: BTreeMap<&str, Vec<u8>> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Write(n, data) => {
                    let path = NAMES[n];
                    let result = store.write(path, &data);
                    if model.contains_key(path) || model.len() < SLOTS {
                        prop_assert_eq!(result, Ok(()));
                        model.insert(path, data);
                    } else {
                        prop_assert_eq!(result, Err(StorageError::NoSpace));
                    }
                }
                Op::Remove(n) => {
                    prop_assert_eq!(store.remove(NAMES[n]), Ok(()));
                    model.remove(NAMES[n]);
                }
                Op::Read(n) => {
                    let expected = model.get(NAMES[n]).cloned().ok_or(StorageError::NotFound);
                    prop_assert_eq!(store.read(NAMES[n]), expected);
                }
            }
            for path in NAMES {
                prop_assert_eq!(store.exists(path), model.contains_key(path), "{}", path);
            }
        }

        let mut remounted = FlashStorage::new(store.release());
        for path in NAMES {
            let expected = model.get(path).cloned().ok_or(StorageError::NotFound);
            prop_assert_eq!(remounted.read(path), expected);
        }
    }
}
