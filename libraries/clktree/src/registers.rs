// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Register access layer.
//!
//! Every hardware access of a controller goes through a [`RegisterWindow`]:
//! a fixed-size region of 32-bit registers addressed by byte offset. The
//! controller owns its window and only touches it with the controller lock
//! held, so implementations do not need to be `Sync`.
//!
//! Two windows are provided. [`MmioWindow`] performs volatile accesses on a
//! mapped device region. [`InMemoryWindow`] keeps the registers in memory and
//! journals every access, which is how the engine is exercised without
//! hardware.

use core::ptr::NonNull;
use std::cell::RefCell;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{InMemoryRegister, ReadWrite};

/// A window of 32-bit registers addressed by byte offset.
///
/// Offsets must be word aligned and lie inside the window. Anything else is a
/// defect in the configuration table and implementations panic.
pub trait RegisterWindow {
    /// Size of the window in bytes.
    fn len(&self) -> usize;

    fn read(&self, offset: u32) -> u32;

    fn write(&self, offset: u32, value: u32);

    /// Read-modify-write touching only the bits set in `mask`.
    fn modify(&self, offset: u32, mask: u32, value: u32) {
        let word = self.read(offset);
        self.write(offset, (word & !mask) | (value & mask));
    }
}

/// Converts a byte offset into a register index, panicking on offsets the
/// window cannot address.
fn word_index(offset: u32, len: usize) -> usize {
    let offset = offset as usize;
    if offset % 4 != 0 || offset + 4 > len {
        panic!(
            "register offset {:#06x} outside {:#x}-byte window",
            offset, len
        );
    }
    offset / 4
}

/// Memory mapped register window.
pub struct MmioWindow {
    base: NonNull<ReadWrite<u32>>,
    len: usize,
}

// The window is only dereferenced with the controller lock held.
unsafe impl Send for MmioWindow {}

impl MmioWindow {
    /// Create a window over `len` bytes of device memory starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be word aligned and point to `len` bytes of mapped device
    /// registers that stay mapped for the lifetime of the window. No other
    /// window may cover the same registers.
    pub unsafe fn new(base: *mut u32, len: usize) -> MmioWindow {
        let base = match NonNull::new(base.cast::<ReadWrite<u32>>()) {
            Some(base) => base,
            None => panic!("MMIO window base address is null"),
        };
        MmioWindow { base, len }
    }

    fn register(&self, offset: u32) -> &ReadWrite<u32> {
        let index = word_index(offset, self.len);
        // SAFETY: index is inside the mapped region checked by `word_index`.
        unsafe { &*self.base.as_ptr().add(index) }
    }
}

impl RegisterWindow for MmioWindow {
    fn len(&self) -> usize {
        self.len
    }

    fn read(&self, offset: u32) -> u32 {
        self.register(offset).get()
    }

    fn write(&self, offset: u32, value: u32) {
        self.register(offset).set(value);
    }
}

/// One access recorded by an [`InMemoryWindow`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    Read { offset: u32, value: u32 },
    Write { offset: u32, value: u32 },
}

/// Register window backed by memory, recording every access.
pub struct InMemoryWindow {
    words: Vec<InMemoryRegister<u32>>,
    journal: RefCell<Vec<Access>>,
}

impl InMemoryWindow {
    /// Create a zeroed window of `len` bytes.
    pub fn new(len: usize) -> InMemoryWindow {
        InMemoryWindow {
            words: (0..len / 4).map(|_| InMemoryRegister::new(0)).collect(),
            journal: RefCell::new(Vec::new()),
        }
    }

    /// Set a register as hardware or firmware would have left it. Not
    /// journaled.
    pub fn preset(&self, offset: u32, value: u32) {
        self.words[word_index(offset, self.len())].set(value);
    }

    /// Read a register without journaling the access.
    pub fn peek(&self, offset: u32) -> u32 {
        self.words[word_index(offset, self.len())].get()
    }

    pub fn journal(&self) -> Vec<Access> {
        self.journal.borrow().clone()
    }

    /// Only the writes of the journal, in order, as `(offset, value)`.
    pub fn writes(&self) -> Vec<(u32, u32)> {
        self.journal
            .borrow()
            .iter()
            .filter_map(|access| match *access {
                Access::Write { offset, value } => Some((offset, value)),
                Access::Read { .. } => None,
            })
            .collect()
    }

    pub fn clear_journal(&self) {
        self.journal.borrow_mut().clear();
    }
}

impl RegisterWindow for InMemoryWindow {
    fn len(&self) -> usize {
        self.words.len() * 4
    }

    fn read(&self, offset: u32) -> u32 {
        let value = self.words[word_index(offset, self.len())].get();
        self.journal
            .borrow_mut()
            .push(Access::Read { offset, value });
        value
    }

    fn write(&self, offset: u32, value: u32) {
        self.words[word_index(offset, self.len())].set(value);
        self.journal
            .borrow_mut()
            .push(Access::Write { offset, value });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modify_only_touches_masked_bits() {
        let window = InMemoryWindow::new(0x10);
        window.preset(0x4, 0xffff_0000);

        window.modify(0x4, 0x0000_ff0f, 0x1234_5678);

        assert_eq!(window.peek(0x4), 0xffff_5608);
        assert_eq!(
            window.journal(),
            vec![
                Access::Read {
                    offset: 0x4,
                    value: 0xffff_0000
                },
                Access::Write {
                    offset: 0x4,
                    value: 0xffff_5608
                },
            ]
        );
    }

    #[test]
    fn preset_and_peek_are_not_journaled() {
        let window = InMemoryWindow::new(0x8);
        window.preset(0x0, 7);
        assert_eq!(window.peek(0x0), 7);
        assert!(window.journal().is_empty());

        window.write(0x4, 9);
        window.clear_journal();
        assert!(window.writes().is_empty());
        assert_eq!(window.read(0x4), 9);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn offset_past_the_end_panics() {
        let window = InMemoryWindow::new(0x10);
        window.read(0x10);
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn misaligned_offset_panics() {
        let window = InMemoryWindow::new(0x10);
        window.write(0x2, 1);
    }

    #[test]
    fn mmio_window_accesses_backing_memory() {
        let mut backing = [0u32; 4];
        let window = unsafe { MmioWindow::new(backing.as_mut_ptr(), 16) };

        window.write(0x8, 0xa5a5_0000);
        window.modify(0x8, 0xff, 0x3c);
        assert_eq!(window.read(0x8), 0xa5a5_003c);
        assert_eq!(window.len(), 16);
        drop(window);
        assert_eq!(backing[2], 0xa5a5_003c);
    }
}
