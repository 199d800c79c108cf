// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use crate::{BlockIO, BlockIOResult};

/// Pre-image of one written range.
#[derive(Debug, Clone)]
struct UndoRecord {
    offset: u64,
    before: Vec<u8>,
}

/// Transparent wrapper recording the bytes each write overwrites.
///
/// Every `write_at` first reads the current content of the target range and
/// keeps it. `rollback` replays those pre-images newest-first, which restores
/// the backing store even when ranges overlap.
pub struct JournalIO<'a, IO: BlockIO + ?Sized> {
    inner: &'a mut IO,
    undo: Vec<UndoRecord>,
}

impl<'a, IO: BlockIO + ?Sized> JournalIO<'a, IO> {
    #[inline]
    pub fn new(inner: &'a mut IO) -> Self {
        Self {
            inner,
            undo: Vec::new(),
        }
    }

    /// Number of writes recorded so far.
    #[inline]
    pub fn recorded(&self) -> usize {
        self.undo.len()
    }

    /// Restores every recorded range, newest first, then flushes.
    ///
    /// Stops at the first failing write; the journal keeps the records that
    /// were not replayed.
    pub fn rollback(&mut self) -> BlockIOResult {
        while let Some(record) = self.undo.last() {
            self.inner.write_at(record.offset, &record.before)?;
            self.undo.pop();
        }
        self.inner.flush()
    }

    /// Drops the journal, keeping all writes.
    #[inline]
    pub fn commit(mut self) -> &'a mut IO {
        self.undo.clear();
        self.inner
    }
}

impl<'a, IO: BlockIO + ?Sized> BlockIO for JournalIO<'a, IO> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> BlockIOResult {
        let mut before = vec![0u8; data.len()];
        self.inner.read_at(offset, &mut before)?;
        self.undo.push(UndoRecord { offset, before });
        self.inner.write_at(offset, data)
    }

    #[inline]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> BlockIOResult {
        self.inner.read_at(offset, buf)
    }

    #[inline]
    fn flush(&mut self) -> BlockIOResult {
        self.inner.flush()
    }
}
