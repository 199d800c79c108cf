// SPDX-License-Identifier: MIT

use crate::{BlockIO, BlockIOError, BlockIOResult};

/// In-memory implementation of `BlockIO`.
///
/// Useful for tests, payload buffers and RAM-backed images.
#[derive(Debug)]
pub struct MemBlockIO<'a> {
    buffer: &'a mut [u8],
}

impl<'a> MemBlockIO<'a> {
    #[inline]
    pub fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    fn check_bounds(&self, offset: u64, len: usize) -> BlockIOResult<usize> {
        let end = offset
            .checked_add(len as u64)
            .ok_or(BlockIOError::OutOfBounds)?;
        if end > self.buffer.len() as u64 {
            return Err(BlockIOError::OutOfBounds);
        }
        Ok(offset as usize)
    }
}

impl<'a> BlockIO for MemBlockIO<'a> {
    #[inline(always)]
    fn write_at(&mut self, offset: u64, data: &[u8]) -> BlockIOResult {
        let start = self.check_bounds(offset, data.len())?;
        self.buffer[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }

    #[inline(always)]
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> BlockIOResult {
        let start = self.check_bounds(offset, buf.len())?;
        buf.copy_from_slice(&self.buffer[start..start + buf.len()]);
        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> BlockIOResult {
        Ok(())
    }

    /// Single-copy: reads from `src` directly into the destination range.
    fn copy_from(
        &mut self,
        src: &mut dyn BlockIO,
        src_offset: u64,
        dest_offset: u64,
        len: u64,
    ) -> BlockIOResult {
        let len = usize::try_from(len).map_err(|_| BlockIOError::OutOfBounds)?;
        let start = self.check_bounds(dest_offset, len)?;
        src.read_at(src_offset, &mut self.buffer[start..start + len])
    }
}
