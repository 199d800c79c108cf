// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

// Core modules
pub mod errors;
mod macros;
use macros::blockio_impl_primitive_rw;

#[cfg(feature = "alloc")]
pub mod journal;

// Backend modules
#[cfg(feature = "mem")]
mod mem;

#[cfg(feature = "std")]
mod std_io;

// Prelude re-exports (central entrypoint)
pub mod prelude {
    pub use super::BlockIO;
    pub use super::BlockIOExt;
    pub use super::BlockIOStructExt;
    pub use super::errors::*;

    #[cfg(feature = "alloc")]
    pub use super::journal::JournalIO;

    #[cfg(feature = "mem")]
    pub use super::mem::MemBlockIO;

    #[cfg(feature = "std")]
    pub use super::std_io::StdBlockIO;
}

// Internal use
use errors::*;

// Constants

/// Size of the internal scratch buffer used by chunked and streamed operations.
/// 4 KiB matches the largest common sector size and is safe for no_std stacks.
pub const BLOCK_BUF_SIZE: usize = 4096;

// Traits

/// Block IO abstraction trait.
///
/// Allows read/write/flush at absolute byte offsets.
/// Implementations may target RAM, regular files or block devices.
pub trait BlockIO {
    /// Writes `data` at `offset` (absolute).
    fn write_at(&mut self, offset: u64, data: &[u8]) -> BlockIOResult;

    /// Reads `buf.len()` bytes into `buf` from `offset` (absolute).
    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> BlockIOResult;

    /// Flushes any buffered data (may be a no-op).
    fn flush(&mut self) -> BlockIOResult;

    /// Copies `len` bytes from `src` at `src_offset` into this IO at `dest_offset`.
    ///
    /// The default implementation goes through a stack buffer (double copy).
    /// Backends that own their storage (like `MemBlockIO`) override this to
    /// read straight from `src` into place.
    fn copy_from(
        &mut self,
        src: &mut dyn BlockIO,
        src_offset: u64,
        dest_offset: u64,
        mut len: u64,
    ) -> BlockIOResult {
        let mut buf = [0u8; BLOCK_BUF_SIZE];
        let mut s_off = src_offset;
        let mut d_off = dest_offset;

        while len > 0 {
            let to_process = len.min(BLOCK_BUF_SIZE as u64) as usize;
            src.read_at(s_off, &mut buf[..to_process])?;
            self.write_at(d_off, &buf[..to_process])?;

            len -= to_process as u64;
            s_off += to_process as u64;
            d_off += to_process as u64;
        }
        Ok(())
    }
}

/// Extension helpers for BlockIO.
///
/// - batched fixed-size record scans
/// - little-endian primitive helpers (`read_u16_at`, `write_u32_at`, ...)
pub trait BlockIOExt: BlockIO {
    /// Reads `count` consecutive `N`-byte records starting at `offset`,
    /// handing each to `f` until it returns `false`.
    ///
    /// Records are fetched `BLOCK_BUF_SIZE / N` at a time, so scanning a
    /// directory region costs one read per block instead of one per entry.
    fn scan_records<const N: usize, F>(&mut self, offset: u64, count: usize, mut f: F) -> BlockIOResult
    where
        F: FnMut(usize, &[u8; N]) -> bool,
    {
        assert!(N > 0 && N <= BLOCK_BUF_SIZE, "record size must fit the scratch buffer");
        let per_block = BLOCK_BUF_SIZE / N;
        let mut buf = [0u8; BLOCK_BUF_SIZE];

        let mut index = 0;
        let mut off = offset;
        while index < count {
            let batch = (count - index).min(per_block);
            let bytes = batch * N;
            self.read_at(off, &mut buf[..bytes])?;

            for rec in buf[..bytes].chunks_exact(N) {
                let mut record = [0u8; N];
                record.copy_from_slice(rec);
                if !f(index, &record) {
                    return Ok(());
                }
                index += 1;
            }
            off += bytes as u64;
        }
        Ok(())
    }

    // read_u16_at / write_u16_at / read_u32_at / write_u32_at
    blockio_impl_primitive_rw!(u16, u32);
}

impl<T: BlockIO + ?Sized> BlockIOExt for T {}

/// Extension trait for reading and writing structs using zerocopy.
///
/// Requires the struct to implement the zerocopy conversion traits.
pub trait BlockIOStructExt: BlockIO {
    /// Reads a struct of type `T` from the given offset.
    fn read_struct<T: zerocopy::FromBytes + zerocopy::KnownLayout + zerocopy::Immutable>(
        &mut self,
        offset: u64,
    ) -> BlockIOResult<T> {
        let size = core::mem::size_of::<T>();
        if size > BLOCK_BUF_SIZE {
            return Err(BlockIOError::Other("read_struct: type too large"));
        }
        let mut buf = [0u8; BLOCK_BUF_SIZE];
        self.read_at(offset, &mut buf[..size])?;
        T::read_from_bytes(&buf[..size]).map_err(|_| BlockIOError::Other("read_struct failed"))
    }

    /// Writes a struct of type `T` at the given offset.
    fn write_struct<T: zerocopy::IntoBytes + zerocopy::Immutable>(
        &mut self,
        offset: u64,
        val: &T,
    ) -> BlockIOResult {
        self.write_at(offset, val.as_bytes())
    }
}

impl<T: BlockIO + ?Sized> BlockIOStructExt for T {}
