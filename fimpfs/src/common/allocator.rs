// SPDX-License-Identifier: MIT

pub use crate::common::error::{FsAllocatorError, FsAllocatorResult};

/// Trait implemented by all FS allocation handles (cluster chain, directory slot, ...).
pub trait FsHandle {}

/// Trait for discovering free logical units in a filesystem.
///
/// Implementations only *find* units; nothing is reserved on disk until the
/// caller commits the handle. Two calls without an intervening commit may
/// therefore return the same units.
pub trait FsAllocator<Handle: FsHandle + Sized + Clone> {
    /// Find `count` free units, in allocation order.
    fn allocate_chain(&mut self, count: usize) -> FsAllocatorResult<Handle>;
}
