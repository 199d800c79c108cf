// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

pub use crate::common::allocator::*;

use fimpio::prelude::*;

use crate::common::fat::{ClusterMeta, FIRST_CLUSTER};
use crate::fs::fat::{attr::FatAttributes, constant::*, meta::*, types::*};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatHandle {
    pub cluster_id: u32,
    pub cluster_chain: Vec<u32>,
}

impl FatHandle {
    pub fn from_chain(cluster_chain: Vec<u32>) -> Self {
        Self {
            cluster_id: cluster_chain.first().copied().unwrap_or_default(),
            cluster_chain,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cluster_chain.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cluster_chain.is_empty()
    }
}

impl FsHandle for FatHandle {}

/// Read-only free space discovery on a FAT12/16 volume.
///
/// Only the first FAT copy is consulted; copies are assumed identical.
pub struct FatAllocator<'a, IO: BlockIO + ?Sized> {
    io: &'a mut IO,
    meta: &'a FatMeta,
}

impl<'a, IO: BlockIO + ?Sized> FatAllocator<'a, IO> {
    pub fn new(io: &'a mut IO, meta: &'a FatMeta) -> Self {
        Self { io, meta }
    }

    /// Index of the first root directory slot that is never used or deleted.
    pub fn find_free_slot(&mut self) -> FsAllocatorResult<u16> {
        let mut found = None;
        self.io.scan_records::<FAT_DIR_ENTRY_SIZE, _>(
            self.meta.root_dir_offset,
            self.meta.root_entry_count as usize,
            |index, raw| {
                if is_free_marker(raw[0]) {
                    found = Some(index as u16);
                    return false;
                }
                true
            },
        )?;
        found.ok_or(FsAllocatorError::DirectoryFull)
    }

    /// Index of a live root entry already carrying `short_name`, if any.
    ///
    /// The scan ends at the first never-used slot; long-name fragments and
    /// volume labels are skipped.
    pub fn find_short_name(
        &mut self,
        short_name: &[u8; FAT_SFN_LEN],
    ) -> FsAllocatorResult<Option<u16>> {
        let mut found = None;
        self.io.scan_records::<FAT_DIR_ENTRY_SIZE, _>(
            self.meta.root_dir_offset,
            self.meta.root_entry_count as usize,
            |index, raw| match raw[0] {
                FAT_ENTRY_END_OF_DIR => false,
                FAT_ENTRY_DELETED => true,
                _ => {
                    let attr = FatAttributes::from_bits_retain(raw[11]);
                    let is_file = !attr.is_lfn() && !attr.contains(FatAttributes::VOLUME_ID);
                    if is_file && raw[..FAT_SFN_LEN] == short_name[..] {
                        found = Some(index as u16);
                        return false;
                    }
                    true
                }
            },
        )?;
        Ok(found)
    }

    /// Free clusters in the addressable range, counted in the first FAT copy.
    pub fn free_clusters(&mut self) -> FsAllocatorResult<u32> {
        let table = self.read_fat_span()?;
        let kind = self.meta.fat_kind();
        let free = (FIRST_CLUSTER..=self.meta.last_data_unit())
            .filter(|&c| kind.entry_in(&table, c) == Some(FAT_ENTRY_FREE))
            .count();
        Ok(free as u32)
    }

    fn read_fat_span(&mut self) -> FsAllocatorResult<Vec<u8>> {
        let mut table = vec![0u8; self.meta.fat_span_bytes() as usize];
        self.io.read_at(self.meta.fat_offset(0), &mut table)?;
        Ok(table)
    }
}

impl<'a, IO: BlockIO + ?Sized> FsAllocator<FatHandle> for FatAllocator<'a, IO> {
    /// First-fit: the lowest `count` free cluster numbers, ascending.
    fn allocate_chain(&mut self, count: usize) -> FsAllocatorResult<FatHandle> {
        let table = self.read_fat_span()?;
        let kind = self.meta.fat_kind();

        let chain: Vec<u32> = (FIRST_CLUSTER..=self.meta.last_data_unit())
            .filter(|&c| kind.entry_in(&table, c) == Some(FAT_ENTRY_FREE))
            .take(count)
            .collect();

        if chain.len() < count {
            return Err(FsAllocatorError::InsufficientSpace {
                needed: count as u32,
                found: chain.len() as u32,
            });
        }
        Ok(FatHandle::from_chain(chain))
    }
}
