// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::string::String;

pub use crate::common::injector::*;

use fimpio::prelude::*;

use crate::common::{fat::chain, stream};
use crate::fs::fat::{allocator::*, constant::*, meta::*, types::*, utils};

/// Everything a commit writes, computed without touching the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatPlan {
    pub short_name: [u8; FAT_SFN_LEN],
    pub slot: u16,
    pub slot_offset: u64,
    pub handle: FatHandle,
    pub size: u64,
    pub entry: FatDirEntry,
    /// Live root entry that already carries the same short name.
    pub duplicate_of: Option<u16>,
}

impl FatPlan {
    pub fn display_name(&self) -> String {
        utils::decode_short_name(&self.short_name)
    }
}

pub struct FatInjector<'a, IO: BlockIO + ?Sized> {
    io: &'a mut IO,
    meta: &'a FatMeta,
}

impl<'a, IO: BlockIO + ?Sized> FatInjector<'a, IO> {
    pub fn new(io: &'a mut IO, meta: &'a FatMeta) -> Self {
        Self { io, meta }
    }

    /// FAT chain in every copy, then payload, then the directory entry.
    fn apply<J: BlockIO + ?Sized>(
        io: &mut J,
        meta: &FatMeta,
        plan: &FatPlan,
        source: &mut dyn BlockIO,
    ) -> BlockIOResult {
        let clusters = &plan.handle.cluster_chain;
        chain::write_chain(io, meta, clusters)?;
        stream::write_stream_to_units(io, meta, source, clusters, plan.size)?;
        io.write_struct(plan.slot_offset, &plan.entry)?;
        io.flush()
    }
}

impl<'a, IO: BlockIO + ?Sized> FsInjector for FatInjector<'a, IO> {
    type Plan = FatPlan;

    fn plan(&mut self, name: &str, size: u64) -> FsInjectorResult<FatPlan> {
        if size > FAT_MAX_FILE_SIZE {
            return Err(FsInjectorError::FileTooLarge(size));
        }
        let short_name = utils::to_short_name(name)?;

        let mut allocator = FatAllocator::new(&mut *self.io, self.meta);
        let slot = allocator.find_free_slot()?;
        let duplicate_of = allocator.find_short_name(&short_name)?;
        let handle = allocator.allocate_chain(self.meta.units_for(size))?;

        // Addressable clusters stop below 0xFFF7, so the first one fits 16 bits.
        let entry = FatDirEntry::file(short_name, handle.cluster_id as u16, size as u32);

        Ok(FatPlan {
            short_name,
            slot,
            slot_offset: self.meta.root_entry_offset(slot),
            handle,
            size,
            entry,
            duplicate_of,
        })
    }

    /// Applies `plan` through a journal; any failure replays the pre-images
    /// so the image is left as it was before the call.
    ///
    /// The journal keeps a pre-image of every range written, payload clusters
    /// included, so memory use grows with the payload size and each write
    /// costs an extra read of the same range.
    fn commit(&mut self, plan: &FatPlan, source: &mut dyn BlockIO) -> FsInjectorResult {
        let mut journal = JournalIO::new(&mut *self.io);

        match Self::apply(&mut journal, self.meta, plan, source) {
            Ok(()) => {
                journal.commit();
                Ok(())
            }
            Err(cause) => match journal.rollback() {
                Ok(()) => Err(FsInjectorError::IO(cause)),
                Err(rollback) => Err(FsInjectorError::RollbackFailed { cause, rollback }),
            },
        }
    }
}
