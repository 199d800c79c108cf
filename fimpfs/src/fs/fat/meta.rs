// SPDX-License-Identifier: MIT

pub use crate::common::meta::*;

use fimpio::prelude::*;

use crate::common::error::{FsParsingError, FsParsingResult};
use crate::common::fat::{ClusterMeta, FIRST_CLUSTER, FatKind};
use crate::fs::fat::{constant::*, types::FatBpb};

/// Geometry of a FAT12/16 volume, derived once from its BPB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FatMeta {
    pub bytes_per_sector: u16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: u16,
    pub num_fats: u8,
    pub root_entry_count: u16,
    pub sectors_per_fat: u16,
    pub total_sectors: u32,

    pub bytes_per_cluster: u32,
    pub fat_offset_bytes: u64,
    pub fat_size_bytes: u64,
    pub root_dir_offset: u64,
    pub root_dir_size: u64,
    pub data_offset: u64,

    pub cluster_count: u32,
    pub kind: FatKind,
    last_cluster: u32,
}

impl FatMeta {
    /// Reads and interprets the BPB at the start of the volume.
    pub fn read<IO: BlockIO + ?Sized>(io: &mut IO) -> FsParsingResult<Self> {
        let bpb: FatBpb = io.read_struct(FAT_BPB_OFFSET)?;
        Self::from_bpb(&bpb)
    }

    pub fn from_bpb(bpb: &FatBpb) -> FsParsingResult<Self> {
        let bytes_per_sector = bpb.bytes_per_sector.get();
        let sectors_per_cluster = bpb.sectors_per_cluster;
        let reserved_sectors = bpb.reserved_sectors.get();
        let num_fats = bpb.num_fats;
        let root_entry_count = bpb.root_entry_count.get();
        let sectors_per_fat = bpb.fat_size_16.get();
        let total_sectors = bpb.total_sectors();

        if bytes_per_sector == 0 {
            return Err(FsParsingError::MalformedBpb("bytes per sector is zero"));
        }
        if sectors_per_cluster == 0 {
            return Err(FsParsingError::MalformedBpb("sectors per cluster is zero"));
        }
        if num_fats == 0 {
            return Err(FsParsingError::MalformedBpb("FAT count is zero"));
        }
        if total_sectors == 0 {
            return Err(FsParsingError::MalformedBpb("total sector count is zero"));
        }
        if sectors_per_fat == 0 {
            return Err(FsParsingError::Unsupported("FAT32 volumes are not supported"));
        }

        let bps = bytes_per_sector as u64;
        let fat_offset_bytes = reserved_sectors as u64 * bps;
        let fat_size_bytes = sectors_per_fat as u64 * bps;
        let root_dir_offset = fat_offset_bytes + num_fats as u64 * fat_size_bytes;
        let root_dir_size = root_entry_count as u64 * FAT_DIR_ENTRY_SIZE as u64;
        let data_offset = root_dir_offset + root_dir_size;

        let root_sectors = root_dir_size.div_ceil(bps);
        let overhead =
            reserved_sectors as u64 + num_fats as u64 * sectors_per_fat as u64 + root_sectors;
        let data_sectors = (total_sectors as u64).saturating_sub(overhead);
        let cluster_count = (data_sectors / sectors_per_cluster as u64) as u32;

        let kind = FatKind::from_cluster_count(cluster_count)
            .ok_or(FsParsingError::Unsupported("cluster count is in FAT32 range"))?;

        // Highest cluster both the data region and one FAT copy can describe.
        let by_fat = kind.capacity(fat_size_bytes).saturating_sub(1);
        let by_data = cluster_count as u64 + 1;
        let last_cluster = by_fat.min(by_data) as u32;

        Ok(Self {
            bytes_per_sector,
            sectors_per_cluster,
            reserved_sectors,
            num_fats,
            root_entry_count,
            sectors_per_fat,
            total_sectors,
            bytes_per_cluster: sectors_per_cluster as u32 * bytes_per_sector as u32,
            fat_offset_bytes,
            fat_size_bytes,
            root_dir_offset,
            root_dir_size,
            data_offset,
            cluster_count,
            kind,
            last_cluster,
        })
    }

    /// Absolute offset of root directory slot `index`.
    #[inline]
    pub fn root_entry_offset(&self, index: u16) -> u64 {
        self.root_dir_offset + index as u64 * FAT_DIR_ENTRY_SIZE as u64
    }

    /// Bytes of one FAT copy that hold addressable entries (reserved ones included).
    pub fn fat_span_bytes(&self) -> u64 {
        let end = self.kind.entry_offset(self.last_cluster) + 2;
        end.min(self.fat_size_bytes)
    }
}

impl FsMeta<u32> for FatMeta {
    #[inline]
    fn unit_size(&self) -> usize {
        self.bytes_per_cluster as usize
    }

    #[inline]
    fn unit_offset(&self, cluster: u32) -> u64 {
        self.data_offset + cluster.saturating_sub(FIRST_CLUSTER) as u64 * self.bytes_per_cluster as u64
    }

    fn first_data_unit(&self) -> u32 {
        FIRST_CLUSTER
    }

    fn last_data_unit(&self) -> u32 {
        self.last_cluster
    }

    fn total_units(&self) -> usize {
        self.last_cluster.saturating_sub(FIRST_CLUSTER - 1) as usize
    }
}

impl ClusterMeta for FatMeta {
    #[inline]
    fn fat_kind(&self) -> FatKind {
        self.kind
    }

    #[inline]
    fn num_fats(&self) -> u8 {
        self.num_fats
    }

    #[inline]
    fn fat_offset(&self, fat_index: u8) -> u64 {
        self.fat_offset_bytes + fat_index as u64 * self.fat_size_bytes
    }
}
