// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use crate::common::meta::FsMeta;
use fimpio::prelude::*;

/// First cluster number that maps to the data region. 0 and 1 are reserved.
pub const FIRST_CLUSTER: u32 = 2;

/// Volumes with fewer clusters than this are FAT12.
pub const FAT12_MAX_CLUSTERS: u32 = 4085;
/// Volumes with fewer clusters than this (and not FAT12) are FAT16.
pub const FAT16_MAX_CLUSTERS: u32 = 65525;

/// FAT entry width, decided from the cluster count of the volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FatKind {
    /// 12-bit entries, two per three bytes.
    Fat12,
    /// 16-bit little-endian entries.
    Fat16,
}

impl FatKind {
    /// Classifies a volume by its data cluster count. `None` means FAT32 territory.
    pub fn from_cluster_count(cluster_count: u32) -> Option<Self> {
        if cluster_count < FAT12_MAX_CLUSTERS {
            Some(FatKind::Fat12)
        } else if cluster_count < FAT16_MAX_CLUSTERS {
            Some(FatKind::Fat16)
        } else {
            None
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            FatKind::Fat12 => "FAT12",
            FatKind::Fat16 => "FAT16",
        }
    }

    pub const fn mask(self) -> u32 {
        match self {
            FatKind::Fat12 => 0x0FFF,
            FatKind::Fat16 => 0xFFFF,
        }
    }

    /// End-of-chain sentinel written for the last cluster of a chain.
    pub const fn eoc(self) -> u32 {
        self.mask()
    }

    /// Any value in the end-of-chain range (`0xFF8..` / `0xFFF8..`).
    #[inline]
    pub const fn is_eoc(self, value: u32) -> bool {
        value >= (self.mask() & !0x7)
    }

    /// Byte offset of `cluster`'s entry inside one FAT copy.
    ///
    /// FAT12 entries straddle bytes; the returned offset is the first of the
    /// two bytes that hold the 12 bits.
    #[inline]
    pub const fn entry_offset(self, cluster: u32) -> u64 {
        match self {
            FatKind::Fat12 => cluster as u64 + (cluster as u64 / 2),
            FatKind::Fat16 => cluster as u64 * 2,
        }
    }

    /// How many entries one FAT copy of `fat_bytes` bytes can address.
    pub const fn capacity(self, fat_bytes: u64) -> u64 {
        match self {
            FatKind::Fat12 => fat_bytes * 8 / 12,
            FatKind::Fat16 => fat_bytes / 2,
        }
    }

    /// Extracts the entry for `cluster` from the 16-bit word read at `entry_offset`.
    #[inline]
    pub const fn decode(self, cluster: u32, word: u16) -> u32 {
        match self {
            FatKind::Fat12 if cluster & 1 == 1 => (word >> 4) as u32,
            FatKind::Fat12 => (word & 0x0FFF) as u32,
            FatKind::Fat16 => word as u32,
        }
    }

    /// Stores `value` for `cluster` into `word`, keeping the nibble owned by
    /// the neighbouring FAT12 entry.
    #[inline]
    pub const fn encode(self, cluster: u32, value: u32, word: u16) -> u16 {
        let value = (value & self.mask()) as u16;
        match self {
            FatKind::Fat12 if cluster & 1 == 1 => (word & 0x000F) | (value << 4),
            FatKind::Fat12 => (word & 0xF000) | value,
            FatKind::Fat16 => value,
        }
    }

    /// Reads `cluster`'s entry out of an in-memory copy of a FAT.
    /// `None` if the table is too short to hold it.
    #[inline]
    pub fn entry_in(self, table: &[u8], cluster: u32) -> Option<u32> {
        let off = usize::try_from(self.entry_offset(cluster)).ok()?;
        let lo = *table.get(off)?;
        let hi = *table.get(off + 1)?;
        Some(self.decode(cluster, u16::from_le_bytes([lo, hi])))
    }
}

/// Geometry of a FAT region: where each copy lives and how its entries are encoded.
pub trait ClusterMeta: FsMeta<u32> {
    fn fat_kind(&self) -> FatKind;

    fn num_fats(&self) -> u8;

    /// Byte offset of the first byte of FAT copy `fat_index`.
    fn fat_offset(&self, fat_index: u8) -> u64;

    /// Absolute offset of `cluster`'s entry within FAT copy `fat_index`.
    #[inline]
    fn fat_entry_offset(&self, cluster: u32, fat_index: u8) -> u64 {
        self.fat_offset(fat_index) + self.fat_kind().entry_offset(cluster)
    }

    fn is_eoc(&self, value: u32) -> bool {
        self.fat_kind().is_eoc(value)
    }
}

/// FAT chain helpers for FAT12 and FAT16.
pub mod chain {
    use super::*;

    /// Reads `cluster`'s entry from FAT copy `fat_index`.
    #[inline]
    pub fn read_entry<IO, M>(io: &mut IO, meta: &M, cluster: u32, fat_index: u8) -> BlockIOResult<u32>
    where
        IO: BlockIO + ?Sized,
        M: ClusterMeta,
    {
        let kind = meta.fat_kind();
        let word = io.read_u16_at(meta.fat_entry_offset(cluster, fat_index))?;
        Ok(kind.decode(cluster, word))
    }

    /// Writes `value` as `cluster`'s entry in FAT copy `fat_index`.
    ///
    /// FAT12 entries are read-modify-write so the adjacent entry survives.
    #[inline]
    pub fn write_entry<IO, M>(
        io: &mut IO,
        meta: &M,
        cluster: u32,
        fat_index: u8,
        value: u32,
    ) -> BlockIOResult
    where
        IO: BlockIO + ?Sized,
        M: ClusterMeta,
    {
        let kind = meta.fat_kind();
        let off = meta.fat_entry_offset(cluster, fat_index);
        let word = match kind {
            FatKind::Fat12 => kind.encode(cluster, value, io.read_u16_at(off)?),
            FatKind::Fat16 => kind.encode(cluster, value, 0),
        };
        io.write_u16_at(off, word)
    }

    /// Successor values for a chain: each entry points to the next cluster,
    /// the last one to end-of-chain.
    pub fn build_links(kind: FatKind, chain: &[u32]) -> Vec<(u32, u32)> {
        chain
            .iter()
            .enumerate()
            .map(|(i, &cluster)| {
                let next = chain.get(i + 1).copied().unwrap_or(kind.eoc());
                (cluster, next)
            })
            .collect()
    }

    /// Writes the linked chain into every FAT copy, copy by copy.
    pub fn write_chain<IO, M>(io: &mut IO, meta: &M, chain: &[u32]) -> BlockIOResult
    where
        IO: BlockIO + ?Sized,
        M: ClusterMeta,
    {
        if chain.is_empty() {
            return Ok(());
        }
        let links = build_links(meta.fat_kind(), chain);
        for fi in 0..meta.num_fats() {
            for &(cluster, next) in &links {
                write_entry(io, meta, cluster, fi, next)?;
            }
        }
        Ok(())
    }

    /// Follows a chain in the first FAT copy until end-of-chain.
    ///
    /// Stops early on a free entry or an out-of-range link, and after
    /// `total_units` steps when the chain loops; the clusters visited so far
    /// are returned.
    pub fn read_chain<IO, M>(io: &mut IO, meta: &M, start_cluster: u32) -> BlockIOResult<Vec<u32>>
    where
        IO: BlockIO + ?Sized,
        M: ClusterMeta,
    {
        let mut chain = Vec::new();
        let mut current = start_cluster;

        while meta.is_valid_unit(current) && chain.len() < meta.total_units() {
            chain.push(current);
            let next = read_entry(io, meta, current, 0)?;
            if meta.is_eoc(next) {
                break;
            }
            current = next;
        }
        Ok(chain)
    }

    /// True if the chain is one contiguous run of clusters.
    #[inline]
    pub fn is_contiguous(chain: &[u32]) -> bool {
        chain.windows(2).all(|w| w[1] == w[0] + 1)
    }
}
