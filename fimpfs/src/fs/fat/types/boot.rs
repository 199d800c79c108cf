// SPDX-License-Identifier: MIT

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::fs::fat::constant::*;

/// The DOS 3.31 BIOS Parameter Block shared by FAT12 and FAT16, bytes 0..36
/// of the boot sector.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Copy, Clone, Debug)]
#[repr(C, packed)]
pub struct FatBpb {
    pub jump_boot: [u8; 3],
    pub oem_name: [u8; 8],
    pub bytes_per_sector: U16,
    pub sectors_per_cluster: u8,
    pub reserved_sectors: U16,
    pub num_fats: u8,
    pub root_entry_count: U16,
    pub total_sectors_16: U16,
    pub media: u8,
    pub fat_size_16: U16,
    pub sectors_per_track: U16,
    pub num_heads: U16,
    pub hidden_sectors: U32,
    pub total_sectors_32: U32,
}

impl FatBpb {
    /// BPB for a fresh volume with the given geometry.
    ///
    /// Picks the 16-bit total-sectors field when the count fits, as formatters do.
    pub fn new(
        bytes_per_sector: u16,
        sectors_per_cluster: u8,
        reserved_sectors: u16,
        num_fats: u8,
        root_entry_count: u16,
        total_sectors: u32,
        fat_size: u16,
    ) -> Self {
        let (total_16, total_32) = match u16::try_from(total_sectors) {
            Ok(small) => (small, 0),
            Err(_) => (0, total_sectors),
        };

        Self {
            jump_boot: FAT_JUMP_BOOT,
            oem_name: *FAT_OEM_NAME,
            bytes_per_sector: U16::new(bytes_per_sector),
            sectors_per_cluster,
            reserved_sectors: U16::new(reserved_sectors),
            num_fats,
            root_entry_count: U16::new(root_entry_count),
            total_sectors_16: U16::new(total_16),
            media: FAT_MEDIA_FIXED,
            fat_size_16: U16::new(fat_size),
            sectors_per_track: U16::new(0),
            num_heads: U16::new(0),
            hidden_sectors: U32::new(0),
            total_sectors_32: U32::new(total_32),
        }
    }

    /// Whichever total-sectors field is in use.
    #[inline]
    pub fn total_sectors(&self) -> u32 {
        match self.total_sectors_16.get() {
            0 => self.total_sectors_32.get(),
            n => n as u32,
        }
    }
}
