// SPDX-License-Identifier: MIT

use zerocopy::byteorder::little_endian::{U16, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

use crate::fs::fat::{attr::FatAttributes, constant::*};

/// 32-byte short-name directory entry.
#[derive(IntoBytes, FromBytes, KnownLayout, Immutable, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(C, packed)]
pub struct FatDirEntry {
    pub name: [u8; FAT_SFN_BASE_LEN],
    pub ext: [u8; FAT_SFN_EXT_LEN],
    pub attr: u8,
    pub reserved: [u8; 10],
    pub time: U16,
    pub date: U16,
    pub first_cluster: U16,
    pub file_size: U32,
}

impl FatDirEntry {
    /// Entry for an injected file: archive attribute, no timestamps.
    pub fn file(short_name: [u8; FAT_SFN_LEN], first_cluster: u16, size: u32) -> Self {
        let mut name = [FAT_SFN_PAD; FAT_SFN_BASE_LEN];
        let mut ext = [FAT_SFN_PAD; FAT_SFN_EXT_LEN];
        name.copy_from_slice(&short_name[..FAT_SFN_BASE_LEN]);
        ext.copy_from_slice(&short_name[FAT_SFN_BASE_LEN..]);

        Self {
            name,
            ext,
            attr: FatAttributes::injected_file().bits(),
            reserved: [0; 10],
            time: U16::new(0),
            date: U16::new(0),
            first_cluster: U16::new(first_cluster),
            file_size: U32::new(size),
        }
    }

    /// Name and extension as the 11 bytes stored on disk.
    pub fn short_name(&self) -> [u8; FAT_SFN_LEN] {
        let mut out = [0u8; FAT_SFN_LEN];
        out[..FAT_SFN_BASE_LEN].copy_from_slice(&self.name);
        out[FAT_SFN_BASE_LEN..].copy_from_slice(&self.ext);
        out
    }

    #[inline]
    pub fn first_cluster(&self) -> u32 {
        self.first_cluster.get() as u32
    }

    #[inline]
    pub fn size(&self) -> u32 {
        self.file_size.get()
    }
}

/// A slot is free when its first byte marks it never used or deleted.
#[inline]
pub fn is_free_marker(first_byte: u8) -> bool {
    first_byte == FAT_ENTRY_END_OF_DIR || first_byte == FAT_ENTRY_DELETED
}
