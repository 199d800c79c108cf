// SPDX-License-Identifier: MIT

// === Boot sector ===

pub const FAT_BPB_OFFSET: u64 = 0;
pub const FAT_SIGNATURE_OFFSET: u64 = 510;
pub const FAT_SIGNATURE: u16 = 0xAA55;
pub const FAT_MEDIA_FIXED: u8 = 0xF8;
pub const FAT_JUMP_BOOT: [u8; 3] = [0xEB, 0x3C, 0x90];
pub const FAT_OEM_NAME: &[u8; 8] = b"FIMP    ";

// === FAT Region ===

pub const FAT_ENTRY_FREE: u32 = 0x0000;

// === Root Directory ===

pub const FAT_DIR_ENTRY_SIZE: usize = 32;
pub const FAT_ENTRY_END_OF_DIR: u8 = 0x00;
pub const FAT_ENTRY_DELETED: u8 = 0xE5;

pub const FAT_SFN_BASE_LEN: usize = 8;
pub const FAT_SFN_EXT_LEN: usize = 3;
pub const FAT_SFN_LEN: usize = FAT_SFN_BASE_LEN + FAT_SFN_EXT_LEN;
pub const FAT_SFN_PAD: u8 = b' ';
/// Bytes a short name may not contain. `.` only separates base from extension.
pub const FAT_SFN_ILLEGAL: &[u8] = b"\"*+,/:;<=>?[\\]| ";

/// Largest payload a directory entry can describe (32-bit size field).
pub const FAT_MAX_FILE_SIZE: u64 = u32::MAX as u64;
