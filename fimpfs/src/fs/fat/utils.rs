// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::string::String;

use crate::common::error::{FsInjectorError, FsInjectorResult};
use crate::fs::fat::constant::*;

/// Formats `name` as the 11 bytes of an 8.3 short name.
///
/// The base is what precedes the first `.`, the extension what follows it up
/// to the next `.`. Both are upper-cased, space-padded and truncated to 8
/// and 3 bytes.
pub fn to_short_name(name: &str) -> FsInjectorResult<[u8; FAT_SFN_LEN]> {
    if name.is_empty() {
        return Err(FsInjectorError::InvalidName("name is empty"));
    }
    if !name.is_ascii() {
        return Err(FsInjectorError::InvalidName("name is not ASCII"));
    }
    if name.bytes().any(|b| b.is_ascii_control()) {
        return Err(FsInjectorError::InvalidName("name contains control characters"));
    }
    if name.bytes().any(|b| FAT_SFN_ILLEGAL.contains(&b)) {
        return Err(FsInjectorError::InvalidName("name contains a character not allowed in 8.3 names"));
    }

    let mut parts = name.split('.');
    let base = parts.next().unwrap_or_default();
    let ext = parts.next().unwrap_or_default();
    if base.is_empty() {
        return Err(FsInjectorError::InvalidName("name has an empty base"));
    }

    let mut out = [FAT_SFN_PAD; FAT_SFN_LEN];
    for (dst, b) in out[..FAT_SFN_BASE_LEN].iter_mut().zip(base.bytes()) {
        *dst = b.to_ascii_uppercase();
    }
    for (dst, b) in out[FAT_SFN_BASE_LEN..].iter_mut().zip(ext.bytes()) {
        *dst = b.to_ascii_uppercase();
    }
    Ok(out)
}

/// Human-readable `BASE.EXT` form of a stored short name.
pub fn decode_short_name(raw: &[u8; FAT_SFN_LEN]) -> String {
    let trim = |s: &[u8]| {
        let end = s.iter().rposition(|&b| b != FAT_SFN_PAD).map_or(0, |i| i + 1);
        String::from_utf8_lossy(&s[..end]).into_owned()
    };

    let base = trim(&raw[..FAT_SFN_BASE_LEN]);
    let ext = trim(&raw[FAT_SFN_BASE_LEN..]);
    if ext.is_empty() {
        base
    } else {
        format!("{base}.{ext}")
    }
}
