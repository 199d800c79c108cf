// SPDX-License-Identifier: MIT

use crate::common::meta::FsMeta;
use fimpio::prelude::*;

/// Writes `total_size` bytes from `source` into `units`, in order.
///
/// Every unit but the last receives a full `unit_size` bytes; the last one
/// receives the remainder only, and the rest of that unit keeps whatever
/// bytes it held before.
pub fn write_stream_to_units<IO, M, U>(
    dest: &mut IO,
    meta: &M,
    source: &mut dyn BlockIO,
    units: &[U],
    total_size: u64,
) -> BlockIOResult
where
    IO: BlockIO + ?Sized,
    M: FsMeta<U>,
    U: Copy + Ord,
{
    let unit_size = meta.unit_size() as u64;
    let mut remaining = total_size;
    let mut src_offset = 0;

    for &unit in units {
        if remaining == 0 {
            break;
        }

        let to_copy = remaining.min(unit_size);
        dest.copy_from(source, src_offset, meta.unit_offset(unit), to_copy)?;

        remaining -= to_copy;
        src_offset += to_copy;
    }

    if remaining != 0 {
        return Err(BlockIOError::Other("payload larger than the allocated units"));
    }
    Ok(())
}
