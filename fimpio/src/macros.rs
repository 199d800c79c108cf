// SPDX-License-Identifier: MIT

/// Generates `read_<ty>_at` / `write_<ty>_at` for each listed integer type.
///
/// Values are little-endian, the byte order of every BPB and FAT field.
macro_rules! blockio_impl_primitive_rw {
    ($($ty:ty),+ $(,)?) => {
        $(
            paste::paste! {
                #[inline]
                fn [<write_ $ty _at>](&mut self, offset: u64, value: $ty) -> BlockIOResult {
                    self.write_at(offset, &value.to_le_bytes())
                }

                #[inline]
                fn [<read_ $ty _at>](&mut self, offset: u64) -> BlockIOResult<$ty> {
                    let mut bytes = [0u8; core::mem::size_of::<$ty>()];
                    self.read_at(offset, &mut bytes)?;
                    Ok(<$ty>::from_le_bytes(bytes))
                }
            }
        )+
    };
}

pub(crate) use blockio_impl_primitive_rw;
