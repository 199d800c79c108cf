// SPDX-License-Identifier: MIT
#![cfg_attr(not(feature = "std"), no_std)]

#[macro_use]
extern crate alloc;

// Core Modules
pub mod common;
pub mod fs;

// Reusable types and traits
pub use common::traits::*;

/// FAT12/FAT16 single-file injection.
///
/// See [`fat::FatMeta`], [`fat::FatAllocator`], [`fat::FatInjector`] and [`fat::FatChecker`].
pub mod fat {
    pub use super::fs::fat::prelude::*;
}
