// SPDX-License-Identifier: MIT

pub mod allocator;
pub mod attr;
pub mod checker;
pub mod constant;
pub mod injector;
pub mod meta;
pub mod types;
pub mod utils;

// === Public Interface ===
pub mod traits {
    pub use super::allocator::{FatAllocator, FatHandle};
    pub use super::checker::FatChecker;
    pub use super::injector::{FatInjector, FatPlan};
    pub use super::meta::FatMeta;
}

pub mod prelude {
    pub use super::attr::FatAttributes;
    pub use super::traits::*;
    pub use super::types::{FatBpb, FatDirEntry};
    pub use crate::common::checker::{Finding, Severity, VerifyReport};
    pub use crate::common::error::*;
    pub use crate::common::fat::FatKind;
    pub use crate::common::traits::*;
    pub use fimpio::prelude::*;
}
