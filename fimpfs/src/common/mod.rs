// SPDX-License-Identifier: MIT

// === Sub-modules ===
pub mod allocator;
pub mod checker;
pub mod error;
pub mod fat;
pub mod injector;
pub mod meta;
pub mod stream;

// === Core Traits ===
pub mod traits {
    pub use super::allocator::{FsAllocator, FsHandle};
    pub use super::checker::FsChecker;
    pub use super::fat::ClusterMeta;
    pub use super::injector::FsInjector;
    pub use super::meta::FsMeta;
}

// === Error types ===
pub use error::*;
