// SPDX-License-Identifier: MIT

use core::fmt;

pub use fimpio::errors::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsParsingError {
    IO(BlockIOError),
    /// A geometry field that later computations divide by is zero or absurd.
    MalformedBpb(&'static str),
    /// Well-formed, but not a FAT12/16 volume (FAT32, oversized cluster count).
    Unsupported(&'static str),
}

impl FsParsingError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsParsingError::IO(_) => "IO error",
            FsParsingError::MalformedBpb(msg) => msg,
            FsParsingError::Unsupported(msg) => msg,
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsParsingError::IO(e) => Some(FsError::IO(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsParsingError::MalformedBpb(msg) => write!(f, "Malformed BPB: {msg}")?,
            FsParsingError::Unsupported(msg) => write!(f, "Unsupported volume: {msg}")?,
            FsParsingError::IO(_) => write!(f, "{}", self.msg())?,
        }
        write_chain(f, self.source())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAllocatorError {
    IO(BlockIOError),
    /// No unused or deleted slot left in the root directory.
    DirectoryFull,
    /// Fewer free clusters than the payload needs.
    InsufficientSpace { needed: u32, found: u32 },
}

impl FsAllocatorError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsAllocatorError::IO(_) => "IO error",
            FsAllocatorError::DirectoryFull => "Root directory is full",
            FsAllocatorError::InsufficientSpace { .. } => "Not enough free clusters",
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsAllocatorError::IO(e) => Some(FsError::IO(*e)),
            _ => None,
        }
    }
}

impl fmt::Display for FsAllocatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        if let FsAllocatorError::InsufficientSpace { needed, found } = self {
            write!(f, " (needed: {needed}, free: {found})")?;
        }
        write_chain(f, self.source())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsInjectorError {
    IO(BlockIOError),
    Parsing(FsParsingError),
    Allocator(FsAllocatorError),
    /// Target name cannot be stored as an 8.3 short name.
    InvalidName(&'static str),
    /// Payload does not fit the 32-bit size field of a directory entry.
    FileTooLarge(u64),
    /// Commit failed and the journal could not restore the image either.
    RollbackFailed {
        cause: BlockIOError,
        rollback: BlockIOError,
    },
}

impl FsInjectorError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsInjectorError::IO(_) => "IO error",
            FsInjectorError::Parsing(_) => "Parsing error",
            FsInjectorError::Allocator(_) => "Allocator error",
            FsInjectorError::InvalidName(msg) => msg,
            FsInjectorError::FileTooLarge(_) => "File too large for a FAT directory entry",
            FsInjectorError::RollbackFailed { .. } => "Commit failed and rollback failed",
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsInjectorError::IO(e) => Some(FsError::IO(*e)),
            FsInjectorError::Parsing(e) => Some(FsError::Parsing(*e)),
            FsInjectorError::Allocator(e) => Some(FsError::Allocator(*e)),
            FsInjectorError::RollbackFailed { rollback, .. } => Some(FsError::IO(*rollback)),
            _ => None,
        }
    }
}

impl fmt::Display for FsInjectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Layer errors carry their own detail and cause chain.
        match self {
            FsInjectorError::Parsing(e) => return write!(f, "{}: {e}", self.msg()),
            FsInjectorError::Allocator(e) => return write!(f, "{}: {e}", self.msg()),
            _ => {}
        }
        write!(f, "{}", self.msg())?;
        match self {
            FsInjectorError::FileTooLarge(size) => write!(f, " ({size} bytes)")?,
            FsInjectorError::RollbackFailed { cause, .. } => write!(f, " (commit: {cause})")?,
            _ => {}
        }
        write_chain(f, self.source())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsCheckerError {
    IO(BlockIOError),
    Parsing(FsParsingError),
}

impl FsCheckerError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsCheckerError::IO(_) => "IO error",
            FsCheckerError::Parsing(_) => "Parsing error",
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsCheckerError::IO(e) => Some(FsError::IO(*e)),
            FsCheckerError::Parsing(e) => Some(FsError::Parsing(*e)),
        }
    }
}

impl fmt::Display for FsCheckerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.msg())?;
        write_chain(f, self.source())
    }
}

/// Top-level error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsError {
    IO(BlockIOError),
    Parsing(FsParsingError),
    Allocator(FsAllocatorError),
    Injector(FsInjectorError),
    Checker(FsCheckerError),
}

impl FsError {
    pub fn msg(&self) -> &'static str {
        match self {
            FsError::IO(e) => e.msg(),
            FsError::Parsing(e) => e.msg(),
            FsError::Allocator(e) => e.msg(),
            FsError::Injector(e) => e.msg(),
            FsError::Checker(e) => e.msg(),
        }
    }

    pub fn source(&self) -> Option<FsError> {
        match self {
            FsError::IO(_) => None,
            FsError::Parsing(e) => e.source(),
            FsError::Allocator(e) => e.source(),
            FsError::Injector(e) => e.source(),
            FsError::Checker(e) => e.source(),
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FsError::IO(e) => write!(f, "{e}"),
            FsError::Parsing(e) => write!(f, "{e}"),
            FsError::Allocator(e) => write!(f, "{e}"),
            FsError::Injector(e) => write!(f, "{e}"),
            FsError::Checker(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FsError {}

#[cfg(feature = "std")]
impl std::error::Error for FsInjectorError {}

fn write_chain(f: &mut fmt::Formatter<'_>, mut current: Option<FsError>) -> fmt::Result {
    while let Some(src) = current {
        write!(f, "\n  caused by: {}", src.msg())?;
        current = src.source();
    }
    Ok(())
}

// === impl From ===

impl From<BlockIOError> for FsParsingError {
    fn from(e: BlockIOError) -> Self {
        FsParsingError::IO(e)
    }
}

impl From<BlockIOError> for FsAllocatorError {
    fn from(e: BlockIOError) -> Self {
        FsAllocatorError::IO(e)
    }
}

impl From<BlockIOError> for FsInjectorError {
    fn from(e: BlockIOError) -> Self {
        FsInjectorError::IO(e)
    }
}

impl From<FsParsingError> for FsInjectorError {
    fn from(e: FsParsingError) -> Self {
        FsInjectorError::Parsing(e)
    }
}

impl From<FsAllocatorError> for FsInjectorError {
    fn from(e: FsAllocatorError) -> Self {
        FsInjectorError::Allocator(e)
    }
}

impl From<BlockIOError> for FsCheckerError {
    fn from(e: BlockIOError) -> Self {
        FsCheckerError::IO(e)
    }
}

impl From<FsParsingError> for FsCheckerError {
    fn from(e: FsParsingError) -> Self {
        FsCheckerError::Parsing(e)
    }
}

// === impl From to FsError top-level ===

impl From<BlockIOError> for FsError {
    fn from(e: BlockIOError) -> Self {
        FsError::IO(e)
    }
}

impl From<FsParsingError> for FsError {
    fn from(e: FsParsingError) -> Self {
        FsError::Parsing(e)
    }
}

impl From<FsAllocatorError> for FsError {
    fn from(e: FsAllocatorError) -> Self {
        FsError::Allocator(e)
    }
}

impl From<FsInjectorError> for FsError {
    fn from(e: FsInjectorError) -> Self {
        FsError::Injector(e)
    }
}

impl From<FsCheckerError> for FsError {
    fn from(e: FsCheckerError) -> Self {
        FsError::Checker(e)
    }
}

// === type Fs*Result ===

pub type FsResult<T = ()> = Result<T, FsError>;

pub type FsParsingResult<T = ()> = Result<T, FsParsingError>;
pub type FsAllocatorResult<T = ()> = Result<T, FsAllocatorError>;
pub type FsInjectorResult<T = ()> = Result<T, FsInjectorError>;
pub type FsCheckerResult<T = ()> = Result<T, FsCheckerError>;

#[cfg(all(test, feature = "std"))]
mod tests {
    use super::*;

    #[test]
    fn test_error_chain_display() {
        let low = BlockIOError::OutOfBounds;
        let inj = FsInjectorError::Allocator(FsAllocatorError::IO(low));

        let text = FsError::Injector(inj).to_string();
        assert!(text.starts_with("Allocator error: IO error"));
        assert!(!text.contains("Not enough free clusters"));
        assert!(text.contains("caused by: Out of bounds"));
    }

    #[test]
    fn test_injector_error_keeps_layer_detail() {
        let e = FsInjectorError::Allocator(FsAllocatorError::InsufficientSpace { needed: 3, found: 1 });
        assert_eq!(
            e.to_string(),
            "Allocator error: Not enough free clusters (needed: 3, free: 1)"
        );

        let e = FsInjectorError::Parsing(FsParsingError::MalformedBpb("FAT count is zero"));
        assert_eq!(e.to_string(), "Parsing error: Malformed BPB: FAT count is zero");
    }

    #[test]
    fn test_insufficient_space_display() {
        let e = FsAllocatorError::InsufficientSpace { needed: 9, found: 4 };
        assert_eq!(e.to_string(), "Not enough free clusters (needed: 9, free: 4)");
    }

    #[test]
    fn test_malformed_bpb_display() {
        let e = FsParsingError::MalformedBpb("bytes per sector is zero");
        assert_eq!(e.to_string(), "Malformed BPB: bytes per sector is zero");
    }
}
