// SPDX-License-Identifier: MIT

use core::fmt;

/// Result type for BlockIO operations.
pub type BlockIOResult<T = ()> = core::result::Result<T, BlockIOError>;

/// Failure of a positioned read or write against an image or payload source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockIOError {
    /// A std io failure folded into a fixed message, or a payload source
    /// that ran past the units reserved for it.
    Other(&'static str),
    /// Range outside a `MemBlockIO` buffer, or a file that hit EOF mid-read.
    OutOfBounds,
    /// The host refused the operation (`ErrorKind::Unsupported`).
    Unsupported,
}

impl BlockIOError {
    pub fn msg(&self) -> &'static str {
        match self {
            BlockIOError::Other(msg) => msg,
            BlockIOError::OutOfBounds => "access past the end of the device",
            BlockIOError::Unsupported => "operation not supported by the device",
        }
    }
}

impl fmt::Display for BlockIOError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.msg())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_display_uses_payload_message() {
        let err = BlockIOError::Other("device went away");
        assert_eq!(err.to_string(), "device went away");
        assert_eq!(BlockIOError::OutOfBounds.to_string(), "access past the end of the device");
    }
}
