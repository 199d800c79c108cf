// SPDX-License-Identifier: MIT

use std::io::{Error, ErrorKind, Read, Seek, SeekFrom, Write};

use crate::{BlockIO, BlockIOError, BlockIOResult};

/// `BlockIO` over any seekable std stream (`File`, `Cursor<Vec<u8>>`, ...).
#[derive(Debug)]
pub struct StdBlockIO<'a, T: Read + Write + Seek> {
    io: &'a mut T,
}

impl<'a, T: Read + Write + Seek> StdBlockIO<'a, T> {
    #[inline]
    pub fn new(io: &'a mut T) -> Self {
        Self { io }
    }
}

impl<'a, T: Read + Write + Seek> BlockIO for StdBlockIO<'a, T> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> BlockIOResult {
        self.io.seek(SeekFrom::Start(offset))?;
        self.io.write_all(data)?;
        Ok(())
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> BlockIOResult {
        self.io.seek(SeekFrom::Start(offset))?;
        self.io.read_exact(buf)?;
        Ok(())
    }

    fn flush(&mut self) -> BlockIOResult {
        self.io.flush()?;
        Ok(())
    }
}

impl From<Error> for BlockIOError {
    #[cold]
    #[inline(never)]
    fn from(e: Error) -> Self {
        match e.kind() {
            ErrorKind::UnexpectedEof => BlockIOError::OutOfBounds,
            ErrorKind::Unsupported => BlockIOError::Unsupported,
            ErrorKind::PermissionDenied => BlockIOError::Other("Permission denied"),
            ErrorKind::WriteZero => BlockIOError::Other("Device refused to accept more data"),
            ErrorKind::InvalidInput => BlockIOError::Other("Invalid seek or IO argument"),
            ErrorKind::Interrupted => BlockIOError::Other("IO interrupted"),
            _ => BlockIOError::Other("Device IO error"),
        }
    }
}
