// SPDX-License-Identifier: MIT

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

use core::fmt;

pub use crate::common::error::{FsCheckerError, FsCheckerResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub const fn tag(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }
}

#[derive(Clone, Debug)]
pub struct Finding {
    pub sev: Severity,
    pub code: &'static str,
    pub msg: String,
}

impl Finding {
    pub fn info(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Info,
            code,
            msg: msg.into(),
        }
    }

    pub fn warn(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Warn,
            code,
            msg: msg.into(),
        }
    }

    pub fn err(code: &'static str, msg: impl Into<String>) -> Self {
        Self {
            sev: Severity::Error,
            code,
            msg: msg.into(),
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.sev.tag(), self.code, self.msg)
    }
}

#[derive(Clone, Debug, Default)]
pub struct VerifyReport {
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    pub fn push(&mut self, f: Finding) {
        self.findings.push(f)
    }

    pub fn has_error(&self) -> bool {
        self.findings.iter().any(|f| f.sev == Severity::Error)
    }

    pub fn ok(&self) -> bool {
        !self.has_error()
    }

    pub fn first_error(&self) -> Option<&Finding> {
        self.findings.iter().find(|f| f.sev == Severity::Error)
    }

    pub fn count(&self, s: Severity) -> usize {
        self.findings.iter().filter(|f| f.sev == s).count()
    }

    pub fn by_code<'a>(&'a self, code: &'a str) -> impl Iterator<Item = &'a Finding> + 'a {
        self.findings.iter().filter(move |f| f.code == code)
    }
}

impl fmt::Display for VerifyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for finding in &self.findings {
            writeln!(f, "{finding}")?;
        }
        write!(
            f,
            "{} error(s), {} warning(s)",
            self.count(Severity::Error),
            self.count(Severity::Warn)
        )
    }
}

/// Post-write integrity checks for one filesystem.
///
/// Each phase appends findings to the report; an `Err` is reserved for IO
/// failures that stop the check itself.
pub trait FsChecker {
    fn check_all(&mut self) -> FsCheckerResult<VerifyReport> {
        let mut rep = VerifyReport::default();
        self.check_mirror(&mut rep)?;
        self.check_chain(&mut rep)?;
        self.check_entry(&mut rep)?;
        Ok(rep)
    }

    /// FAT copies agree with each other.
    fn check_mirror(&mut self, _rep: &mut VerifyReport) -> FsCheckerResult {
        Ok(())
    }

    /// Cluster chains are well linked and terminated.
    fn check_chain(&mut self, _rep: &mut VerifyReport) -> FsCheckerResult {
        Ok(())
    }

    /// Directory entries describe what was written.
    fn check_entry(&mut self, _rep: &mut VerifyReport) -> FsCheckerResult {
        Ok(())
    }
}
