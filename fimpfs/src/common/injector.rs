// SPDX-License-Identifier: MIT

pub use crate::common::error::{FsInjectorError, FsInjectorResult};

use fimpio::BlockIO;

/*
  Injector contract (plan, then commit):

  - plan(name, size)
      * Reads only. Validates the name and size, finds a free directory slot
        and enough free units, and encodes the directory entry.
      * Every condition that can be detected without writing is reported
        here, so a failed plan leaves the image untouched.

  - commit(plan, source)
      * Writes in a fixed order: allocation table first, payload second,
        directory entry last. A crash before the last step leaves only
        unreferenced units behind, never an entry pointing at garbage.
      * Implementations journal the writes and undo them if a step fails.
*/
pub trait FsInjector {
    type Plan;

    /// Compute everything the commit needs without touching the image.
    fn plan(&mut self, name: &str, size: u64) -> FsInjectorResult<Self::Plan>;

    /// Apply a plan, reading `plan`'s payload size worth of bytes from `source`.
    fn commit(&mut self, plan: &Self::Plan, source: &mut dyn BlockIO) -> FsInjectorResult;

    /// Plan and commit in one go.
    fn inject(
        &mut self,
        name: &str,
        source: &mut dyn BlockIO,
        size: u64,
    ) -> FsInjectorResult<Self::Plan> {
        let plan = self.plan(name, size)?;
        self.commit(&plan, source)?;
        Ok(plan)
    }
}
