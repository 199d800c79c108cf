// SPDX-License-Identifier: MIT
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

pub use crate::common::checker::*;

use fimpio::prelude::*;
use zerocopy::IntoBytes;

use crate::common::fat::{ClusterMeta, chain};
use crate::fs::fat::{injector::FatPlan, meta::*, types::*, utils};

/// Verifies that a committed [`FatPlan`] is what the image now holds.
pub struct FatChecker<'a, IO: BlockIO + ?Sized> {
    io: &'a mut IO,
    meta: &'a FatMeta,
    plan: &'a FatPlan,
}

impl<'a, IO: BlockIO + ?Sized> FatChecker<'a, IO> {
    pub fn new(io: &'a mut IO, meta: &'a FatMeta, plan: &'a FatPlan) -> Self {
        Self { io, meta, plan }
    }

    fn read_fat(&mut self, fat_index: u8) -> FsCheckerResult<Vec<u8>> {
        let mut buf = vec![0u8; self.meta.fat_size_bytes as usize];
        self.io.read_at(self.meta.fat_offset(fat_index), &mut buf)?;
        Ok(buf)
    }
}

impl<'a, IO: BlockIO + ?Sized> FsChecker for FatChecker<'a, IO> {
    fn check_mirror(&mut self, rep: &mut VerifyReport) -> FsCheckerResult {
        let primary = self.read_fat(0)?;
        let mut mismatched = 0;

        for fi in 1..self.meta.num_fats {
            let copy = self.read_fat(fi)?;
            if let Some(pos) = primary.iter().zip(&copy).position(|(a, b)| a != b) {
                mismatched += 1;
                rep.push(Finding::err(
                    "FAT.MIRROR",
                    format!("FAT copy {fi} differs from copy 0 at byte {pos}"),
                ));
            }
        }

        if mismatched == 0 {
            rep.push(Finding::info(
                "FAT.MIRROR",
                format!("{} FAT copies identical", self.meta.num_fats),
            ));
        }
        Ok(())
    }

    fn check_chain(&mut self, rep: &mut VerifyReport) -> FsCheckerResult {
        let kind = self.meta.fat_kind();
        let links = chain::build_links(kind, &self.plan.handle.cluster_chain);

        for fi in 0..self.meta.num_fats {
            for &(cluster, next) in &links {
                let found = chain::read_entry(&mut *self.io, self.meta, cluster, fi)?;
                if found != next {
                    rep.push(Finding::err(
                        "FAT.CHAIN",
                        format!("copy {fi}: cluster {cluster} -> {found:#x}, expected {next:#x}"),
                    ));
                }
            }
        }

        let walked = chain::read_chain(&mut *self.io, self.meta, self.plan.handle.cluster_id)?;
        if walked != self.plan.handle.cluster_chain {
            rep.push(Finding::err(
                "FAT.CHAIN",
                format!(
                    "chain from cluster {} has {} cluster(s), expected {}",
                    self.plan.handle.cluster_id,
                    walked.len(),
                    self.plan.handle.len()
                ),
            ));
        } else if !chain::is_contiguous(&walked) {
            rep.push(Finding::info("FAT.FRAGMENTED", "payload chain is not contiguous"));
        }
        Ok(())
    }

    fn check_entry(&mut self, rep: &mut VerifyReport) -> FsCheckerResult {
        let entry: FatDirEntry = self.io.read_struct(self.plan.slot_offset)?;
        if entry.as_bytes() != self.plan.entry.as_bytes() {
            rep.push(Finding::err(
                "DIR.ENTRY",
                format!("root slot {} does not hold the planned entry", self.plan.slot),
            ));
        }

        let needed = self.meta.units_for(entry.size() as u64);
        if needed != self.plan.handle.len() {
            rep.push(Finding::err(
                "DIR.SIZE",
                format!(
                    "size {} needs {needed} cluster(s), chain has {}",
                    entry.size(),
                    self.plan.handle.len()
                ),
            ));
        }

        if let Some(other) = self.plan.duplicate_of {
            rep.push(Finding::warn(
                "DIR.DUPLICATE",
                format!(
                    "{} also present in root slot {other}",
                    utils::decode_short_name(&self.plan.short_name)
                ),
            ));
        }
        Ok(())
    }
}
