// SPDX-License-Identifier: MIT

mod utils;

use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use fimpfs::fat::*;
use fimpio::prelude::StdBlockIO;

use crate::utils::{LogLevel, log_level, set_log_level};

#[derive(Parser)]
#[command(
    name = "fimp",
    version,
    about = "Inject a single file into the root directory of a FAT12/16 image",
    long_about = None
)]
struct Cli {
    /// FAT12/16 image, modified in place
    image: PathBuf,

    /// File whose bytes are injected
    source: PathBuf,

    /// 8.3 name given to the file in the root directory
    name: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    set_log_level(LogLevel::from_env());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log_error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut image = OpenOptions::new()
        .read(true)
        .write(true)
        .open(&cli.image)
        .with_context(|| format!("cannot open image {}", cli.image.display()))?;
    let mut source = File::open(&cli.source)
        .with_context(|| format!("cannot open source {}", cli.source.display()))?;
    let size = source
        .metadata()
        .with_context(|| format!("cannot stat source {}", cli.source.display()))?
        .len();

    let mut io = StdBlockIO::new(&mut image);
    let meta = FatMeta::read(&mut io)
        .map_err(FsError::from)
        .with_context(|| format!("cannot read the boot sector of {}", cli.image.display()))?;
    log_geometry(&meta);
    if log_level() == LogLevel::Verbose {
        let free = FatAllocator::new(&mut io, &meta)
            .free_clusters()
            .map_err(FsError::from)
            .context("cannot count free clusters")?;
        log_verbose!("{free} free cluster(s) before injection");
    }

    let mut injector = FatInjector::new(&mut io, &meta);
    let plan = injector
        .plan(&cli.name, size)
        .with_context(|| format!("cannot place {} in {}", cli.name, cli.image.display()))?;

    if let Some(other) = plan.duplicate_of {
        log_info!(
            "{} already exists in root slot {other}, adding a second entry",
            plan.display_name()
        );
    }
    log_verbose!(
        "{} ({size} bytes) -> root slot {} @ {:#x}, {} cluster(s) from {}",
        plan.display_name(),
        plan.slot,
        plan.slot_offset,
        plan.handle.len(),
        plan.handle.cluster_id
    );

    let mut src = StdBlockIO::new(&mut source);
    injector
        .commit(&plan, &mut src)
        .with_context(|| format!("cannot write {} into {}", cli.name, cli.image.display()))?;
    log_info!("{} injected into {}", plan.display_name(), cli.image.display());

    if log_level() == LogLevel::Verbose {
        let report = FatChecker::new(&mut io, &meta, &plan)
            .check_all()
            .map_err(FsError::from)
            .context("post-write check failed to run")?;
        for finding in &report.findings {
            log_verbose!("{finding}");
        }
    }
    Ok(())
}

fn log_geometry(meta: &FatMeta) {
    log_verbose!(
        "{}: {} B/sector, {} B/cluster, {} cluster(s), {} FAT(s) of {} B",
        meta.kind.name(),
        meta.bytes_per_sector,
        meta.bytes_per_cluster,
        meta.cluster_count,
        meta.num_fats,
        meta.fat_size_bytes
    );
    log_verbose!(
        "FAT @ {:#x}, root @ {:#x} ({} slots), data @ {:#x}",
        meta.fat_offset_bytes,
        meta.root_dir_offset,
        meta.root_entry_count,
        meta.data_offset
    );
}
