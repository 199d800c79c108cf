// SPDX-License-Identifier: MIT

use std::io::{Read, Seek, SeekFrom, Write};
use std::ops::Range;

use fimpfs::common::fat::chain;
use fimpfs::fat::*;
use fimpfs::fs::fat::constant::*;

/// Geometry of a freshly formatted test volume.
struct Geometry {
    bytes_per_sector: u16,
    sectors_per_cluster: u8,
    num_fats: u8,
    root_entries: u16,
    total_sectors: u32,
    sectors_per_fat: u16,
}

// 10 MiB, 2 KiB clusters, 5101 clusters
const FAT16: Geometry = Geometry {
    bytes_per_sector: 512,
    sectors_per_cluster: 4,
    num_fats: 2,
    root_entries: 512,
    total_sectors: 20480,
    sectors_per_fat: 20,
};

// 1.44 MB floppy
const FAT12: Geometry = Geometry {
    bytes_per_sector: 512,
    sectors_per_cluster: 1,
    num_fats: 2,
    root_entries: 224,
    total_sectors: 2880,
    sectors_per_fat: 9,
};

// 61 clusters, 16 root slots, a single FAT
const TINY: Geometry = Geometry {
    bytes_per_sector: 512,
    sectors_per_cluster: 1,
    num_fats: 1,
    root_entries: 16,
    total_sectors: 64,
    sectors_per_fat: 1,
};

fn format(g: &Geometry) -> Vec<u8> {
    let bpb = FatBpb::new(
        g.bytes_per_sector,
        g.sectors_per_cluster,
        1,
        g.num_fats,
        g.root_entries,
        g.total_sectors,
        g.sectors_per_fat,
    );
    let meta = FatMeta::from_bpb(&bpb).expect("geometry");

    let mut buf = vec![0u8; g.total_sectors as usize * g.bytes_per_sector as usize];
    let mut io = MemBlockIO::new(&mut buf);
    io.write_struct(FAT_BPB_OFFSET, &bpb).unwrap();
    io.write_u16_at(FAT_SIGNATURE_OFFSET, FAT_SIGNATURE).unwrap();

    let reserved: &[u8] = match meta.kind {
        FatKind::Fat12 => &[FAT_MEDIA_FIXED, 0xFF, 0xFF],
        FatKind::Fat16 => &[FAT_MEDIA_FIXED, 0xFF, 0xFF, 0xFF],
    };
    for fi in 0..g.num_fats {
        io.write_at(meta.fat_offset(fi), reserved).unwrap();
    }
    buf
}

fn payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 256) as u8).collect()
}

fn inject(image: &mut [u8], name: &str, data: &[u8]) -> FsInjectorResult<FatPlan> {
    let mut io = MemBlockIO::new(image);
    let meta = FatMeta::read(&mut io)?;
    let mut src = data.to_vec();
    FatInjector::new(&mut io, &meta).inject(name, &mut MemBlockIO::new(&mut src), data.len() as u64)
}

/// Reads `name` back through the `fatfs` crate.
fn read_with_fatfs(image: &[u8], name: &str) -> Vec<u8> {
    let mut file = tempfile::tempfile().unwrap();
    file.write_all(image).unwrap();
    file.seek(SeekFrom::Start(0)).unwrap();

    let fs = fatfs::FileSystem::new(fscommon::BufStream::new(file), fatfs::FsOptions::new())
        .expect("fatfs rejected the image");
    let mut out = Vec::new();
    fs.root_dir()
        .open_file(name)
        .expect("file missing")
        .read_to_end(&mut out)
        .unwrap();
    out
}

fn fat_copies(image: &mut [u8]) -> Vec<Vec<u8>> {
    let mut io = MemBlockIO::new(image);
    let meta = FatMeta::read(&mut io).unwrap();
    (0..meta.num_fats)
        .map(|fi| {
            let mut fat = vec![0u8; meta.fat_size_bytes as usize];
            io.read_at(meta.fat_offset(fi), &mut fat).unwrap();
            fat
        })
        .collect()
}

#[test]
fn test_fat16_inject_reads_back_with_fatfs() {
    let mut image = format(&FAT16);
    let data = payload(10_000);

    let plan = inject(&mut image, "readme.txt", &data).unwrap();
    assert_eq!(plan.handle.len(), 5);
    assert_eq!(plan.entry.short_name(), *b"README  TXT");

    assert_eq!(read_with_fatfs(&image, "README.TXT"), data);
}

#[test]
fn test_fat12_inject_reads_back_with_fatfs() {
    let mut image = format(&FAT12);
    let data = payload(5 * 512 + 17);

    let plan = inject(&mut image, "boot.bin", &data).unwrap();
    assert_eq!(plan.handle.cluster_chain, vec![2, 3, 4, 5, 6, 7]);

    assert_eq!(read_with_fatfs(&image, "BOOT.BIN"), data);
}

#[test]
fn test_fat12_chain_around_used_clusters() {
    let mut image = format(&FAT12);
    {
        let mut io = MemBlockIO::new(&mut image);
        let meta = FatMeta::read(&mut io).unwrap();
        // Odd and even neighbours of the free clusters are already taken.
        chain::write_chain(&mut io, &meta, &[3]).unwrap();
        chain::write_chain(&mut io, &meta, &[6]).unwrap();
    }
    let data = payload(4 * 512);

    let plan = inject(&mut image, "frag.dat", &data).unwrap();
    assert_eq!(plan.handle.cluster_chain, vec![2, 4, 5, 7]);

    let mut io = MemBlockIO::new(&mut image);
    let meta = FatMeta::read(&mut io).unwrap();
    assert_eq!(chain::read_entry(&mut io, &meta, 3, 0), Ok(0xFFF));
    assert_eq!(chain::read_entry(&mut io, &meta, 6, 0), Ok(0xFFF));
    assert_eq!(chain::read_chain(&mut io, &meta, 2), Ok(vec![2, 4, 5, 7]));
    drop(io);

    assert_eq!(read_with_fatfs(&image, "FRAG.DAT"), data);
}

#[test]
fn test_fat_copies_stay_identical() {
    for g in [&FAT16, &FAT12, &TINY] {
        let mut image = format(g);
        inject(&mut image, "a.bin", &payload(3000)).unwrap();

        let copies = fat_copies(&mut image);
        assert_eq!(copies.len(), g.num_fats as usize);
        assert!(copies.iter().all(|c| *c == copies[0]));
    }
}

#[test]
fn test_zero_byte_file() {
    let mut image = format(&FAT16);

    let plan = inject(&mut image, "empty.txt", &[]).unwrap();
    assert_eq!(plan.handle.cluster_chain, vec![2]);
    assert_eq!(plan.entry.size(), 0);

    let mut io = MemBlockIO::new(&mut image);
    let meta = FatMeta::read(&mut io).unwrap();
    assert_eq!(chain::read_entry(&mut io, &meta, 2, 0), Ok(0xFFFF));
    drop(io);

    assert!(read_with_fatfs(&image, "EMPTY.TXT").is_empty());
}

#[test]
fn test_full_directory_leaves_image_untouched() {
    let mut image = format(&TINY);
    for i in 0..TINY.root_entries {
        inject(&mut image, &format!("f{i}"), b"x").unwrap();
    }
    let before = image.clone();

    let err = inject(&mut image, "late.txt", b"late").unwrap_err();
    assert_eq!(err, FsInjectorError::Allocator(FsAllocatorError::DirectoryFull));
    assert_eq!(image, before);
}

#[test]
fn test_insufficient_space_leaves_image_untouched() {
    let mut image = format(&TINY);
    let before = image.clone();

    let err = inject(&mut image, "big.bin", &payload(62 * 512)).unwrap_err();
    assert_eq!(
        err,
        FsInjectorError::Allocator(FsAllocatorError::InsufficientSpace {
            needed: 62,
            found: 61
        })
    );
    assert_eq!(image, before);
}

#[test]
fn test_deleted_slot_is_reused() {
    let mut image = format(&FAT16);
    inject(&mut image, "one", b"1").unwrap();
    inject(&mut image, "two", b"2").unwrap();
    {
        let mut io = MemBlockIO::new(&mut image);
        let meta = FatMeta::read(&mut io).unwrap();
        io.write_at(meta.root_entry_offset(0), &[FAT_ENTRY_DELETED]).unwrap();
    }

    let plan = inject(&mut image, "three", b"3").unwrap();
    assert_eq!(plan.slot, 0);
    assert_eq!(plan.duplicate_of, None);
}

#[test]
fn test_malformed_bpb_is_rejected() {
    let mut image = format(&TINY);
    image[13] = 0;
    let before = image.clone();

    let err = inject(&mut image, "a", b"a").unwrap_err();
    assert!(matches!(
        err,
        FsInjectorError::Parsing(FsParsingError::MalformedBpb(_))
    ));
    assert_eq!(image, before);
}

#[test]
fn test_checker_after_inject() {
    let mut image = format(&FAT16);
    let plan = inject(&mut image, "check.me", &payload(4097)).unwrap();

    let mut io = MemBlockIO::new(&mut image);
    let meta = FatMeta::read(&mut io).unwrap();
    let report = FatChecker::new(&mut io, &meta, &plan).check_all().unwrap();
    assert!(report.ok(), "{report}");
}

/// Fails the writes whose sequence numbers fall in `failing`.
struct FlakyIO<'a> {
    inner: MemBlockIO<'a>,
    writes: usize,
    failing: Range<usize>,
}

impl BlockIO for FlakyIO<'_> {
    fn write_at(&mut self, offset: u64, data: &[u8]) -> BlockIOResult {
        let n = self.writes;
        self.writes += 1;
        if self.failing.contains(&n) {
            return Err(BlockIOError::Other("device went away"));
        }
        self.inner.write_at(offset, data)
    }

    fn read_at(&mut self, offset: u64, buf: &mut [u8]) -> BlockIOResult {
        self.inner.read_at(offset, buf)
    }

    fn flush(&mut self) -> BlockIOResult {
        Ok(())
    }
}

#[test]
fn test_failed_commit_rolls_back() {
    let mut image = format(&FAT16);
    let before = image.clone();
    let mut data = payload(6000);

    // Six FAT writes and two clusters land, the third cluster fails.
    let mut io = FlakyIO {
        inner: MemBlockIO::new(&mut image),
        writes: 0,
        failing: 8..9,
    };
    let meta = FatMeta::read(&mut io).unwrap();
    let mut injector = FatInjector::new(&mut io, &meta);
    let plan = injector.plan("flaky.bin", 6000).unwrap();
    let err = injector
        .commit(&plan, &mut MemBlockIO::new(&mut data))
        .unwrap_err();
    assert_eq!(err, FsInjectorError::IO(BlockIOError::Other("device went away")));
    drop(injector);
    drop(io);

    assert_eq!(image, before);
}

#[test]
fn test_failed_rollback_is_reported() {
    let mut image = format(&FAT16);
    let mut data = payload(100);

    // Both FAT writes land, the payload write and every undo write fail.
    let mut io = FlakyIO {
        inner: MemBlockIO::new(&mut image),
        writes: 0,
        failing: 2..usize::MAX,
    };
    let meta = FatMeta::read(&mut io).unwrap();
    let mut injector = FatInjector::new(&mut io, &meta);
    let plan = injector.plan("x", 100).unwrap();

    let err = injector
        .commit(&plan, &mut MemBlockIO::new(&mut data))
        .unwrap_err();
    assert_eq!(
        err,
        FsInjectorError::RollbackFailed {
            cause: BlockIOError::Other("device went away"),
            rollback: BlockIOError::Other("device went away"),
        }
    );
}

#[test]
fn test_std_backend_end_to_end() {
    let image = format(&FAT12);
    let data = payload(700);

    let mut file = tempfile::tempfile().unwrap();
    file.write_all(&image).unwrap();
    let mut src_file = tempfile::tempfile().unwrap();
    src_file.write_all(&data).unwrap();

    {
        let mut io = StdBlockIO::new(&mut file);
        let mut src = StdBlockIO::new(&mut src_file);
        let meta = FatMeta::read(&mut io).unwrap();
        FatInjector::new(&mut io, &meta)
            .inject("std.bin", &mut src, data.len() as u64)
            .unwrap();
    }

    let mut out = Vec::new();
    file.seek(SeekFrom::Start(0)).unwrap();
    file.read_to_end(&mut out).unwrap();
    assert_eq!(read_with_fatfs(&out, "STD.BIN"), data);
}
